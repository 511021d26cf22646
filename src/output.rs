use crate::batch::{Conversion, ConvertStatus};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One slug per line
    #[default]
    Plain,
    /// `line<TAB>slug<TAB>input`
    Tsv,
    /// JSON lines
    Json,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    line: usize,
    input: &'a str,
    slug: &'a str,
    status: &'static str,
}

/// Render conversions in the given format, newline-terminated
pub fn render(conversions: &[Conversion], format: OutputFormat) -> Result<String> {
    let mut out = String::new();

    for conversion in conversions {
        match format {
            OutputFormat::Plain => match &conversion.status {
                ConvertStatus::Skipped => continue,
                status => {
                    out.push_str(status.slug().unwrap_or_default());
                    out.push('\n');
                }
            },
            OutputFormat::Tsv => {
                if conversion.status == ConvertStatus::Skipped {
                    continue;
                }
                out.push_str(&format!(
                    "{}\t{}\t{}\n",
                    conversion.line,
                    conversion.status.slug().unwrap_or_default(),
                    flatten_whitespace(&conversion.input)
                ));
            }
            OutputFormat::Json => {
                let record = JsonRecord {
                    line: conversion.line,
                    input: &conversion.input,
                    slug: conversion.status.slug().unwrap_or_default(),
                    status: conversion.status.label(),
                };
                out.push_str(&serde_json::to_string(&record)?);
                out.push('\n');
            }
        }
    }

    Ok(out)
}

/// Render and write in one go
pub fn write_to<W: Write>(
    writer: &mut W,
    conversions: &[Conversion],
    format: OutputFormat,
) -> Result<()> {
    let rendered = render(conversions, format)?;
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Tabs and newlines would break a TSV row
fn flatten_whitespace(input: &str) -> String {
    input
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Conversion> {
        vec![
            Conversion {
                line: 1,
                input: "Đà Nẵng".to_string(),
                status: ConvertStatus::Converted {
                    slug: "da-nang".to_string(),
                },
            },
            Conversion {
                line: 2,
                input: String::new(),
                status: ConvertStatus::Skipped,
            },
            Conversion {
                line: 3,
                input: "---".to_string(),
                status: ConvertStatus::Empty,
            },
            Conversion {
                line: 4,
                input: "?!\tx".to_string(),
                status: ConvertStatus::FellBack {
                    slug: "untitled".to_string(),
                },
            },
        ]
    }

    #[test]
    fn test_render_plain() {
        let out = render(&sample(), OutputFormat::Plain).unwrap();
        assert_eq!(out, "da-nang\n\nuntitled\n");
    }

    #[test]
    fn test_render_tsv() {
        let out = render(&sample(), OutputFormat::Tsv).unwrap();
        assert_eq!(out, "1\tda-nang\tĐà Nẵng\n3\t\t---\n4\tuntitled\t?! x\n");
    }

    #[test]
    fn test_render_json() {
        let out = render(&sample(), OutputFormat::Json).unwrap();
        let rows: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["slug"], "da-nang");
        assert_eq!(rows[0]["input"], "Đà Nẵng");
        assert_eq!(rows[0]["status"], "converted");
        assert_eq!(rows[1]["status"], "skipped");
        assert_eq!(rows[2]["slug"], "");
        assert_eq!(rows[3]["status"], "fell_back");
    }

    #[test]
    fn test_write_to() {
        let mut buf = Vec::new();
        write_to(&mut buf, &sample()[..1], OutputFormat::Plain).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "da-nang\n");
    }
}
