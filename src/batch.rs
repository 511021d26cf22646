use crate::error::{Result, SlugError};
use crate::slug::{make_unique, SlugOptions};
use std::borrow::Cow;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::{self, AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, info, warn};

/// Where batch input lines come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `None` or `-` means stdin
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path),
            _ => InputSource::Stdin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertStatus {
    Converted { slug: String },
    /// Conversion produced nothing and the fallback filled in
    FellBack { slug: String },
    Empty,
    Skipped,
}

impl ConvertStatus {
    pub fn slug(&self) -> Option<&str> {
        match self {
            ConvertStatus::Converted { slug } | ConvertStatus::FellBack { slug } => Some(slug),
            ConvertStatus::Empty | ConvertStatus::Skipped => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConvertStatus::Converted { .. } => "converted",
            ConvertStatus::FellBack { .. } => "fell_back",
            ConvertStatus::Empty => "empty",
            ConvertStatus::Skipped => "skipped",
        }
    }
}

/// One input line and what became of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// 1-based line number in the source
    pub line: usize,
    pub input: String,
    pub status: ConvertStatus,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchSettings {
    pub skip_blank: bool,
    pub unique: bool,
}

/// Converts many inputs with shared options, tracking slugs already handed out
pub struct BatchConverter {
    options: SlugOptions,
    settings: BatchSettings,
    taken: HashSet<String>,
}

impl BatchConverter {
    pub fn new(options: SlugOptions, settings: BatchSettings) -> Self {
        Self {
            options,
            settings,
            taken: HashSet::new(),
        }
    }

    /// Convert every input in order
    pub fn convert_all<I>(&mut self, inputs: I) -> Vec<Conversion>
    where
        I: IntoIterator<Item = String>,
    {
        inputs
            .into_iter()
            .enumerate()
            .map(|(idx, input)| {
                let status = self.convert_one(&input);
                Conversion {
                    line: idx + 1,
                    input,
                    status,
                }
            })
            .collect()
    }

    /// Convert a single input
    pub fn convert_one(&mut self, input: &str) -> ConvertStatus {
        if self.settings.skip_blank && input.trim().is_empty() {
            return ConvertStatus::Skipped;
        }

        let base = self.options.base_slug(input);
        let (slug, fell_back) = self.options.with_fallback(input, base);

        if slug.is_empty() {
            debug!("Empty slug for {:?}", input);
            return ConvertStatus::Empty;
        }

        let slug = if self.settings.unique {
            make_unique(&slug, &self.taken)
        } else {
            slug
        };
        self.taken.insert(slug.clone());

        debug!("{:?} -> {}", input, slug);

        if fell_back {
            ConvertStatus::FellBack { slug }
        } else {
            ConvertStatus::Converted { slug }
        }
    }
}

/// Read all lines from a file or stdin
pub async fn read_lines(source: &InputSource) -> Result<Vec<String>> {
    match source {
        InputSource::Stdin => collect_lines(io::stdin()).await,
        InputSource::File(path) => {
            let file = fs::File::open(path).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SlugError::InputNotFound(path.clone())
                } else {
                    SlugError::Io(e)
                }
            })?;
            collect_lines(file).await
        }
    }
}

/// Invalid UTF-8 is replaced with U+FFFD per line instead of failing the batch
async fn collect_lines<R>(reader: R) -> Result<Vec<String>>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut collected = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let mut line = buf.as_slice();
        if let Some(stripped) = line.strip_suffix(b"\n") {
            line = stripped;
            if let Some(stripped) = line.strip_suffix(b"\r") {
                line = stripped;
            }
        }

        let text = String::from_utf8_lossy(line);
        if matches!(text, Cow::Owned(_)) {
            warn!(
                "Line {} is not valid UTF-8, replaced bad bytes",
                collected.len() + 1
            );
        }
        collected.push(text.into_owned());
    }

    Ok(collected)
}

/// Counts per status, for the end-of-batch log line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub fell_back: usize,
    pub empty: usize,
    pub skipped: usize,
}

impl From<&[Conversion]> for BatchSummary {
    fn from(conversions: &[Conversion]) -> Self {
        let mut summary = Self::default();
        for conversion in conversions {
            match conversion.status {
                ConvertStatus::Converted { .. } => summary.converted += 1,
                ConvertStatus::FellBack { .. } => summary.fell_back += 1,
                ConvertStatus::Empty => summary.empty += 1,
                ConvertStatus::Skipped => summary.skipped += 1,
            }
        }
        summary
    }
}

impl BatchSummary {
    pub fn log(&self) {
        info!(
            "Batch done: {} converted, {} fell back, {} empty, {} skipped",
            self.converted, self.fell_back, self.empty, self.skipped
        );
    }
}
