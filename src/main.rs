mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ConvertArgs, Format};
use console::style;
use std::io::{self, Write};
use std::process;
use vnslug::batch::{read_lines, BatchConverter, BatchSettings, BatchSummary, InputSource};
use vnslug::output::{self, OutputFormat};
use vnslug::{Fallback, Slug, SlugError, SlugOptions};

#[tokio::main]
async fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    vnslug::logging::init(cli.verbose, cli.quiet);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            exit_code_for(&err)
        }
    };

    process::exit(code);
}

async fn run(cli: Cli) -> Result<exitcode::ExitCode> {
    match cli.command {
        Commands::Convert {
            text,
            join,
            strict,
            opts,
        } => convert(text, join, strict, opts),
        Commands::Batch {
            file,
            skip_blank,
            unique,
            opts,
        } => batch(file, BatchSettings { skip_blank, unique }, opts).await,
        Commands::Check { slug } => Ok(check(&slug)),
    }
}

fn convert(
    text: Vec<String>,
    join: bool,
    strict: bool,
    opts: ConvertArgs,
) -> Result<exitcode::ExitCode> {
    convert_to(&mut io::stdout().lock(), text, join, strict, &opts)
}

fn convert_to<W: Write>(
    writer: &mut W,
    text: Vec<String>,
    join: bool,
    strict: bool,
    opts: &ConvertArgs,
) -> Result<exitcode::ExitCode> {
    let (options, format) = resolve(opts)?;
    let inputs = if join { vec![text.join(" ")] } else { text };

    let mut converter = BatchConverter::new(options, BatchSettings::default());
    let conversions = converter.convert_all(inputs);

    output::write_to(writer, &conversions, format)?;

    let any_empty = conversions.iter().any(|c| c.status.slug().is_none());
    if strict && any_empty {
        eprintln!(
            "{} conversion produced an empty slug",
            style("error:").red().bold()
        );
        return Ok(exitcode::DATAERR);
    }

    Ok(exitcode::OK)
}

async fn batch(
    file: Option<std::path::PathBuf>,
    settings: BatchSettings,
    opts: ConvertArgs,
) -> Result<exitcode::ExitCode> {
    let (options, format) = resolve(&opts)?;
    let source = InputSource::from_arg(file);

    let lines = read_lines(&source)
        .await
        .with_context(|| format!("Failed to read {:?}", source))?;

    let mut converter = BatchConverter::new(options, settings);
    let conversions = converter.convert_all(lines);
    BatchSummary::from(conversions.as_slice()).log();

    output::write_to(&mut io::stdout().lock(), &conversions, format)?;

    Ok(exitcode::OK)
}

fn check(candidates: &[String]) -> exitcode::ExitCode {
    let mut code = exitcode::OK;

    for candidate in candidates {
        match Slug::parse(candidate.as_str()) {
            Ok(_) => println!("{} {}", style("ok").green(), candidate),
            Err(e) => {
                println!("{} {}: {}", style("invalid").red(), candidate, e);
                code = exitcode::DATAERR;
            }
        }
    }

    code
}

/// Turn CLI flags into library options
fn resolve(opts: &ConvertArgs) -> Result<(SlugOptions, OutputFormat)> {
    let fallback: Fallback = opts
        .fallback
        .parse()
        .with_context(|| format!("Invalid --fallback {:?}", opts.fallback))?;

    let format = match opts.format {
        Format::Plain => OutputFormat::Plain,
        Format::Tsv => OutputFormat::Tsv,
        Format::Json => OutputFormat::Json,
    };

    let options = SlugOptions {
        max_len: opts.max_len,
        fallback,
    };

    Ok((options, format))
}

fn exit_code_for(err: &anyhow::Error) -> exitcode::ExitCode {
    match err.downcast_ref::<SlugError>() {
        Some(SlugError::InputNotFound(_)) => exitcode::NOINPUT,
        Some(SlugError::Io(_)) => exitcode::IOERR,
        Some(e) if e.is_validation() => exitcode::USAGE,
        Some(_) => exitcode::SOFTWARE,
        None => exitcode::SOFTWARE,
    }
}
