use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Turn titles and labels into URL-safe slugs
#[derive(Parser, Debug)]
#[command(name = "vnslug", version, about, long_about = None)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Slugify each argument
    Convert {
        /// Text to convert
        #[arg(required = true)]
        text: Vec<String>,

        /// Treat all arguments as one title
        #[arg(short, long)]
        join: bool,

        /// Fail when a slug comes out empty
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        opts: ConvertArgs,
    },

    /// Slugify each line of a file, or stdin
    Batch {
        /// Input file ("-" or absent for stdin)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: Option<PathBuf>,

        /// Ignore blank lines instead of emitting empty slugs
        #[arg(long)]
        skip_blank: bool,

        /// Suffix repeated slugs with -2, -3, ...
        #[arg(short, long)]
        unique: bool,

        #[command(flatten)]
        opts: ConvertArgs,
    },

    /// Check that each argument is already a valid slug
    Check {
        #[arg(required = true)]
        slug: Vec<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Cut slugs to at most this many characters (fallback slugs are not cut)
    #[arg(short, long, value_name = "N")]
    pub max_len: Option<usize>,

    /// What to emit for an empty slug: "none", "uuid", or a literal slug
    #[arg(short, long, default_value = "none", value_name = "POLICY")]
    pub fallback: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Plain)]
    pub format: Format,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Plain,
    Tsv,
    Json,
}
