use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Rename batches of files by pattern, shifting numbers and keeping zero padding
#[derive(Parser, Debug)]
#[command(name = "batchren")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = "Examples:
  batchren img005 img010               shift img005, img006, ... to img010, img011, ...
  batchren ~/photos 'IMG_*' 'trip_*'   swap a prefix in another directory
  batchren '*.png' '*.jpg'             change an extension

Run without arguments to choose a directory and patterns interactively.")]
pub struct Cli {
    /// [DIRECTORY] PATTERN REPLACEMENT
    #[arg(value_name = "ARGS", num_args = 0..=3)]
    pub args: Vec<String>,

    /// Show the plan without renaming anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Apply without asking for confirmation
    #[arg(
        short = 'y',
        long = "yes",
        env = "BATCHREN_YES",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub yes: bool,

    /// Preview format (defaults to the config value, then table)
    #[arg(long, value_enum)]
    pub preview: Option<PreviewArg>,

    /// Output format for the final result
    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Extensions to consider, comma separated (e.g. jpg,png)
    #[arg(long = "ext", value_delimiter = ',', value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Append apply steps to this log file
    #[arg(long = "log", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output (any non-empty NO_COLOR also disables it)
    #[arg(
        long,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Remove this text from the end of each renamed stem
    #[arg(long, value_name = "TEXT")]
    pub strip_suffix: Option<String>,

    /// Pad every number in the new names with zeros to N digits
    #[arg(long, value_name = "N", conflicts_with = "strip_zeros")]
    pub pad: Option<usize>,

    /// Remove leading zeros from every number in the new names
    #[arg(long)]
    pub strip_zeros: bool,

    /// Print per-file diagnostics after the preview
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Write the plan to this file instead of renaming
    #[arg(long, value_name = "PATH", conflicts_with = "apply_plan")]
    pub plan_out: Option<PathBuf>,

    /// Apply a plan previously written with --plan-out
    #[arg(long, value_name = "PATH")]
    pub apply_plan: Option<PathBuf>,

    /// Print help (same as --help)
    #[arg(long, action = ArgAction::Help)]
    pub info: Option<bool>,

    /// Print version
    #[arg(short = 'V', long)]
    pub version: bool,
}

/// What the positional arguments ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Pattern and replacement in the current directory
    CurrentDir { pattern: String, replacement: String },
    /// Pattern and replacement in the given directory
    Directory {
        directory: PathBuf,
        pattern: String,
        replacement: String,
    },
    /// Too few arguments: ask for them
    Interactive,
}

impl Cli {
    pub fn target(&self) -> Target {
        match self.args.as_slice() {
            [pattern, replacement] => Target::CurrentDir {
                pattern: pattern.clone(),
                replacement: replacement.clone(),
            },
            [directory, pattern, replacement] => Target::Directory {
                directory: PathBuf::from(directory),
                pattern: pattern.clone(),
                replacement: replacement.clone(),
            },
            _ => Target::Interactive,
        }
    }
}

/// Rewrite the DOS-style `/?` into `--help` so clap prints usage.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| {
            if arg == "/?" {
                "--help".to_string()
            } else {
                arg
            }
        })
        .collect()
}
