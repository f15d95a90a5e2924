//! CLI argument definitions for the survey join runner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cebu_cli::recipe::Delimiter;

#[derive(Parser)]
#[command(
    name = "cebu",
    version,
    about = "Join Cebu survey extracts into an analysis table",
    long_about = "Load the Cebu mother baseline survey extracts (tab-delimited),\n\
                  keep the variables of interest from each file, and inner-join\n\
                  them on the woman and barangay identifiers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a recipe over a folder of survey extracts.
    Run(RunArgs),

    /// List the built-in recipes.
    Recipes,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Folder containing the extract files (mbirth2.tab, mbase2.tab, ...).
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Built-in recipe to run.
    #[arg(long = "recipe", value_enum, default_value = "birth")]
    pub recipe: RecipeArg,

    /// JSON recipe file (overrides --recipe).
    #[arg(long = "recipe-file", value_name = "PATH")]
    pub recipe_file: Option<PathBuf>,

    /// Write the joined table to this file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Delimiter of the output file.
    #[arg(long = "output-delimiter", value_enum, default_value = "tab")]
    pub output_delimiter: DelimiterArg,

    /// Number of joined rows to print after the summary.
    #[arg(long = "preview", value_name = "ROWS", default_value_t = 0)]
    pub preview: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RecipeArg {
    Birth,
    Household,
}

impl RecipeArg {
    pub fn name(self) -> &'static str {
        match self {
            Self::Birth => "birth",
            Self::Household => "household",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DelimiterArg {
    Tab,
    Comma,
}

impl From<DelimiterArg> for Delimiter {
    fn from(value: DelimiterArg) -> Self {
        match value {
            DelimiterArg::Tab => Self::Tab,
            DelimiterArg::Comma => Self::Comma,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
