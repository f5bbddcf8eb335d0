use clap::{ArgAction, Args};
use std::path::PathBuf;

use crate::coverage::Statistic;

#[derive(Args, Clone, Debug, Default)]
pub struct CheckArgs {
    /// Minimum coverage percentage
    #[arg(
        value_name = "MIN_COVERAGE",
        help = "Minimum coverage percentage every checked statistic must reach",
        allow_negative_numbers = true
    )]
    pub min_coverage: f64,

    /// Coverage report
    #[arg(
        value_name = "REPORT",
        help = "Path to a JSON report produced by `llvm-cov export`"
    )]
    pub report: PathBuf,

    /// Filename substring selecting the file to check
    #[arg(
        short = 'f',
        long,
        help = "Filename substring selecting the file to check [default: phonebook.h]"
    )]
    pub target: Option<String>,

    /// Statistics to check
    #[clap(value_enum)]
    #[arg(
        short = 's',
        long = "stat",
        help = "Statistic to check, may be repeated [default: lines, functions, regions]"
    )]
    pub stats: Vec<Statistic>,

    /// Fail when no file in the report matches the target.
    /// Enabling it in the config file cannot be undone from the command line.
    #[arg(
        long,
        help = "Fail when no file in the report matches the target (also enabled by `fail_on_missing = true` in the config)",
        action = ArgAction::SetTrue
    )]
    pub fail_on_missing: bool,

    /// Path to a TOML config file
    #[arg(long, help = "Path to TOML config file")]
    pub config: Option<PathBuf>,
}
