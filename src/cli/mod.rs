use clap::Parser;

pub mod args;
pub mod config;
mod constants;

pub use args::CheckArgs;
pub use config::{Config, ConfigMerge, GateConfig};
pub use constants::{DEFAULT_CONFIG, DEFAULT_TARGET};

/// Command-line interface for the coverage gate
#[derive(Parser, Debug, Clone)]
#[command(name = "covgate")]
#[command(author = "C.K. <admin@0x434b.dev>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fail a build when llvm-cov coverage of a file is below a threshold")]
pub struct Cli {
    #[command(flatten)]
    pub check: CheckArgs,
}
