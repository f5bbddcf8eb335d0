use anyhow::Result;
use clap::Parser;
use covgate::{
    argument_aggregator::ArgumentAggregator,
    cli::Cli,
    commands::{check::CheckCommand, Command},
};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli_args = Cli::parse();
    let mut arg_aggregator = ArgumentAggregator::new();
    arg_aggregator.load(cli_args.check.config.as_ref())?;

    CheckCommand::new(&cli_args.check, &arg_aggregator).execute()
}
