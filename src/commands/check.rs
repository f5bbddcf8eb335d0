use anyhow::Result;
use std::{
    io::{self, Write},
    process::ExitCode,
};

use crate::{
    argument_aggregator::ArgumentAggregator,
    cli::{CheckArgs, DEFAULT_TARGET},
    commands::Command,
    coverage::{CoverageGate, CoverageReport},
};

pub struct CheckCommand<'a> {
    args: &'a CheckArgs,
    arg_aggregator: &'a ArgumentAggregator,
}

impl<'a> CheckCommand<'a> {
    pub fn new(args: &'a CheckArgs, arg_aggregator: &'a ArgumentAggregator) -> Self {
        Self {
            args,
            arg_aggregator,
        }
    }

    /// Runs the gate and writes the result lines to `out`
    ///
    /// Returns whether the report passed the gate.
    ///
    /// # Errors
    /// * If the report cannot be loaded or lacks a checked statistic
    /// * If writing to `out` fails
    pub fn run<W: Write>(&self, out: &mut W) -> Result<bool> {
        let merged_args = self.arg_aggregator.merge_check_args(self.args);
        let target = merged_args.target.as_deref().unwrap_or(DEFAULT_TARGET);

        let report = CoverageReport::load(&merged_args.report)?;
        let mut gate = CoverageGate::new(target, merged_args.min_coverage);
        gate.with_stats(merged_args.stats.clone())
            .with_fail_on_missing(merged_args.fail_on_missing);

        let result = gate.evaluate(&report)?;
        if !result.target_found {
            eprintln!(
                "[-] Warning: no file matching '{}' found in {}",
                gate.target(),
                merged_args.report.display()
            );
        }

        for line in result.lines() {
            writeln!(out, "{line}")?;
        }
        Ok(result.passed())
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self) -> Result<ExitCode> {
        let stdout = io::stdout();
        let passed = self.run(&mut stdout.lock())?;
        Ok(if passed {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}
