pub mod argument_aggregator;
pub mod cli;
pub mod commands;
pub mod coverage;
