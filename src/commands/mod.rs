pub mod check;

use anyhow::Result;
use std::process::ExitCode;

pub trait Command {
    /// Execute the command
    ///
    /// # Errors
    /// * If the command could not be executed
    fn execute(&self) -> Result<ExitCode>;
}
