pub mod gate;
pub mod report;
pub mod stat;

pub use gate::{CoverageGate, GateReport, StatResult, Status};
pub use report::CoverageReport;
pub use stat::Statistic;
