mod check;

pub use check::CheckArgs;
