use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

/// Coverage statistics reported per file by `llvm-cov export`.
///
/// Variants are declared in alphabetical order so that the derived `Ord`
/// matches the order in which results are printed.
#[derive(ValueEnum, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    /// Branch coverage
    Branches,
    /// Function coverage
    Functions,
    /// Template/generic instantiation coverage
    Instantiations,
    /// Line coverage
    Lines,
    /// Region coverage
    Regions,
}

impl Statistic {
    /// Statistics checked when neither the command line nor the config names any
    pub const DEFAULTS: [Self; 3] = [Self::Lines, Self::Functions, Self::Regions];

    /// Key of this statistic in a file's `summary` object
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Branches => "branches",
            Self::Functions => "functions",
            Self::Instantiations => "instantiations",
            Self::Lines => "lines",
            Self::Regions => "regions",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
