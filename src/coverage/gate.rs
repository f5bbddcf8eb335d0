use anyhow::{bail, Result};
use serde_json::Number;
use std::{collections::BTreeMap, fmt};

use super::{report::CoverageReport, stat::Statistic};

/// Final line printed when the gate rejects the build
pub const TOO_LOW_MSG: &str = "Code coverage is too low";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Fail,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("OK!"),
            Self::Fail => f.write_str("Fail"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatResult {
    pub stat: Statistic,
    /// Percentage exactly as the report wrote it
    pub percent: Number,
    pub status: Status,
}

impl fmt::Display for StatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} coverage is {}: {}",
            self.stat,
            format_percent(&self.percent),
            self.status
        )
    }
}

/// Outcome of checking one report against the gate
#[derive(Debug, Clone)]
pub struct GateReport {
    /// Per-statistic results in alphabetical order
    pub results: Vec<StatResult>,
    /// Whether any file matched the target
    pub target_found: bool,
    fail_on_missing: bool,
}

impl GateReport {
    pub fn passed(&self) -> bool {
        let missing = !self.target_found && self.fail_on_missing;
        !missing && self.results.iter().all(|r| r.status == Status::Ok)
    }

    /// Lines to print on stdout, including the trailing failure message
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.results.iter().map(ToString::to_string).collect();
        if !self.passed() {
            lines.push(TOO_LOW_MSG.to_string());
        }
        lines
    }
}

#[derive(Clone, Debug)]
pub struct CoverageGate {
    target: String,
    min_coverage: f64,
    stats: Vec<Statistic>,
    fail_on_missing: bool,
}

impl CoverageGate {
    /// Creates a gate checking the default statistics of the file matching `target`
    ///
    /// # Arguments
    /// * `target` - Substring a report filename must contain to be checked
    /// * `min_coverage` - Minimum percentage each statistic must reach
    pub fn new<S: Into<String>>(target: S, min_coverage: f64) -> Self {
        Self {
            target: target.into(),
            min_coverage,
            stats: Statistic::DEFAULTS.to_vec(),
            fail_on_missing: false,
        }
    }

    /// Sets the statistics to check. An empty list keeps the current selection.
    pub fn with_stats(&mut self, stats: Vec<Statistic>) -> &mut Self {
        if !stats.is_empty() {
            self.stats = stats;
        }
        self
    }

    /// Treat a report without any matching file as a failure
    pub fn with_fail_on_missing(&mut self, enabled: bool) -> &mut Self {
        self.fail_on_missing = enabled;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Collects the percentages of the checked statistics for the target file
    ///
    /// Every file of the first export group whose name contains the target is
    /// visited; later matches overwrite earlier ones.
    ///
    /// # Errors
    /// * If the report has no export group
    /// * If a matching file lacks one of the checked statistics
    pub fn collect(&self, report: &CoverageReport) -> Result<BTreeMap<Statistic, Number>> {
        let mut coverage = BTreeMap::new();
        for file in report.first_export_files()? {
            if !file.filename.contains(&self.target) {
                continue;
            }
            for &stat in &self.stats {
                let Some(percent) = file.percent(stat.as_str()) else {
                    bail!(
                        "File '{}' has no '{}' coverage summary",
                        file.filename,
                        stat
                    );
                };
                coverage.insert(stat, percent);
            }
        }
        Ok(coverage)
    }

    /// Compares every collected statistic against the threshold
    ///
    /// # Errors
    /// * See [`CoverageGate::collect`]
    pub fn evaluate(&self, report: &CoverageReport) -> Result<GateReport> {
        let coverage = self.collect(report)?;
        let target_found = !coverage.is_empty();
        let results = coverage
            .into_iter()
            .map(|(stat, percent)| {
                let below = percent.as_f64().is_some_and(|p| p < self.min_coverage);
                StatResult {
                    stat,
                    percent,
                    status: if below { Status::Fail } else { Status::Ok },
                }
            })
            .collect();

        Ok(GateReport {
            results,
            target_found,
            fail_on_missing: self.fail_on_missing,
        })
    }
}

/// Renders a percentage the way the report typed it: integer tokens stay
/// bare (`100`), float tokens print like a float literal (`75.0`, `85.5`).
pub fn format_percent(value: &Number) -> String {
    match value.as_f64() {
        Some(float) if value.is_f64() => format_float(float),
        _ => value.to_string(),
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(files: &[(&str, f64, f64, f64)]) -> CoverageReport {
        let files: Vec<String> = files
            .iter()
            .map(|(name, lines, functions, regions)| {
                format!(
                    r#"{{"filename": "{name}", "summary": {{
                        "lines": {{"percent": {lines:?}}},
                        "functions": {{"percent": {functions:?}}},
                        "regions": {{"percent": {regions:?}}}
                    }}}}"#
                )
            })
            .collect();
        let json = format!(r#"{{"data": [{{"files": [{}]}}]}}"#, files.join(","));
        CoverageReport::parse(&json).unwrap()
    }

    #[test]
    fn test_failing_statistic() -> Result<()> {
        let report = report_with(&[("/src/phonebook.h", 85.0, 75.0, 90.0)]);
        let result = CoverageGate::new("phonebook.h", 80.0).evaluate(&report)?;

        assert!(!result.passed());
        assert_eq!(
            result.lines(),
            [
                "functions coverage is 75.0: Fail",
                "lines coverage is 85.0: OK!",
                "regions coverage is 90.0: OK!",
                "Code coverage is too low",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_all_statistics_pass() -> Result<()> {
        let report = report_with(&[("/src/phonebook.h", 85.0, 80.0, 90.0)]);
        let result = CoverageGate::new("phonebook.h", 80.0).evaluate(&report)?;

        assert!(result.passed());
        let lines = result.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.ends_with("OK!")));
        Ok(())
    }

    #[test]
    fn test_no_matching_file_passes_silently() -> Result<()> {
        let report = report_with(&[("/src/test.cpp", 10.0, 10.0, 10.0)]);
        let result = CoverageGate::new("phonebook.h", 80.0).evaluate(&report)?;

        assert!(result.passed());
        assert!(!result.target_found);
        assert!(result.lines().is_empty());
        Ok(())
    }

    #[test]
    fn test_no_matching_file_strict() -> Result<()> {
        let report = report_with(&[("/src/test.cpp", 10.0, 10.0, 10.0)]);
        let result = CoverageGate::new("phonebook.h", 80.0)
            .with_fail_on_missing(true)
            .evaluate(&report)?;

        assert!(!result.passed());
        assert_eq!(result.lines(), [TOO_LOW_MSG]);
        Ok(())
    }

    #[test]
    fn test_last_match_wins() -> Result<()> {
        let report = report_with(&[
            ("/a/phonebook.h", 10.0, 10.0, 10.0),
            ("/src/test.cpp", 0.0, 0.0, 0.0),
            ("/b/phonebook.h", 95.0, 96.0, 97.0),
        ]);
        let coverage = CoverageGate::new("phonebook.h", 80.0).collect(&report)?;

        assert_eq!(coverage[&Statistic::Lines].as_f64(), Some(95.0));
        assert_eq!(coverage[&Statistic::Functions].as_f64(), Some(96.0));
        assert_eq!(coverage[&Statistic::Regions].as_f64(), Some(97.0));
        Ok(())
    }

    #[test]
    fn test_custom_stats() -> Result<()> {
        let report = report_with(&[("/src/phonebook.h", 50.0, 100.0, 50.0)]);
        let result = CoverageGate::new("phonebook.h", 80.0)
            .with_stats(vec![Statistic::Functions])
            .evaluate(&report)?;

        assert!(result.passed());
        assert_eq!(result.lines(), ["functions coverage is 100.0: OK!"]);
        Ok(())
    }

    #[test]
    fn test_missing_statistic_is_error() {
        let report = report_with(&[("/src/phonebook.h", 90.0, 90.0, 90.0)]);
        let err = CoverageGate::new("phonebook.h", 80.0)
            .with_stats(vec![Statistic::Branches])
            .evaluate(&report)
            .unwrap_err();
        assert!(err.to_string().contains("'branches'"));
    }

    #[test]
    fn test_threshold_is_inclusive() -> Result<()> {
        let report = report_with(&[("/src/phonebook.h", 80.0, 80.0, 79.99)]);
        let result = CoverageGate::new("phonebook.h", 80.0).evaluate(&report)?;

        let statuses: Vec<_> = result.results.iter().map(|r| r.status).collect();
        assert_eq!(statuses, [Status::Ok, Status::Ok, Status::Fail]);
        Ok(())
    }

    #[test]
    fn test_integer_tokens_print_bare() -> Result<()> {
        let report = CoverageReport::parse(
            r#"{"data": [{"files": [{"filename": "/src/phonebook.h", "summary": {
                "lines": {"percent": 100},
                "functions": {"percent": 75},
                "regions": {"percent": 85.5}
            }}]}]}"#,
        )?;
        let result = CoverageGate::new("phonebook.h", 80.0).evaluate(&report)?;

        assert_eq!(
            result.lines(),
            [
                "functions coverage is 75: Fail",
                "lines coverage is 100: OK!",
                "regions coverage is 85.5: OK!",
                "Code coverage is too low",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_partial_unrelated_entries_are_ignored() -> Result<()> {
        let report = CoverageReport::parse(
            r#"{"data": [{"files": [
                {"filename": "/src/other.cpp", "summary": {"lines": {"count": 0}}},
                {"filename": "/src/phonebook.h", "summary": {
                    "lines": {"percent": 90},
                    "functions": {"percent": 90},
                    "regions": {"percent": 90}
                }},
                {"filename": "/src/main.cpp"}
            ]}]}"#,
        )?;
        let result = CoverageGate::new("phonebook.h", 80.0).evaluate(&report)?;

        assert!(result.passed());
        assert_eq!(
            result.lines(),
            [
                "functions coverage is 90: OK!",
                "lines coverage is 90: OK!",
                "regions coverage is 90: OK!",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_matching_entry_without_percent_is_error() -> Result<()> {
        let report = CoverageReport::parse(
            r#"{"data": [{"files": [{"filename": "/src/phonebook.h", "summary": {
                "lines": {"count": 3},
                "functions": {"percent": 90},
                "regions": {"percent": 90}
            }}]}]}"#,
        )?;
        let err = CoverageGate::new("phonebook.h", 80.0)
            .evaluate(&report)
            .unwrap_err();
        assert!(err.to_string().contains("'lines'"));
        Ok(())
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(&Number::from(100)), "100");
        assert_eq!(format_percent(&Number::from(0)), "0");
        assert_eq!(format_percent(&Number::from(-3)), "-3");

        let float = |v: f64| Number::from_f64(v).unwrap();
        assert_eq!(format_percent(&float(75.0)), "75.0");
        assert_eq!(format_percent(&float(100.0)), "100.0");
        assert_eq!(format_percent(&float(85.714_285_714_285_71)), "85.71428571428571");
        assert_eq!(format_percent(&float(66.5)), "66.5");
    }
}
