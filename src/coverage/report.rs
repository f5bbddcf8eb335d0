use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::{fs, path::Path};

/// Top-level document produced by `llvm-cov export -format=text`
#[derive(Deserialize, Debug, Clone)]
pub struct CoverageReport {
    /// One entry per exported object set
    pub data: Vec<ExportEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExportEntry {
    /// Per-file summaries
    pub files: Vec<FileEntry>,
}

/// A file entry of an export group
///
/// `summary` is kept as raw JSON: only entries matching the gate's target are
/// ever inspected, so unrelated files may carry any shape of summary.
#[derive(Deserialize, Debug, Clone)]
pub struct FileEntry {
    /// Source file path as recorded by the instrumented build
    pub filename: String,
    /// Statistic name (`lines`, `functions`, ...) to its summary object
    #[serde(default)]
    pub summary: Map<String, Value>,
}

impl CoverageReport {
    /// Reads and parses an `llvm-cov export` JSON report
    ///
    /// # Errors
    /// * If the file cannot be read
    /// * If the content is not a valid coverage export
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read coverage report: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse coverage report: {}", path.display()))
    }

    /// Parses an `llvm-cov export` JSON document held in memory
    ///
    /// # Errors
    /// * If the content is not a valid coverage export
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Files of the first export group, which is the only one the gate looks at
    ///
    /// # Errors
    /// * If the report contains no export group
    pub fn first_export_files(&self) -> Result<&[FileEntry]> {
        match self.data.first() {
            Some(entry) => Ok(&entry.files),
            None => bail!("Coverage report contains no export data"),
        }
    }
}

impl FileEntry {
    /// `percent` of the given statistic, as written in the report
    pub fn percent(&self, stat: &str) -> Option<Number> {
        match self.summary.get(stat)?.get("percent")? {
            Value::Number(n) => Some(n.clone()),
            _ => None,
        }
    }
}
