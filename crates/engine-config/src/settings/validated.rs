use crate::settings::{TableMode, batch_size::BatchSize, error::SettingsError};
use std::path::{Path, PathBuf};

pub const DEFAULT_TABLE: &str = "data";

/// Immutable, validated configuration for one load run.
#[derive(Debug, Clone)]
pub struct LoadSettings {
    /// Newline-delimited JSON file to read
    pub input: PathBuf,
    /// SQLite database file, created if absent
    pub output: PathBuf,
    /// Destination table name
    pub table: String,
    /// Rows per committed transaction
    pub batch_size: BatchSize,
    /// How the table is prepared before loading
    pub mode: TableMode,
    /// Where to write the JSON run summary, if anywhere
    pub report: Option<PathBuf>,
}

impl LoadSettings {
    pub fn builder() -> LoadSettingsBuilder {
        LoadSettingsBuilder::default()
    }

    pub fn from_builder(builder: LoadSettingsBuilder) -> Result<Self, SettingsError> {
        Ok(Self {
            input: builder.input.ok_or(SettingsError::Missing("input"))?,
            output: builder.output.ok_or(SettingsError::Missing("output"))?,
            table: builder.table.unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            batch_size: builder.batch_size.unwrap_or_default(),
            mode: builder.mode.unwrap_or_default(),
            report: builder.report,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.get()
    }

    pub fn mode(&self) -> TableMode {
        self.mode
    }

    pub fn report(&self) -> Option<&Path> {
        self.report.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct LoadSettingsBuilder {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub table: Option<String>,
    pub batch_size: Option<BatchSize>,
    pub mode: Option<TableMode>,
    pub report: Option<PathBuf>,
}

impl LoadSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn batch_size(mut self, batch_size: BatchSize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn mode(mut self, mode: TableMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn report(mut self, report: impl Into<PathBuf>) -> Self {
        self.report = Some(report.into());
        self
    }

    pub fn build(self) -> Result<LoadSettings, SettingsError> {
        LoadSettings::from_builder(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = LoadSettings::builder()
            .input("in.jsonl")
            .output("out.db")
            .build()
            .unwrap();

        assert_eq!(settings.table(), "data");
        assert_eq!(settings.batch_size(), 1000);
        assert_eq!(settings.mode(), TableMode::Append);
        assert!(settings.report().is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let settings = LoadSettings::builder()
            .input("in.jsonl")
            .output("out.db")
            .table("posts")
            .batch_size(BatchSize::new(5).unwrap())
            .mode(TableMode::Replace)
            .report("run.json")
            .build()
            .unwrap();

        assert_eq!(settings.table(), "posts");
        assert_eq!(settings.batch_size(), 5);
        assert_eq!(settings.mode(), TableMode::Replace);
        assert_eq!(settings.report(), Some(Path::new("run.json")));
    }

    #[test]
    fn test_missing_output() {
        let err = LoadSettings::builder().input("in.jsonl").build().unwrap_err();
        assert!(matches!(err, SettingsError::Missing("output")));
    }
}
