use crate::settings::{TableMode, validated::LoadSettings};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters accumulated while a load runs.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunCounters {
    /// Non-blank lines pulled from the input
    pub lines_read: u64,
    pub blank_lines: u64,
    /// Rows durably committed to the table
    pub rows_written: u64,
    /// Lines skipped because they were not a JSON object
    pub decode_errors: u64,
    pub batches_committed: u64,
}

/// Outcome of a completed load, written as JSON when a report path is set.
#[derive(Serialize, Debug, Clone)]
pub struct RunSummary {
    pub input: String,
    pub output: String,
    pub table: String,
    pub mode: TableMode,
    pub batch_size: usize,
    #[serde(flatten)]
    pub counters: RunCounters,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub rows_per_sec: f64,
}

impl RunSummary {
    pub fn new(
        settings: &LoadSettings,
        counters: RunCounters,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let elapsed_ms = u64::try_from((finished_at - started_at).num_milliseconds()).unwrap_or(0);
        let rows_per_sec = if elapsed_ms == 0 {
            0.0
        } else {
            counters.rows_written as f64 * 1000.0 / elapsed_ms as f64
        };

        Self {
            input: settings.input().display().to_string(),
            output: settings.output().display().to_string(),
            table: settings.table().to_string(),
            mode: settings.mode(),
            batch_size: settings.batch_size(),
            counters,
            started_at,
            finished_at,
            elapsed_ms,
            rows_per_sec,
        }
    }
}
