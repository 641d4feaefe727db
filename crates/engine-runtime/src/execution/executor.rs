use crate::{error::LoadError, execution::factory};
use chrono::Utc;
use connectors::{
    file::jsonl::{decoder::decode, source::LineSource},
    sql::destination::{RowDestination, WriteOutcome},
};
use engine_config::{
    report::summary::{RunCounters, RunSummary},
    settings::validated::LoadSettings,
};
use model::{
    records::row::ProjectedRow,
    schema::{SUBMISSIONS, Schema},
};
use tokio::io::AsyncBufRead;
use tracing::{error, info, warn};

/// Loads `settings.input` into `settings.output` using the submissions schema.
///
/// Decode failures skip the offending line. Any other failure rolls back the
/// in-flight batch and is returned; batches committed earlier stay in place.
pub async fn run(settings: &LoadSettings) -> Result<RunSummary, LoadError> {
    let started_at = Utc::now();
    info!(
        input = %settings.input().display(),
        output = %settings.output().display(),
        table = %settings.table(),
        batch_size = settings.batch_size(),
        mode = %settings.mode(),
        "Starting load"
    );

    let source = factory::create_source(settings).await?;
    let destination = factory::create_destination(settings, &SUBMISSIONS)?;

    let counters = LoadExecutor::new(source, destination, &SUBMISSIONS)
        .execute()
        .await?;

    let summary = RunSummary::new(settings, counters, started_at, Utc::now());
    info!(
        lines = summary.counters.lines_read,
        rows = summary.counters.rows_written,
        decode_errors = summary.counters.decode_errors,
        batches = summary.counters.batches_committed,
        elapsed_ms = summary.elapsed_ms,
        rows_per_sec = summary.rows_per_sec,
        "Load completed"
    );
    Ok(summary)
}

/// Sequential decode -> project -> write loop over one source and one
/// destination.
pub struct LoadExecutor<'s, R, D> {
    source: LineSource<R>,
    destination: D,
    schema: &'s Schema,
    counters: RunCounters,
}

impl<'s, R, D> LoadExecutor<'s, R, D>
where
    R: AsyncBufRead + Unpin,
    D: RowDestination,
{
    pub fn new(source: LineSource<R>, destination: D, schema: &'s Schema) -> Self {
        Self {
            source,
            destination,
            schema,
            counters: RunCounters::default(),
        }
    }

    pub async fn execute(mut self) -> Result<RunCounters, LoadError> {
        if let Err(err) = self.process().await {
            self.abort(&err);
            return Err(err);
        }

        let stats = match self.destination.finish() {
            Ok(stats) => stats,
            Err(err) => {
                let err = LoadError::from(err);
                self.abort(&err);
                return Err(err);
            }
        };

        self.counters.rows_written = stats.rows_committed;
        self.counters.batches_committed = stats.batches_committed;
        self.counters.blank_lines = self.source.blank_lines();
        Ok(self.counters)
    }

    async fn process(&mut self) -> Result<(), LoadError> {
        while let Some(line) = self.source.next_line().await? {
            self.counters.lines_read += 1;

            let record = match decode(&line.text) {
                Ok(record) => record,
                Err(err) => {
                    self.counters.decode_errors += 1;
                    warn!(line = line.number, error = %err, "Skipping malformed line");
                    continue;
                }
            };

            let row = ProjectedRow::project(self.schema, &record);
            match self.destination.write_row(&row)? {
                WriteOutcome::Buffered => {}
                WriteOutcome::BatchCommitted {
                    batch,
                    rows_committed,
                } => {
                    self.counters.rows_written = rows_committed;
                    self.counters.batches_committed = batch;
                    info!(batch, "Processed {rows_committed} records");
                }
            }
        }
        Ok(())
    }

    fn abort(&mut self, cause: &LoadError) {
        error!(error = %cause, "Load failed, rolling back the open batch");
        match self.destination.abort() {
            Ok(stats) => {
                self.counters.rows_written = stats.rows_committed;
                self.counters.batches_committed = stats.batches_committed;
                warn!(
                    rows_committed = stats.rows_committed,
                    rows_rolled_back = stats.rows_rolled_back,
                    "Rolled back"
                );
            }
            Err(err) => error!(error = %err, "Rollback failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectors::sql::{destination::WriteStats, error::DbError};
    use model::{
        core::{data_type::StorageType, value::Value},
        schema::Column,
    };
    use std::{
        io,
        pin::Pin,
        task::{Context, Poll},
    };
    use tokio::io::{AsyncRead, BufReader, ReadBuf};

    const COLUMNS: &[Column] = &[
        Column::new("title", StorageType::Text),
        Column::new("score", StorageType::Numeric),
    ];
    const SCHEMA: Schema = Schema::new(COLUMNS);

    /// In-memory destination that mimics batch commit semantics.
    #[derive(Default)]
    struct MemoryDestination {
        batch_size: usize,
        pending: Vec<ProjectedRow>,
        committed: Vec<ProjectedRow>,
        batches: u64,
        rolled_back: u64,
        fail_commit_on_batch: Option<u64>,
        finished: bool,
        aborted: bool,
    }

    impl MemoryDestination {
        fn new(batch_size: usize) -> Self {
            Self {
                batch_size,
                ..Default::default()
            }
        }

        fn stats(&self) -> WriteStats {
            WriteStats {
                rows_committed: self.committed.len() as u64,
                batches_committed: self.batches,
                rows_rolled_back: self.rolled_back,
            }
        }

        fn commit(&mut self) -> Result<(), DbError> {
            if self.pending.is_empty() {
                return Ok(());
            }
            let batch = self.batches + 1;
            if self.fail_commit_on_batch == Some(batch) {
                return Err(DbError::InvalidState {
                    expected: "commit",
                    found: "failed",
                });
            }
            self.committed.append(&mut self.pending);
            self.batches = batch;
            Ok(())
        }
    }

    impl RowDestination for &mut MemoryDestination {
        fn write_row(&mut self, row: &ProjectedRow) -> Result<WriteOutcome, DbError> {
            self.pending.push(row.clone());
            if self.pending.len() < self.batch_size {
                return Ok(WriteOutcome::Buffered);
            }
            self.commit()?;
            Ok(WriteOutcome::BatchCommitted {
                batch: self.batches,
                rows_committed: self.committed.len() as u64,
            })
        }

        fn finish(&mut self) -> Result<WriteStats, DbError> {
            self.commit()?;
            self.finished = true;
            Ok(self.stats())
        }

        fn abort(&mut self) -> Result<WriteStats, DbError> {
            self.rolled_back += self.pending.len() as u64;
            self.pending.clear();
            self.aborted = true;
            Ok(self.stats())
        }
    }

    struct FailingReader {
        data: Vec<u8>,
        pos: usize,
    }

    impl AsyncRead for FailingReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            if self.pos >= self.data.len() {
                return Poll::Ready(Err(io::Error::other("connection reset")));
            }
            let n = buf.remaining().min(self.data.len() - self.pos);
            let start = self.pos;
            buf.put_slice(&self.data[start..start + n]);
            self.pos += n;
            Poll::Ready(Ok(()))
        }
    }

    fn lines(n: usize) -> String {
        (0..n)
            .map(|i| format!("{{\"title\":\"t{i}\",\"score\":{i}}}\n"))
            .collect()
    }

    #[tokio::test]
    async fn test_counts_rows_and_skips_bad_lines() {
        let input = "{\"title\":\"a\",\"score\":1}\nnot json\n\n[1,2]\n{\"score\":2}\n";
        let mut dest = MemoryDestination::new(2);

        let counters = LoadExecutor::new(LineSource::new(input.as_bytes()), &mut dest, &SCHEMA)
            .execute()
            .await
            .unwrap();

        assert_eq!(counters.lines_read, 4);
        assert_eq!(counters.blank_lines, 1);
        assert_eq!(counters.decode_errors, 2);
        assert_eq!(counters.rows_written, 2);
        assert_eq!(
            counters.rows_written + counters.decode_errors,
            counters.lines_read
        );
        assert!(dest.finished);
        assert_eq!(dest.committed[1].values(), &[Value::Null, Value::Int(2)]);
    }

    #[tokio::test]
    async fn test_read_failure_keeps_committed_batches() {
        let reader = FailingReader {
            data: lines(5).into_bytes(),
            pos: 0,
        };
        let mut dest = MemoryDestination::new(2);

        let err = LoadExecutor::new(LineSource::new(BufReader::new(reader)), &mut dest, &SCHEMA)
            .execute()
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Input(_)));
        assert!(dest.aborted);
        assert_eq!(dest.committed.len(), 4);
        assert_eq!(dest.rolled_back, 1);
    }

    #[tokio::test]
    async fn test_commit_failure_aborts() {
        let input = lines(6);
        let mut dest = MemoryDestination {
            fail_commit_on_batch: Some(2),
            ..MemoryDestination::new(2)
        };

        let err = LoadExecutor::new(LineSource::new(input.as_bytes()), &mut dest, &SCHEMA)
            .execute()
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Database(_)));
        assert!(dest.aborted);
        assert_eq!(dest.committed.len(), 2);
        assert_eq!(dest.rolled_back, 2);
    }

    #[tokio::test]
    async fn test_empty_input_finishes_cleanly() {
        let mut dest = MemoryDestination::new(3);
        let counters = LoadExecutor::new(LineSource::new(&b""[..]), &mut dest, &SCHEMA)
            .execute()
            .await
            .unwrap();

        assert_eq!(counters, RunCounters::default());
        assert!(dest.finished);
        assert_eq!(dest.batches, 0);
    }

    #[tokio::test]
    async fn test_run_against_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.jsonl");
        tokio::fs::write(&input, lines(3)).await.unwrap();

        let settings = LoadSettings::builder()
            .input(&input)
            .output(dir.path().join("out.db"))
            .batch_size(engine_config::settings::batch_size::BatchSize::new(2).unwrap())
            .build()
            .unwrap();

        let summary = run(&settings).await.unwrap();
        assert_eq!(summary.counters.rows_written, 3);
        assert_eq!(summary.counters.batches_committed, 2);
    }

    #[tokio::test]
    async fn test_run_missing_input_fails_before_touching_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.db");
        let settings = LoadSettings::builder()
            .input(dir.path().join("missing.jsonl"))
            .output(&output)
            .build()
            .unwrap();

        let err = run(&settings).await.unwrap_err();
        assert!(matches!(err, LoadError::Input(_)));
        assert!(!output.exists());
    }
}
