use crate::sql::{
    destination::{RowDestination, WriteOutcome, WriteStats},
    error::DbError,
    query::generator::QueryGenerator,
    sqlite::{adapter::SqliteAdapter, params::row_params},
};
use model::{core::table_mode::TableMode, records::row::ProjectedRow, schema::Schema};
use planner::query::dialect::Sqlite;
use rusqlite::Connection;
use tracing::{debug, error, info, warn};

/// Lifecycle of a [`SqliteBatchWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Uninitialized,
    TableReady,
    TransactionOpen,
    Committed,
    Aborted,
}

impl WriterState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriterState::Uninitialized => "uninitialized",
            WriterState::TableReady => "table-ready",
            WriterState::TransactionOpen => "transaction-open",
            WriterState::Committed => "committed",
            WriterState::Aborted => "aborted",
        }
    }
}

#[derive(Debug, Clone)]
pub struct WriterOptions {
    pub table: String,
    pub mode: TableMode,
    /// Rows per transaction, validated upstream as `BatchSize`.
    pub batch_size: usize,
}

/// Writes projected rows into one SQLite table, committing every
/// `batch_size` rows.
///
/// The insert statement is compiled once and served from the connection's
/// statement cache for every row. Each batch is a single transaction: it is
/// either fully committed or fully rolled back.
pub struct SqliteBatchWriter {
    conn: Option<Connection>,
    table: String,
    insert_sql: String,
    columns: usize,
    batch_size: usize,
    in_batch: usize,
    stats: WriteStats,
    state: WriterState,
}

impl SqliteBatchWriter {
    /// Prepares the table according to `options.mode`, compiles the insert
    /// and opens the first transaction.
    pub fn new(
        adapter: SqliteAdapter,
        schema: &Schema,
        options: WriterOptions,
    ) -> Result<Self, DbError> {
        let generator = QueryGenerator::new(&Sqlite);
        let (insert_sql, columns) = generator.insert(&options.table, schema);

        let mut writer = SqliteBatchWriter {
            conn: Some(adapter.into_connection()),
            table: options.table,
            insert_sql,
            columns,
            batch_size: options.batch_size,
            in_batch: 0,
            stats: WriteStats::default(),
            state: WriterState::Uninitialized,
        };

        let setup = generator.table_setup(&writer.table, schema, options.mode);
        writer.prepare_table(&setup, options.mode)?;
        writer.compile_insert()?;
        writer.begin()?;

        Ok(writer)
    }

    fn conn(&self) -> Result<&Connection, DbError> {
        self.conn.as_ref().ok_or(DbError::InvalidState {
            expected: WriterState::TransactionOpen.as_str(),
            found: self.state.as_str(),
        })
    }

    fn expect_state(&self, expected: WriterState) -> Result<(), DbError> {
        if self.state != expected {
            return Err(DbError::InvalidState {
                expected: expected.as_str(),
                found: self.state.as_str(),
            });
        }
        Ok(())
    }

    /// Uninitialized -> TableReady. The DDL runs in its own transaction so a
    /// failed replace never leaves the old table dropped.
    fn prepare_table(&mut self, statements: &[String], mode: TableMode) -> Result<(), DbError> {
        self.expect_state(WriterState::Uninitialized)?;

        let mut script = String::from("BEGIN;\n");
        for stmt in statements {
            info!(table = %self.table, mode = %mode, sql = %stmt, "Preparing table");
            script.push_str(stmt);
            script.push('\n');
        }
        script.push_str("COMMIT;");

        let conn = self.conn()?;
        if let Err(source) = conn.execute_batch(&script) {
            if !conn.is_autocommit() {
                let _ = conn.execute_batch("ROLLBACK;");
            }
            return Err(DbError::TableSetup {
                table: self.table.clone(),
                source,
            });
        }

        self.state = WriterState::TableReady;
        Ok(())
    }

    fn compile_insert(&self) -> Result<(), DbError> {
        info!(sql = %self.insert_sql, "Prepared insert statement");
        self.conn()?.prepare_cached(&self.insert_sql)?;
        Ok(())
    }

    /// TableReady -> TransactionOpen.
    fn begin(&mut self) -> Result<(), DbError> {
        self.conn()?.execute_batch("BEGIN;")?;
        self.state = WriterState::TransactionOpen;
        Ok(())
    }

    /// Commits the open transaction. On failure the state is left as
    /// `TransactionOpen` so that `abort` can still roll back.
    fn commit(&mut self) -> Result<(), DbError> {
        let batch = self.stats.batches_committed + 1;
        self.conn()?
            .execute_batch("COMMIT;")
            .map_err(|source| DbError::Commit {
                table: self.table.clone(),
                batch,
                source,
            })?;

        if self.in_batch > 0 {
            self.stats.batches_committed = batch;
            self.stats.rows_committed += self.in_batch as u64;
        }
        debug!(table = %self.table, batch, rows = self.in_batch, "Committed batch");
        self.in_batch = 0;
        self.state = WriterState::TableReady;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), DbError> {
        let Some(conn) = self.conn.as_ref() else {
            return Ok(());
        };

        // A failed COMMIT may already have ended the transaction
        if !conn.is_autocommit() {
            conn.execute_batch("ROLLBACK;")
                .map_err(|source| DbError::Rollback {
                    table: self.table.clone(),
                    source,
                })?;
        }

        self.stats.rows_rolled_back += self.in_batch as u64;
        self.in_batch = 0;
        Ok(())
    }

    /// Drops the cached statement and closes the connection.
    fn release(&mut self) -> Result<(), DbError> {
        if let Some(conn) = self.conn.take() {
            conn.flush_prepared_statement_cache();
            conn.close().map_err(|(_, err)| DbError::Close(err))?;
        }
        Ok(())
    }
}

impl RowDestination for SqliteBatchWriter {
    fn write_row(&mut self, row: &ProjectedRow) -> Result<WriteOutcome, DbError> {
        self.expect_state(WriterState::TransactionOpen)?;
        if row.len() != self.columns {
            return Err(DbError::RowWidth {
                expected: self.columns,
                found: row.len(),
            });
        }

        {
            let conn = self.conn()?;
            let mut stmt = conn.prepare_cached(&self.insert_sql)?;
            stmt.execute(row_params(row))
                .map_err(|source| DbError::Insert {
                    table: self.table.clone(),
                    source,
                })?;
        }
        self.in_batch += 1;

        if self.in_batch < self.batch_size {
            return Ok(WriteOutcome::Buffered);
        }

        self.commit()?;
        self.begin()?;
        Ok(WriteOutcome::BatchCommitted {
            batch: self.stats.batches_committed,
            rows_committed: self.stats.rows_committed,
        })
    }

    /// TransactionOpen -> Committed.
    fn finish(&mut self) -> Result<WriteStats, DbError> {
        self.expect_state(WriterState::TransactionOpen)?;
        self.commit()?;
        self.state = WriterState::Committed;
        self.release()?;

        info!(
            table = %self.table,
            rows = self.stats.rows_committed,
            batches = self.stats.batches_committed,
            "Writer finished"
        );
        Ok(self.stats)
    }

    /// Any state -> Aborted. Safe to call more than once; after a successful
    /// `finish` there is nothing left to roll back.
    fn abort(&mut self) -> Result<WriteStats, DbError> {
        if matches!(self.state, WriterState::Committed | WriterState::Aborted) {
            return Ok(self.stats);
        }

        let pending = self.in_batch;
        let rolled_back = self.rollback();
        self.state = WriterState::Aborted;
        let released = self.release();

        warn!(
            table = %self.table,
            rows_rolled_back = pending,
            rows_committed = self.stats.rows_committed,
            "Writer aborted"
        );

        rolled_back.and(released).map(|_| self.stats)
    }
}

impl Drop for SqliteBatchWriter {
    fn drop(&mut self) {
        if self.state == WriterState::TransactionOpen {
            warn!(
                table = %self.table,
                rows = self.in_batch,
                "Writer dropped with an open transaction, rolling back"
            );
            if let Err(err) = self.rollback() {
                error!(error = %err, "Rollback on drop failed");
            }
            self.state = WriterState::Aborted;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{
        core::{data_type::StorageType, value::Value},
        schema::Column,
    };
    use std::{path::Path, time::Duration};

    const COLUMNS: &[Column] = &[
        Column::new("title", StorageType::Text),
        Column::new("score", StorageType::Numeric),
    ];
    const SCHEMA: Schema = Schema::new(COLUMNS);

    fn writer(path: &Path, mode: TableMode, batch_size: usize) -> SqliteBatchWriter {
        let adapter = SqliteAdapter::open(path).unwrap();
        SqliteBatchWriter::new(
            adapter,
            &SCHEMA,
            WriterOptions {
                table: "data".into(),
                mode,
                batch_size,
            },
        )
        .unwrap()
    }

    fn row(title: &str, score: i64) -> ProjectedRow {
        ProjectedRow::from(vec![Value::String(title.into()), Value::Int(score)])
    }

    fn count(path: &Path) -> i64 {
        let conn = Connection::open(path).unwrap();
        conn.query_row(r#"SELECT COUNT(*) FROM "data""#, [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn test_new_opens_transaction_and_creates_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.db");
        let mut w = writer(&path, TableMode::Append, 10);

        assert_eq!(w.state, WriterState::TransactionOpen);
        assert_eq!(
            w.insert_sql,
            r#"INSERT INTO "data" ("title", "score") VALUES (?1, ?2);"#
        );
        w.finish().unwrap();
        assert_eq!(w.state, WriterState::Committed);
        assert_eq!(count(&path), 0);
    }

    #[test]
    fn test_commits_on_batch_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.db");
        let mut w = writer(&path, TableMode::Append, 2);

        assert_eq!(w.write_row(&row("a", 1)).unwrap(), WriteOutcome::Buffered);
        assert_eq!(
            w.write_row(&row("b", 2)).unwrap(),
            WriteOutcome::BatchCommitted {
                batch: 1,
                rows_committed: 2
            }
        );
        assert_eq!(w.in_batch, 0);
        assert_eq!(count(&path), 2);

        assert_eq!(w.write_row(&row("c", 3)).unwrap(), WriteOutcome::Buffered);
        // the open batch is not visible to other connections
        assert_eq!(count(&path), 2);

        let stats = w.finish().unwrap();
        assert_eq!(stats.rows_committed, 3);
        assert_eq!(stats.batches_committed, 2);
        assert_eq!(count(&path), 3);
    }

    #[test]
    fn test_abort_rolls_back_only_open_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.db");
        let mut w = writer(&path, TableMode::Append, 3);

        for i in 0..5 {
            w.write_row(&row("x", i)).unwrap();
        }
        let stats = w.abort().unwrap();

        assert_eq!(w.state, WriterState::Aborted);
        assert_eq!(stats.rows_committed, 3);
        assert_eq!(stats.rows_rolled_back, 2);
        assert_eq!(count(&path), 3);

        // idempotent
        assert_eq!(w.abort().unwrap(), stats);
    }

    #[test]
    fn test_write_after_finish_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = writer(&dir.path().join("out.db"), TableMode::Append, 2);
        w.finish().unwrap();

        let err = w.write_row(&row("late", 1)).unwrap_err();
        assert!(matches!(err, DbError::InvalidState { .. }));
    }

    #[test]
    fn test_row_width_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = writer(&dir.path().join("out.db"), TableMode::Append, 2);

        let err = w
            .write_row(&ProjectedRow::from(vec![Value::Null]))
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::RowWidth {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_append_keeps_and_replace_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.db");

        for _ in 0..2 {
            let mut w = writer(&path, TableMode::Append, 10);
            w.write_row(&row("a", 1)).unwrap();
            w.finish().unwrap();
        }
        assert_eq!(count(&path), 2);

        let mut w = writer(&path, TableMode::Replace, 10);
        w.write_row(&row("b", 2)).unwrap();
        w.finish().unwrap();
        assert_eq!(count(&path), 1);
    }

    #[test]
    fn test_drop_with_open_transaction_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.db");
        {
            let mut w = writer(&path, TableMode::Append, 2);
            w.write_row(&row("a", 1)).unwrap();
            w.write_row(&row("b", 2)).unwrap();
            w.write_row(&row("c", 3)).unwrap();
        }
        assert_eq!(count(&path), 2);
    }

    #[test]
    fn test_commit_failure_leaves_transaction_for_abort() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.db");
        let mut w = writer(&path, TableMode::Append, 2);
        w.conn
            .as_ref()
            .unwrap()
            .busy_timeout(Duration::ZERO)
            .unwrap();

        w.write_row(&row("a", 1)).unwrap();
        w.write_row(&row("b", 2)).unwrap();

        // a reader mid-transaction holds a shared lock that blocks COMMIT
        let reader = Connection::open(&path).unwrap();
        reader.busy_timeout(Duration::ZERO).unwrap();
        reader.execute_batch("BEGIN;").unwrap();
        let seen: i64 = reader
            .query_row(r#"SELECT COUNT(*) FROM "data""#, [], |r| r.get(0))
            .unwrap();
        assert_eq!(seen, 2);

        assert_eq!(w.write_row(&row("c", 3)).unwrap(), WriteOutcome::Buffered);
        let err = w.write_row(&row("d", 4)).unwrap_err();
        assert!(matches!(err, DbError::Commit { batch: 2, .. }));
        assert_eq!(w.state, WriterState::TransactionOpen);

        reader.execute_batch("COMMIT;").unwrap();
        drop(reader);

        let stats = w.abort().unwrap();
        assert_eq!(w.state, WriterState::Aborted);
        assert_eq!(stats.rows_committed, 2);
        assert_eq!(stats.batches_committed, 1);
        assert_eq!(stats.rows_rolled_back, 2);
        assert_eq!(count(&path), 2);
    }

    #[test]
    fn test_numeric_affinity_coerces_numeric_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.db");
        let mut w = writer(&path, TableMode::Append, 10);
        w.write_row(&ProjectedRow::from(vec![
            Value::String("t".into()),
            Value::String("5".into()),
        ]))
        .unwrap();
        w.finish().unwrap();

        let conn = Connection::open(&path).unwrap();
        let kind: String = conn
            .query_row(r#"SELECT typeof("score") FROM "data""#, [], |r| r.get(0))
            .unwrap();
        assert_eq!(kind, "integer");
    }
}
