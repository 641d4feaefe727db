use crate::sql::error::DbError;
use model::records::row::ProjectedRow;

/// What happened to the store as a result of one `write_row` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The row joined the open batch.
    Buffered,
    /// The row completed a batch, which was committed; a new batch is open.
    BatchCommitted { batch: u64, rows_committed: u64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// Rows durably committed, across all batches.
    pub rows_committed: u64,
    pub batches_committed: u64,
    /// Rows discarded by a rollback of the in-flight batch.
    pub rows_rolled_back: u64,
}

/// A transactional, batching row sink.
///
/// Rows are accepted in order. `finish` commits the trailing batch and
/// releases the store; `abort` rolls back whatever is uncommitted and
/// releases the store. Batches committed before an abort stay committed.
pub trait RowDestination {
    fn write_row(&mut self, row: &ProjectedRow) -> Result<WriteOutcome, DbError>;

    fn finish(&mut self) -> Result<WriteStats, DbError>;

    fn abort(&mut self) -> Result<WriteStats, DbError>;
}
