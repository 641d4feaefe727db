//! Fixed destination schema.
//!
//! The column list is decided at build time. Its iteration order is the
//! single source of truth for both the table DDL and the order of values in
//! every projected row, so the two can never drift apart.

use crate::core::data_type::StorageType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub storage: StorageType,
}

impl Column {
    pub const fn new(name: &'static str, storage: StorageType) -> Self {
        Column { name, storage }
    }
}

/// An ordered, immutable list of destination columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    columns: &'static [Column],
}

impl Schema {
    pub const fn new(columns: &'static [Column]) -> Self {
        Schema { columns }
    }

    pub fn columns(&self) -> &'static [Column] {
        self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(not(feature = "author"))]
const SUBMISSION_COLUMNS: &[Column] = &[
    Column::new("created_utc", StorageType::Datetime),
    Column::new("num_comments", StorageType::Numeric),
    Column::new("permalink", StorageType::Text),
    Column::new("score", StorageType::Numeric),
    Column::new("selftext", StorageType::Text),
    Column::new("title", StorageType::Text),
    Column::new("url", StorageType::Text),
];

#[cfg(feature = "author")]
const SUBMISSION_COLUMNS: &[Column] = &[
    Column::new("created_utc", StorageType::Datetime),
    Column::new("num_comments", StorageType::Numeric),
    Column::new("permalink", StorageType::Text),
    Column::new("score", StorageType::Numeric),
    Column::new("selftext", StorageType::Text),
    Column::new("title", StorageType::Text),
    Column::new("url", StorageType::Text),
    Column::new("author", StorageType::Text),
];

/// Schema of the submission dumps this loader was built for.
pub const SUBMISSIONS: Schema = Schema::new(SUBMISSION_COLUMNS);
