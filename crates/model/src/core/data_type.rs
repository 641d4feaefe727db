use std::fmt;

/// Declared storage type of a destination column.
///
/// SQLite treats these as column affinities: the engine, not the loader,
/// decides how an incoming value is coerced on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    Datetime,
    Numeric,
    Text,
}

impl StorageType {
    pub fn sql_name(&self) -> &'static str {
        match self {
            StorageType::Datetime => "DATETIME",
            StorageType::Numeric => "NUMERIC",
            StorageType::Text => "TEXT",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}
