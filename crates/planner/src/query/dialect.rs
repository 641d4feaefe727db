//! Defines the `Dialect` trait for database-specific SQL syntax.

use model::core::data_type::StorageType;

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect, escaping embedded quote characters.
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for the parameter at `index` (zero-based).
    fn get_placeholder(&self, index: usize) -> String;

    /// Renders a declared storage type into a column type string.
    fn render_data_type(&self, storage: StorageType) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', r#""""#))
    }

    fn get_placeholder(&self, index: usize) -> String {
        // SQLite numbered parameters start at ?1
        format!("?{}", index + 1)
    }

    fn render_data_type(&self, storage: StorageType) -> String {
        storage.sql_name().to_string()
    }
}
