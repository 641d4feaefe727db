//! Defines the AST for a parameterized single-row INSERT statement.

use crate::query::ast::common::TableRef;

/// An INSERT whose VALUES list holds one placeholder per column.
///
/// The statement is compiled once and executed for every row, so it never
/// carries literal values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    pub table: TableRef,
    pub columns: Vec<String>,
}
