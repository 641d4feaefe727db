//! Defines the AST for a CREATE TABLE statement.

use crate::query::ast::common::TableRef;
use model::core::data_type::StorageType;

/// Represents a complete CREATE TABLE statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTable {
    pub table: TableRef,
    pub columns: Vec<ColumnDef>,
    pub if_not_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub storage: StorageType,
}
