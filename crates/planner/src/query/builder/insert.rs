use crate::query::ast::{common::TableRef, insert::Insert};
use model::schema::Schema;

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    ast: Insert,
}

impl InsertBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: Insert {
                table,
                columns: Vec::new(),
            },
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.ast.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn columns_from(mut self, schema: &Schema) -> Self {
        self.ast.columns = schema.column_names().map(str::to_string).collect();
        self
    }

    pub fn build(self) -> Insert {
        self.ast
    }
}
