use crate::query::ast::{
    common::TableRef,
    create_table::{ColumnDef, CreateTable},
};
use model::{core::data_type::StorageType, schema::Schema};

#[derive(Debug, Clone)]
pub struct CreateTableBuilder {
    ast: CreateTable,
}

impl CreateTableBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: CreateTable {
                table,
                ..Default::default()
            },
        }
    }

    pub fn if_not_exists(mut self) -> Self {
        self.ast.if_not_exists = true;
        self
    }

    pub fn column(mut self, name: &str, storage: StorageType) -> Self {
        self.ast.columns.push(ColumnDef {
            name: name.to_string(),
            storage,
        });
        self
    }

    /// Adds every schema column, preserving schema order.
    pub fn columns_from(self, schema: &Schema) -> Self {
        schema
            .columns()
            .iter()
            .fold(self, |builder, col| builder.column(col.name, col.storage))
    }

    pub fn build(self) -> CreateTable {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_ref;
    use model::schema::SUBMISSIONS;

    #[test]
    fn test_columns_from_schema_keep_order() {
        let ast = CreateTableBuilder::new(table_ref!("data"))
            .if_not_exists()
            .columns_from(&SUBMISSIONS)
            .build();

        assert!(ast.if_not_exists);
        assert_eq!(ast.columns.len(), SUBMISSIONS.len());
        let names: Vec<_> = ast.columns.iter().map(|c| c.name.as_str()).collect();
        let expected: Vec<_> = SUBMISSIONS.column_names().collect();
        assert_eq!(names, expected);
    }
}
