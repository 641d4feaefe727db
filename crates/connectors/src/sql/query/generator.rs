use model::{core::table_mode::TableMode, schema::Schema};
use planner::{
    query::{
        builder::{
            create_table::CreateTableBuilder, drop_table::DropTableBuilder, insert::InsertBuilder,
        },
        dialect::Dialect,
        renderer::{Render, Renderer},
    },
    table_ref,
};

pub struct QueryGenerator<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> QueryGenerator<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    pub fn create_table(&self, table: &str, schema: &Schema, if_not_exists: bool) -> String {
        let mut builder = CreateTableBuilder::new(table_ref!(table)).columns_from(schema);
        if if_not_exists {
            builder = builder.if_not_exists();
        }
        self.render_ast(builder.build()).0
    }

    pub fn drop_table(&self, table: &str) -> String {
        let ast = DropTableBuilder::new(table_ref!(table)).if_exists().build();
        self.render_ast(ast).0
    }

    /// Statements that bring the table to a ready state for the given mode.
    pub fn table_setup(&self, table: &str, schema: &Schema, mode: TableMode) -> Vec<String> {
        match mode {
            TableMode::Append => vec![self.create_table(table, schema, true)],
            TableMode::Replace => vec![
                self.drop_table(table),
                self.create_table(table, schema, false),
            ],
        }
    }

    /// Parameterized single-row insert with one placeholder per schema column,
    /// in schema order.
    pub fn insert(&self, table: &str, schema: &Schema) -> (String, usize) {
        let ast = InsertBuilder::new(table_ref!(table))
            .columns_from(schema)
            .build();
        self.render_ast(ast)
    }

    fn render_ast(&self, ast: impl Render) -> (String, usize) {
        let mut renderer = Renderer::new(self.dialect);
        ast.render(&mut renderer);
        renderer.finish()
    }
}
