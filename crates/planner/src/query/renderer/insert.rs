use crate::query::{
    ast::insert::Insert,
    renderer::{Render, Renderer},
};

impl Render for Insert {
    fn render(&self, r: &mut Renderer) {
        // 1. INSERT INTO table (...)
        r.sql.push_str("INSERT INTO ");
        r.render_table_ref(&self.table);
        r.sql.push_str(" (");
        let quoted_columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| r.dialect.quote_identifier(c))
            .collect();
        r.sql.push_str(&quoted_columns.join(", "));
        r.sql.push(')');

        // 2. VALUES (?1, ?2, ...)
        r.sql.push_str(" VALUES (");
        for i in 0..self.columns.len() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.push_placeholder();
        }
        r.sql.push_str(");");
    }
}
