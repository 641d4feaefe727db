use crate::query::{
    ast::drop_table::DropTable,
    renderer::{Render, Renderer},
};

impl Render for DropTable {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("DROP TABLE ");
        if self.if_exists {
            r.sql.push_str("IF EXISTS ");
        }
        r.render_table_ref(&self.table);
        r.sql.push(';');
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        query::{
            ast::drop_table::DropTable,
            dialect::Sqlite,
            renderer::{Render, Renderer},
        },
        table_ref,
    };

    #[test]
    fn test_render_drop_table() {
        let ast = DropTable {
            table: table_ref!("data"),
            if_exists: true,
        };

        let mut renderer = Renderer::new(&Sqlite);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(params, 0);
        assert_eq!(sql, r#"DROP TABLE IF EXISTS "data";"#);
    }
}
