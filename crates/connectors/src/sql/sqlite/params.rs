use model::{core::value::Value, records::row::ProjectedRow};
use rusqlite::{
    Params, ToSql, params_from_iter,
    types::{ToSqlOutput, Value as SqlValue, ValueRef},
};

/// Binds a model value without copying string payloads.
pub struct SqliteParam<'a>(pub &'a Value);

impl ToSql for SqliteParam<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let out = match self.0 {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Int(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            Value::Uint(v) => match i64::try_from(*v) {
                Ok(i) => ToSqlOutput::Owned(SqlValue::Integer(i)),
                Err(_) => ToSqlOutput::Owned(SqlValue::Real(*v as f64)),
            },
            Value::Float(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            Value::Boolean(v) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v))),
            Value::String(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Json(v) => ToSqlOutput::Owned(SqlValue::Text(v.to_string())),
        };
        Ok(out)
    }
}

/// Positional parameters for one projected row, in schema order.
pub fn row_params(row: &ProjectedRow) -> impl Params + '_ {
    params_from_iter(row.values().iter().map(SqliteParam))
}
