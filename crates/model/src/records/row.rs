use crate::{core::value::Value, records::record::Record, schema::Schema};

/// One value per schema column, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow {
    values: Vec<Value>,
}

impl ProjectedRow {
    /// Projects a decoded record onto the schema.
    ///
    /// Missing keys and explicit JSON `null` both yield `Value::Null`; keys the
    /// schema does not know are ignored. Values are not coerced.
    pub fn project(schema: &Schema, record: &Record) -> Self {
        let values = schema
            .column_names()
            .map(|name| record.get(name).map(Value::from).unwrap_or(Value::Null))
            .collect();

        ProjectedRow { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<Value>> for ProjectedRow {
    fn from(values: Vec<Value>) -> Self {
        ProjectedRow { values }
    }
}
