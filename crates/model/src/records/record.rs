use serde_json::{Map, Value as JsonValue};

/// A decoded input document.
///
/// The key set is whatever the source line carried; it may be a superset or
/// a subset of the destination schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Map<String, JsonValue>,
}

impl Record {
    pub fn new(fields: Map<String, JsonValue>) -> Self {
        Record { fields }
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, JsonValue>> for Record {
    fn from(fields: Map<String, JsonValue>) -> Self {
        Record::new(fields)
    }
}
