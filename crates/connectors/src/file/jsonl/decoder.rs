use crate::file::jsonl::error::DecodeError;
use model::records::record::Record;
use serde_json::Value as JsonValue;

/// Decodes one input line into a record.
///
/// The line must hold a single JSON object. Any other well-formed JSON
/// document (array, string, number, ...) is rejected as well, since it has no
/// fields to project.
pub fn decode(line: &str) -> Result<Record, DecodeError> {
    match serde_json::from_str::<JsonValue>(line)? {
        JsonValue::Object(fields) => Ok(Record::new(fields)),
        other => Err(DecodeError::NotAnObject(json_kind(&other))),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
