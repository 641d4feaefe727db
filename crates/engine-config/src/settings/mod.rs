pub use model::core::table_mode::TableMode;

pub mod batch_size;
pub mod error;
pub mod validated;
pub mod validator;

/// Settings exactly as supplied on the command line, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawSettings {
    pub input: String,
    pub output: String,
    pub table: String,
    pub batch_size: i64,
    pub mode: String,
    pub report: Option<String>,
}
