pub mod data_type;
pub mod table_mode;
pub mod value;
