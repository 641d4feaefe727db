pub mod file;
pub mod sql;
