pub mod destination;
pub mod error;
pub mod query;
pub mod sqlite;
