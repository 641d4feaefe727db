use crate::error::LoadError;
use connectors::{
    file::jsonl::source::LineSource,
    sql::sqlite::{
        adapter::SqliteAdapter,
        writer::{SqliteBatchWriter, WriterOptions},
    },
};
use engine_config::settings::validated::LoadSettings;
use model::schema::Schema;
use tokio::{fs::File, io::BufReader};

pub async fn create_source(
    settings: &LoadSettings,
) -> Result<LineSource<BufReader<File>>, LoadError> {
    Ok(LineSource::open(settings.input()).await?)
}

/// Opens the database and prepares the destination table for `schema`.
pub fn create_destination(
    settings: &LoadSettings,
    schema: &Schema,
) -> Result<SqliteBatchWriter, LoadError> {
    let adapter = SqliteAdapter::open(settings.output())?;
    let options = WriterOptions {
        table: settings.table().to_string(),
        mode: settings.mode(),
        batch_size: settings.batch_size(),
    };
    Ok(SqliteBatchWriter::new(adapter, schema, options)?)
}
