use crate::exit::ExitCode;
use engine_config::settings::error::SettingsError;
use engine_runtime::error::LoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to load input: {0}")]
    Runner(#[from] LoadError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Failed to write report to {path}: {source}")]
    ReportWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Settings(_) => ExitCode::InvalidArguments,
            _ => ExitCode::GeneralError,
        }
    }
}
