use crate::{error::CliError, exit::ExitCode};
use clap::Parser;
use engine_config::settings::{
    RawSettings, batch_size::BatchSize, validated::DEFAULT_TABLE, validator::SettingsValidator,
};
use engine_runtime::execution::executor;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod error;
mod exit;
mod output;

#[derive(Parser, Debug)]
#[command(
    name = "json2sqlite",
    version,
    about = "Load newline-delimited JSON into a SQLite table"
)]
struct Cli {
    #[arg(short, long, help = "Newline-delimited JSON input file")]
    input: String,

    #[arg(short, long, help = "SQLite database file, created if missing")]
    output: String,

    #[arg(short, long, default_value = DEFAULT_TABLE, help = "Destination table name")]
    table: String,

    #[arg(
        short,
        long,
        default_value_t = BatchSize::DEFAULT.get() as i64,
        allow_negative_numbers = true,
        help = "Rows committed per transaction"
    )]
    batch_size: i64,

    #[arg(
        short,
        long,
        default_value = "append",
        help = "Table preparation: 'append' keeps existing rows, 'replace' recreates the table"
    )]
    mode: String,

    #[arg(long, help = "If specified, writes a JSON run summary to this file")]
    report: Option<String>,
}

impl From<Cli> for RawSettings {
    fn from(cli: Cli) -> Self {
        RawSettings {
            input: cli.input,
            output: cli.output,
            table: cli.table,
            batch_size: cli.batch_size,
            mode: cli.mode,
            report: cli.report,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logger, RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let code = match load(cli.into()).await {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            error!(error = %err, "Load failed");
            err.exit_code()
        }
    };

    std::process::exit(code.as_i32());
}

async fn load(raw: RawSettings) -> Result<(), CliError> {
    let settings = SettingsValidator::new(&raw).validate()?;
    let summary = executor::run(&settings).await?;

    if let Some(path) = settings.report() {
        output::write_report(&summary, path).await?;
        info!(path = %path.display(), "Wrote run report");
    }

    Ok(())
}
