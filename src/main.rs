/// Version injected at compile time via BDCC_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("BDCC_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use bdcc::api::DatabaseItem;
use bdcc::config::{Config, ProviderConfig};
use bdcc::provider::{
    DatabasePlan, DatabaseState, Diagnostic, Invocable, Listable, PopulateConfig, Provider,
    Reconcilable,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Manage databases on Bob's Discount Cloud Co
#[derive(Parser, Debug)]
#[command(name = "bdcc", version = VERSION, about, long_about = None)]
struct Args {
    /// API host (falls back to BDCC_HOST, then the saved host, then the default endpoint)
    #[arg(long, global = true)]
    host: Option<String>,

    /// API key (falls back to BDCC_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a database
    Create {
        #[arg(long)]
        name: String,
    },
    /// Refresh a database by id
    Read {
        #[arg(long)]
        id: String,
    },
    /// Delete a database by id
    Delete {
        #[arg(long)]
        id: String,
    },
    /// List every database
    List,
    /// Write key/value items into a database, in file order
    Populate {
        #[arg(long)]
        id: String,
        /// YAML or JSON list of `{key, value}` entries
        #[arg(long)]
        items: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("bdcc {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("bdcc").join("bdcc.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".bdcc").join("bdcc.log");
    }
    PathBuf::from("bdcc.log")
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = match setup_logging(args.log_level) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error: {err:?}");
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<Diagnostics>() {
                Some(Diagnostics(diags)) => {
                    for diag in diags {
                        eprintln!("Error: {diag}");
                    }
                }
                None => eprintln!("Error: {err:?}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics raised by the provider, printed one per line
#[derive(Debug)]
struct Diagnostics(Vec<Diagnostic>);

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

impl std::error::Error for Diagnostics {}

impl From<bdcc::OperationError> for Diagnostics {
    fn from(err: bdcc::OperationError) -> Self {
        Self(vec![Diagnostic::from(err)])
    }
}

async fn run(args: Args) -> Result<()> {
    let mut persisted = Config::load();
    let explicit_host = args.host.clone();

    let settings = ProviderConfig {
        host: args.host,
        api_key: args.api_key,
    }
    .resolve(&persisted);

    let provider = Provider::configure(&settings).map_err(Diagnostics)?;

    if let Some(host) = explicit_host.filter(|h| persisted.host.as_deref() != Some(h.as_str())) {
        if let Err(e) = persisted.set_host(&host) {
            tracing::warn!("Failed to save host to config: {}", e);
        }
    }

    match args.command {
        Command::Create { name } => {
            let state = provider
                .database_resource()
                .create(&DatabasePlan { name })
                .await
                .map_err(Diagnostics::from)?;
            print_json(&state)
        }
        Command::Read { id } => {
            let known = DatabaseState {
                id,
                name: String::new(),
                last_updated: String::new(),
            };
            let state = provider
                .database_resource()
                .read(&known)
                .await
                .map_err(Diagnostics::from)?;
            print_json(&state)
        }
        Command::Delete { id } => {
            let known = DatabaseState {
                id,
                name: String::new(),
                last_updated: String::new(),
            };
            provider
                .database_resource()
                .delete(&known)
                .await
                .map_err(Diagnostics::from)?;
            Ok(())
        }
        Command::List => {
            let state = provider
                .databases_data_source()
                .list()
                .await
                .map_err(Diagnostics::from)?;
            print_json(&state)
        }
        Command::Populate { id, items } => {
            let items = load_items(&items)?;
            provider
                .populate_action()
                .invoke(&PopulateConfig { id, items })
                .await
                .map_err(Diagnostics::from)?;
            Ok(())
        }
    }
}

/// Read an items file. YAML is a superset of JSON, so one parser covers both.
fn load_items(path: &Path) -> Result<Vec<DatabaseItem>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read items file {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse items file {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
