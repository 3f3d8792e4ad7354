use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gcp_dns::config::{Config, Overrides};
use gcp_dns::gcp::http::format_gcp_error;
use gcp_dns::{DnsClientFactory, Project};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Google Cloud DNS from the command line
#[derive(Parser, Debug)]
#[command(name = "gcp-dns", version, about, long_about = None)]
struct Args {
    /// GCP project to use
    #[arg(short, long)]
    project: Option<String>,

    /// Service account keyfile (defaults to ambient credentials)
    #[arg(short, long)]
    keyfile: Option<PathBuf>,

    /// OAuth scope to request (repeatable)
    #[arg(long = "scope")]
    scopes: Vec<String>,

    /// Retry count for the connection
    #[arg(long)]
    retries: Option<u32>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the resolved connection
    Project,
    /// List managed zones
    Zones,
    /// Show one managed zone
    Zone { name: String },
    /// Persist a default project
    SetProject { project_id: String },
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

    tracing::info!("gcp-dns started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("gcp-dns").join("gcp-dns.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".gcp-dns").join("gcp-dns.log");
    }
    PathBuf::from("gcp-dns.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();

    if let Command::SetProject { project_id } = &args.command {
        config.set_project(project_id)?;
        println!("Default project set to {}", project_id);
        return Ok(());
    }

    let client_config = config.client_config(Overrides {
        project_id: args.project.clone(),
        keyfile: args.keyfile.clone(),
        scopes: args.scopes.clone(),
        retries: args.retries,
        timeout_ms: args.timeout_ms,
    });

    let project = DnsClientFactory::new().connect(client_config).await?;

    if let Err(err) = run(&project, &args.command).await {
        eprintln!("Error: {}", format_gcp_error(&err));
        tracing::error!("{:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(project: &Project, command: &Command) -> Result<()> {
    let output = match command {
        Command::Project => {
            let service = project.service();
            serde_json::json!({
                "project": project.project_id(),
                "connection": service.connection_id().to_string(),
                "scopes": service.credentials().scope().scopes(),
                "retries": service.retries(),
                "timeoutMs": service.timeout().map(|t| t.as_millis() as u64),
                "endpoint": service.endpoint().as_str(),
            })
        }
        Command::Zones => serde_json::to_value(project.zones().await?)?,
        Command::Zone { name } => match project.zone(name).await? {
            Some(zone) => serde_json::to_value(zone)?,
            None => anyhow::bail!("Zone {} not found in {}", name, project.project_id()),
        },
        Command::SetProject { .. } => return Ok(()),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
