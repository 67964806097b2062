//! SMC Exporter Binary
//!
//! Serves Apple SMC fan and temperature readings as Prometheus metrics.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use smc_exporter::{
    open_session, start_web_server, Backend, KeyCatalog, SessionConfig, SmcExporter, WebConfig,
    DEFAULT_LISTEN_ADDRESS, DEFAULT_SMC_BINARY, DEFAULT_TELEMETRY_PATH,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "smc_exporter")]
#[command(about = "Prometheus exporter for Apple SMC fan speeds and temperatures")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Address on which to expose metrics and web interface
    #[arg(long = "web.listen-address", default_value = DEFAULT_LISTEN_ADDRESS)]
    listen_address: String,

    /// Path under which to expose metrics
    #[arg(long = "web.telemetry-path", default_value = DEFAULT_TELEMETRY_PATH)]
    telemetry_path: String,

    /// Sensor backend: iokit, command or simulated
    #[arg(long, default_value_t = Backend::default())]
    backend: Backend,

    /// Path of the companion smc tool used by the command backend
    #[arg(long = "smc.binary", default_value = DEFAULT_SMC_BINARY)]
    smc_binary: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the metrics server (default)
    Serve,

    /// Run one collection pass, print it and exit
    Snapshot(SnapshotArgs),

    /// List every metric the catalog can export
    Keys,
}

#[derive(Args)]
struct SnapshotArgs {
    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    match &cli.command {
        Some(Commands::Serve) | None => serve_command(&cli).await,
        Some(Commands::Snapshot(args)) => snapshot_command(&cli, args),
        Some(Commands::Keys) => keys_command(),
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    // RUST_LOG directives refine the flag-selected default level
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn session_config(cli: &Cli) -> SessionConfig {
    SessionConfig::default()
        .with_backend(cli.backend)
        .with_smc_binary(&cli.smc_binary)
}

fn build_exporter(cli: &Cli) -> anyhow::Result<Arc<SmcExporter>> {
    let catalog = Arc::new(KeyCatalog::build().context("Failed to build key catalog")?);
    let session = open_session(&session_config(cli))
        .with_context(|| format!("Failed to open {} SMC session", cli.backend))?;
    info!(
        "Opened {} session, {} temperature keys in catalog",
        session.backend_name(),
        catalog.temperatures().len()
    );
    Ok(Arc::new(SmcExporter::new(session, catalog)))
}

async fn serve_command(cli: &Cli) -> anyhow::Result<()> {
    let web_config = WebConfig::new(&cli.listen_address, &cli.telemetry_path);
    web_config.validate()?;

    let exporter = build_exporter(cli)?;

    info!("Web server configuration:");
    info!("  - Listen address: {}", web_config.listen_address);
    info!("  - Telemetry path: {}", web_config.telemetry_path);
    info!("  - Backend: {}", exporter.backend_name());

    start_web_server(web_config, exporter).await?;
    Ok(())
}

fn snapshot_command(cli: &Cli, args: &SnapshotArgs) -> anyhow::Result<()> {
    let format = args.format.as_str();
    if format != "text" && format != "json" {
        anyhow::bail!("Unsupported format: {}. Use 'text' or 'json'", format);
    }

    let exporter = build_exporter(cli)?;
    if format == "json" {
        let snapshot = exporter.snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", exporter.render_text()?);
    }
    exporter.close();
    Ok(())
}

fn keys_command() -> anyhow::Result<()> {
    let catalog = KeyCatalog::build()?;

    let fan_count = catalog.fan_count();
    println!(
        "{}\t{}\t{}",
        fan_count.name,
        catalog.fan_count_key(),
        fan_count.help
    );
    for (attribute, descriptor) in catalog.fan_attributes() {
        println!(
            "{}{{index}}\tF<i>{}\t{}",
            descriptor.name,
            attribute.suffix(),
            descriptor.help
        );
    }
    for sensor in catalog.temperatures() {
        println!(
            "{}\t{}\t{}",
            sensor.descriptor.name, sensor.key, sensor.descriptor.help
        );
    }
    Ok(())
}
