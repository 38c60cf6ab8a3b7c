//! Mensura server entry point.

use std::path::PathBuf;

use anyhow::Context;
use mensura_config::ConfigLoader;
use mensura_telemetry::init_telemetry;

const DEFAULT_CONFIG_FILE: &str = "mensura.toml";

/// Command-line arguments.
struct Args {
    /// Configuration file; `mensura.toml` is used when present.
    config: Option<PathBuf>,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        let mut config = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => match args.next() {
                    Some(path) => config = Some(PathBuf::from(path)),
                    None => {
                        eprintln!("--config requires a path");
                        std::process::exit(2);
                    }
                },
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-V" => {
                    println!("mensura {}", mensura::VERSION);
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown argument: {other}");
                    eprintln!("Use --help for usage information");
                    std::process::exit(2);
                }
            }
        }

        Self { config }
    }
}

fn print_help() {
    println!(
        r"Mensura - unit conversion service

USAGE:
    mensura [OPTIONS]

OPTIONS:
    -c, --config <PATH>    Configuration file (TOML or JSON); defaults to ./mensura.toml if present
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    MENSURA__SERVER__HTTP_ADDR                Listen address (default: 127.0.0.1:8000)
    MENSURA__SERVER__MOUNT_PREFIX             Path prefix for every route (default: none)
    MENSURA__ASSETS__STATIC_DIR               Static asset directory (default: static)
    MENSURA__GUARD__MARKER_HEADER             Header admitting fragment requests (default: HX-Request)
    MENSURA__GUARD__ALLOW_LIST                Comma-separated paths admitted without it
    MENSURA__DOCS__ENABLED                    Serve /docs, /redoc and /openapi.json
    MENSURA__TELEMETRY__LOGGING__LEVEL        Log filter (default: info)
    MENSURA__TELEMETRY__LOGGING__FORMAT       json or pretty
    MENSURA__TELEMETRY__METRICS__ENABLED      Serve /metrics

A .env file in the working directory is loaded before the environment is read.
"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let loader = match &args.config {
        Some(path) => ConfigLoader::new()
            .with_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE)?,
    };
    let config = loader
        .with_dotenv()
        .with_env_prefix("MENSURA")
        .load()
        .context("invalid configuration")?;

    init_telemetry(&config.telemetry.to_telemetry_config())
        .context("initializing telemetry")?;

    tracing::info!(
        version = mensura::VERSION,
        addr = %config.server.http_addr,
        mount_prefix = %config.server.mount_prefix,
        "Starting Mensura"
    );

    let server = mensura::server(&config).context("assembling application")?;
    server.run().await.context("server error")?;

    Ok(())
}
