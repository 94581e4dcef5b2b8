use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use seminar_generator::config::{
    find_config_file, load_config, save_default_config, Config, LOCAL_CONFIG_FILE,
};
use seminar_generator::mcp::{SeminarServer, ToolRegistry, TOOL_NAME};
use seminar_generator::SeminarGenerator;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Seminar Generator - research a topic and write a seminar slide deck
#[derive(Parser, Debug)]
#[command(name = "seminar-generator")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server that generates seminar materials for a topic", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory decks are written to (overrides configuration)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Upstream request timeout in seconds (overrides configuration)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log output format
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP server over stdio (default)
    Serve,

    /// Generate seminar materials once and print the result
    #[command(alias = "g")]
    Generate {
        /// Seminar topic
        topic: String,

        /// Number of slides
        #[arg(long, short)]
        slides: Option<i64>,

        /// Skip visualization assets
        #[arg(long)]
        no_visuals: bool,
    },

    /// Print the advertised tools as JSON
    Tools,

    /// Write a default configuration file
    InitConfig {
        /// Destination path
        #[arg(default_value = LOCAL_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(cli: &Cli) {
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };
    let json = cli.log_format == LogFormat::Json;

    // stdout carries the protocol in stdio mode
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("seminar_generator={}", env_filter)),
        ))
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => find_config_file(),
    };

    if let Some(path) = &path {
        tracing::info!("Using config file: {}", path.display());
    }

    let mut config = load_config(path.as_deref()).context("Failed to load configuration")?;

    if let Some(dir) = &cli.output_dir {
        config.output.directory = Some(dir.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.research.timeout_seconds = timeout;
    }

    Ok(config)
}

fn build_registry(config: &Config) -> Result<ToolRegistry> {
    let generator = SeminarGenerator::from_config(config)?;
    Ok(ToolRegistry::for_generator(Arc::new(generator)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match &cli.command {
        Some(Commands::InitConfig { path, force }) => {
            save_default_config(path, *force)?;
            println!("Wrote default configuration to {}", path.display());
        }

        Some(Commands::Tools) => {
            let registry = build_registry(&resolve_config(&cli)?)?;
            println!("{}", serde_json::to_string_pretty(&registry.list())?);
        }

        Some(Commands::Generate {
            topic,
            slides,
            no_visuals,
        }) => {
            let registry = build_registry(&resolve_config(&cli)?)?;

            let mut args = serde_json::json!({
                "topic": topic,
                "includeVisuals": !no_visuals,
            });
            if let Some(slides) = slides {
                args["slides"] = serde_json::json!(slides);
            }

            let response = registry.execute(TOOL_NAME, args).await?;
            let text = response["content"][0]["text"].as_str().unwrap_or_default();

            if response["isError"].as_bool().unwrap_or(false) {
                anyhow::bail!("{}", text);
            }
            println!("{}", text);
        }

        Some(Commands::Serve) | None => {
            let server = SeminarServer::new(build_registry(&resolve_config(&cli)?)?);

            tokio::select! {
                result = server.run() => {
                    result?;
                    tracing::info!("MCP client disconnected, shutting down");
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupt received, shutting down");
                }
            }
        }
    }

    Ok(())
}
