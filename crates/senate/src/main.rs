use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use senate::DeliberationRequest;
use senate_models::SenateConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "senate", about = "Trade Senate Protocol deliberation engine")]
struct Cli {
    /// Path to configuration file; fills userSettings fields the request omits
    #[arg(short, long)]
    config: Option<String>,

    /// Read the request JSON from a file instead of stdin
    #[arg(short, long)]
    input: Option<String>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config
    let config = match &cli.config {
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {path}"))?;
            toml::from_str(&config_str).with_context(|| "Failed to parse config")?
        }
        None => SenateConfig::default(),
    };

    // Initialize tracing (RUST_LOG wins over the configured level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    // Read request
    let request_json = if let Some(input_path) = &cli.input {
        std::fs::read_to_string(input_path)
            .with_context(|| format!("Failed to read input: {input_path}"))?
    } else {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    };

    let request: DeliberationRequest =
        serde_json::from_str(&request_json).context("Failed to parse request JSON")?;

    let mut settings = request.user_settings;
    if cli.config.is_some() {
        senate::apply_settings_defaults(&mut settings, &config.deliberation);
    }

    let decision = senate::arbiter::deliberate_value(&request.analyst_outputs, &settings);

    // Output decision as JSON to stdout
    let output = if cli.pretty {
        serde_json::to_string_pretty(&decision)?
    } else {
        serde_json::to_string(&decision)?
    };
    println!("{output}");

    Ok(())
}
