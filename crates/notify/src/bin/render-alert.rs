//! render-alert — decode an alerting webhook payload and print the rendered message.
//!
//! Reads the payload from a file or stdin, normalizes it with the selected
//! schema adapter and writes the plain-text body, the HTML body, or both
//! as JSON to stdout. Logs go to stderr.
//!
//! Settings resolve as: CLI flag, then process environment, then `.env`,
//! then the built-in default.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use forwarder_core::config::{self, Config, PayloadVersion};
use forwarder_notify::{generate_message, parse_alert};

// ── CLI ─────────────────────────────────────────────────────────────

/// Render an alert webhook payload into chat message bodies.
#[derive(Parser, Debug)]
#[command(name = "render-alert", version, about)]
struct Cli {
    /// Payload file to read (`-` for stdin).
    #[arg(long, short, default_value = "-")]
    input: String,

    /// Fractional digits kept for metric values.
    #[arg(long, env = "FORWARDER_METRIC_ROUNDING")]
    metric_rounding: Option<u32>,

    /// Webhook schema of the payload (`legacy` or `unified`).
    #[arg(long, env = "FORWARDER_PAYLOAD_VERSION")]
    payload_version: Option<PayloadVersion>,

    /// Which rendering to print.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,

    /// Explicit env file to load instead of `./.env`.
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

/// Layer CLI flags over the loaded config.
fn apply_overrides(cli: &Cli, mut config: Config) -> Config {
    if let Some(rounding) = cli.metric_rounding {
        config.metric_rounding = rounding;
    }
    if let Some(version) = cli.payload_version {
        config.payload_version = version;
    }
    config
}

/// Decode one payload from `input`, render it and write the selected output.
fn run(
    cli: &Cli,
    config: &Config,
    mut input: impl Read,
    mut out: impl Write,
) -> anyhow::Result<()> {
    let mut body = Vec::new();
    input
        .read_to_end(&mut body)
        .with_context(|| format!("failed to read payload from {}", cli.input))?;

    let alert = parse_alert(config.payload_version, &body)
        .with_context(|| format!("failed to decode {} payload", config.payload_version))?;
    let message = generate_message(&alert, config.metric_rounding)?;

    info!(id = %alert.id, state = %alert.state, "rendered alert");

    match cli.output {
        OutputFormat::Text => writeln!(out, "{}", message.text_body)?,
        OutputFormat::Html => writeln!(out, "{}", message.html_body)?,
        OutputFormat::Json => {
            let json = serde_json::json!({
                "id": alert.id,
                "text_body": message.text_body,
                "html_body": message.html_body,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
    }

    Ok(())
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => config::load_dotenv_from(path)?,
        None => config::load_dotenv(),
    }

    let config = Config::from_env().context("invalid forwarder configuration")?;
    let config = apply_overrides(&cli, config);
    config.log_summary();

    let input: Box<dyn Read> = if cli.input == "-" {
        Box::new(std::io::stdin())
    } else {
        Box::new(
            std::fs::File::open(&cli.input)
                .with_context(|| format!("failed to open {}", cli.input))?,
        )
    };

    run(&cli, &config, input, std::io::stdout().lock())
}
