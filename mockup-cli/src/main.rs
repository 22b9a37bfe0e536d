//! # Saorsa Mockup CLI
//!
//! Replays an edit script and prints the resolved render snapshot as JSON.

use std::io::Read as _;

use clap::Parser;
use mockup_cli::{initial_document, load_script, parse_script, replay, CliArgs, Report, ReplayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,mockup_core=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mockup_core=debug,mockup_cli=debug"));

    // stdout carries the report
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = ReplayConfig::from(&args);
    tracing::info!(
        "Starting session at {} with {} undo steps",
        config.resolution,
        config.history
    );

    let steps = if let Some(path) = &args.script {
        load_script(path)?
    } else {
        tracing::debug!("No --script given, reading steps from stdin");
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        if input.trim().is_empty() {
            Vec::new()
        } else {
            parse_script(&input)?
        }
    };

    let document = initial_document(&config)?;
    let editor = replay(document, config.history, steps);

    let report = Report::of(&editor);
    let output = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");

    tracing::info!(
        "Done: {} history entries, {} device(s)",
        report.history_len,
        report.snapshot.device_count()
    );
    Ok(())
}
