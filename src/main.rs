//! invmenu - headless replay of inventory menu sessions
//!
//! Builds menus from a TOML layout, replays a scripted player session through the
//! dispatcher and reports what happened.

mod layout;
mod runner;
mod script;

use anyhow::{Context, Result};
use clap::Parser;
use invmenu_testkit::JsonlSink;
use layout::Layout;
use runner::SessionRunner;
use script::SessionScript;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay inventory menu sessions headlessly", long_about = None)]
struct Args {
    /// Menu layout (TOML)
    #[arg(long, default_value = "config/menus.toml")]
    layout: PathBuf,
    /// Session script (JSON)
    #[arg(long)]
    script: PathBuf,
    /// Write every replayed event to this JSONL file
    #[arg(long)]
    event_log: Option<PathBuf>,
    /// Print final container contents per menu as JSON
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    // WARN by default, RUST_LOG overrides
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    info!("Starting invmenu v{}", env!("CARGO_PKG_VERSION"));

    let layout = Layout::from_path(&args.layout)?;
    let mut script = SessionScript::from_path(&args.script)?;
    let sink = args
        .event_log
        .as_ref()
        .map(|path| {
            JsonlSink::create(path)
                .with_context(|| format!("failed to create event log {}", path.display()))
        })
        .transpose()?;

    let mut runner = SessionRunner::new(layout, &script, sink);
    let summary = runner.run(&mut script)?;

    println!(
        "Replayed {} steps: {} handled, {} denied, {} passed through, {} messages, {} menus open",
        summary.steps,
        summary.handled,
        summary.denied,
        summary.passed_through,
        summary.messages,
        runner.api().sessions().len()
    );
    if args.dump {
        let snapshot = runner.layout().snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}
