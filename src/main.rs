mod app;
mod catalog;
mod cli;
mod config;
mod gemini;
mod generate;
mod roulette;
mod selection;
mod share;
mod spin;
mod state;
mod task;
mod ui;
mod variant;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

/// Default log filter when `RUST_LOG` is unset
fn default_filter(cli: &Cli) -> &'static str {
    match (&cli.command, cli.output.verbose) {
        (None, _) | (Some(_), true) => "recipe_roulette=debug,info",
        // Keep CLI stdout clean unless asked
        (Some(_), false) => "warn",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(&cli).into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(command) = cli.command {
        return cli::run(command, cli.output).await;
    }

    tracing::info!("Starting Recipe Roulette");

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([520.0, 680.0])
        .with_min_inner_size([420.0, 560.0])
        .with_title("Recipe Roulette");

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true, // Save/restore window size and position
        ..Default::default()
    };

    eframe::run_native(
        "Recipe Roulette",
        native_options,
        Box::new(|cc| Ok(Box::new(app::RouletteApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
