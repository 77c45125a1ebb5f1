//! Emerson CLI
//!
//! Thin wrapper around emerson-core for checking layout math and replaying
//! page behaviors without a browser.
//!
//! ## Usage
//!
//! ```bash
//! # How many marquee spans a 1000px viewport needs for 150px spans
//! emerson marquee --viewport 1000 --span 150
//!
//! # Where an anchor link scrolls to
//! emerson scroll-offset --target-top 1900 --scroll-y 500 --header 80
//!
//! # Print the default behavior configuration
//! emerson config
//!
//! # Install the behaviors on a fixture page and replay its events
//! emerson simulate landing.json --config behaviors.json
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use emerson_core::logging::{verbosity_filter, ConsoleLayer, LogLine, LogSink};
use emerson_core::memory::PageFixture;
use emerson_core::{scroll_offset, spans_needed, BehaviorConfig, PageController, MAX_SPANS};
use tracing_subscriber::prelude::*;

/// Emerson - landing page behaviors
#[derive(Parser)]
#[command(name = "emerson")]
#[command(version = "0.1.0")]
#[command(about = "Emerson landing page behaviors")]
#[command(
    long_about = "Computes marquee and scroll layout values and simulates the landing page behaviors against a JSON page fixture."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to stderr as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Number of marquee spans for a viewport
    Marquee {
        /// Viewport width in px
        #[arg(long)]
        viewport: f64,
        /// Rendered width of one span in px
        #[arg(long)]
        span: f64,
        /// How many times the viewport must be covered
        #[arg(long, default_value_t = 2)]
        coverage: u32,
    },

    /// Scroll destination for an in-page link
    ScrollOffset {
        /// Target top relative to the viewport in px
        #[arg(long, allow_hyphen_values = true)]
        target_top: f64,
        /// Current document scroll position in px
        #[arg(long)]
        scroll_y: f64,
        /// Fixed header height in px
        #[arg(long)]
        header: f64,
        /// Extra gap below the header in px
        #[arg(long, default_value_t = 20.0)]
        buffer: f64,
    },

    /// Print the effective behavior configuration
    Config {
        /// Configuration file to load and validate (defaults otherwise)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Install the behaviors on a fixture page and replay its events
    Simulate {
        /// Page fixture (JSON)
        fixture: PathBuf,
        /// Behavior configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// JSON lines on stderr, for `--json-logs`.
struct StderrJsonSink;

impl LogSink for StderrJsonSink {
    fn write(&self, line: &LogLine) {
        if let Ok(json) = line.to_json() {
            let _ = writeln!(std::io::stderr(), "{}", json);
        }
    }
}

fn setup_logging(verbosity: u8, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(verbosity_filter(verbosity)));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(ConsoleLayer::new(StderrJsonSink))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(path: Option<&Path>) -> Result<BehaviorConfig> {
    let config = match path {
        Some(path) => BehaviorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BehaviorConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn simulate(fixture_path: &Path, config_path: Option<&Path>) -> Result<serde_json::Value> {
    let config = load_config(config_path)?;
    let fixture = PageFixture::load(fixture_path)
        .with_context(|| format!("Failed to load fixture {}", fixture_path.display()))?;

    let page = fixture.build();
    let controller = PageController::install(Rc::clone(&page), config)?;
    let replayed = fixture.replay(&page)?;
    tracing::info!(replayed, "Fixture replayed");

    Ok(serde_json::json!({
        "report": controller.report(),
        "snapshot": controller.snapshot(),
        "events": replayed,
        "elapsed_ms": page.now().as_millis() as u64,
        "scroll_requests": page.scroll_requests(),
        "clipboard": page.clipboard_text(),
        "styles_injected": page.injected_styles().len(),
    }))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Marquee {
            viewport,
            span,
            coverage,
        } => {
            if coverage == 0 {
                anyhow::bail!("--coverage must be at least 1");
            }
            let needed = spans_needed(viewport, span, coverage);
            if needed == 0 {
                tracing::warn!(
                    viewport,
                    span,
                    max = MAX_SPANS,
                    "Widths must be positive and need at most max spans, marquee would be left as is"
                );
            }
            println!("{}", needed);
        }

        Commands::ScrollOffset {
            target_top,
            scroll_y,
            header,
            buffer,
        } => {
            println!("{}", scroll_offset(target_top, scroll_y, header, buffer));
        }

        Commands::Config { file } => {
            let config = load_config(file.as_deref())?;
            println!("{}", config.to_json_pretty()?);
        }

        Commands::Simulate { fixture, config } => {
            let summary = simulate(&fixture, config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
