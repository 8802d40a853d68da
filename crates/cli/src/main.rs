//! `contentscan` -- submit images to a content-classification service.
//!
//! # Environment variables
//!
//! | Variable                 | Required | Default                 | Description                     |
//! |--------------------------|----------|-------------------------|---------------------------------|
//! | `CONTENTSCAN_API_URL`    | no       | `http://localhost:5001` | Classification service base URL |
//! | `CONTENTSCAN_EXPORT_DIR` | no       | `.`                     | Where `--export` writes reports |
//! | `RUST_LOG`               | no       | `contentscan=info`      | Log filter                      |

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use contentscan_cli::config::CliConfig;
use contentscan_cli::{files, presenter, report};
use contentscan_client::{ScanServiceApi, ScanSession};
use contentscan_core::error::CoreError;
use contentscan_core::input::InputSource;
use contentscan_core::progress::PROGRESS_HIDE_DELAY;
use contentscan_core::scan_result::ScanResult;
use contentscan_core::status::RiskStatus;
use contentscan_core::store::Notice;
use contentscan_events::EventBus;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "contentscan")]
#[command(about = "Scan images for risky content with a remote classification service")]
#[command(version)]
struct Cli {
    /// Classification service base URL (overrides CONTENTSCAN_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan exactly one image through the single-upload endpoint.
    Single {
        file: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Scan several images in one bulk request.
    Bulk {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Behave like a drag-and-drop: bulk when more than one file is given.
    Drop {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Check that the classification service is up.
    Health,
}

#[derive(Args)]
struct ViewArgs {
    /// Write a JSON report of the results.
    #[arg(long)]
    export: bool,

    /// Directory for the report (overrides CONTENTSCAN_EXPORT_DIR).
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Show the full analysis of the result with this storage filename.
    #[arg(long)]
    details: Option<String>,

    /// Only list results with this status (safe, concerning, high_risk).
    #[arg(long, value_parser = parse_status)]
    status: Option<RiskStatus>,
}

fn parse_status(value: &str) -> Result<RiskStatus, String> {
    RiskStatus::parse(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "contentscan=info,contentscan_cli=info,contentscan_client=info,contentscan_core=info"
                        .into()
                }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let (source, view) = match cli.command {
        Commands::Health => {
            let config = CliConfig::from_env().with_overrides(cli.api_url, None);
            let api = ScanServiceApi::new(config.client.api_url);
            let health = api.health().await?;
            println!(
                "{} ({})",
                health.status,
                health.timestamp.as_deref().unwrap_or("no timestamp")
            );
            return Ok(());
        }
        Commands::Single { file, view } => {
            let files = files::load_candidates(&[file]).await?;
            (InputSource::SingleTrigger(files), view)
        }
        Commands::Bulk { files: paths, view } => {
            let files = files::load_candidates(&paths).await?;
            (InputSource::BulkTrigger(files), view)
        }
        Commands::Drop { files: paths, view } => {
            let files = files::load_candidates(&paths).await?;
            (InputSource::Drop(files), view)
        }
    };

    let config = CliConfig::from_env().with_overrides(cli.api_url, view.export_dir.clone());
    tracing::info!(api_url = %config.client.api_url, "Starting contentscan");

    let bus = Arc::new(EventBus::default());
    let api = Arc::new(ScanServiceApi::new(config.client.api_url.clone()));
    let mut session = ScanSession::new(api, Arc::clone(&bus));

    let printer = tokio::spawn(presenter::print_progress(bus.subscribe()));
    let submitted = session.submit(source).await;
    // The printer exits on ScanCompleted; an empty selection never starts one.
    if matches!(submitted, Err(CoreError::EmptySelection)) {
        printer.abort();
    } else {
        let _ = printer.await;
        tokio::time::sleep(PROGRESS_HIDE_DELAY).await;
    }

    match submitted {
        Ok(summary) => match presenter::render_summary(&summary) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("{}", presenter::render_notice(&Notice::from(&e))),
        },
        Err(CoreError::EmptySelection) => return Ok(()),
        Err(e) => {
            eprintln!("{}", presenter::render_notice(&Notice::from(&e)));
            if session.store().is_empty() {
                std::process::exit(1);
            }
        }
    }

    let shown: Vec<&ScanResult> = match view.status {
        Some(status) => session.store().filter_by_status(status),
        None => session.store().results().iter().collect(),
    };
    println!("{}", presenter::render_cards(shown));

    if let Some(name) = view.details.as_deref() {
        match session.store().find_by_filename(name) {
            Some(result) => println!("{}", presenter::render_details(result)),
            None => eprintln!("No result with filename '{name}'"),
        }
    }

    if view.export {
        match session.export(chrono::Utc::now()) {
            Ok(doc) => {
                let path = report::write_report(&doc, &config.export_dir).await?;
                println!("Report written to {}", path.display());
            }
            Err(e) => eprintln!("{}", presenter::render_notice(&Notice::from(&e))),
        }
    }

    Ok(())
}
