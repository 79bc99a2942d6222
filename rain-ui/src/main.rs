use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use rain_core::InputField;
use rain_core::contact::ContactSubmission;
use rain_core::share::{ShareError, ShareTarget};
use rain_store::BackendKind;
use rain_ui::app;
use rain_ui::config::AppConfig;
use rain_ui::contact_form::ContactOutcome;
use rain_ui::controller::CalculatorController;
use rain_ui::logging::{enable_file_logging, init_logging};
use rain_ui::map::init_map;
use rain_ui::terminal::{TerminalContactView, TerminalLauncher, TerminalMap, TerminalView};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Rainwater harvest calculator.
///
/// Estimates the water a roof can collect in a year, with savings, payback
/// and everyday equivalences. The last result is kept between runs.
#[derive(Debug, Parser)]
struct Cli {
    /// Configuration file. Defaults to `rain-harvest.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage backend (`file` or `memory`).
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Backend-specific storage location, a directory for `file`.
    #[arg(long, global = true)]
    store: Option<String>,

    /// Log level or EnvFilter directive. `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate and store a harvest estimate.
    Calc {
        /// Roof area in m².
        #[arg(long)]
        area: String,
        /// Roof material: metal, concrete, tile or other.
        #[arg(long)]
        material: String,
        /// Annual precipitation in mm.
        #[arg(long)]
        precipitation: String,
        /// Storage-tank capacity in liters.
        #[arg(long)]
        tank: Option<String>,
        /// Total system cost.
        #[arg(long)]
        cost: Option<String>,
        /// Monthly savings.
        #[arg(long)]
        savings: Option<String>,
    },
    /// Show the stored estimate.
    Show,
    /// Forget the stored estimate.
    Reset,
    /// Share the stored estimate.
    Share {
        /// whatsapp, facebook, x or copy.
        #[arg(value_parser = ShareTarget::parse)]
        target: ShareTarget,
    },
    /// Validate and send a contact inquiry.
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        message: String,
        /// Accept the privacy notice.
        #[arg(long)]
        accept: bool,
    },
    /// List the installation sites.
    Map,
    /// List the available storage backends.
    Backends,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration.
    fn apply(
        &self,
        config: &mut AppConfig,
    ) {
        if let Some(backend) = &self.backend {
            config.storage.backend = backend.clone();
        }
        if let Some(store) = &self.store {
            config.storage.location = store.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply(&mut config);

    init_logging(&config.logging.level);
    if let Some(path) = &config.logging.file {
        enable_file_logging(path)?;
    }
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Backends => {
            for kind in BackendKind::all() {
                println!("{kind}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Map => {
            init_map(&mut TerminalMap::default());
            Ok(ExitCode::SUCCESS)
        }
        Command::Contact {
            name,
            email,
            phone,
            message,
            accept,
        } => {
            let contact = app::build_contact(&config, Arc::new(TerminalContactView));
            contact.fill(ContactSubmission {
                name,
                email,
                phone,
                message,
                consent: accept,
            });
            match contact.submit().await {
                ContactOutcome::Sent => Ok(ExitCode::SUCCESS),
                ContactOutcome::Invalid(_) | ContactOutcome::Ignored => Ok(ExitCode::FAILURE),
            }
        }
        Command::Calc {
            area,
            material,
            precipitation,
            tank,
            cost,
            savings,
        } => {
            let controller = calculator(&config).await?;
            controller.set_field(InputField::Area, area);
            controller.set_field(InputField::Material, material);
            controller.set_field(InputField::Precipitation, precipitation);
            controller.set_field(InputField::TankCapacity, tank.unwrap_or_default());
            controller.set_field(InputField::SystemCost, cost.unwrap_or_default());
            controller.set_field(InputField::MonthlySavings, savings.unwrap_or_default());

            match controller.submit().await {
                Ok(Some(_)) => Ok(ExitCode::SUCCESS),
                Ok(None) | Err(_) => Ok(ExitCode::FAILURE),
            }
        }
        Command::Show => {
            calculator(&config).await?.initialize().await;
            Ok(ExitCode::SUCCESS)
        }
        Command::Reset => {
            calculator(&config).await?.reset().await;
            Ok(ExitCode::SUCCESS)
        }
        Command::Share { target } => {
            let controller = calculator(&config).await?;
            if controller.initialize().await.is_none() {
                return Ok(ExitCode::FAILURE);
            }
            match controller.share(target).await {
                Ok(()) => {
                    info!(%target, "shared");
                    Ok(ExitCode::SUCCESS)
                }
                Err(ShareError::NoResult) => Ok(ExitCode::FAILURE),
                Err(e) => Err(e).context("share failed"),
            }
        }
    }
}

async fn calculator(config: &AppConfig) -> anyhow::Result<Arc<CalculatorController>> {
    let store = app::open_store(config).await?;
    app::build_calculator(
        config,
        store,
        Arc::new(TerminalView),
        Arc::new(TerminalLauncher),
    )
}
