//! Device configurator.
//!
//! Loads a controller model, sorts its meshes into chasis, buttons and knobs,
//! and lets the user recolor each group before sending the order by mail.

mod app;
mod assets;
mod classify;
mod config;
mod configurator;
mod order;
mod palette;
mod render;
mod scene;
mod ui;

use clap::{Parser, ValueEnum};
use config::AppConfig;
use configurator::ColoringPolicy;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "device-configurator",
    version,
    about = "Interactive 3D controller configurator"
)]
struct Cli {
    /// JSON settings file (palettes, camera poses, order recipient)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the effective settings to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<PathBuf>,

    /// Model to load instead of the configured one
    #[arg(short, long, value_name = "PATH")]
    model: Option<PathBuf>,

    /// HDR environment used for ambient light and background
    #[arg(long, value_name = "PATH")]
    environment: Option<PathBuf>,

    /// How palette clicks are applied
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Color every part of the active category
    CategoryWide,
    /// Color only the clicked part, from the shared palette
    SinglePart,
}

impl From<PolicyArg> for ColoringPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::CategoryWide => ColoringPolicy::CategoryWide,
            PolicyArg::SinglePart => ColoringPolicy::SinglePart,
        }
    }
}

impl Cli {
    fn resolve_config(&self) -> AppConfig {
        let mut config = match &self.config {
            Some(path) => match config::load_config(path) {
                Ok(config) => {
                    log::info!("Loaded settings from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Using default settings: {}", err);
                    AppConfig::default()
                }
            },
            None => AppConfig::default(),
        };

        if let Some(model) = &self.model {
            config.model_path = model.clone();
        }
        if let Some(environment) = &self.environment {
            config.environment_path = Some(environment.clone());
        }
        if let Some(policy) = self.policy {
            config.policy = policy.into();
        }
        config
    }
}

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config();

    if let Some(path) = &cli.write_config {
        match config::save_config(&config, path) {
            Ok(()) => log::info!("Wrote settings to {}", path.display()),
            Err(err) => {
                log::error!("Failed to write settings: {}", err);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    log::info!(
        "Starting configurator (model: {}, policy: {:?})",
        config.model_path.display(),
        config.policy
    );
    app::run(config)
}
