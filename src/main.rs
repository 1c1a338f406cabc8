use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use imgv::window::StartupWindow;
use imgv::{DisplayController, DisplaySession, ImgvApp, ViewerConfig};

const DEFAULT_CONFIG: &str = "imgv.json";

/// Minimal plain-text PPM viewer. Drop a file on the window to replace the image.
#[derive(Debug, Parser)]
#[command(name = "imgv", version, about)]
struct Cli {
    /// Image to show at startup
    path: Option<PathBuf>,

    /// Path to JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .filter_module("imgv", level)
        .init();
}

fn load_config(cli: &Cli) -> Result<ViewerConfig> {
    let cfg = match &cli.config {
        Some(path) => ViewerConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None if PathBuf::from(DEFAULT_CONFIG).is_file() => {
            ViewerConfig::from_json_file(DEFAULT_CONFIG)
                .with_context(|| format!("loading config from {DEFAULT_CONFIG}"))?
        }
        None => ViewerConfig::default(),
    };
    cfg.validated().context("validating configuration")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;

    // The startup image is decoded before the window exists; a failure
    // just means the viewer opens on the fallback background.
    let mut session = DisplaySession::new();
    let mut startup = StartupWindow::new(&config.window);
    if let Some(path) = &cli.path {
        DisplayController::new(config.decode_options()).load(&mut session, path, &mut startup);
    }

    let options = eframe::NativeOptions {
        viewport: startup.viewport(),
        ..Default::default()
    };

    let app = ImgvApp::new(session, &config);
    eframe::run_native(
        "imgv",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the viewer window")
}
