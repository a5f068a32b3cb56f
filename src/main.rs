//! fieldbox command line entry point.
//!
//! Usage: `fieldbox [DATASET_DIR]`. Without an argument the first directory
//! under `./dataset` is opened.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fieldbox::constants::DEFAULT_DATASET_ROOT;
use fieldbox::data::{first_dataset_dir, DiskImageLoader};
use fieldbox::{AnnotationSession, AppConfig, SetupError};
use fieldbox_view::ViewError;
use log::LevelFilter;
use thiserror::Error;

/// Anything that ends the process with a failure code.
#[derive(Debug, Error)]
enum FatalError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    View(#[from] ViewError),
}

/// Crates whose debug output drowns ours.
const NOISY_MODULES: [&str; 4] = ["winit", "wgpu_core", "wgpu_hal", "naga"];

/// Set up `env_logger` at info level. Returns whether `RUST_LOG` is set, in
/// which case it takes precedence over the configured level.
fn init_logging() -> bool {
    let from_env = std::env::var_os("RUST_LOG").is_some();
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Trace);
    for module in NOISY_MODULES {
        builder.filter_module(module, LevelFilter::Warn);
    }
    builder.parse_default_env().init();
    if !from_env {
        log::set_max_level(LevelFilter::Info);
    }
    from_env
}

fn dataset_dir() -> Result<PathBuf, SetupError> {
    match std::env::args_os().nth(1) {
        Some(arg) => Ok(PathBuf::from(arg)),
        None => first_dataset_dir(Path::new(DEFAULT_DATASET_ROOT)),
    }
}

fn run(level_from_env: bool) -> Result<(), FatalError> {
    let dataset_dir = dataset_dir()?;
    log::info!("Opening dataset {:?}", dataset_dir);

    let config = AppConfig::load_for_dataset(&dataset_dir)?;
    if !level_from_env {
        log::set_max_level(config.preferences.log_level.to_level_filter());
    }

    let loader = DiskImageLoader::new(config.preferences.display_width);
    let session = AnnotationSession::open(&dataset_dir, &config, Box::new(loader))?;
    fieldbox::app::run(session)?;
    Ok(())
}

fn main() -> ExitCode {
    let level_from_env = init_logging();
    match run(level_from_env) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
