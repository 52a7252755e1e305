mod config;
pub mod migrations;
pub mod plan_db;

pub use config::Config;
pub use plan_db::{PlanDb, PlanningSnapshot};

use std::path::PathBuf;

/// Returns `~/.config/planfit[-dev]/` based on PLANFIT_ENV.
///
/// Set PLANFIT_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PLANFIT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("planfit-dev")
    } else {
        base_dir.join("planfit")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
