//! Configuration commands for CLI.

use clap::Subcommand;
use planfit_core::storage::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,
    /// Set the team used when `--team` is not passed
    SetDefaultTeam {
        /// Team ID
        id: String,
    },
    /// Set the default number of forecast windows
    SetWindows {
        /// Window count (at least 1)
        count: usize,
    },
    /// Set the default first-window label, e.g. "Q3 2026"
    SetStartLabel {
        /// Label text; an empty string clears it
        label: String,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::SetDefaultTeam { id } => {
            let mut config = Config::load()?;
            config.default_team_id = Some(id.clone());
            config.save()?;
            println!("Default team set to {id}");
        }
        ConfigAction::SetWindows { count } => {
            let mut config = Config::load()?;
            config.forecast.window_count = count.max(1);
            config.save()?;
            println!("Default window count set to {}", config.forecast.window_count);
        }
        ConfigAction::SetStartLabel { label } => {
            let mut config = Config::load()?;
            config.forecast.start_label = label;
            config.save()?;
            if config.forecast.start_label.is_empty() {
                println!("Start label cleared");
            } else {
                println!("Start label set to {}", config.forecast.start_label);
            }
        }
    }
    Ok(())
}
