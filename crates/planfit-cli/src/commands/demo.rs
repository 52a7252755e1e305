//! Demo data commands for CLI.

use clap::Subcommand;
use planfit_core::storage::{Config, PlanDb};

#[derive(Subcommand)]
pub enum DemoAction {
    /// Reset and seed the demo team (Rocket Squad) with its sample backlog
    Seed {
        /// Also make the demo team the configured default
        #[arg(long)]
        set_default: bool,
    },
}

pub fn run(action: DemoAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DemoAction::Seed { set_default } => {
            let mut db = PlanDb::open()?;
            let team = db.seed_demo()?;
            println!("Demo team seeded: {} ({})", team.name, team.id);
            println!(
                "{} engineers, {} pts/engineer, {} sprints: {} pts capacity",
                team.engineer_count,
                team.avg_points_per_engineer,
                team.sprints_in_increment,
                team.increment_capacity()
            );

            if set_default {
                let mut config = Config::load()?;
                config.default_team_id = Some(team.id.clone());
                config.save()?;
                println!("Default team set to {}", team.id);
            }
        }
    }
    Ok(())
}
