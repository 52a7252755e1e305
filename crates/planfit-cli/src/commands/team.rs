//! Team profile commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use planfit_core::sizing::default_mappings;
use planfit_core::storage::PlanDb;
use planfit_core::team::{TeamProfile, TeamUpdate};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum TeamAction {
    /// Create a new team with the default size mapping table
    Create {
        /// Team name
        name: String,
        /// Avatar URL
        #[arg(long, default_value = "")]
        avatar: String,
        /// Number of engineers
        #[arg(long, default_value = "5")]
        engineers: i64,
        /// Average points per engineer per sprint
        #[arg(long, default_value = "8")]
        points_per_engineer: i64,
        /// Sprint length in weeks
        #[arg(long, default_value = "2")]
        sprint_length_weeks: i64,
        /// Sprints in one planning increment
        #[arg(long, default_value = "6")]
        sprints_in_increment: i64,
    },
    /// List teams
    List,
    /// Get team details
    Get {
        /// Team ID
        id: String,
    },
    /// Update a team
    Update {
        /// Team ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New avatar URL
        #[arg(long)]
        avatar: Option<String>,
        /// New engineer count
        #[arg(long)]
        engineers: Option<i64>,
        /// New points per engineer per sprint
        #[arg(long)]
        points_per_engineer: Option<i64>,
        /// New sprint length in weeks
        #[arg(long)]
        sprint_length_weeks: Option<i64>,
        /// New sprints per increment
        #[arg(long)]
        sprints_in_increment: Option<i64>,
    },
    /// Delete a team (epics, mappings, and snapshots cascade)
    Delete {
        /// Team ID
        id: String,
    },
}

pub fn run(action: TeamAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = PlanDb::open()?;

    match action {
        TeamAction::Create {
            name,
            avatar,
            engineers,
            points_per_engineer,
            sprint_length_weeks,
            sprints_in_increment,
        } => {
            let now = Utc::now();
            let team = TeamProfile {
                id: Uuid::new_v4().to_string(),
                name,
                avatar,
                engineer_count: engineers.max(0),
                avg_points_per_engineer: points_per_engineer.max(0),
                sprint_length_weeks: sprint_length_weeks.max(1),
                sprints_in_increment: sprints_in_increment.max(0),
                size_mappings: default_mappings(),
                created_at: now,
                updated_at: now,
            };
            db.create_team(&team)?;
            println!("Team created: {}", team.id);
            println!("{}", serde_json::to_string_pretty(&team)?);
        }
        TeamAction::List => {
            let teams = db.list_teams()?;
            println!("{}", serde_json::to_string_pretty(&teams)?);
        }
        TeamAction::Get { id } => match db.get_team(&id)? {
            Some(team) => {
                println!("{}", serde_json::to_string_pretty(&team)?);
                println!(
                    "Sprint capacity: {} pts, increment capacity: {} pts",
                    team.sprint_capacity(),
                    team.increment_capacity()
                );
            }
            None => println!("Team not found: {id}"),
        },
        TeamAction::Update {
            id,
            name,
            avatar,
            engineers,
            points_per_engineer,
            sprint_length_weeks,
            sprints_in_increment,
        } => {
            let update = TeamUpdate {
                name,
                avatar,
                engineer_count: engineers,
                avg_points_per_engineer: points_per_engineer,
                sprint_length_weeks,
                sprints_in_increment,
            };
            let team = db
                .update_team(&id, &update)?
                .ok_or(format!("Team not found: {id}"))?;
            println!("Team updated:");
            println!("{}", serde_json::to_string_pretty(&team)?);
        }
        TeamAction::Delete { id } => {
            db.delete_team(&id)?;
            println!("Team deleted: {id}");
        }
    }
    Ok(())
}
