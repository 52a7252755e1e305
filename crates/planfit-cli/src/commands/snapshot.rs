//! Planning snapshot commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use planfit_core::forecast::{allocate, PlanConfig};
use planfit_core::sizing::PointMap;
use planfit_core::storage::{PlanDb, PlanningSnapshot};
use uuid::Uuid;

use super::common::resolve_team;

#[derive(Subcommand)]
pub enum SnapshotAction {
    /// Freeze the current forecast as a named snapshot
    Save {
        /// Snapshot name, e.g. "Final plan"
        name: String,
        /// Planning increment the plan is for, e.g. "Q3 2026"
        #[arg(long, default_value = "")]
        increment: String,
        /// Team ID (defaults to the configured team)
        #[arg(long)]
        team: Option<String>,
    },
    /// List a team's snapshots, newest first
    List {
        /// Team ID (defaults to the configured team)
        #[arg(long)]
        team: Option<String>,
    },
    /// Delete a snapshot
    Delete {
        /// Snapshot ID
        id: String,
    },
}

pub fn run(action: SnapshotAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = PlanDb::open()?;

    match action {
        SnapshotAction::Save {
            name,
            increment,
            team,
        } => {
            let team = resolve_team(&db, team)?;
            let epics = db.list_epics(&team.id)?;
            let points = PointMap::from_mappings(&team.size_mappings);
            let config = PlanConfig::from_team(&team);
            let allocation = allocate(&epics, &points, config.capacity());

            let snapshot = PlanningSnapshot {
                id: Uuid::new_v4().to_string(),
                team_id: team.id.clone(),
                name,
                planning_increment: increment,
                snapshot_data: serde_json::to_value(&allocation)?,
                created_at: Utc::now(),
            };
            db.create_snapshot(&snapshot)?;
            println!("Snapshot saved: {}", snapshot.id);
        }
        SnapshotAction::List { team } => {
            let team = resolve_team(&db, team)?;
            let snapshots = db.list_snapshots(&team.id)?;
            println!("{}", serde_json::to_string_pretty(&snapshots)?);
        }
        SnapshotAction::Delete { id } => {
            db.delete_snapshot(&id)?;
            println!("Snapshot deleted: {id}");
        }
    }
    Ok(())
}
