//! What-if capacity scenario command for CLI.

use clap::Args;
use planfit_core::forecast::{allocate, PlanConfig};
use planfit_core::scenario::Scenario;
use planfit_core::sizing::PointMap;
use planfit_core::storage::PlanDb;

use super::common::resolve_team;

#[derive(Args)]
pub struct ScenarioArgs {
    /// Team ID (defaults to the configured team)
    #[arg(long)]
    pub team: Option<String>,
    /// Override the engineer count
    #[arg(long)]
    pub engineers: Option<i64>,
    /// Override points per engineer per sprint
    #[arg(long)]
    pub points_per_engineer: Option<i64>,
    /// Override sprints per increment
    #[arg(long)]
    pub sprints: Option<i64>,
    /// Persist the overrides to the stored team profile
    #[arg(long)]
    pub save: bool,
}

pub fn run(args: ScenarioArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db = PlanDb::open()?;
    let team = resolve_team(&db, args.team)?;

    let mut scenario = Scenario::from_team(&team);
    if let Some(engineers) = args.engineers {
        scenario.set_engineers(engineers);
    }
    if let Some(points) = args.points_per_engineer {
        scenario.set_points_per_engineer(points);
    }
    if let Some(sprints) = args.sprints {
        scenario.set_sprints_in_increment(sprints);
    }

    let inputs = scenario.inputs();
    println!(
        "Scenario: {} engineers x {} pts x {} sprints",
        inputs.engineers, inputs.points_per_engineer, inputs.sprints_in_increment
    );
    println!(
        "Capacity: {} pts (stored {}, delta {:+})",
        scenario.capacity(),
        scenario.base_capacity(),
        scenario.delta()
    );

    // Re-run the forecast under the scenario capacity so the user sees
    // where the line would move.
    let epics = db.list_epics(&team.id)?;
    let points = PointMap::from_mappings(&team.size_mappings);
    let allocation = allocate(&epics, &points, scenario.capacity());
    let fits = allocation
        .cut_line_index
        .unwrap_or(allocation.epics.len());
    println!(
        "Backlog: {} pts, {} of {} epics above the line",
        allocation.total_points,
        fits,
        allocation.epics.len()
    );

    let base_config = PlanConfig::from_team(&team);
    let base = allocate(&epics, &points, base_config.capacity());
    let base_fits = base.cut_line_index.unwrap_or(base.epics.len());
    if fits != base_fits {
        println!("Stored profile fits {base_fits} epics; this scenario changes that.");
    }

    if args.save {
        if !scenario.has_changes() {
            println!("No overrides given; nothing to save.");
            return Ok(());
        }
        db.update_team(&team.id, &scenario.to_update())?
            .ok_or(format!("Team not found: {}", team.id))?;
        println!("Saved: team {} now has capacity {} pts", team.id, scenario.capacity());
    } else if scenario.has_changes() {
        println!("Scenario not saved; pass --save to persist it.");
    }
    Ok(())
}
