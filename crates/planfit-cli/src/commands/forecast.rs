//! Capacity forecast command for CLI.

use clap::Args;
use planfit_core::epic::Epic;
use planfit_core::forecast::{
    allocate, allocate_windows, Allocation, PlanConfig, WindowAllocation,
};
use planfit_core::sizing::PointMap;
use planfit_core::storage::{Config, PlanDb};
use serde::Serialize;

use super::common::resolve_team;

#[derive(Args)]
pub struct ForecastArgs {
    /// Team ID (defaults to the configured team)
    #[arg(long)]
    pub team: Option<String>,
    /// Number of planning windows (defaults to the configured count)
    #[arg(long)]
    pub windows: Option<usize>,
    /// Label of the first window, e.g. "Q3 2026"
    #[arg(long)]
    pub start_label: Option<String>,
    /// Print the raw forecast as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ForecastReport {
    team_id: String,
    capacity: i64,
    allocation: Allocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    windows: Option<WindowAllocation>,
}

pub fn run(args: ForecastArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db = PlanDb::open()?;
    let team = resolve_team(&db, args.team)?;
    let defaults = Config::load()?.forecast;

    let mut config = PlanConfig::from_team(&team);
    config.window_count = args.windows.unwrap_or(defaults.window_count).max(1);
    config.start_label = args.start_label.unwrap_or(defaults.start_label);

    let epics = db.list_epics(&team.id)?;
    let points = PointMap::from_mappings(&team.size_mappings);

    let allocation = allocate(&epics, &points, config.capacity());
    let windows = if config.window_count > 1 {
        Some(allocate_windows(&epics, &points, &config))
    } else {
        None
    };

    if args.json {
        let report = ForecastReport {
            team_id: team.id,
            capacity: config.capacity(),
            allocation,
            windows,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Team: {} ({} engineers)", team.name, team.engineer_count);
    match windows {
        Some(windows) => render_windows(&epics, &windows),
        None => render_cut_line(&epics, &allocation),
    }
    Ok(())
}

fn title_of<'a>(epics: &'a [Epic], id: &'a str) -> &'a str {
    epics
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.title.as_str())
        .unwrap_or(id)
}

fn render_cut_line(epics: &[Epic], allocation: &Allocation) {
    println!(
        "Capacity: {} pts, backlog: {} pts",
        allocation.capacity, allocation.total_points
    );
    if let Some(percent) = allocation.percent_used() {
        println!("Used: {percent:.0}%");
    }

    for (index, alloc) in allocation.epics.iter().enumerate() {
        if allocation.cut_line_index == Some(index) {
            println!("{:-^58}", " capacity line ");
        }
        println!(
            "  {:<36} {:>5} pts  (cum {:>5})",
            title_of(epics, &alloc.epic_id),
            alloc.points,
            alloc.cumulative_points,
        );
    }

    match allocation.cut_line_index {
        Some(_) => println!("Overflow: {} pts", allocation.overflow_points()),
        None => println!("Everything fits."),
    }
}

fn render_windows(epics: &[Epic], result: &WindowAllocation) {
    for (index, window) in result.windows.iter().enumerate() {
        println!(
            "\n{}  ({}/{} pts)",
            window.label, window.used_points, window.capacity
        );
        for alloc in result.epics.iter().filter(|a| a.window_index == index) {
            if alloc.straddles {
                println!(
                    "  {:<36} {:>5} pts  ({} here, {} roll over)",
                    title_of(epics, &alloc.epic_id),
                    alloc.points,
                    alloc.points_in_window,
                    alloc.rollover_points,
                );
            } else {
                println!(
                    "  {:<36} {:>5} pts",
                    title_of(epics, &alloc.epic_id),
                    alloc.points,
                );
            }
        }
    }
}
