//! Shared helpers for CLI commands.

use planfit_core::storage::{Config, PlanDb};
use planfit_core::team::TeamProfile;

/// Resolve the team a command operates on: an explicit `--team` id wins,
/// otherwise the configured default team.
pub fn resolve_team(
    db: &PlanDb,
    explicit: Option<String>,
) -> Result<TeamProfile, Box<dyn std::error::Error>> {
    let id = match explicit {
        Some(id) => id,
        None => Config::load()?
            .default_team_id
            .ok_or("no team given; pass --team <id> or set a default with `config set-default-team`")?,
    };
    db.get_team(&id)?
        .ok_or_else(|| format!("Team not found: {id}").into())
}
