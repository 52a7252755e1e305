//! Size mapping commands for CLI.

use clap::Subcommand;
use planfit_core::sizing::{default_mappings, SizeMapping, TShirtSize};
use planfit_core::storage::PlanDb;

use super::common::resolve_team;

#[derive(Subcommand)]
pub enum MappingAction {
    /// List a team's size mappings
    List {
        /// Team ID (defaults to the configured team)
        #[arg(long)]
        team: Option<String>,
    },
    /// Set the points (and optionally confidence/anchor) for one size
    Set {
        /// Size label, e.g. M or 2-XL
        size: String,
        /// Story points for this size
        points: u32,
        /// Estimation confidence, 0-100
        #[arg(long)]
        confidence: Option<u32>,
        /// Anchor description, e.g. "Full team @ 1 sprint"
        #[arg(long)]
        anchor: Option<String>,
        /// Team ID (defaults to the configured team)
        #[arg(long)]
        team: Option<String>,
    },
    /// Restore the default mapping table
    Reset {
        /// Team ID (defaults to the configured team)
        #[arg(long)]
        team: Option<String>,
    },
}

pub fn run(action: MappingAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = PlanDb::open()?;

    match action {
        MappingAction::List { team } => {
            let team = resolve_team(&db, team)?;
            println!("{}", serde_json::to_string_pretty(&team.size_mappings)?);
        }
        MappingAction::Set {
            size,
            points,
            confidence,
            anchor,
            team,
        } => {
            let team = resolve_team(&db, team)?;
            let size = TShirtSize::parse(&size)
                .ok_or(format!("Unknown size label: {size} (expected one of 2-XS..3-XL)"))?;

            let mut mappings = team.size_mappings.clone();
            match mappings.iter_mut().find(|m| m.size == size) {
                Some(mapping) => {
                    mapping.points = points;
                    if let Some(confidence) = confidence {
                        mapping.confidence = confidence.min(100);
                    }
                    if let Some(anchor) = anchor {
                        mapping.anchor_description = anchor;
                    }
                }
                None => mappings.push(SizeMapping {
                    size,
                    points,
                    confidence: confidence.unwrap_or(0).min(100),
                    anchor_description: anchor.unwrap_or_default(),
                }),
            }
            db.replace_size_mappings(&team.id, &mappings)?;
            println!("Mapping updated: {size} -> {points} pts");
        }
        MappingAction::Reset { team } => {
            let team = resolve_team(&db, team)?;
            db.replace_size_mappings(&team.id, &default_mappings())?;
            println!("Mappings reset to defaults for team {}", team.id);
        }
    }
    Ok(())
}
