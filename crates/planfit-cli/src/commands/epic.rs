//! Epic backlog commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use planfit_core::epic::{Epic, EpicSource, EpicStatus, EpicUpdate};
use planfit_core::forecast::reorder;
use planfit_core::import::parse_csv;
use planfit_core::sizing::TShirtSize;
use planfit_core::storage::PlanDb;
use uuid::Uuid;

use super::common::resolve_team;

#[derive(Subcommand)]
pub enum EpicAction {
    /// Add an epic to the end of the backlog
    Add {
        /// Epic title
        title: String,
        /// Epic description
        #[arg(long, default_value = "")]
        description: String,
        /// T-shirt size (loose input accepted, e.g. M, xxl, 2-XS, 40)
        #[arg(long, default_value = "M")]
        size: String,
        /// Source: jira, trello, or template
        #[arg(long, default_value = "template")]
        source: String,
        /// Team ID (defaults to the configured team)
        #[arg(long)]
        team: Option<String>,
    },
    /// List the backlog in priority order
    List {
        /// Team ID (defaults to the configured team)
        #[arg(long)]
        team: Option<String>,
    },
    /// Get epic details
    Get {
        /// Epic ID
        id: String,
    },
    /// Update an epic
    Update {
        /// Epic ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New working size (the original estimate is kept)
        #[arg(long)]
        size: Option<String>,
        /// New status: backlog, in-progress, or completed
        #[arg(long)]
        status: Option<String>,
    },
    /// Reset an epic's working size back to its original estimate
    Reset {
        /// Epic ID
        id: String,
    },
    /// Move an epic within the backlog
    Move {
        /// Epic ID
        id: String,
        /// Target position (0 = top of backlog)
        #[arg(long, conflicts_with_all = ["up", "down"])]
        to: Option<usize>,
        /// Move one position earlier
        #[arg(long)]
        up: bool,
        /// Move one position later
        #[arg(long, conflicts_with = "up")]
        down: bool,
    },
    /// Delete an epic
    Delete {
        /// Epic ID
        id: String,
    },
    /// Import epics from a CSV file (Jira/Trello exports work)
    Import {
        /// Path to the CSV file
        file: String,
        /// Team ID (defaults to the configured team)
        #[arg(long)]
        team: Option<String>,
    },
}

fn parse_source_arg(source: &str) -> EpicSource {
    match source.to_lowercase().as_str() {
        "jira" => EpicSource::Jira,
        "trello" => EpicSource::Trello,
        _ => EpicSource::Template,
    }
}

fn parse_status_arg(status: &str) -> Option<EpicStatus> {
    match status.to_lowercase().as_str() {
        "backlog" => Some(EpicStatus::Backlog),
        "in-progress" => Some(EpicStatus::InProgress),
        "completed" => Some(EpicStatus::Completed),
        _ => None,
    }
}

pub fn run(action: EpicAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = PlanDb::open()?;

    match action {
        EpicAction::Add {
            title,
            description,
            size,
            source,
            team,
        } => {
            let team = resolve_team(&db, team)?;
            let size = TShirtSize::normalize(&size);
            let source = parse_source_arg(&source);
            let now = Utc::now();
            let epic = Epic {
                id: Uuid::new_v4().to_string(),
                team_id: team.id.clone(),
                external_id: None,
                title,
                description,
                original_size: size,
                current_size: size,
                status: EpicStatus::Backlog,
                source,
                is_template: matches!(source, EpicSource::Template),
                priority: db.next_priority(&team.id)?,
                created_at: now,
                updated_at: now,
            };
            db.create_epic(&epic)?;
            println!("Epic created: {}", epic.id);
            println!("{}", serde_json::to_string_pretty(&epic)?);
        }
        EpicAction::List { team } => {
            let team = resolve_team(&db, team)?;
            let epics = db.list_epics(&team.id)?;
            println!("{}", serde_json::to_string_pretty(&epics)?);
        }
        EpicAction::Get { id } => match db.get_epic(&id)? {
            Some(epic) => println!("{}", serde_json::to_string_pretty(&epic)?),
            None => println!("Epic not found: {id}"),
        },
        EpicAction::Update {
            id,
            title,
            description,
            size,
            status,
        } => {
            let status = match status {
                Some(s) => Some(
                    parse_status_arg(&s)
                        .ok_or(format!("Unknown status: {s} (expected backlog, in-progress, or completed)"))?,
                ),
                None => None,
            };
            let update = EpicUpdate {
                title,
                description,
                current_size: size.map(|s| TShirtSize::normalize(&s)),
                status,
                priority: None,
            };
            let epic = db
                .update_epic(&id, &update)?
                .ok_or(format!("Epic not found: {id}"))?;
            println!("Epic updated:");
            println!("{}", serde_json::to_string_pretty(&epic)?);
        }
        EpicAction::Reset { id } => {
            let epic = db.get_epic(&id)?.ok_or(format!("Epic not found: {id}"))?;
            if !epic.is_modified() {
                println!("Epic is already at its original size ({})", epic.original_size);
                return Ok(());
            }
            let update = EpicUpdate {
                current_size: Some(epic.original_size),
                ..Default::default()
            };
            let epic = db
                .update_epic(&id, &update)?
                .ok_or(format!("Epic not found: {id}"))?;
            println!("Epic size reset to {}", epic.current_size);
        }
        EpicAction::Move { id, to, up, down } => {
            let epic = db.get_epic(&id)?.ok_or(format!("Epic not found: {id}"))?;
            let epics = db.list_epics(&epic.team_id)?;
            let from = epics
                .iter()
                .position(|e| e.id == id)
                .ok_or(format!("Epic not found in backlog: {id}"))?;

            let to = if up {
                from.saturating_sub(1)
            } else if down {
                (from + 1).min(epics.len().saturating_sub(1))
            } else {
                to.ok_or("pass --to <position>, --up, or --down")?
                    .min(epics.len().saturating_sub(1))
            };

            let ids: Vec<String> = epics.iter().map(|e| e.id.clone()).collect();
            let ordered = reorder(ids, from, to);
            db.reorder_epics(&epic.team_id, &ordered)?;
            println!("Epic moved to position {to}");
        }
        EpicAction::Delete { id } => {
            db.delete_epic(&id)?;
            println!("Epic deleted: {id}");
        }
        EpicAction::Import { file, team } => {
            let team = resolve_team(&db, team)?;
            let content = std::fs::read_to_string(&file)?;
            let drafts = parse_csv(&content)?;
            if drafts.is_empty() {
                println!("No epics found in {file}");
                return Ok(());
            }

            let mut priority = db.next_priority(&team.id)?;
            let count = drafts.len();
            for draft in drafts {
                let now = Utc::now();
                db.create_epic(&Epic {
                    id: Uuid::new_v4().to_string(),
                    team_id: team.id.clone(),
                    external_id: None,
                    title: draft.title,
                    description: draft.description,
                    original_size: draft.size,
                    current_size: draft.size,
                    status: EpicStatus::Backlog,
                    source: draft.source,
                    is_template: matches!(draft.source, EpicSource::Template),
                    priority,
                    created_at: now,
                    updated_at: now,
                })?;
                priority += 1;
            }
            println!("Imported {count} epics into team {}", team.id);
        }
    }
    Ok(())
}
