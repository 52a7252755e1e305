//! SQLite-based storage for teams, size mappings, epics, and snapshots.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::data_dir;
use super::migrations;
use crate::epic::{Epic, EpicSource, EpicStatus, EpicUpdate};
use crate::error::{CoreError, DatabaseError};
use crate::sizing::{default_mappings, SizeMapping, TShirtSize};
use crate::team::{TeamProfile, TeamUpdate};

// === Helper Functions ===

/// Parse epic status from database string
fn parse_status(status_str: &str) -> EpicStatus {
    match status_str {
        "in-progress" => EpicStatus::InProgress,
        "completed" => EpicStatus::Completed,
        _ => EpicStatus::Backlog,
    }
}

/// Format epic status for database storage
fn format_status(status: EpicStatus) -> &'static str {
    match status {
        EpicStatus::Backlog => "backlog",
        EpicStatus::InProgress => "in-progress",
        EpicStatus::Completed => "completed",
    }
}

/// Parse epic source from database string
fn parse_source(source_str: &str) -> EpicSource {
    match source_str {
        "Jira" => EpicSource::Jira,
        "Trello" => EpicSource::Trello,
        _ => EpicSource::Template,
    }
}

/// Format epic source for database storage
fn format_source(source: EpicSource) -> &'static str {
    match source {
        EpicSource::Jira => "Jira",
        EpicSource::Trello => "Trello",
        EpicSource::Template => "Template",
    }
}

/// Parse a size label from database string with fallback to M
fn parse_size(size_str: &str) -> TShirtSize {
    TShirtSize::parse(size_str).unwrap_or(TShirtSize::M)
}

/// Parse datetime from RFC3339 string with fallback to current time
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Build a TeamProfile (without mappings) from a database row
fn row_to_team(row: &rusqlite::Row) -> Result<TeamProfile, rusqlite::Error> {
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;
    Ok(TeamProfile {
        id: row.get(0)?,
        name: row.get(1)?,
        avatar: row.get(2)?,
        engineer_count: row.get(3)?,
        avg_points_per_engineer: row.get(4)?,
        sprint_length_weeks: row.get(5)?,
        sprints_in_increment: row.get(6)?,
        size_mappings: Vec::new(),
        created_at: parse_datetime_fallback(&created_at),
        updated_at: parse_datetime_fallback(&updated_at),
    })
}

/// Build an Epic from a database row
fn row_to_epic(row: &rusqlite::Row) -> Result<Epic, rusqlite::Error> {
    let original_size: String = row.get(5)?;
    let current_size: String = row.get(6)?;
    let status: String = row.get(7)?;
    let source: String = row.get(8)?;
    let created_at: String = row.get(11)?;
    let updated_at: String = row.get(12)?;
    Ok(Epic {
        id: row.get(0)?,
        team_id: row.get(1)?,
        external_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        original_size: parse_size(&original_size),
        current_size: parse_size(&current_size),
        status: parse_status(&status),
        source: parse_source(&source),
        is_template: row.get(9)?,
        priority: row.get(10)?,
        created_at: parse_datetime_fallback(&created_at),
        updated_at: parse_datetime_fallback(&updated_at),
    })
}

const EPIC_COLUMNS: &str = "id, team_id, external_id, title, description, original_size, \
                            current_size, status, source, is_template, priority, \
                            created_at, updated_at";

/// A named, frozen copy of a forecast for the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningSnapshot {
    pub id: String,
    pub team_id: String,
    pub name: String,
    /// The increment this plan was frozen for, e.g. "Q3 2026".
    pub planning_increment: String,
    /// Epic allocations, capacity, and whatever else the caller captured.
    pub snapshot_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// SQLite database for plan storage.
///
/// Stores team profiles, their size mappings and epics, and planning
/// snapshots. A team owns its mappings, epics, and snapshots; deleting the
/// team cascades to all three.
pub struct PlanDb {
    conn: Connection,
}

impl PlanDb {
    /// Open the plan database at `~/.config/planfit/planfit.db`.
    ///
    /// Creates tables if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("planfit.db");
        Self::open_at(&path)
    }

    /// Open (or create) a plan database at an explicit path.
    pub fn open_at(path: &std::path::Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    /// Open an in-memory database (for tests and ephemeral runs).
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        // Create base tables (v1 schema) first
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS teams (
                id                      TEXT PRIMARY KEY,
                name                    TEXT NOT NULL,
                avatar                  TEXT NOT NULL DEFAULT '',
                engineer_count          INTEGER NOT NULL DEFAULT 5,
                avg_points_per_engineer INTEGER NOT NULL DEFAULT 8,
                sprint_length_weeks     INTEGER NOT NULL DEFAULT 2,
                sprints_in_increment    INTEGER NOT NULL DEFAULT 6,
                created_at              TEXT NOT NULL,
                updated_at              TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS size_mappings (
                team_id            TEXT NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
                size               TEXT NOT NULL,
                points             INTEGER NOT NULL DEFAULT 0,
                confidence         INTEGER NOT NULL DEFAULT 0,
                anchor_description TEXT NOT NULL DEFAULT '',
                PRIMARY KEY (team_id, size)
            );

            CREATE TABLE IF NOT EXISTS epics (
                id            TEXT PRIMARY KEY,
                team_id       TEXT NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
                title         TEXT NOT NULL,
                description   TEXT NOT NULL DEFAULT '',
                original_size TEXT NOT NULL,
                current_size  TEXT NOT NULL,
                status        TEXT NOT NULL DEFAULT 'backlog',
                source        TEXT NOT NULL DEFAULT 'Template',
                is_template   INTEGER NOT NULL DEFAULT 0,
                priority      INTEGER NOT NULL DEFAULT 0,
                created_at    TEXT NOT NULL,
                updated_at    TEXT NOT NULL
            );",
        )?;

        // Run incremental migrations (v1 -> v2 -> v3, etc.)
        migrations::migrate(&self.conn)?;

        Ok(())
    }

    // === Teams ===

    /// Insert a team and its size mappings.
    pub fn create_team(&mut self, team: &TeamProfile) -> Result<(), DatabaseError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO teams (id, name, avatar, engineer_count, avg_points_per_engineer,
                                sprint_length_weeks, sprints_in_increment, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                team.id,
                team.name,
                team.avatar,
                team.engineer_count,
                team.avg_points_per_engineer,
                team.sprint_length_weeks,
                team.sprints_in_increment,
                team.created_at.to_rfc3339(),
                team.updated_at.to_rfc3339(),
            ],
        )?;
        for mapping in &team.size_mappings {
            tx.execute(
                "INSERT INTO size_mappings (team_id, size, points, confidence, anchor_description)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    team.id,
                    mapping.size.as_str(),
                    mapping.points,
                    mapping.confidence,
                    mapping.anchor_description,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Fetch a team with its size mappings loaded.
    pub fn get_team(&self, id: &str) -> Result<Option<TeamProfile>, DatabaseError> {
        let team = self
            .conn
            .query_row(
                "SELECT id, name, avatar, engineer_count, avg_points_per_engineer,
                        sprint_length_weeks, sprints_in_increment, created_at, updated_at
                 FROM teams WHERE id = ?1",
                params![id],
                row_to_team,
            )
            .optional()?;

        match team {
            Some(mut team) => {
                team.size_mappings = self.list_size_mappings(&team.id)?;
                Ok(Some(team))
            }
            None => Ok(None),
        }
    }

    /// List all teams with their size mappings loaded.
    pub fn list_teams(&self) -> Result<Vec<TeamProfile>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, avatar, engineer_count, avg_points_per_engineer,
                    sprint_length_weeks, sprints_in_increment, created_at, updated_at
             FROM teams ORDER BY name ASC, id ASC",
        )?;
        let mut teams: Vec<TeamProfile> = stmt
            .query_map([], row_to_team)?
            .collect::<Result<_, _>>()?;
        drop(stmt);

        for team in &mut teams {
            team.size_mappings = self.list_size_mappings(&team.id)?;
        }
        Ok(teams)
    }

    /// Apply a partial update to a team; returns the updated profile, or
    /// `None` if the team does not exist.
    pub fn update_team(
        &self,
        id: &str,
        update: &TeamUpdate,
    ) -> Result<Option<TeamProfile>, DatabaseError> {
        let Some(mut team) = self.get_team(id)? else {
            return Ok(None);
        };

        if let Some(name) = &update.name {
            team.name = name.clone();
        }
        if let Some(avatar) = &update.avatar {
            team.avatar = avatar.clone();
        }
        if let Some(count) = update.engineer_count {
            team.engineer_count = count.max(0);
        }
        if let Some(points) = update.avg_points_per_engineer {
            team.avg_points_per_engineer = points.max(0);
        }
        if let Some(weeks) = update.sprint_length_weeks {
            team.sprint_length_weeks = weeks.max(1);
        }
        if let Some(sprints) = update.sprints_in_increment {
            team.sprints_in_increment = sprints.max(0);
        }
        team.updated_at = Utc::now();

        self.conn.execute(
            "UPDATE teams SET name = ?2, avatar = ?3, engineer_count = ?4,
                    avg_points_per_engineer = ?5, sprint_length_weeks = ?6,
                    sprints_in_increment = ?7, updated_at = ?8
             WHERE id = ?1",
            params![
                team.id,
                team.name,
                team.avatar,
                team.engineer_count,
                team.avg_points_per_engineer,
                team.sprint_length_weeks,
                team.sprints_in_increment,
                team.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(Some(team))
    }

    /// Delete a team; mappings, epics, and snapshots cascade.
    pub fn delete_team(&self, id: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM teams WHERE id = ?1", params![id])?;
        Ok(())
    }

    // === Size Mappings ===

    /// List a team's size mappings in ascending size order.
    pub fn list_size_mappings(&self, team_id: &str) -> Result<Vec<SizeMapping>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT size, points, confidence, anchor_description
             FROM size_mappings WHERE team_id = ?1",
        )?;
        let mut mappings: Vec<SizeMapping> = stmt
            .query_map(params![team_id], |row| {
                let size: String = row.get(0)?;
                Ok(SizeMapping {
                    size: parse_size(&size),
                    points: row.get(1)?,
                    confidence: row.get(2)?,
                    anchor_description: row.get(3)?,
                })
            })?
            .collect::<Result<_, _>>()?;
        mappings.sort_by_key(|m| m.size);
        Ok(mappings)
    }

    /// Replace a team's whole mapping table. The (team, size) primary key
    /// keeps the at-most-one-mapping-per-label invariant; if the input
    /// repeats a size the last entry wins.
    pub fn replace_size_mappings(
        &mut self,
        team_id: &str,
        mappings: &[SizeMapping],
    ) -> Result<(), DatabaseError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM size_mappings WHERE team_id = ?1",
            params![team_id],
        )?;
        for mapping in mappings {
            tx.execute(
                "INSERT OR REPLACE INTO size_mappings
                     (team_id, size, points, confidence, anchor_description)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    team_id,
                    mapping.size.as_str(),
                    mapping.points,
                    mapping.confidence,
                    mapping.anchor_description,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // === Epics ===

    /// Insert an epic as given.
    pub fn create_epic(&self, epic: &Epic) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO epics (id, team_id, external_id, title, description, original_size,
                                current_size, status, source, is_template, priority,
                                created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                epic.id,
                epic.team_id,
                epic.external_id,
                epic.title,
                epic.description,
                epic.original_size.as_str(),
                epic.current_size.as_str(),
                format_status(epic.status),
                format_source(epic.source),
                epic.is_template,
                epic.priority,
                epic.created_at.to_rfc3339(),
                epic.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_epic(&self, id: &str) -> Result<Option<Epic>, DatabaseError> {
        let epic = self
            .conn
            .query_row(
                &format!("SELECT {EPIC_COLUMNS} FROM epics WHERE id = ?1"),
                params![id],
                row_to_epic,
            )
            .optional()?;
        Ok(epic)
    }

    /// List a team's epics in backlog order: ascending priority, ties
    /// broken by id. This is the order the allocator expects.
    pub fn list_epics(&self, team_id: &str) -> Result<Vec<Epic>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EPIC_COLUMNS} FROM epics WHERE team_id = ?1 ORDER BY priority ASC, id ASC"
        ))?;
        let epics = stmt
            .query_map(params![team_id], row_to_epic)?
            .collect::<Result<_, _>>()?;
        Ok(epics)
    }

    /// The priority a newly appended epic should get (end of backlog).
    pub fn next_priority(&self, team_id: &str) -> Result<i64, DatabaseError> {
        let max: Option<i64> = self.conn.query_row(
            "SELECT MAX(priority) FROM epics WHERE team_id = ?1",
            params![team_id],
            |row| row.get(0),
        )?;
        Ok(max.map_or(0, |m| m + 1))
    }

    /// Apply a partial update to an epic; returns the updated record, or
    /// `None` if the epic does not exist. `original_size` is immutable and
    /// not part of [`EpicUpdate`].
    pub fn update_epic(&self, id: &str, update: &EpicUpdate) -> Result<Option<Epic>, DatabaseError> {
        let Some(mut epic) = self.get_epic(id)? else {
            return Ok(None);
        };

        if let Some(title) = &update.title {
            epic.title = title.clone();
        }
        if let Some(description) = &update.description {
            epic.description = description.clone();
        }
        if let Some(size) = update.current_size {
            epic.current_size = size;
        }
        if let Some(status) = update.status {
            epic.status = status;
        }
        if let Some(priority) = update.priority {
            epic.priority = priority;
        }
        epic.updated_at = Utc::now();

        self.conn.execute(
            "UPDATE epics SET title = ?2, description = ?3, current_size = ?4,
                    status = ?5, priority = ?6, updated_at = ?7
             WHERE id = ?1",
            params![
                epic.id,
                epic.title,
                epic.description,
                epic.current_size.as_str(),
                format_status(epic.status),
                epic.priority,
                epic.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(Some(epic))
    }

    pub fn delete_epic(&self, id: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM epics WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Commit a new backlog order: each epic's priority becomes its
    /// position in `ordered_ids`. Applied transactionally so two racing
    /// reorders resolve to one complete order (last write wins). Ids not
    /// belonging to the team are ignored.
    pub fn reorder_epics(&mut self, team_id: &str, ordered_ids: &[String]) -> Result<(), DatabaseError> {
        let tx = self.conn.transaction()?;
        for (position, epic_id) in ordered_ids.iter().enumerate() {
            tx.execute(
                "UPDATE epics SET priority = ?3, updated_at = ?4
                 WHERE id = ?1 AND team_id = ?2",
                params![epic_id, team_id, position as i64, Utc::now().to_rfc3339()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // === Planning Snapshots ===

    pub fn create_snapshot(&self, snapshot: &PlanningSnapshot) -> Result<(), DatabaseError> {
        let data = serde_json::to_string(&snapshot.snapshot_data)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT INTO planning_snapshots
                 (id, team_id, name, planning_increment, snapshot_data, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                snapshot.id,
                snapshot.team_id,
                snapshot.name,
                snapshot.planning_increment,
                data,
                snapshot.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// List a team's snapshots, newest first.
    pub fn list_snapshots(&self, team_id: &str) -> Result<Vec<PlanningSnapshot>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, team_id, name, planning_increment, snapshot_data, created_at
             FROM planning_snapshots WHERE team_id = ?1 ORDER BY created_at DESC, id DESC",
        )?;
        let snapshots = stmt
            .query_map(params![team_id], |row| {
                let data: String = row.get(4)?;
                let created_at: String = row.get(5)?;
                Ok(PlanningSnapshot {
                    id: row.get(0)?,
                    team_id: row.get(1)?,
                    name: row.get(2)?,
                    planning_increment: row.get(3)?,
                    snapshot_data: serde_json::from_str(&data)
                        .unwrap_or(serde_json::Value::Null),
                    created_at: parse_datetime_fallback(&created_at),
                })
            })?
            .collect::<Result<_, _>>()?;
        Ok(snapshots)
    }

    pub fn delete_snapshot(&self, id: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM planning_snapshots WHERE id = ?1", params![id])?;
        Ok(())
    }

    // === Demo Seed ===

    /// Reset and seed the demo team: the Rocket Squad profile with the
    /// default mapping table and seven seed epics in priority order.
    /// Idempotent; an existing demo team is dropped first.
    pub fn seed_demo(&mut self) -> Result<TeamProfile, DatabaseError> {
        const DEMO_TEAM: &str = "Rocket Squad";

        let existing: Vec<String> = {
            let mut stmt = self
                .conn
                .prepare("SELECT id FROM teams WHERE name = ?1")?;
            let ids = stmt
                .query_map(params![DEMO_TEAM], |row| row.get(0))?
                .collect::<Result<_, _>>()?;
            ids
        };
        for id in existing {
            self.delete_team(&id)?;
        }

        let now = Utc::now();
        let team = TeamProfile {
            id: Uuid::new_v4().to_string(),
            name: DEMO_TEAM.to_string(),
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=Rocket".to_string(),
            engineer_count: 6,
            avg_points_per_engineer: 8,
            sprint_length_weeks: 2,
            sprints_in_increment: 6,
            size_mappings: default_mappings(),
            created_at: now,
            updated_at: now,
        };
        self.create_team(&team)?;

        let seed_epics: [(&str, &str, TShirtSize, EpicSource); 7] = [
            ("SSO Implementation", "Integrate with Okta", TShirtSize::M, EpicSource::Jira),
            ("Mobile App Refactor", "Convert to React Native", TShirtSize::Xl, EpicSource::Jira),
            ("User Dashboard", "New analytics widgets", TShirtSize::S, EpicSource::Trello),
            ("Email Notifications", "SendGrid integration", TShirtSize::Xs, EpicSource::Jira),
            ("Performance Audit", "Lighthouse score improvement", TShirtSize::TwoXs, EpicSource::Template),
            ("Infrastructure Migration", "Move to AWS", TShirtSize::L, EpicSource::Jira),
            ("Admin Panel V2", "Internal tools update", TShirtSize::M, EpicSource::Trello),
        ];

        for (priority, (title, description, size, source)) in seed_epics.into_iter().enumerate() {
            self.create_epic(&Epic {
                id: Uuid::new_v4().to_string(),
                team_id: team.id.clone(),
                external_id: None,
                title: title.to_string(),
                description: description.to_string(),
                original_size: size,
                current_size: size,
                status: EpicStatus::Backlog,
                source,
                is_template: matches!(source, EpicSource::Template),
                priority: priority as i64,
                created_at: now,
                updated_at: now,
            })?;
        }

        Ok(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_team(name: &str) -> TeamProfile {
        let now = Utc::now();
        TeamProfile {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            avatar: String::new(),
            engineer_count: 5,
            avg_points_per_engineer: 8,
            sprint_length_weeks: 2,
            sprints_in_increment: 1,
            size_mappings: default_mappings(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_epic(team_id: &str, title: &str, size: TShirtSize, priority: i64) -> Epic {
        let now = Utc::now();
        Epic {
            id: Uuid::new_v4().to_string(),
            team_id: team_id.to_string(),
            external_id: None,
            title: title.to_string(),
            description: String::new(),
            original_size: size,
            current_size: size,
            status: EpicStatus::Backlog,
            source: EpicSource::Template,
            is_template: false,
            priority,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn team_round_trip_with_mappings() {
        let mut db = PlanDb::open_memory().unwrap();
        let team = sample_team("Alpha");
        db.create_team(&team).unwrap();

        let loaded = db.get_team(&team.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Alpha");
        assert_eq!(loaded.size_mappings.len(), 8);
        assert_eq!(loaded.size_mappings[0].size, TShirtSize::TwoXs);
        assert_eq!(loaded.increment_capacity(), 40);
    }

    #[test]
    fn update_team_applies_partial_fields() {
        let mut db = PlanDb::open_memory().unwrap();
        let team = sample_team("Alpha");
        db.create_team(&team).unwrap();

        let update = TeamUpdate {
            engineer_count: Some(7),
            ..Default::default()
        };
        let updated = db.update_team(&team.id, &update).unwrap().unwrap();
        assert_eq!(updated.engineer_count, 7);
        assert_eq!(updated.name, "Alpha");

        let reloaded = db.get_team(&team.id).unwrap().unwrap();
        assert_eq!(reloaded.engineer_count, 7);
    }

    #[test]
    fn update_missing_team_returns_none() {
        let db = PlanDb::open_memory().unwrap();
        let result = db.update_team("nope", &TeamUpdate::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn delete_team_cascades() {
        let mut db = PlanDb::open_memory().unwrap();
        let team = sample_team("Alpha");
        db.create_team(&team).unwrap();
        db.create_epic(&sample_epic(&team.id, "E1", TShirtSize::M, 0))
            .unwrap();

        db.delete_team(&team.id).unwrap();
        assert!(db.get_team(&team.id).unwrap().is_none());
        assert!(db.list_epics(&team.id).unwrap().is_empty());
        assert!(db.list_size_mappings(&team.id).unwrap().is_empty());
    }

    #[test]
    fn epics_list_in_priority_order() {
        let mut db = PlanDb::open_memory().unwrap();
        let team = sample_team("Alpha");
        db.create_team(&team).unwrap();
        db.create_epic(&sample_epic(&team.id, "Second", TShirtSize::S, 1))
            .unwrap();
        db.create_epic(&sample_epic(&team.id, "First", TShirtSize::M, 0))
            .unwrap();
        db.create_epic(&sample_epic(&team.id, "Third", TShirtSize::L, 2))
            .unwrap();

        let titles: Vec<String> = db
            .list_epics(&team.id)
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        assert_eq!(db.next_priority(&team.id).unwrap(), 3);
    }

    #[test]
    fn reorder_rewrites_priorities() {
        let mut db = PlanDb::open_memory().unwrap();
        let team = sample_team("Alpha");
        db.create_team(&team).unwrap();
        db.create_epic(&sample_epic(&team.id, "A", TShirtSize::M, 0)).unwrap();
        db.create_epic(&sample_epic(&team.id, "B", TShirtSize::S, 1)).unwrap();

        let epics = db.list_epics(&team.id).unwrap();
        let swapped: Vec<String> = vec![epics[1].id.clone(), epics[0].id.clone()];
        db.reorder_epics(&team.id, &swapped).unwrap();

        let titles: Vec<String> = db
            .list_epics(&team.id)
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn update_epic_preserves_original_size() {
        let mut db = PlanDb::open_memory().unwrap();
        let team = sample_team("Alpha");
        db.create_team(&team).unwrap();
        let epic = sample_epic(&team.id, "E1", TShirtSize::M, 0);
        db.create_epic(&epic).unwrap();

        let update = EpicUpdate {
            current_size: Some(TShirtSize::Xl),
            ..Default::default()
        };
        let updated = db.update_epic(&epic.id, &update).unwrap().unwrap();
        assert_eq!(updated.current_size, TShirtSize::Xl);
        assert_eq!(updated.original_size, TShirtSize::M);
        assert!(updated.is_modified());
    }

    #[test]
    fn replace_size_mappings_swaps_the_table() {
        let mut db = PlanDb::open_memory().unwrap();
        let team = sample_team("Alpha");
        db.create_team(&team).unwrap();

        let new_mappings = vec![SizeMapping {
            size: TShirtSize::M,
            points: 55,
            confidence: 75,
            anchor_description: "recalibrated".to_string(),
        }];
        db.replace_size_mappings(&team.id, &new_mappings).unwrap();

        let loaded = db.list_size_mappings(&team.id).unwrap();
        assert_eq!(loaded, new_mappings);
    }

    #[test]
    fn snapshot_round_trip() {
        let mut db = PlanDb::open_memory().unwrap();
        let team = sample_team("Alpha");
        db.create_team(&team).unwrap();

        let snapshot = PlanningSnapshot {
            id: Uuid::new_v4().to_string(),
            team_id: team.id.clone(),
            name: "Final plan".to_string(),
            planning_increment: "Q3 2026".to_string(),
            snapshot_data: serde_json::json!({ "capacity": 40, "epics": [] }),
            created_at: Utc::now(),
        };
        db.create_snapshot(&snapshot).unwrap();

        let listed = db.list_snapshots(&team.id).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Final plan");
        assert_eq!(listed[0].snapshot_data["capacity"], 40);

        db.delete_snapshot(&snapshot.id).unwrap();
        assert!(db.list_snapshots(&team.id).unwrap().is_empty());
    }

    #[test]
    fn seed_demo_is_idempotent() {
        let mut db = PlanDb::open_memory().unwrap();
        let first = db.seed_demo().unwrap();
        let second = db.seed_demo().unwrap();

        assert_ne!(first.id, second.id);
        let teams = db.list_teams().unwrap();
        assert_eq!(teams.len(), 1);

        let epics = db.list_epics(&second.id).unwrap();
        assert_eq!(epics.len(), 7);
        assert_eq!(epics[0].title, "SSO Implementation");
        assert_eq!(second.increment_capacity(), 288);
    }
}
