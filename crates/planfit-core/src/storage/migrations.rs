//! Database schema migrations for planfit.
//!
//! Migrations are versioned and applied automatically when opening the
//! database. The `schema_version` table tracks the current migration
//! version.

use rusqlite::{Connection, Result as SqliteResult};

/// Apply all pending migrations to bring the database to the current
/// schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }
    if current_version < 3 {
        migrate_v3(conn)?;
    }

    Ok(())
}

/// Create the schema_version table if it doesn't exist.
fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (initial database).
fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            0
        } else {
            eprintln!("Warning: failed to read schema_version: {}", e);
            0
        }
    })
}

/// Set the schema version in the database.
fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration v1: Initial schema (baseline).
///
/// The base tables are created by PlanDb::migrate() directly; this just
/// marks the database as v1.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    set_schema_version(conn, 1)?;
    Ok(())
}

/// Migration v2: external tracker ids on epics.
///
/// Adds the `external_id` column so Jira/Trello imports can be
/// deduplicated against their source.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    conn.execute("ALTER TABLE epics ADD COLUMN external_id TEXT", [])?;
    set_schema_version(conn, 2)?;
    Ok(())
}

/// Migration v3: planning snapshots.
///
/// Named, frozen forecast states ("Q3 2026 final plan") saved as JSON.
fn migrate_v3(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS planning_snapshots (
            id                 TEXT PRIMARY KEY,
            team_id            TEXT NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
            name               TEXT NOT NULL,
            planning_increment TEXT NOT NULL,
            snapshot_data      TEXT NOT NULL,
            created_at         TEXT NOT NULL
        );",
    )?;
    set_schema_version(conn, 3)?;
    Ok(())
}
