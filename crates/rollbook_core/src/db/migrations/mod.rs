//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically on startup.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Migrations only ever add columns; existing rows are preserved.

use crate::db::{DbError, DbResult};
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    apply: fn(&Transaction<'_>) -> DbResult<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        apply: create_students_table,
    },
    Migration {
        version: 2,
        apply: add_status_column,
    },
];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        (migration.apply)(&tx)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

fn create_students_table(tx: &Transaction<'_>) -> DbResult<()> {
    tx.execute_batch(include_str!("0001_init.sql"))?;
    Ok(())
}

/// Adds the `status` column to databases written before it existed.
///
/// Guarded by a column check: the table may have been created outside
/// `user_version` tracking with the column already present, and `ALTER TABLE
/// ADD COLUMN` would fail on the duplicate.
fn add_status_column(tx: &Transaction<'_>) -> DbResult<()> {
    if !column_exists(tx, "students", "status")? {
        tx.execute_batch(include_str!("0002_status.sql"))?;
    }
    Ok(())
}

fn column_exists(tx: &Transaction<'_>, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = tx.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get("name")?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
