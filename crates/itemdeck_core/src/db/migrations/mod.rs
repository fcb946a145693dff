//! Schema migrations for the key-value store.
//!
//! # Responsibility
//! - List schema steps in ascending version order.
//! - Bring a connection up to [`latest_version`], one committed step at a time.
//!
//! # Invariants
//! - Step versions start at 1 and increase by exactly one.
//! - `PRAGMA user_version` always names the last fully applied step.
//! - Databases stamped with a newer version are never touched.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Ordered `(version, sql)` steps.
const STEPS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Returns the newest schema version this build can write.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Applies every step newer than the connection's `user_version`.
///
/// Each step commits together with its version stamp, so an interrupted
/// upgrade resumes from the last finished step.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let latest = latest_version();
    if from > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }

    for (version, sql) in STEPS.iter().filter(|(version, _)| *version > from) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        info!("event=db_migrate_step module=db status=ok version={version}");
    }

    if from < latest {
        info!("event=db_migrate module=db status=ok from_version={from} to_version={latest}");
    }
    Ok(())
}

fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}

#[cfg(test)]
mod tests {
    use super::{latest_version, STEPS};

    #[test]
    fn steps_are_contiguous_from_one() {
        for (position, (version, sql)) in STEPS.iter().enumerate() {
            assert_eq!(*version as usize, position + 1);
            assert!(!sql.trim().is_empty());
        }
        assert_eq!(latest_version() as usize, STEPS.len());
    }
}
