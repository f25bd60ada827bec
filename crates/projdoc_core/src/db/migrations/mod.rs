//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations per store in strictly increasing order.
//! - Apply pending migrations atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic within a store.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Scripts use `IF NOT EXISTS` so stores created by older tooling with the
//!   same table names are adopted in place.

use crate::db::{DbError, DbResult, Store};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const PROJECT_MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("projects_0001_init.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("projects_0002_documents_link.sql"),
    },
];

const DOCUMENT_MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("documents_0001_init.sql"),
}];

fn migrations_for(store: Store) -> &'static [Migration] {
    match store {
        Store::Projects => PROJECT_MIGRATIONS,
        Store::Documents => DOCUMENT_MIGRATIONS,
    }
}

/// Returns the latest migration version known for `store`.
pub fn latest_version(store: Store) -> u32 {
    migrations_for(store)
        .last()
        .map_or(0, |migration| migration.version)
}

/// Applies all pending migrations for `store` on the provided connection.
pub fn apply_migrations(conn: &mut Connection, store: Store) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version(store);

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            store,
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in migrations_for(store) {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok store={} from_version={} to_version={}",
        store.name(),
        current_version,
        latest
    );
    Ok(())
}

/// Reads `PRAGMA user_version` for the connected store.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
