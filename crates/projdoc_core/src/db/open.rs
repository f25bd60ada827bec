//! Connection bootstrap utilities for SQLite stores.
//!
//! # Responsibility
//! - Open file or in-memory connections for a given store.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have the store's migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbResult, Store};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a store file and applies all pending migrations.
///
/// # Side effects
/// - Creates the file when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_store(path: impl AsRef<Path>, store: Store) -> DbResult<Connection> {
    open_with(store, "file", || Connection::open(path))
}

/// Opens an in-memory store and applies all pending migrations.
pub fn open_store_in_memory(store: Store) -> DbResult<Connection> {
    open_with(store, "memory", Connection::open_in_memory)
}

fn open_with(
    store: Store,
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start store={} mode={mode}",
        store.name()
    );

    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error store={} mode={mode} duration_ms={} error_code=db_open_failed error={}",
                store.name(),
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn, store) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok store={} mode={mode} duration_ms={}",
                store.name(),
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error store={} mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                store.name(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, store: Store) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn, store)?;
    Ok(())
}
