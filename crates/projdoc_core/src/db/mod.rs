//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure connections to the projects and documents stores.
//! - Apply each store's schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked per store via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.
//! - Dates are persisted as `YYYY-MM-DD` text.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_store, open_store_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Text format of every persisted date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The two independent SQLite files the application keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Store {
    /// `projects` with milestones, stages and document links.
    Projects,
    /// `documents` with versions and approval routes.
    Documents,
}

impl Store {
    pub fn name(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Documents => "documents",
        }
    }

    /// Default file name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Projects => "projects.sqlite3",
            Self::Documents => "documents.sqlite3",
        }
    }
}

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        store: Store,
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                store,
                db_version,
                latest_supported,
            } => write!(
                f,
                "{} store schema version {db_version} is newer than supported {latest_supported}",
                store.name()
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

pub fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a stored date column; `None` when the text is not `YYYY-MM-DD`.
pub fn parse_db_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::{date_to_db, parse_db_date};
    use chrono::NaiveDate;

    #[test]
    fn dates_use_iso_day_text() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(date_to_db(date), "2024-03-07");
        assert_eq!(parse_db_date("2024-03-07"), Some(date));
        assert_eq!(parse_db_date("07.03.2024"), None);
    }
}
