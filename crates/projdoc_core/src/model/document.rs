//! Document domain model.
//!
//! # Responsibility
//! - Define the document record and its version history.
//! - Own the revision and publication lifecycle rules.
//!
//! # Invariants
//! - `version` is a decimal string; each revision adds exactly `0.1`.
//! - Opening a revision sets status `Updating`; publishing sets `Published`.
//! - `previous_versions` is append-only, oldest first.

use crate::model::vocab::{DocumentCategory, DocumentStatus};
use crate::validation::{validate_document_data, ValidationError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Storage-assigned row identifier for documents.
pub type DocumentId = i64;

pub const INITIAL_VERSION: &str = "1.0";

/// A superseded version of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentVersion {
    /// The version string that was replaced.
    pub version: String,
    /// Who opened the revision that replaced it.
    pub author: String,
    /// Summary of what the replacing revision changes.
    pub changes: String,
    pub version_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: Option<DocumentId>,
    pub name: String,
    pub category: DocumentCategory,
    pub status: DocumentStatus,
    pub author: String,
    pub version: String,
    pub creation_date: NaiveDate,
    pub description: String,
    pub file_path: String,
    pub previous_versions: Vec<DocumentVersion>,
}

impl Document {
    /// Creates an unsaved document at version `1.0`.
    pub fn new(
        name: impl Into<String>,
        category: DocumentCategory,
        status: DocumentStatus,
        author: impl Into<String>,
        creation_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            category,
            status,
            author: author.into(),
            version: INITIAL_VERSION.to_string(),
            creation_date,
            description: String::new(),
            file_path: String::new(),
            previous_versions: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Opens a new revision: archives the current version, bumps by `0.1`
    /// and moves to `Updating`.
    ///
    /// The document is left untouched when the current version is not a
    /// decimal number.
    pub fn open_revision(
        &mut self,
        author: impl Into<String>,
        changes: impl Into<String>,
        today: NaiveDate,
    ) -> Result<(), ValidationError> {
        let next = next_version(&self.version)?;
        let superseded = std::mem::replace(&mut self.version, next);
        self.previous_versions.push(DocumentVersion {
            version: superseded,
            author: author.into(),
            changes: changes.into(),
            version_date: today,
        });
        self.status = DocumentStatus::Updating;
        Ok(())
    }

    pub fn publish(&mut self) {
        self.status = DocumentStatus::Published;
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_document_data(&self.name, &self.author)?;
        parse_version(&self.version)?;
        Ok(())
    }
}

/// Returns `version + 0.1` rendered with at least one fractional digit.
pub fn next_version(version: &str) -> Result<String, ValidationError> {
    let invalid = || ValidationError::InvalidVersion(version.to_string());
    let current = parse_version(version)?;
    let mut next = current.checked_add(Decimal::new(1, 1)).ok_or_else(invalid)?;
    if next.scale() < 1 {
        next.rescale(1);
    }
    // Near the top of the range the sum is rounded and the tenth is lost.
    if next.scale() < 1 || next - current != Decimal::new(1, 1) {
        return Err(invalid());
    }
    Ok(next.to_string())
}

fn parse_version(version: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(version.trim())
        .ok()
        .filter(|value| !value.is_sign_negative())
        .ok_or_else(|| ValidationError::InvalidVersion(version.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{next_version, Document};
    use crate::model::vocab::{DocumentCategory, DocumentStatus};
    use crate::validation::ValidationError;
    use chrono::NaiveDate;

    #[test]
    fn next_version_adds_exactly_one_tenth() {
        assert_eq!(next_version("1.0").unwrap(), "1.1");
        assert_eq!(next_version("1.9").unwrap(), "2.0");
        assert_eq!(next_version("2").unwrap(), "2.1");
        assert_eq!(next_version("1.10").unwrap(), "1.20");
    }

    #[test]
    fn next_version_rejects_values_that_cannot_grow_by_a_tenth() {
        for version in [
            "79228162514264337593543950335",
            "9999999999999999999999999999.9",
        ] {
            assert_eq!(
                next_version(version),
                Err(ValidationError::InvalidVersion(version.to_string()))
            );
        }
    }

    #[test]
    fn next_version_rejects_non_numeric_input() {
        assert_eq!(
            next_version("v1"),
            Err(ValidationError::InvalidVersion("v1".to_string()))
        );
    }

    #[test]
    fn open_revision_archives_previous_version() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut doc = Document::new(
            "Приказ №1",
            DocumentCategory::Orders,
            DocumentStatus::Published,
            "Сидоров",
            today,
        );

        doc.open_revision("Петров", "Новая редакция", today).unwrap();

        assert_eq!(doc.version, "1.1");
        assert_eq!(doc.status, DocumentStatus::Updating);
        assert_eq!(doc.previous_versions.len(), 1);
        assert_eq!(doc.previous_versions[0].version, "1.0");
        assert_eq!(doc.previous_versions[0].author, "Петров");
        assert_eq!(doc.author, "Сидоров");
    }
}
