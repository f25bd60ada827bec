//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep front ends decoupled from storage details.
//!
//! # Invariants
//! - Services hold a repository and nothing else; no cached collections.

use chrono::NaiveDate;

pub mod approval_service;
pub mod document_service;
pub mod project_service;

/// Current date in the local time zone.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
