//! Domain model for projects, documents and approval routes.
//!
//! # Responsibility
//! - Define canonical records used by repositories, services and views.
//! - Keep lifecycle rules (progress completion, revisions, approvals) next
//!   to the data they change.
//!
//! # Invariants
//! - Identifiers are assigned by storage; unsaved records carry `None`.
//! - Dates are day-granular (`chrono::NaiveDate`).

pub mod approval;
pub mod document;
pub mod project;
pub mod vocab;
