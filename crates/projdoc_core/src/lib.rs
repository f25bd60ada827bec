//! Core domain logic for the project and document tracker.
//! Front ends go through the services here; storage and rules live nowhere else.

pub mod board;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod samples;
pub mod search;
pub mod service;
pub mod validation;

pub use board::{Board, DisplayStrategy};
pub use db::{open_store, open_store_in_memory, DbError, Store};
pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::approval::{ApprovalRoute, ApprovalStage, DecisionError, RouteId};
pub use model::document::{Document, DocumentId, DocumentVersion};
pub use model::project::{Milestone, Project, ProjectId, ProjectStage};
pub use model::vocab::{
    DocumentCategory, DocumentStatus, ProjectStatus, ProjectType, RouteStatus, StageStatus,
};
pub use repo::approval_repo::{ApprovalRouteRepository, SqliteApprovalRouteRepository};
pub use repo::document_repo::{DocumentRepository, SqliteDocumentRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::{RepoError, RepoResult};
pub use search::filter::{DocumentFilter, ProjectFilter};
pub use search::strategy::SearchStrategy;
pub use service::approval_service::{ApprovalService, ApprovalServiceError, Decision};
pub use service::document_service::DocumentService;
pub use service::project_service::{ProjectService, ProjectStats};
pub use validation::ValidationError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
