//! Search and filter entry points over loaded collections.
//!
//! # Responsibility
//! - Expose pure search strategies and structured filters.
//! - Hold no state; callers pass the collection in.
//!
//! # See also
//! - `repo::document_repo` for the storage-side `LIKE` search.

pub mod filter;
pub mod strategy;
