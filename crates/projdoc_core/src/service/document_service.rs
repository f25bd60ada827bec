//! Document use-case service.
//!
//! # Responsibility
//! - Provide create/publish/revise/history entry points.
//! - Run search strategies and structured filters over a fresh load.
//!
//! # Invariants
//! - New documents start as `Draft` at version `1.0`.
//! - Unknown ids are reported as `false`/`None`, never as an error.
//! - Validation runs before any write.

use crate::model::document::{Document, DocumentId, DocumentVersion};
use crate::model::vocab::{DocumentCategory, DocumentStatus};
use crate::repo::document_repo::DocumentRepository;
use crate::repo::RepoResult;
use crate::search::filter::DocumentFilter;
use crate::search::strategy::SearchStrategy;
use crate::service::local_today;
use crate::validation::validate_document_data;
use chrono::NaiveDate;
use log::info;

/// Use-case service wrapper for document operations.
pub struct DocumentService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> DocumentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_all_documents(&self) -> RepoResult<Vec<Document>> {
        self.repo.get_all_documents()
    }

    pub fn get_document(&self, id: DocumentId) -> RepoResult<Option<Document>> {
        self.repo.get_document(id)
    }

    pub fn save_document(&self, document: &Document) -> RepoResult<Document> {
        self.repo.save_document(document)
    }

    /// Creates and persists a draft document dated today.
    pub fn create_document(
        &self,
        name: &str,
        category: DocumentCategory,
        author: &str,
    ) -> RepoResult<Document> {
        validate_document_data(name, author)?;
        let document = Document::new(name, category, DocumentStatus::Draft, author, local_today());
        let saved = self.repo.save_document(&document)?;
        info!(
            "event=document_create module=service status=ok document_id={}",
            saved.id.unwrap_or_default()
        );
        Ok(saved)
    }

    /// Marks a document as published.
    ///
    /// Returns `false` when no document has `id`.
    pub fn publish_document(&self, id: DocumentId) -> RepoResult<bool> {
        let Some(mut document) = self.repo.get_document(id)? else {
            info!("event=document_publish module=service status=not_found document_id={id}");
            return Ok(false);
        };

        document.publish();
        self.repo.save_document(&document)?;
        info!("event=document_publish module=service status=ok document_id={id}");
        Ok(true)
    }

    /// Opens a new revision (`version + 0.1`, status `Updating`).
    ///
    /// Returns `None` when no document has `id`.
    pub fn create_new_version(
        &self,
        id: DocumentId,
        author: &str,
        changes: &str,
    ) -> RepoResult<Option<Document>> {
        self.create_new_version_on(id, author, changes, local_today())
    }

    /// Same as [`Self::create_new_version`] with an explicit date.
    pub fn create_new_version_on(
        &self,
        id: DocumentId,
        author: &str,
        changes: &str,
        today: NaiveDate,
    ) -> RepoResult<Option<Document>> {
        let Some(mut document) = self.repo.get_document(id)? else {
            info!("event=document_revise module=service status=not_found document_id={id}");
            return Ok(None);
        };

        document.open_revision(author, changes, today)?;
        let saved = self.repo.save_document(&document)?;
        info!(
            "event=document_revise module=service status=ok document_id={id} version={}",
            saved.version
        );
        Ok(Some(saved))
    }

    /// Prior versions oldest first, followed by an entry for the current
    /// version. Empty when no document has `id`.
    pub fn get_document_history(&self, id: DocumentId) -> RepoResult<Vec<DocumentVersion>> {
        let Some(document) = self.repo.get_document(id)? else {
            return Ok(Vec::new());
        };

        let current_date = document
            .previous_versions
            .last()
            .map_or(document.creation_date, |version| version.version_date);
        let mut history = document.previous_versions;
        history.push(DocumentVersion {
            changes: format!("Версия {}", document.version),
            version: document.version,
            author: document.author,
            version_date: current_date,
        });
        Ok(history)
    }

    pub fn search_documents(
        &self,
        strategy: SearchStrategy,
        query: &str,
    ) -> RepoResult<Vec<Document>> {
        let documents = self.repo.get_all_documents()?;
        Ok(strategy
            .search(&documents, query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn search_documents_advanced(&self, filter: &DocumentFilter) -> RepoResult<Vec<Document>> {
        let documents = self.repo.get_all_documents()?;
        Ok(filter.apply(&documents).into_iter().cloned().collect())
    }

    pub fn get_documents_by_category(
        &self,
        category: DocumentCategory,
    ) -> RepoResult<Vec<Document>> {
        self.search_documents_advanced(&DocumentFilter {
            category: Some(category),
            ..DocumentFilter::default()
        })
    }
}
