//! Document repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load and save documents with their prior versions from the documents
//!   store.
//! - Provide the storage-side substring search used by list screens.
//!
//! # Invariants
//! - `save_document` inserts when `id` is `None`, otherwise overwrites the
//!   row with that id; overwriting a missing id is `NotFound`.
//! - Prior versions are replaced as a whole set inside the same transaction
//!   and read back oldest first.

use crate::db::{date_to_db, Store};
use crate::model::document::{Document, DocumentId, DocumentVersion};
use crate::model::vocab::{DocumentCategory, DocumentStatus};
use crate::repo::{
    ensure_store_ready, optional_date, vocab_column, RepoError, RepoResult,
};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const DOCUMENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    category,
    status,
    author,
    version,
    creation_date,
    description,
    file_path
FROM documents";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "documents",
        &[
            "id",
            "name",
            "category",
            "status",
            "author",
            "version",
            "creation_date",
            "description",
            "file_path",
        ],
    ),
    (
        "document_versions",
        &["id", "doc_id", "version", "author", "changes", "version_date"],
    ),
];

/// Repository interface for document persistence.
pub trait DocumentRepository {
    fn get_all_documents(&self) -> RepoResult<Vec<Document>>;
    fn get_document(&self, id: DocumentId) -> RepoResult<Option<Document>>;
    /// Inserts or overwrites `document` and returns it with its id.
    fn save_document(&self, document: &Document) -> RepoResult<Document>;
    /// Substring match over name, description and author, in id order.
    fn search_documents(&self, text: &str) -> RepoResult<Vec<Document>>;
}

/// SQLite-backed document repository.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    /// Constructs a repository from a migrated documents-store connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_store_ready(conn, Store::Documents, REQUIRED_SCHEMA)?;
        Ok(Self { conn })
    }

    fn query_documents(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<Document>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            let mut document = parse_document_row(row)?;
            document.previous_versions = load_versions(self.conn, row.get("id")?)?;
            documents.push(document);
        }
        Ok(documents)
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn get_all_documents(&self) -> RepoResult<Vec<Document>> {
        let documents =
            self.query_documents(&format!("{DOCUMENT_SELECT_SQL} ORDER BY id ASC;"), [])?;
        debug!(
            "event=documents_load module=repo status=ok count={}",
            documents.len()
        );
        Ok(documents)
    }

    fn get_document(&self, id: DocumentId) -> RepoResult<Option<Document>> {
        let document = self
            .conn
            .query_row(
                &format!("{DOCUMENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                |row| Ok(parse_document_row(row)),
            )
            .optional()?
            .transpose()?;

        match document {
            Some(mut document) => {
                document.previous_versions = load_versions(self.conn, id)?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    fn save_document(&self, document: &Document) -> RepoResult<Document> {
        document.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let id = match document.id {
            Some(id) => {
                update_document_row(&tx, id, document)?;
                id
            }
            None => insert_document_row(&tx, document)?,
        };
        replace_versions(&tx, id, &document.previous_versions)?;
        tx.commit()?;

        debug!("event=document_save module=repo status=ok document_id={id}");
        let mut saved = document.clone();
        saved.id = Some(id);
        Ok(saved)
    }

    fn search_documents(&self, text: &str) -> RepoResult<Vec<Document>> {
        let pattern = format!("%{}%", escape_like(text));
        self.query_documents(
            &format!(
                "{DOCUMENT_SELECT_SQL}
                 WHERE name LIKE ?1 ESCAPE '\\'
                    OR description LIKE ?1 ESCAPE '\\'
                    OR author LIKE ?1 ESCAPE '\\'
                 ORDER BY id ASC;"
            ),
            [pattern],
        )
    }
}

fn insert_document_row(tx: &Transaction<'_>, document: &Document) -> RepoResult<DocumentId> {
    tx.execute(
        "INSERT INTO documents (
            name,
            category,
            status,
            author,
            version,
            creation_date,
            description,
            file_path
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
        params![
            document.name.as_str(),
            document.category.code(),
            document.status.code(),
            document.author.as_str(),
            document.version.as_str(),
            date_to_db(document.creation_date),
            document.description.as_str(),
            document.file_path.as_str(),
        ],
    )?;
    Ok(tx.last_insert_rowid())
}

fn update_document_row(
    tx: &Transaction<'_>,
    id: DocumentId,
    document: &Document,
) -> RepoResult<()> {
    let changed = tx.execute(
        "UPDATE documents
         SET
            name = ?1,
            category = ?2,
            status = ?3,
            author = ?4,
            version = ?5,
            creation_date = ?6,
            description = ?7,
            file_path = ?8
         WHERE id = ?9;",
        params![
            document.name.as_str(),
            document.category.code(),
            document.status.code(),
            document.author.as_str(),
            document.version.as_str(),
            date_to_db(document.creation_date),
            document.description.as_str(),
            document.file_path.as_str(),
            id,
        ],
    )?;

    if changed == 0 {
        return Err(RepoError::NotFound {
            entity: "document",
            id,
        });
    }
    Ok(())
}

fn replace_versions(
    tx: &Transaction<'_>,
    document_id: DocumentId,
    versions: &[DocumentVersion],
) -> RepoResult<()> {
    tx.execute(
        "DELETE FROM document_versions WHERE doc_id = ?1;",
        [document_id],
    )?;
    for version in versions {
        tx.execute(
            "INSERT INTO document_versions (doc_id, version, author, changes, version_date)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                document_id,
                version.version.as_str(),
                version.author.as_str(),
                version.changes.as_str(),
                date_to_db(version.version_date),
            ],
        )?;
    }
    Ok(())
}

fn load_versions(conn: &Connection, document_id: DocumentId) -> RepoResult<Vec<DocumentVersion>> {
    let mut stmt = conn.prepare(
        "SELECT version, author, changes, version_date
         FROM document_versions
         WHERE doc_id = ?1
         ORDER BY id ASC;",
    )?;
    let mut rows = stmt.query([document_id])?;
    let mut versions = Vec::new();
    while let Some(row) = rows.next()? {
        let version_date = optional_date(row, "version_date")?.ok_or_else(|| {
            RepoError::InvalidData("missing version_date in document_versions".to_string())
        })?;
        versions.push(DocumentVersion {
            version: row.get("version")?,
            author: row.get("author")?,
            changes: row.get::<_, Option<String>>("changes")?.unwrap_or_default(),
            version_date,
        });
    }
    Ok(versions)
}

fn parse_document_row(row: &Row<'_>) -> RepoResult<Document> {
    let id: DocumentId = row.get("id")?;
    let creation_date = optional_date(row, "creation_date")?.ok_or_else(|| {
        RepoError::InvalidData(format!("missing creation_date for document {id}"))
    })?;

    Ok(Document {
        id: Some(id),
        name: row.get("name")?,
        category: vocab_column(row, "category", DocumentCategory::parse_stored)?,
        status: vocab_column(row, "status", DocumentStatus::parse_stored)?,
        author: row.get("author")?,
        version: row.get("version")?,
        creation_date,
        description: row
            .get::<_, Option<String>>("description")?
            .unwrap_or_default(),
        file_path: row.get::<_, Option<String>>("file_path")?.unwrap_or_default(),
        previous_versions: Vec::new(),
    })
}

/// Escapes `%`, `_` and the escape character for a `LIKE ... ESCAPE '\'`.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
