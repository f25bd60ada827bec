//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load and save projects together with milestones, stages and document
//!   links from the projects store.
//!
//! # Invariants
//! - `save_project` inserts when `id` is `None`, otherwise overwrites the row
//!   with that id; overwriting a missing id is `NotFound`.
//! - Child rows are replaced as a whole set inside the same transaction.
//! - Document links keep their list position, duplicates included.
//! - `get_all_projects` returns rows in ascending id order.

use crate::db::{date_to_db, Store};
use crate::model::document::DocumentId;
use crate::model::project::{Milestone, Project, ProjectId, ProjectStage};
use crate::model::vocab::{ProjectStatus, ProjectType};
use crate::repo::{
    bool_to_int, ensure_store_ready, optional_date, required_date, vocab_column, RepoError,
    RepoResult,
};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    type,
    status,
    start_date,
    end_date,
    actual_start,
    actual_end,
    manager,
    description,
    progress
FROM projects";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "projects",
        &[
            "id",
            "name",
            "type",
            "status",
            "start_date",
            "end_date",
            "actual_start",
            "actual_end",
            "manager",
            "description",
            "progress",
        ],
    ),
    (
        "project_milestones",
        &["id", "project_id", "name", "due_date", "completed"],
    ),
    (
        "project_stages",
        &["id", "project_id", "name", "status", "start_date", "end_date"],
    ),
    ("project_documents", &["project_id", "document_id", "position"]),
];

/// Repository interface for project persistence.
pub trait ProjectRepository {
    fn get_all_projects(&self) -> RepoResult<Vec<Project>>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Inserts or overwrites `project` and returns it with assigned ids.
    fn save_project(&self, project: &Project) -> RepoResult<Project>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated projects-store connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_store_ready(conn, Store::Projects, REQUIRED_SCHEMA)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn get_all_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            let mut project = parse_project_row(row)?;
            load_children(self.conn, &mut project)?;
            projects.push(project);
        }
        debug!(
            "event=projects_load module=repo status=ok count={}",
            projects.len()
        );
        Ok(projects)
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let project = self
            .conn
            .query_row(
                &format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                |row| Ok(parse_project_row(row)),
            )
            .optional()?
            .transpose()?;

        match project {
            Some(mut project) => {
                load_children(self.conn, &mut project)?;
                Ok(Some(project))
            }
            None => Ok(None),
        }
    }

    fn save_project(&self, project: &Project) -> RepoResult<Project> {
        project.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let id = match project.id {
            Some(id) => {
                update_project_row(&tx, id, project)?;
                id
            }
            None => insert_project_row(&tx, project)?,
        };

        let mut saved = project.clone();
        saved.id = Some(id);
        replace_milestones(&tx, id, &mut saved.milestones)?;
        replace_stages(&tx, id, &mut saved.stages)?;
        replace_document_links(&tx, id, &saved.documents)?;
        tx.commit()?;

        debug!("event=project_save module=repo status=ok project_id={id}");
        Ok(saved)
    }
}

fn insert_project_row(tx: &Transaction<'_>, project: &Project) -> RepoResult<ProjectId> {
    tx.execute(
        "INSERT INTO projects (
            name,
            type,
            status,
            start_date,
            end_date,
            actual_start,
            actual_end,
            manager,
            description,
            progress
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
        params![
            project.name.as_str(),
            project.kind.code(),
            project.status.code(),
            date_to_db(project.start_date),
            date_to_db(project.end_date),
            project.actual_start.map(date_to_db),
            project.actual_end.map(date_to_db),
            project.manager.as_str(),
            project.description.as_str(),
            project.progress,
        ],
    )?;
    Ok(tx.last_insert_rowid())
}

fn update_project_row(tx: &Transaction<'_>, id: ProjectId, project: &Project) -> RepoResult<()> {
    let changed = tx.execute(
        "UPDATE projects
         SET
            name = ?1,
            type = ?2,
            status = ?3,
            start_date = ?4,
            end_date = ?5,
            actual_start = ?6,
            actual_end = ?7,
            manager = ?8,
            description = ?9,
            progress = ?10
         WHERE id = ?11;",
        params![
            project.name.as_str(),
            project.kind.code(),
            project.status.code(),
            date_to_db(project.start_date),
            date_to_db(project.end_date),
            project.actual_start.map(date_to_db),
            project.actual_end.map(date_to_db),
            project.manager.as_str(),
            project.description.as_str(),
            project.progress,
            id,
        ],
    )?;

    if changed == 0 {
        return Err(RepoError::NotFound {
            entity: "project",
            id,
        });
    }
    Ok(())
}

fn replace_milestones(
    tx: &Transaction<'_>,
    project_id: ProjectId,
    milestones: &mut [Milestone],
) -> RepoResult<()> {
    tx.execute(
        "DELETE FROM project_milestones WHERE project_id = ?1;",
        [project_id],
    )?;
    for milestone in milestones.iter_mut() {
        tx.execute(
            "INSERT INTO project_milestones (project_id, name, due_date, completed)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                project_id,
                milestone.name.as_str(),
                milestone.due_date.map(date_to_db),
                bool_to_int(milestone.completed),
            ],
        )?;
        milestone.id = Some(tx.last_insert_rowid());
    }
    Ok(())
}

fn replace_stages(
    tx: &Transaction<'_>,
    project_id: ProjectId,
    stages: &mut [ProjectStage],
) -> RepoResult<()> {
    tx.execute(
        "DELETE FROM project_stages WHERE project_id = ?1;",
        [project_id],
    )?;
    for stage in stages.iter_mut() {
        tx.execute(
            "INSERT INTO project_stages (project_id, name, status, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                project_id,
                stage.name.as_str(),
                stage.status.code(),
                stage.start_date.map(date_to_db),
                stage.end_date.map(date_to_db),
            ],
        )?;
        stage.id = Some(tx.last_insert_rowid());
    }
    Ok(())
}

fn replace_document_links(
    tx: &Transaction<'_>,
    project_id: ProjectId,
    documents: &[DocumentId],
) -> RepoResult<()> {
    tx.execute(
        "DELETE FROM project_documents WHERE project_id = ?1;",
        [project_id],
    )?;
    for (position, document_id) in documents.iter().enumerate() {
        tx.execute(
            "INSERT INTO project_documents (project_id, document_id, position)
             VALUES (?1, ?2, ?3);",
            params![project_id, document_id, position as i64],
        )?;
    }
    Ok(())
}

fn load_children(conn: &Connection, project: &mut Project) -> RepoResult<()> {
    let Some(project_id) = project.id else {
        return Ok(());
    };

    let mut stmt = conn.prepare(
        "SELECT id, name, due_date, completed
         FROM project_milestones
         WHERE project_id = ?1
         ORDER BY id ASC;",
    )?;
    let mut rows = stmt.query([project_id])?;
    while let Some(row) = rows.next()? {
        project.milestones.push(Milestone {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            due_date: optional_date(row, "due_date")?,
            completed: row.get::<_, i64>("completed")? != 0,
        });
    }

    let mut stmt = conn.prepare(
        "SELECT id, name, status, start_date, end_date
         FROM project_stages
         WHERE project_id = ?1
         ORDER BY id ASC;",
    )?;
    let mut rows = stmt.query([project_id])?;
    while let Some(row) = rows.next()? {
        project.stages.push(ProjectStage {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            status: vocab_column(row, "status", ProjectStatus::parse_stored)?,
            start_date: optional_date(row, "start_date")?,
            end_date: optional_date(row, "end_date")?,
        });
    }

    let mut stmt = conn.prepare(
        "SELECT document_id
         FROM project_documents
         WHERE project_id = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([project_id])?;
    while let Some(row) = rows.next()? {
        project.documents.push(row.get("document_id")?);
    }

    Ok(())
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let progress: i64 = row.get("progress")?;
    let progress = u8::try_from(progress)
        .ok()
        .filter(|value| *value <= 100)
        .ok_or_else(|| {
            RepoError::InvalidData(format!("invalid progress `{progress}` in projects.progress"))
        })?;

    Ok(Project {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        kind: vocab_column(row, "type", ProjectType::parse_stored)?,
        status: vocab_column(row, "status", ProjectStatus::parse_stored)?,
        start_date: required_date(row, "start_date")?,
        end_date: required_date(row, "end_date")?,
        actual_start: optional_date(row, "actual_start")?,
        actual_end: optional_date(row, "actual_end")?,
        manager: row.get("manager")?,
        description: row
            .get::<_, Option<String>>("description")?
            .unwrap_or_default(),
        progress,
        milestones: Vec::new(),
        stages: Vec::new(),
        documents: Vec::new(),
    })
}
