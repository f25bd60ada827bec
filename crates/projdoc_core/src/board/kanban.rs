//! Kanban column grouping.

use crate::model::project::Project;
use crate::model::vocab::ProjectStatus;
use serde::Serialize;

/// Fixed column definitions, left to right.
const COLUMNS: &[(&str, &[ProjectStatus])] = &[
    ("Бэклог", &[ProjectStatus::Created, ProjectStatus::Planned]),
    (
        "В работе",
        &[ProjectStatus::InProgress, ProjectStatus::Approval],
    ),
    (
        "На проверке",
        &[ProjectStatus::Verification, ProjectStatus::ApprovalWaiting],
    ),
    (
        "Завершено",
        &[ProjectStatus::Completed, ProjectStatus::Closed],
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KanbanColumn<'a> {
    pub title: &'static str,
    pub projects: Vec<&'a Project>,
}

impl KanbanColumn<'_> {
    /// Header text with the card count, e.g. `Бэклог (2)`.
    pub fn caption(&self) -> String {
        format!("{} ({})", self.title, self.projects.len())
    }
}

/// Returns the column a status belongs to, if any.
pub fn column_for(status: ProjectStatus) -> Option<&'static str> {
    COLUMNS
        .iter()
        .find(|(_, statuses)| statuses.contains(&status))
        .map(|(title, _)| *title)
}

/// Groups projects into the four board columns.
///
/// Projects in statuses outside every column (frozen, archived, ...) are
/// left off the board. Each column keeps input order.
pub fn kanban_columns(projects: &[Project]) -> Vec<KanbanColumn<'_>> {
    COLUMNS
        .iter()
        .map(|&(title, _)| KanbanColumn {
            title,
            projects: projects
                .iter()
                .filter(|project| column_for(project.status) == Some(title))
                .collect(),
        })
        .collect()
}
