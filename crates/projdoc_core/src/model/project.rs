//! Project domain model.
//!
//! # Responsibility
//! - Define the project record with its milestones, stages and linked
//!   documents.
//! - Own the progress/completion lifecycle rule.
//!
//! # Invariants
//! - `progress` stays within `0..=100`.
//! - Reaching 100% sets status `Completed` and stamps `actual_end`.
//! - `id` is `None` until the first save assigns one.

use crate::model::document::DocumentId;
use crate::model::vocab::{ProjectStatus, ProjectType};
use crate::validation::{validate_project_data, validate_project_dates, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage-assigned row identifier for projects.
pub type ProjectId = i64;

pub const PROGRESS_MAX: u8 = 100;

/// A dated checkpoint inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: Option<i64>,
    pub name: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

impl Milestone {
    pub fn new(name: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        Self {
            id: None,
            name: name.into(),
            due_date,
            completed: false,
        }
    }
}

/// A phase of project execution with its own status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStage {
    pub id: Option<i64>,
    pub name: String,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ProjectStage {
    pub fn new(name: impl Into<String>, status: ProjectStatus) -> Self {
        Self {
            id: None,
            name: name.into(),
            status,
            start_date: None,
            end_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<ProjectId>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub actual_start: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
    pub manager: String,
    pub description: String,
    /// Completion percentage, `0..=100`.
    pub progress: u8,
    pub milestones: Vec<Milestone>,
    pub stages: Vec<ProjectStage>,
    /// Linked document ids from the documents store.
    pub documents: Vec<DocumentId>,
}

impl Project {
    /// Creates an unsaved project with zero progress and no children.
    pub fn new(
        name: impl Into<String>,
        kind: ProjectType,
        status: ProjectStatus,
        start_date: NaiveDate,
        end_date: NaiveDate,
        manager: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind,
            status,
            start_date,
            end_date,
            actual_start: None,
            actual_end: None,
            manager: manager.into(),
            description: String::new(),
            progress: 0,
            milestones: Vec::new(),
            stages: Vec::new(),
            documents: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets progress, clamping into `0..=100`.
    ///
    /// # Invariants
    /// - A request of 100 or more completes the project and stamps
    ///   `actual_end = today`, or `actual_start` when that is later.
    pub fn set_progress(&mut self, requested: i64, today: NaiveDate) {
        self.progress = requested.clamp(0, i64::from(PROGRESS_MAX)) as u8;
        if requested >= i64::from(PROGRESS_MAX) {
            self.status = ProjectStatus::Completed;
            self.actual_end = Some(self.actual_start.map_or(today, |start| start.max(today)));
        }
    }

    /// Days between actual and planned end; positive means late.
    ///
    /// Returns `None` until the project has an actual end date.
    pub fn schedule_deviation_days(&self) -> Option<i64> {
        self.actual_end
            .map(|actual_end| (actual_end - self.end_date).num_days())
    }

    pub fn is_delayed(&self) -> bool {
        self.schedule_deviation_days().is_some_and(|days| days > 0)
    }

    /// Validates required fields, date ordering and progress range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_project_data(&self.name, &self.manager)?;
        validate_project_dates(
            self.start_date,
            self.end_date,
            self.actual_start,
            self.actual_end,
        )?;
        if self.progress > PROGRESS_MAX {
            return Err(ValidationError::ProgressOutOfRange {
                progress: i64::from(self.progress),
            });
        }
        Ok(())
    }
}
