//! Project use-case service.
//!
//! # Responsibility
//! - Provide list/filter, statistics and progress-update entry points.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Statistics are computed from a full reload; the service caches nothing.
//! - Unknown ids are reported as `false`, never as an error.

use crate::model::project::{Project, ProjectId};
use crate::model::vocab::{ProjectStatus, ProjectType};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::RepoResult;
use crate::search::filter::ProjectFilter;
use crate::service::local_today;
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

/// Aggregate counters shown on the statistics panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub total: usize,
    /// Projects in `Completed` or `Closed`.
    pub completed: usize,
    pub in_progress: usize,
    /// Projects whose actual end is later than the planned end.
    pub delayed: usize,
    /// `completed / total * 100`, one decimal place; `0.0` when empty.
    pub completion_rate: f64,
}

/// Computes statistics over an already-loaded project collection.
pub fn project_stats(projects: &[Project]) -> ProjectStats {
    let total = projects.len();
    let completed = projects
        .iter()
        .filter(|project| project.status.is_finished())
        .count();
    let in_progress = projects
        .iter()
        .filter(|project| project.status == ProjectStatus::InProgress)
        .count();
    let delayed = projects.iter().filter(|project| project.is_delayed()).count();

    let completion_rate = if total == 0 {
        0.0
    } else {
        round_one_decimal(completed as f64 / total as f64 * 100.0)
    };

    ProjectStats {
        total,
        completed,
        in_progress,
        delayed,
        completion_rate,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Use-case service wrapper for project operations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_all_projects(&self) -> RepoResult<Vec<Project>> {
        self.repo.get_all_projects()
    }

    pub fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.repo.get_project(id)
    }

    pub fn save_project(&self, project: &Project) -> RepoResult<Project> {
        self.repo.save_project(project)
    }

    pub fn get_projects_by_status(&self, status: ProjectStatus) -> RepoResult<Vec<Project>> {
        self.filter_projects(ProjectFilter {
            status: Some(status),
            kind: None,
        })
    }

    pub fn get_projects_by_type(&self, kind: ProjectType) -> RepoResult<Vec<Project>> {
        self.filter_projects(ProjectFilter {
            status: None,
            kind: Some(kind),
        })
    }

    pub fn filter_projects(&self, filter: ProjectFilter) -> RepoResult<Vec<Project>> {
        let projects = self.repo.get_all_projects()?;
        Ok(filter.apply(&projects).into_iter().cloned().collect())
    }

    /// Days of schedule slip; `None` while the project has no actual end.
    pub fn calculate_project_deviation(&self, project: &Project) -> Option<i64> {
        project.schedule_deviation_days()
    }

    pub fn get_project_progress_stats(&self) -> RepoResult<ProjectStats> {
        let projects = self.repo.get_all_projects()?;
        Ok(project_stats(&projects))
    }

    /// Updates progress using today's local date for completion stamping.
    ///
    /// Returns `false` when no project has `id`.
    pub fn update_project_progress(&self, id: ProjectId, progress: i64) -> RepoResult<bool> {
        self.update_project_progress_on(id, progress, local_today())
    }

    /// Same as [`Self::update_project_progress`] with an explicit date.
    pub fn update_project_progress_on(
        &self,
        id: ProjectId,
        progress: i64,
        today: NaiveDate,
    ) -> RepoResult<bool> {
        let Some(mut project) = self.repo.get_project(id)? else {
            info!("event=project_progress module=service status=not_found project_id={id}");
            return Ok(false);
        };

        project.set_progress(progress, today);
        self.repo.save_project(&project)?;
        info!(
            "event=project_progress module=service status=ok project_id={id} progress={} project_status={}",
            project.progress,
            project.status.code()
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::{project_stats, round_one_decimal};

    #[test]
    fn empty_collection_has_zero_rate() {
        let stats = project_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn rounding_keeps_one_decimal() {
        assert_eq!(round_one_decimal(100.0 / 3.0), 33.3);
        assert_eq!(round_one_decimal(200.0 / 3.0), 66.7);
        assert_eq!(round_one_decimal(50.0), 50.0);
    }
}
