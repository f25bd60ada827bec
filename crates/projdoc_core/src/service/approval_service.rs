//! Approval route use-case service.
//!
//! Loads a route, applies one stage decision and writes it back. Routes are
//! not wired into document status; that link is left to callers.

use crate::model::approval::{ApprovalRoute, DecisionError, RouteId};
use crate::repo::approval_repo::ApprovalRouteRepository;
use crate::repo::{RepoError, RepoResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ApprovalServiceError {
    RouteNotFound(RouteId),
    Decision(DecisionError),
    Repo(RepoError),
}

impl Display for ApprovalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RouteNotFound(id) => write!(f, "approval route not found: {id}"),
            Self::Decision(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ApprovalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decision(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::RouteNotFound(_) => None,
        }
    }
}

impl From<RepoError> for ApprovalServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { id, .. } => Self::RouteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<DecisionError> for ApprovalServiceError {
    fn from(value: DecisionError) -> Self {
        Self::Decision(value)
    }
}

/// Stage verdict submitted by the current approver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

pub struct ApprovalService<R: ApprovalRouteRepository> {
    repo: R,
}

impl<R: ApprovalRouteRepository> ApprovalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_all_routes(&self) -> RepoResult<Vec<ApprovalRoute>> {
        self.repo.get_all_routes()
    }

    pub fn save_route(&self, route: &ApprovalRoute) -> RepoResult<ApprovalRoute> {
        self.repo.save_route(route)
    }

    /// Puts a stored route under approval.
    pub fn submit_route(&self, id: RouteId) -> Result<ApprovalRoute, ApprovalServiceError> {
        let mut route = self.load(id)?;
        route.submit();
        Ok(self.repo.save_route(&route)?)
    }

    /// Records a decision on the route's current pending stage.
    pub fn decide(
        &self,
        id: RouteId,
        decision: Decision,
        comment: &str,
    ) -> Result<ApprovalRoute, ApprovalServiceError> {
        let mut route = self.load(id)?;
        match decision {
            Decision::Approve => route.approve_current(comment)?,
            Decision::Reject => route.reject_current(comment)?,
        }
        let saved = self.repo.save_route(&route)?;
        info!(
            "event=approval_decide module=service status=ok route_id={id} route_status={}",
            saved.status.code()
        );
        Ok(saved)
    }

    fn load(&self, id: RouteId) -> Result<ApprovalRoute, ApprovalServiceError> {
        self.repo
            .get_route(id)?
            .ok_or(ApprovalServiceError::RouteNotFound(id))
    }
}
