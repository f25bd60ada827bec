//! Approval route model.
//!
//! An approval route is an ordered chain of approvers a document passes
//! through. Stages are decided strictly in `order`; a single rejection
//! rejects the whole route.

use crate::model::vocab::{RouteStatus, StageStatus};
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RouteId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalStage {
    pub id: Option<i64>,
    pub approver: String,
    /// Job title of the approver.
    pub position: String,
    pub order: u32,
    pub status: StageStatus,
    pub comment: String,
}

impl ApprovalStage {
    pub fn new(approver: impl Into<String>, position: impl Into<String>, order: u32) -> Self {
        Self {
            id: None,
            approver: approver.into(),
            position: position.into(),
            order,
            status: StageStatus::Pending,
            comment: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRoute {
    pub id: Option<RouteId>,
    pub name: String,
    pub status: RouteStatus,
    pub stages: Vec<ApprovalStage>,
}

/// Rejected stage decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionError {
    /// Every stage already carries a decision.
    NoPendingStage,
    /// The route is not in `Approval` state.
    RouteNotInApproval(RouteStatus),
}

impl Display for DecisionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPendingStage => write!(f, "approval route has no pending stage"),
            Self::RouteNotInApproval(status) => {
                write!(f, "approval route is not under approval: {}", status.code())
            }
        }
    }
}

impl Error for DecisionError {}

impl ApprovalRoute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            status: RouteStatus::Draft,
            stages: Vec::new(),
        }
    }

    /// Appends a stage at the next order index.
    pub fn add_stage(&mut self, approver: impl Into<String>, position: impl Into<String>) {
        let order = self
            .stages
            .iter()
            .map(|stage| stage.order + 1)
            .max()
            .unwrap_or(0);
        self.stages.push(ApprovalStage::new(approver, position, order));
    }

    /// Moves a draft or edited route into approval.
    pub fn submit(&mut self) {
        self.status = RouteStatus::Approval;
    }

    /// First undecided stage by `order`.
    pub fn current_stage(&self) -> Option<&ApprovalStage> {
        self.stages
            .iter()
            .filter(|stage| stage.status == StageStatus::Pending)
            .min_by_key(|stage| stage.order)
    }

    pub fn approve_current(&mut self, comment: impl Into<String>) -> Result<(), DecisionError> {
        self.decide(StageStatus::Approved, comment.into())
    }

    pub fn reject_current(&mut self, comment: impl Into<String>) -> Result<(), DecisionError> {
        self.decide(StageStatus::Rejected, comment.into())
    }

    fn decide(&mut self, decision: StageStatus, comment: String) -> Result<(), DecisionError> {
        if self.status != RouteStatus::Approval {
            return Err(DecisionError::RouteNotInApproval(self.status));
        }
        let stage = self
            .stages
            .iter_mut()
            .filter(|stage| stage.status == StageStatus::Pending)
            .min_by_key(|stage| stage.order)
            .ok_or(DecisionError::NoPendingStage)?;
        stage.status = decision;
        stage.comment = comment;
        self.status = self.derived_status();
        Ok(())
    }

    /// Route status implied by stage decisions.
    fn derived_status(&self) -> RouteStatus {
        if self
            .stages
            .iter()
            .any(|stage| stage.status == StageStatus::Rejected)
        {
            return RouteStatus::Rejected;
        }
        if self
            .stages
            .iter()
            .all(|stage| stage.status == StageStatus::Approved)
        {
            return RouteStatus::Approved;
        }
        RouteStatus::Approval
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::RouteNameRequired);
        }
        if self
            .stages
            .iter()
            .any(|stage| stage.approver.trim().is_empty())
        {
            return Err(ValidationError::ApproverRequired);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ApprovalRoute, DecisionError};
    use crate::model::vocab::{RouteStatus, StageStatus};

    fn two_stage_route() -> ApprovalRoute {
        let mut route = ApprovalRoute::new("Согласование приказа");
        route.add_stage("Иванов", "Юрист");
        route.add_stage("Петров", "Директор");
        route
    }

    #[test]
    fn stages_are_decided_in_order() {
        let mut route = two_stage_route();
        route.submit();

        assert_eq!(route.current_stage().unwrap().approver, "Иванов");
        route.approve_current("ok").unwrap();
        assert_eq!(route.status, RouteStatus::Approval);
        assert_eq!(route.current_stage().unwrap().approver, "Петров");

        route.approve_current("").unwrap();
        assert_eq!(route.status, RouteStatus::Approved);
        assert!(route.current_stage().is_none());
        assert_eq!(
            route.approve_current(""),
            Err(DecisionError::RouteNotInApproval(RouteStatus::Approved))
        );
    }

    #[test]
    fn single_rejection_rejects_route() {
        let mut route = two_stage_route();
        route.submit();
        route.reject_current("нет подписи").unwrap();

        assert_eq!(route.status, RouteStatus::Rejected);
        assert_eq!(route.stages[0].status, StageStatus::Rejected);
        assert_eq!(route.stages[0].comment, "нет подписи");
    }

    #[test]
    fn draft_route_refuses_decisions() {
        let mut route = two_stage_route();
        assert_eq!(
            route.approve_current(""),
            Err(DecisionError::RouteNotInApproval(RouteStatus::Draft))
        );
    }
}
