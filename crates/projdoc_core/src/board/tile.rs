//! Tile grid placement.

use crate::model::project::{Project, ProjectId};
use crate::model::vocab::{ProjectStatus, ProjectType};
use serde::Serialize;

pub const TILE_WIDTH: u32 = 200;
pub const TILE_HEIGHT: u32 = 100;
pub const TILE_GAP: u32 = 20;
/// A new row starts once the next tile's left edge passes this x.
pub const ROW_WRAP_X: u32 = 600;

/// One positioned project tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub project_id: Option<ProjectId>,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Body colour, keyed by project type.
    pub fill: &'static str,
    /// Header strip colour, keyed by status.
    pub header_fill: &'static str,
    pub header: String,
    pub title: String,
    pub subtitle: String,
    pub footer: String,
}

pub fn type_color(kind: ProjectType) -> &'static str {
    match kind {
        ProjectType::Investment => "orange",
        ProjectType::Corporate => "green",
    }
}

pub fn status_color(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Created => "beige",
        ProjectStatus::Planned => "yellow",
        ProjectStatus::InProgress => "green",
        ProjectStatus::Approval => "orange",
        ProjectStatus::ApprovalWaiting => "purple",
        ProjectStatus::Verification => "red",
        ProjectStatus::RequiresRefinement => "pink",
        ProjectStatus::Frozen => "lightblue",
        ProjectStatus::Completed => "blue",
        ProjectStatus::Closed => "darkblue",
        ProjectStatus::Archived => "darkgreen",
        ProjectStatus::Cancelled => "gray",
    }
}

/// Places projects left to right, wrapping rows, in input order.
pub fn tile_layout(projects: &[Project]) -> Vec<Tile> {
    let mut x = TILE_GAP;
    let mut y = TILE_GAP;
    let mut tiles = Vec::with_capacity(projects.len());

    for project in projects {
        tiles.push(Tile {
            project_id: project.id,
            x,
            y,
            width: TILE_WIDTH,
            height: TILE_HEIGHT,
            fill: type_color(project.kind),
            header_fill: status_color(project.status),
            header: project.status.label().to_string(),
            title: project.name.clone(),
            subtitle: project.manager.clone(),
            footer: format!("Прогресс: {}%", project.progress),
        });

        x += TILE_WIDTH + TILE_GAP;
        if x > ROW_WRAP_X {
            x = TILE_GAP;
            y += TILE_HEIGHT + TILE_GAP;
        }
    }

    tiles
}
