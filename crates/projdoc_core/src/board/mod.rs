//! Board projections behind the tile and kanban project views.
//!
//! # Responsibility
//! - Turn a project collection into positioned tiles or kanban columns.
//! - Stay free of any widget toolkit; renderers consume these values.
//!
//! # Invariants
//! - Projections are pure and preserve input order.

pub mod kanban;
pub mod tile;

use crate::model::project::Project;
use kanban::{kanban_columns, KanbanColumn};
use serde::{Deserialize, Serialize};
use tile::{tile_layout, Tile};

/// Project view layout selected by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStrategy {
    #[default]
    Tile,
    Kanban,
}

/// Output of a display strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", content = "items", rename_all = "snake_case")]
pub enum Board<'a> {
    Tiles(Vec<Tile>),
    Kanban(Vec<KanbanColumn<'a>>),
}

impl DisplayStrategy {
    pub fn project(self, projects: &[Project]) -> Board<'_> {
        match self {
            Self::Tile => Board::Tiles(tile_layout(projects)),
            Self::Kanban => Board::Kanban(kanban_columns(projects)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::kanban::{column_for, kanban_columns};
    use super::tile::tile_layout;
    use super::{Board, DisplayStrategy};
    use crate::model::project::Project;
    use crate::model::vocab::{ProjectStatus, ProjectType};
    use chrono::NaiveDate;

    fn project(name: &str, status: ProjectStatus) -> Project {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        Project::new(name, ProjectType::Corporate, status, start, end, "Менеджер")
    }

    #[test]
    fn tiles_wrap_after_three_per_row() {
        let projects = (0..4)
            .map(|i| project(&format!("p{i}"), ProjectStatus::Planned))
            .collect::<Vec<_>>();
        let tiles = tile_layout(&projects);

        let positions = tiles.iter().map(|t| (t.x, t.y)).collect::<Vec<_>>();
        assert_eq!(positions, vec![(20, 20), (240, 20), (460, 20), (20, 140)]);
        assert_eq!(tiles[0].fill, "green");
        assert_eq!(tiles[0].header_fill, "yellow");
        assert_eq!(tiles[0].footer, "Прогресс: 0%");
    }

    #[test]
    fn kanban_groups_by_status_and_drops_unmapped() {
        let projects = vec![
            project("a", ProjectStatus::Created),
            project("b", ProjectStatus::Frozen),
            project("c", ProjectStatus::Approval),
            project("d", ProjectStatus::Closed),
            project("e", ProjectStatus::Planned),
        ];
        let columns = kanban_columns(&projects);

        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0].caption(), "Бэклог (2)");
        assert_eq!(columns[0].projects[1].name, "e");
        assert_eq!(columns[1].projects[0].name, "c");
        assert!(columns[2].projects.is_empty());
        assert_eq!(columns[3].projects[0].name, "d");
        assert_eq!(column_for(ProjectStatus::Frozen), None);
    }

    #[test]
    fn strategy_dispatches_to_layout() {
        let projects = vec![project("a", ProjectStatus::InProgress)];
        assert!(matches!(
            DisplayStrategy::Kanban.project(&projects),
            Board::Kanban(columns) if columns.len() == 4
        ));
        assert!(matches!(
            DisplayStrategy::Tile.project(&projects),
            Board::Tiles(tiles) if tiles.len() == 1
        ));
    }
}
