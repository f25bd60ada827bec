//! Structured filters over loaded collections.
//!
//! Every criterion is optional; set criteria combine with AND and the
//! input order is preserved.

use crate::model::document::Document;
use crate::model::project::Project;
use crate::model::vocab::{DocumentCategory, DocumentStatus, ProjectStatus, ProjectType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Field-based document filter used by the advanced search form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFilter {
    pub status: Option<DocumentStatus>,
    pub category: Option<DocumentCategory>,
    /// Case-insensitive substring of the author name.
    pub author: Option<String>,
    /// Inclusive lower bound on `creation_date`.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on `creation_date`.
    pub date_to: Option<NaiveDate>,
}

impl DocumentFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, document: &Document) -> bool {
        if self.status.is_some_and(|status| document.status != status) {
            return false;
        }
        if self
            .category
            .is_some_and(|category| document.category != category)
        {
            return false;
        }
        if let Some(author) = &self.author {
            if !document
                .author
                .to_lowercase()
                .contains(&author.to_lowercase())
            {
                return false;
            }
        }
        if self.date_from.is_some_and(|from| document.creation_date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| document.creation_date > to) {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, documents: &'a [Document]) -> Vec<&'a Document> {
        documents.iter().filter(|doc| self.matches(doc)).collect()
    }
}

/// Project list filter by status and type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    #[serde(rename = "type")]
    pub kind: Option<ProjectType>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.status.map_or(true, |status| project.status == status)
            && self.kind.map_or(true, |kind| project.kind == kind)
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|project| self.matches(project)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DocumentFilter;
    use crate::model::document::Document;
    use crate::model::vocab::{DocumentCategory, DocumentStatus};
    use chrono::NaiveDate;

    fn doc(name: &str, day: u32, author: &str) -> Document {
        Document::new(
            name,
            DocumentCategory::Regulatory,
            DocumentStatus::Draft,
            author,
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        )
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let docs = vec![doc("a", 1, "x"), doc("b", 2, "y")];
        let filter = DocumentFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&docs).len(), 2);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let docs = vec![doc("a", 1, "x"), doc("b", 2, "x"), doc("c", 3, "x")];
        let filter = DocumentFilter {
            date_from: NaiveDate::from_ymd_opt(2024, 3, 2),
            date_to: NaiveDate::from_ymd_opt(2024, 3, 3),
            ..DocumentFilter::default()
        };
        let names = filter
            .apply(&docs)
            .into_iter()
            .map(|doc| doc.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["b", "c"]);
    }

    #[test]
    fn author_is_case_insensitive_substring() {
        let docs = vec![doc("a", 1, "Иванов И.И."), doc("b", 1, "Петров")];
        let filter = DocumentFilter {
            author: Some("иванов".to_string()),
            ..DocumentFilter::default()
        };
        assert_eq!(filter.apply(&docs).len(), 1);
    }
}
