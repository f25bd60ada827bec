//! In-memory document search strategies.
//!
//! # Responsibility
//! - Filter an already-loaded document collection by free text or by a
//!   `key:value` operator query.
//!
//! # Invariants
//! - Results preserve input order; there is no ranking.
//! - Matching is case-insensitive (Unicode lower-casing).
//! - Advanced filters combine with AND in a fixed order: status, author,
//!   category, then the free-text residual.

use crate::model::document::Document;
use serde::{Deserialize, Serialize};

/// Search algorithm selected by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Substring over name, author and description.
    #[default]
    Simple,
    /// `status:` / `author:` / `category:` operators plus free text.
    Advanced,
}

impl SearchStrategy {
    pub fn search<'a>(self, documents: &'a [Document], query: &str) -> Vec<&'a Document> {
        match self {
            Self::Simple => simple_search(documents, query),
            Self::Advanced => advanced_search(documents, query),
        }
    }
}

/// Operators recognised in an advanced query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorQuery {
    pub status: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    /// Words without a `key:` prefix, joined by single spaces.
    pub text: Option<String>,
}

impl OperatorQuery {
    /// Splits `query` on whitespace into `key:value` operators and free text.
    ///
    /// Keys are case-insensitive, values lose surrounding quotes, unknown
    /// keys are dropped and a repeated key keeps its last value.
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        let mut words = Vec::new();

        for part in query.split_whitespace() {
            let Some((key, value)) = part.split_once(':') else {
                words.push(part);
                continue;
            };
            let value = value.trim_matches(|ch| ch == '"' || ch == '\'').to_string();
            match key.to_lowercase().as_str() {
                "status" => parsed.status = Some(value),
                "author" => parsed.author = Some(value),
                "category" => parsed.category = Some(value),
                _ => {}
            }
        }

        if !words.is_empty() {
            parsed.text = Some(words.join(" "));
        }
        parsed
    }
}

/// Keeps documents whose name, author or description contains `query`.
pub fn simple_search<'a>(documents: &'a [Document], query: &str) -> Vec<&'a Document> {
    let needle = query.to_lowercase();
    documents
        .iter()
        .filter(|doc| matches_text(doc, &needle))
        .collect()
}

/// Applies an operator query; an empty query returns every document.
pub fn advanced_search<'a>(documents: &'a [Document], query: &str) -> Vec<&'a Document> {
    if query.is_empty() {
        return documents.iter().collect();
    }

    let operators = OperatorQuery::parse(query);
    let status = operators.status.as_deref();
    let author = operators.author.as_deref().map(str::to_lowercase);
    let category = operators.category.as_deref().map(str::to_lowercase);
    let text = operators.text.as_deref().map(str::to_lowercase);

    documents
        .iter()
        .filter(|doc| status.map_or(true, |value| doc.status.matches_ignore_case(value)))
        .filter(|doc| {
            author
                .as_deref()
                .map_or(true, |value| doc.author.to_lowercase().contains(value))
        })
        .filter(|doc| {
            category.as_deref().map_or(true, |value| {
                doc.category.label().to_lowercase().contains(value)
                    || doc.category.code().contains(value)
            })
        })
        .filter(|doc| text.as_deref().map_or(true, |value| matches_text(doc, value)))
        .collect()
}

fn matches_text(doc: &Document, needle: &str) -> bool {
    doc.name.to_lowercase().contains(needle)
        || doc.author.to_lowercase().contains(needle)
        || doc.description.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::OperatorQuery;

    #[test]
    fn parse_splits_operators_and_residual_text() {
        let parsed = OperatorQuery::parse("Status:\"Черновик\" годовой author:'Иванов' отчет");
        assert_eq!(parsed.status.as_deref(), Some("Черновик"));
        assert_eq!(parsed.author.as_deref(), Some("Иванов"));
        assert_eq!(parsed.category, None);
        assert_eq!(parsed.text.as_deref(), Some("годовой отчет"));
    }

    #[test]
    fn parse_ignores_unknown_keys_and_keeps_last_duplicate() {
        let parsed = OperatorQuery::parse("priority:high author:a author:b");
        assert_eq!(parsed.author.as_deref(), Some("b"));
        assert_eq!(parsed.text, None);
    }

    #[test]
    fn parse_splits_value_at_first_colon_only() {
        let parsed = OperatorQuery::parse("category:a:b");
        assert_eq!(parsed.category.as_deref(), Some("a:b"));
    }
}
