//! Closed status and category vocabularies.
//!
//! # Responsibility
//! - Define every enumerated field shared by projects, documents and
//!   approval routes.
//! - Separate the stable storage code from the user-facing label.
//!
//! # Invariants
//! - `code()` values are persisted and must never be renamed.
//! - `label()` values are presentation-only and may change freely.
//! - Stored rows written with labels by older builds still decode through
//!   `parse_stored()`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => ($code:literal, $label:literal),)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $code)] $variant,)+
        }

        impl $name {
            /// Every value in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Stable storage/wire code.
            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Display label shown to users.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_code(value: &str) -> Option<Self> {
                match value {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn from_label(value: &str) -> Option<Self> {
                match value {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Decodes a stored column value, accepting the stable code or a
            /// legacy label.
            pub fn parse_stored(value: &str) -> Option<Self> {
                Self::from_code(value).or_else(|| Self::from_label(value))
            }

            /// Case-insensitive match against either code or label.
            pub fn matches_ignore_case(self, value: &str) -> bool {
                let needle = value.to_lowercase();
                self.code() == needle || self.label().to_lowercase() == needle
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

vocabulary! {
    /// Lifecycle state of a project.
    ProjectStatus {
        Created => ("created", "Создан"),
        Planned => ("planned", "Запланирован"),
        InProgress => ("in_progress", "В процессе"),
        Approval => ("approval", "На согласовании"),
        ApprovalWaiting => ("approval_waiting", "На утверждении"),
        Verification => ("verification", "На проверке"),
        RequiresRefinement => ("requires_refinement", "Требует доработки"),
        Frozen => ("frozen", "Заморожен"),
        Completed => ("completed", "Завершен"),
        Closed => ("closed", "Закрыт"),
        Archived => ("archived", "Архивирован"),
        Cancelled => ("cancelled", "Отменен"),
    }
}

vocabulary! {
    /// Project funding model.
    ProjectType {
        Investment => ("investment", "Инвестиционный"),
        Corporate => ("corporate", "Корпоративный"),
    }
}

vocabulary! {
    /// Lifecycle state of a document.
    DocumentStatus {
        Draft => ("draft", "Черновик"),
        Approval => ("approval", "На согласовании"),
        Approved => ("approved", "Согласован"),
        ApprovalWaiting => ("approval_waiting", "На утверждении"),
        ApprovedFinal => ("approved_final", "Утвержден"),
        Published => ("published", "Опубликован"),
        Archived => ("archived", "В архиве"),
        Recalled => ("recalled", "Отозван"),
        Verification => ("verification", "На проверке"),
        Refinement => ("refinement", "На доработке"),
        /// Set when a new revision is opened.
        Updating => ("updating", "На обновлении"),
        Updated => ("updated", "Обновлен"),
        Deleted => ("deleted", "Удален"),
        Expired => ("expired", "Истекший срок действия"),
        PublicationWaiting => ("publication_waiting", "Ожидание публикации"),
    }
}

vocabulary! {
    /// Document library section.
    DocumentCategory {
        Regulatory => ("regulatory", "Регламентирующие документы"),
        Archive => ("archive", "Архив"),
        Orders => ("orders", "Приказы и распоряжения"),
        Training => ("training", "Материалы по обучениям"),
        Templates => ("templates", "Шаблоны"),
        Memos => ("memos", "Служебные записки"),
    }
}

vocabulary! {
    /// Approval route lifecycle.
    RouteStatus {
        Draft => ("draft", "Черновик"),
        Approval => ("approval", "На согласовании"),
        Editing => ("editing", "На редактировании"),
        Rejected => ("rejected", "Отклонена"),
        Approved => ("approved", "Утверждена"),
        Active => ("active", "Введена в действие"),
    }
}

vocabulary! {
    /// Decision state of a single approval stage.
    StageStatus {
        Pending => ("pending", "Ожидает"),
        Approved => ("approved", "Согласовано"),
        Rejected => ("rejected", "Отклонено"),
    }
}

impl ProjectStatus {
    /// Statuses counted as finished work in statistics.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::{DocumentCategory, DocumentStatus, ProjectStatus, ProjectType, RouteStatus};

    #[test]
    fn vocabulary_sizes_are_fixed() {
        assert_eq!(ProjectStatus::ALL.len(), 12);
        assert_eq!(ProjectType::ALL.len(), 2);
        assert_eq!(DocumentStatus::ALL.len(), 15);
        assert_eq!(DocumentCategory::ALL.len(), 6);
        assert_eq!(RouteStatus::ALL.len(), 6);
    }

    #[test]
    fn parse_stored_accepts_code_and_legacy_label() {
        assert_eq!(
            DocumentStatus::parse_stored("published"),
            Some(DocumentStatus::Published)
        );
        assert_eq!(
            DocumentStatus::parse_stored("Опубликован"),
            Some(DocumentStatus::Published)
        );
        assert_eq!(DocumentStatus::parse_stored("bogus"), None);
    }

    #[test]
    fn matches_ignore_case_handles_cyrillic_labels() {
        assert!(DocumentStatus::Published.matches_ignore_case("опубликован"));
        assert!(DocumentStatus::Published.matches_ignore_case("PUBLISHED"));
        assert!(!DocumentStatus::Draft.matches_ignore_case("опубликован"));
    }

    #[test]
    fn codes_are_unique_within_each_vocabulary() {
        let mut codes = ProjectStatus::ALL
            .iter()
            .map(|status| status.code())
            .collect::<Vec<_>>();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ProjectStatus::ALL.len());
    }
}
