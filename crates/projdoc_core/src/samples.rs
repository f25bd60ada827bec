//! Demo rows used to seed empty stores.

use crate::model::document::Document;
use crate::model::project::Project;
use crate::model::vocab::{DocumentCategory, DocumentStatus, ProjectStatus, ProjectType};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Four projects covering both types and the main board columns.
pub fn sample_projects() -> Vec<Project> {
    let rows = [
        (
            "Развитие дорожной сети",
            ProjectType::Investment,
            ProjectStatus::InProgress,
            date(2024, 1, 1),
            date(2024, 12, 31),
            "Иванов И.И.",
            "Проект развития дорожной инфраструктуры",
            30,
        ),
        (
            "Корпоративная система",
            ProjectType::Corporate,
            ProjectStatus::Planned,
            date(2024, 3, 1),
            date(2024, 8, 31),
            "Петров П.П.",
            "Внедрение новой корпоративной системы",
            0,
        ),
        (
            "Инвестиции в логистику",
            ProjectType::Investment,
            ProjectStatus::Approval,
            date(2024, 2, 1),
            date(2024, 11, 30),
            "Сидоров С.С.",
            "Инвестиционный проект в логистическую инфраструктуру",
            45,
        ),
        (
            "Модернизация ИТ",
            ProjectType::Corporate,
            ProjectStatus::Completed,
            date(2024, 1, 15),
            date(2024, 6, 30),
            "Козлов К.К.",
            "Модернизация ИТ-инфраструктуры компании",
            100,
        ),
    ];

    rows.into_iter()
        .map(
            |(name, kind, status, start, end, manager, description, progress)| {
                let mut project =
                    Project::new(name, kind, status, start, end, manager).with_description(description);
                project.progress = progress;
                if progress == 100 {
                    project.actual_end = Some(end);
                }
                project
            },
        )
        .collect()
}

/// Four documents across categories, all created on `today`.
pub fn sample_documents(today: NaiveDate) -> Vec<Document> {
    let rows = [
        (
            "Положение о дорожной деятельности",
            DocumentCategory::Regulatory,
            DocumentStatus::Published,
            "Иванов И.И.",
            "1.0",
        ),
        (
            "Шаблон служебной записки",
            DocumentCategory::Templates,
            DocumentStatus::Published,
            "Петров П.П.",
            "2.1",
        ),
        (
            "Приказ №123",
            DocumentCategory::Orders,
            DocumentStatus::Approved,
            "Сидоров С.С.",
            "1.0",
        ),
        (
            "Методика оценки проектов",
            DocumentCategory::Regulatory,
            DocumentStatus::Draft,
            "Козлов К.К.",
            "1.0",
        ),
    ];

    rows.into_iter()
        .map(|(name, category, status, author, version)| {
            Document::new(name, category, status, author, today)
                .with_version(version)
                .with_description(format!("Описание документа {name}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{sample_documents, sample_projects};
    use crate::service::project_service::project_stats;
    use chrono::NaiveDate;

    #[test]
    fn sample_projects_are_valid_and_one_is_finished() {
        let projects = sample_projects();
        assert!(projects.iter().all(|project| project.validate().is_ok()));

        let stats = project_stats(&projects);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.delayed, 0);
        assert_eq!(stats.completion_rate, 25.0);
    }

    #[test]
    fn sample_documents_carry_descriptions() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let documents = sample_documents(today);
        assert_eq!(documents.len(), 4);
        assert_eq!(documents[1].version, "2.1");
        assert_eq!(
            documents[2].description,
            "Описание документа Приказ №123"
        );
        assert!(documents.iter().all(|document| document.validate().is_ok()));
    }
}
