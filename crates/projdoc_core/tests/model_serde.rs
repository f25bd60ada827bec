use chrono::NaiveDate;
use projdoc_core::{
    Document, DocumentCategory, DocumentStatus, Project, ProjectStats, ProjectStatus,
    ProjectType, SearchStrategy,
};
use serde_json::json;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn project_serializes_with_stable_codes() {
    let project = Project::new(
        "Модернизация ИТ",
        ProjectType::Corporate,
        ProjectStatus::InProgress,
        date(2024, 1, 15),
        date(2024, 6, 30),
        "Козлов К.К.",
    );
    let value = serde_json::to_value(&project).unwrap();

    assert_eq!(value["type"], "corporate");
    assert_eq!(value["status"], "in_progress");
    assert_eq!(value["start_date"], "2024-01-15");
    assert_eq!(value["actual_end"], serde_json::Value::Null);
    assert_eq!(value["progress"], 0);
}

#[test]
fn document_roundtrips_through_json() {
    let document = Document::new(
        "Приказ №123",
        DocumentCategory::Orders,
        DocumentStatus::ApprovedFinal,
        "Сидоров С.С.",
        date(2024, 2, 1),
    );
    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(value["category"], "orders");
    assert_eq!(value["status"], "approved_final");
    assert_eq!(value["version"], "1.0");

    let decoded: Document = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, document);
}

#[test]
fn labels_are_not_accepted_on_the_wire() {
    let result = serde_json::from_value::<DocumentStatus>(json!("Опубликован"));
    assert!(result.is_err());
}

#[test]
fn stats_and_strategy_wire_names() {
    let stats = ProjectStats {
        total: 3,
        completed: 1,
        in_progress: 1,
        delayed: 0,
        completion_rate: 33.3,
    };
    assert_eq!(
        serde_json::to_value(stats).unwrap(),
        json!({
            "total": 3,
            "completed": 1,
            "in_progress": 1,
            "delayed": 0,
            "completion_rate": 33.3
        })
    );
    assert_eq!(
        serde_json::to_value(SearchStrategy::Advanced).unwrap(),
        json!("advanced")
    );
}
