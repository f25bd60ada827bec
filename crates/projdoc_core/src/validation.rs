//! Input validation rules shared by the model and front ends.
//!
//! # Responsibility
//! - Reject user input before any write reaches storage.
//! - Produce human-readable messages suitable for direct display.
//!
//! # Invariants
//! - Validation functions are pure; "today" is always passed in.
//! - Success carries no message; every failure carries a non-empty one.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum number of characters allowed in an entity name.
pub const NAME_MAX_CHARS: usize = 200;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+()\- #]{1,20}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Validation failure. `Display` renders the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DocumentNameRequired,
    DocumentAuthorRequired,
    DocumentNameTooLong { chars: usize },
    ProjectNameRequired,
    ProjectNameTooLong { chars: usize },
    ManagerRequired,
    ProgressOutOfRange { progress: i64 },
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
    StartInPast { start: NaiveDate, today: NaiveDate },
    PlannedDatesInvalid,
    ActualDatesInvalid,
    InvalidVersion(String),
    RouteNameRequired,
    ApproverRequired,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentNameRequired => write!(f, "Название документа обязательно"),
            Self::DocumentAuthorRequired => write!(f, "Автор документа обязателен"),
            Self::DocumentNameTooLong { chars } => {
                write!(f, "Название документа слишком длинное ({chars} > {NAME_MAX_CHARS})")
            }
            Self::ProjectNameRequired => write!(f, "Название проекта обязательно"),
            Self::ProjectNameTooLong { chars } => {
                write!(f, "Название проекта слишком длинное ({chars} > {NAME_MAX_CHARS})")
            }
            Self::ManagerRequired => write!(f, "Руководитель проекта обязателен"),
            Self::ProgressOutOfRange { progress } => {
                write!(f, "Прогресс должен быть от 0 до 100, получено {progress}")
            }
            Self::StartAfterEnd { .. } => {
                write!(f, "Дата начала не может быть позже даты окончания")
            }
            Self::StartInPast { .. } => write!(f, "Дата начала не может быть в прошлом"),
            Self::PlannedDatesInvalid => write!(f, "Плановые даты некорректны"),
            Self::ActualDatesInvalid => write!(f, "Фактические даты некорректны"),
            Self::InvalidVersion(value) => write!(f, "Некорректный номер версии `{value}`"),
            Self::RouteNameRequired => write!(f, "Название маршрута обязательно"),
            Self::ApproverRequired => write!(f, "Согласующий обязателен"),
        }
    }
}

impl Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

/// Checks the phone pattern: digits, `+`, parentheses, dashes, spaces, `#`.
pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Checks a new date range: ordered, and not starting before `today`.
pub fn validate_dates(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> ValidationResult {
    if start > end {
        return Err(ValidationError::StartAfterEnd { start, end });
    }
    if start < today {
        return Err(ValidationError::StartInPast { start, today });
    }
    Ok(())
}

/// Checks planned and (when both present) actual date ordering.
pub fn validate_project_dates(
    planned_start: NaiveDate,
    planned_end: NaiveDate,
    actual_start: Option<NaiveDate>,
    actual_end: Option<NaiveDate>,
) -> ValidationResult {
    if planned_start > planned_end {
        return Err(ValidationError::PlannedDatesInvalid);
    }
    if let (Some(start), Some(end)) = (actual_start, actual_end) {
        if start > end {
            return Err(ValidationError::ActualDatesInvalid);
        }
    }
    Ok(())
}

pub fn validate_document_data(name: &str, author: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return Err(ValidationError::DocumentNameRequired);
    }
    if author.trim().is_empty() {
        return Err(ValidationError::DocumentAuthorRequired);
    }
    let chars = name.chars().count();
    if chars > NAME_MAX_CHARS {
        return Err(ValidationError::DocumentNameTooLong { chars });
    }
    Ok(())
}

pub fn validate_project_data(name: &str, manager: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return Err(ValidationError::ProjectNameRequired);
    }
    if manager.trim().is_empty() {
        return Err(ValidationError::ManagerRequired);
    }
    let chars = name.chars().count();
    if chars > NAME_MAX_CHARS {
        return Err(ValidationError::ProjectNameTooLong { chars });
    }
    Ok(())
}

/// Renders a validation outcome as the message shown to users.
///
/// Returns an empty string on success.
pub fn validation_message(result: &ValidationResult) -> String {
    match result {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        validate_dates, validate_document_data, validate_email, validate_phone,
        validate_project_dates, validation_message, ValidationError,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn valid_document_data_has_empty_message() {
        let result = validate_document_data("Валидное название", "Валидный автор");
        assert!(result.is_ok());
        assert_eq!(validation_message(&result), "");
    }

    #[test]
    fn missing_document_fields_report_specific_messages() {
        let result = validate_document_data("", "Автор");
        assert!(validation_message(&result).contains("Название документа обязательно"));

        let result = validate_document_data("Название", "   ");
        assert!(validation_message(&result).contains("Автор документа обязателен"));
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let exactly_max = "я".repeat(200);
        assert!(validate_document_data(&exactly_max, "a").is_ok());

        let too_long = "я".repeat(201);
        assert_eq!(
            validate_document_data(&too_long, "a"),
            Err(ValidationError::DocumentNameTooLong { chars: 201 })
        );
    }

    #[test]
    fn date_range_rules() {
        let today = date(2024, 1, 1);
        assert!(validate_dates(date(2024, 1, 1), date(2024, 12, 31), today).is_ok());

        let reversed = validate_dates(date(2024, 12, 31), date(2024, 1, 1), today);
        assert!(validation_message(&reversed).contains("не может быть позже"));

        let past = validate_dates(date(2023, 6, 1), date(2024, 1, 1), today);
        assert!(matches!(past, Err(ValidationError::StartInPast { .. })));
    }

    #[test]
    fn project_dates_check_actual_range_only_when_complete() {
        let start = date(2024, 1, 1);
        let end = date(2024, 6, 30);
        assert!(validate_project_dates(start, end, Some(end), None).is_ok());
        assert_eq!(
            validate_project_dates(start, end, Some(end), Some(start)),
            Err(ValidationError::ActualDatesInvalid)
        );
        assert_eq!(
            validate_project_dates(end, start, None, None),
            Err(ValidationError::PlannedDatesInvalid)
        );
    }

    #[test]
    fn phone_pattern() {
        assert!(validate_phone("+7 (123) 456-7890"));
        assert!(validate_phone("1234567890"));
        assert!(!validate_phone(""));
        assert!(!validate_phone("abc"));
    }

    #[test]
    fn email_pattern() {
        assert!(validate_email("test@example.com"));
        assert!(validate_email("user.name@domain.co.uk"));
        assert!(!validate_email("invalid-email"));
        assert!(!validate_email("@domain.com"));
    }
}
