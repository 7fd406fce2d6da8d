//! Client-side validation gate for the configuration form.
//!
//! Mirrors the browser's required/format checks plus the form's
//! date-range rule. Runs before anything is sent to the backend.

use std::fmt;

use chrono::NaiveDate;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::choices::{
    is_choice, DATE_FORMAT, FILLNA_METHODS, INTERVALS, MODES, PERCENTAGES, PERIODS,
    SENTIMENT_TYPES,
};
use crate::error::CoreError;
use crate::submission::SubmissionRequest;

/// Error code for an empty required control.
pub const CODE_REQUIRED: &str = "required";
/// Error code for a value outside the control's choice table.
pub const CODE_INVALID_CHOICE: &str = "invalid_choice";
/// Error code for a date that is not `YYYY-MM-DD`.
pub const CODE_INVALID_DATE: &str = "invalid_date";
/// Error code for an end date before the start date.
pub const CODE_END_BEFORE_START: &str = "end_before_start";

/// Key used for form-level (cross-field) issues.
pub const FORM_LEVEL_FIELD: &str = "form";

/// One failed check, keyed by control name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldIssue {
    pub field: String,
    pub code: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.code)
    }
}

/// Run every check on `request`.
///
/// Returns all issues at once, sorted by field name, so the caller can
/// mark the whole form.
pub fn check(request: &SubmissionRequest) -> Result<(), CoreError> {
    request
        .validate()
        .map_err(|errors| CoreError::Validation(issues(&errors)))
}

/// Flatten `validator` errors into a sorted issue list.
pub fn issues(errors: &ValidationErrors) -> Vec<FieldIssue> {
    let mut out: Vec<FieldIssue> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = if field == "__all__" {
                FORM_LEVEL_FIELD.to_string()
            } else {
                field.to_string()
            };
            errs.iter().map(move |e| FieldIssue {
                field: field.clone(),
                code: e.code.to_string(),
            })
        })
        .collect();
    out.sort();
    out
}

/// Join issues into one human-readable line.
pub fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn required_choice(value: &str, choices: &[&str]) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(CODE_REQUIRED));
    }
    optional_choice(value, choices)
}

fn optional_choice(value: &str, choices: &[&str]) -> Result<(), ValidationError> {
    if value.is_empty() || is_choice(value, choices) {
        Ok(())
    } else {
        Err(ValidationError::new(CODE_INVALID_CHOICE))
    }
}

// ---- field checks wired through `#[validate(custom)]` ----

pub(crate) fn validate_mode(value: &str) -> Result<(), ValidationError> {
    required_choice(value, MODES)
}

pub(crate) fn validate_percentage(value: &str) -> Result<(), ValidationError> {
    required_choice(value, PERCENTAGES)
}

pub(crate) fn validate_interval(value: &str) -> Result<(), ValidationError> {
    optional_choice(value, INTERVALS)
}

pub(crate) fn validate_period(value: &str) -> Result<(), ValidationError> {
    optional_choice(value, PERIODS)
}

pub(crate) fn validate_sentiment_type(value: &str) -> Result<(), ValidationError> {
    optional_choice(value, SENTIMENT_TYPES)
}

pub(crate) fn validate_fillna_method(value: &str) -> Result<(), ValidationError> {
    optional_choice(value, FILLNA_METHODS)
}

pub(crate) fn validate_required_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(CODE_REQUIRED));
    }
    match parse_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new(CODE_INVALID_DATE)),
    }
}

/// The end date may equal the start date but not precede it.
pub(crate) fn validate_date_range(request: &SubmissionRequest) -> Result<(), ValidationError> {
    match (parse_date(&request.start_date), parse_date(&request.end_date)) {
        (Some(start), Some(end)) if start > end => {
            Err(ValidationError::new(CODE_END_BEFORE_START))
        }
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SubmissionRequest {
        SubmissionRequest {
            mode: "backtester".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-06-30".into(),
            percentage: "10".into(),
            interval: "1d".into(),
            period: "D".into(),
            sentiment_type: "neutral".into(),
            handle_missing_values: "fill".into(),
            fillna_method: "mean".into(),
        }
    }

    fn codes(request: &SubmissionRequest) -> Vec<(String, String)> {
        match check(request) {
            Ok(()) => Vec::new(),
            Err(CoreError::Validation(issues)) => {
                issues.into_iter().map(|i| (i.field, i.code)).collect()
            }
        }
    }

    #[test]
    fn complete_form_passes() {
        assert!(check(&valid_request()).is_ok());
    }

    #[test]
    fn optional_selects_may_be_empty() {
        let request = SubmissionRequest {
            interval: String::new(),
            period: String::new(),
            sentiment_type: String::new(),
            handle_missing_values: String::new(),
            fillna_method: String::new(),
            ..valid_request()
        };
        assert!(check(&request).is_ok());
    }

    #[test]
    fn empty_form_reports_every_required_control() {
        let issues = codes(&SubmissionRequest::default());
        assert_eq!(
            issues,
            vec![
                ("end_date".to_string(), CODE_REQUIRED.to_string()),
                ("mode".to_string(), CODE_REQUIRED.to_string()),
                ("percentage".to_string(), CODE_REQUIRED.to_string()),
                ("start_date".to_string(), CODE_REQUIRED.to_string()),
            ]
        );
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let request = SubmissionRequest {
            mode: "scalper".into(),
            ..valid_request()
        };
        assert_eq!(
            codes(&request),
            vec![("mode".to_string(), CODE_INVALID_CHOICE.to_string())]
        );
    }

    #[test]
    fn malformed_date_is_rejected() {
        let request = SubmissionRequest {
            start_date: "01/02/2024".into(),
            ..valid_request()
        };
        assert_eq!(
            codes(&request),
            vec![("start_date".to_string(), CODE_INVALID_DATE.to_string())]
        );
    }

    #[test]
    fn end_before_start_is_a_form_level_issue() {
        let request = SubmissionRequest {
            start_date: "2024-06-30".into(),
            end_date: "2024-01-01".into(),
            ..valid_request()
        };
        assert_eq!(
            codes(&request),
            vec![(FORM_LEVEL_FIELD.to_string(), CODE_END_BEFORE_START.to_string())]
        );
    }

    #[test]
    fn same_start_and_end_date_is_allowed() {
        let request = SubmissionRequest {
            start_date: "2024-03-15".into(),
            end_date: "2024-03-15".into(),
            ..valid_request()
        };
        assert!(check(&request).is_ok());
    }

    #[test]
    fn error_message_lists_issues() {
        let request = SubmissionRequest {
            period: "M".into(),
            ..valid_request()
        };
        let err = check(&request).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: period: invalid_choice");
    }
}
