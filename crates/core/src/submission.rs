//! The Submission Request: the nine configuration-form values sent to
//! the backend once per submit.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Named controls of the configuration form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Mode,
    StartDate,
    EndDate,
    Percentage,
    Interval,
    Period,
    SentimentType,
    HandleMissingValues,
    FillnaMethod,
}

impl FormField {
    /// Every field, in the order the form lays them out.
    pub const ALL: [FormField; 9] = [
        FormField::Mode,
        FormField::StartDate,
        FormField::EndDate,
        FormField::Percentage,
        FormField::Interval,
        FormField::Period,
        FormField::SentimentType,
        FormField::HandleMissingValues,
        FormField::FillnaMethod,
    ];

    /// Control name, which is also the JSON key on the wire.
    pub fn name(self) -> &'static str {
        match self {
            FormField::Mode => "mode",
            FormField::StartDate => "start_date",
            FormField::EndDate => "end_date",
            FormField::Percentage => "percentage",
            FormField::Interval => "interval",
            FormField::Period => "period",
            FormField::SentimentType => "sentiment_type",
            FormField::HandleMissingValues => "handle_missing_values",
            FormField::FillnaMethod => "fillna_method",
        }
    }
}

/// Values of the configuration form at submit time.
///
/// Every value is the raw string read from its control. Dates and
/// numbers are not coerced; the backend parses them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "crate::validation::validate_date_range"))]
pub struct SubmissionRequest {
    #[validate(custom(function = "crate::validation::validate_mode"))]
    pub mode: String,
    #[validate(custom(function = "crate::validation::validate_required_date"))]
    pub start_date: String,
    #[validate(custom(function = "crate::validation::validate_required_date"))]
    pub end_date: String,
    #[validate(custom(function = "crate::validation::validate_percentage"))]
    pub percentage: String,
    #[validate(custom(function = "crate::validation::validate_interval"))]
    pub interval: String,
    #[validate(custom(function = "crate::validation::validate_period"))]
    pub period: String,
    #[validate(custom(function = "crate::validation::validate_sentiment_type"))]
    pub sentiment_type: String,
    pub handle_missing_values: String,
    #[validate(custom(function = "crate::validation::validate_fillna_method"))]
    pub fillna_method: String,
}

impl SubmissionRequest {
    /// Build a request by reading each named control through `read`.
    pub fn from_fields(mut read: impl FnMut(FormField) -> String) -> Self {
        Self {
            mode: read(FormField::Mode),
            start_date: read(FormField::StartDate),
            end_date: read(FormField::EndDate),
            percentage: read(FormField::Percentage),
            interval: read(FormField::Interval),
            period: read(FormField::Period),
            sentiment_type: read(FormField::SentimentType),
            handle_missing_values: read(FormField::HandleMissingValues),
            fillna_method: read(FormField::FillnaMethod),
        }
    }

    /// Current value of one control.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Mode => &self.mode,
            FormField::StartDate => &self.start_date,
            FormField::EndDate => &self.end_date,
            FormField::Percentage => &self.percentage,
            FormField::Interval => &self.interval,
            FormField::Period => &self.period,
            FormField::SentimentType => &self.sentiment_type,
            FormField::HandleMissingValues => &self.handle_missing_values,
            FormField::FillnaMethod => &self.fillna_method,
        }
    }
}
