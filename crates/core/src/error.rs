use crate::validation::{summarize, FieldIssue};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldIssue>),
}
