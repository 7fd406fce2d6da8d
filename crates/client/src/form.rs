//! Reading the configuration form.

use hybrid_core::submission::{FormField, SubmissionRequest};

/// Source of the form's current control values.
pub trait FormReader {
    /// Current value of one control, as a raw string.
    fn value(&self, field: FormField) -> String;

    /// Read all nine controls into a request.
    fn read(&self) -> SubmissionRequest {
        SubmissionRequest::from_fields(|field| self.value(field))
    }
}

impl FormReader for SubmissionRequest {
    fn value(&self, field: FormField) -> String {
        self.get(field).to_string()
    }
}
