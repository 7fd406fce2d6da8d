//! Domain types shared by the Hybrid Trading user-input client.
//!
//! Holds the Submission Request sent to the backend, the choice tables
//! of the configuration form, and the client-side validation gate. No
//! I/O lives here.

pub mod choices;
pub mod error;
pub mod submission;
pub mod validation;
