//! Submission workflow for Word report templates
//!
//! Ties the pieces together: which fields a template variant collects, how a
//! saved draft pre-fills the form, and the save-or-delete / generate decision
//! made on every submission.
//!
//! The controller owns no directory state of its own; it operates on the
//! template source, draft store, and output sink handed to it at
//! construction time.

pub mod controller;
pub mod error;
pub mod form;
pub mod variant;

pub use controller::{GenerationStatus, SubmissionController, SubmitOutcome, SubmitRequest};
pub use error::WorkflowError;
pub use form::{normalize_dates, prefill_values, DATE_FIELDS, DATE_FORMAT};
pub use variant::{
    applicable_fields, placeholder_fields, variant_info, variant_name, VariantInfo,
    COMMON_FIELDS, IBT_EXTRA_FIELDS, IBT_VARIANT, MANDATORY_FIELDS,
};
