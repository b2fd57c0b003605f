//! Data models for the Reportfill API

use std::collections::BTreeMap;

use reportfill_workflow::{GenerationStatus, VariantInfo};
use serde::{Deserialize, Serialize};

/// Template listing response
#[derive(Debug, Clone, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<VariantInfo>,
    pub count: usize,
}

/// Draft listing response
#[derive(Debug, Clone, Serialize)]
pub struct DraftListResponse {
    pub drafts: Vec<String>,
    pub count: usize,
}

/// Query parameters for draft pre-fill
#[derive(Debug, Clone, Deserialize)]
pub struct PrefillQuery {
    /// Template the form is being filled for
    pub template: String,
}

/// Pre-fill response: the form values to show, draft values merged in
#[derive(Debug, Clone, Serialize)]
pub struct PrefillResponse {
    pub key: String,
    pub template: String,
    pub values: BTreeMap<String, String>,
}

/// Request to run one submission
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitApiRequest {
    /// Draft selected for resumption, if any
    #[serde(default)]
    pub draft_key: Option<String>,
    /// Template file name
    pub template: String,
    /// Current field values keyed by placeholder name
    pub fields: BTreeMap<String, String>,
}

/// Outcome of one submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmitApiResponse {
    /// Applicable fields whose value was empty, in form order
    pub missing_fields: Vec<String>,
    /// Key the draft was saved under, when incomplete
    pub draft_saved: Option<String>,
    /// Selected draft deleted after a complete submission
    pub draft_deleted: Option<String>,
    /// What happened when the document was generated
    pub generation: GenerationStatus,
    /// Whether a generated document is currently downloadable
    pub download_available: bool,
}
