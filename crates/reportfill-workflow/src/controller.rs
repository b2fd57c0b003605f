//! Submission workflow controller
//!
//! One submission is a single pass through: mandatory validation, the
//! completeness check, the draft save-or-delete decision, and document
//! generation. Draft persistence and generation are independent failure
//! domains; a generation error never rolls back the draft decision, and a
//! previously generated document stays downloadable regardless of what this
//! run produced.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use draft_store::{DraftKey, DraftRecord, DraftStore};
use reportfill_core::{open_template, substitute_document, write_document, FillError};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::WorkflowError;
use crate::form::{normalize_dates, prefill_values};
use crate::variant::{applicable_fields, placeholder_fields, MANDATORY_FIELDS};

/// One form submission as received from the caller.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    /// Draft selected for resumption, if any
    pub selected_draft: Option<DraftKey>,
    /// Template file name within the templates directory
    pub template: String,
    /// Current field values, keyed by placeholder name
    pub fields: BTreeMap<String, String>,
}

/// Result of the generation step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum GenerationStatus {
    /// Document written to the output path
    Generated(PathBuf),
    /// Generation failed; the draft decision already made still stands
    Failed(String),
}

/// Everything a caller needs to report back to the user.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    /// Applicable fields whose value was empty, in form order
    pub missing_fields: Vec<String>,
    /// Key the draft was saved under, when the submission was incomplete
    pub draft_saved: Option<DraftKey>,
    /// Selected draft deleted after a complete submission
    pub draft_deleted: Option<DraftKey>,
    /// What happened when the document was generated
    pub generation: GenerationStatus,
    /// Output file currently on disk, from this run or a previous one
    pub output: Option<PathBuf>,
}

/// Drives one form-fill cycle against injected directory handles.
pub struct SubmissionController {
    templates_dir: PathBuf,
    drafts: DraftStore,
    output_dir: PathBuf,
}

impl SubmissionController {
    pub fn new(
        templates_dir: impl Into<PathBuf>,
        drafts: DraftStore,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            drafts,
            output_dir: output_dir.into(),
        }
    }

    pub fn drafts(&self) -> &DraftStore {
        &self.drafts
    }

    /// Output path for a member's generated report.
    pub fn output_path(&self, member_name: &str) -> PathBuf {
        self.output_dir.join(format!("transfer_{}.docx", member_name))
    }

    /// Initial field values for the form: the selected draft overlaid on
    /// empty defaults, date fields falling back to today. An absent record
    /// yields plain defaults.
    pub fn prefill(
        &self,
        selected_draft: Option<&DraftKey>,
        template: &str,
    ) -> Result<BTreeMap<String, String>, WorkflowError> {
        let record = match selected_draft {
            Some(key) => self.drafts.load(key)?,
            None => None,
        };
        Ok(prefill_values(
            record.as_ref(),
            template,
            Local::now().date_naive(),
        ))
    }

    /// Run one submission. See the module docs for the step order.
    pub fn submit(&self, request: SubmitRequest) -> Result<SubmitOutcome, WorkflowError> {
        self.submit_at(request, Local::now().date_naive())
    }

    /// [`submit`](Self::submit) with an explicit "today", for deterministic
    /// tests.
    pub fn submit_at(
        &self,
        request: SubmitRequest,
        today: NaiveDate,
    ) -> Result<SubmitOutcome, WorkflowError> {
        let SubmitRequest {
            selected_draft,
            template,
            mut fields,
        } = request;

        // Mandatory identity fields gate everything else.
        let missing_mandatory: Vec<String> = MANDATORY_FIELDS
            .iter()
            .filter(|f| fields.get(**f).map(|v| v.is_empty()).unwrap_or(true))
            .map(|f| f.to_string())
            .collect();
        if !missing_mandatory.is_empty() {
            return Err(WorkflowError::MissingMandatory(missing_mandatory));
        }

        normalize_dates(&mut fields, today);

        // The substitution map always carries every placeholder key. Fields
        // the selected variant does not collect are cleared rather than
        // trusted from the caller; their tokens still get wiped from the
        // document, but they never count as missing.
        let applicable = applicable_fields(&template);
        let replacements: Vec<(String, String)> = placeholder_fields()
            .iter()
            .map(|field| {
                let value = if applicable.contains(field) {
                    fields.get(*field).cloned().unwrap_or_default()
                } else {
                    String::new()
                };
                ((*field).to_string(), value)
            })
            .collect();

        let missing_fields: Vec<String> = replacements
            .iter()
            .filter(|(field, value)| applicable.contains(&field.as_str()) && value.is_empty())
            .map(|(field, _)| field.clone())
            .collect();

        let member_code = fields.get("member_code").cloned().unwrap_or_default();
        let member_name = fields.get("member_name").cloned().unwrap_or_default();

        let mut draft_saved = None;
        let mut draft_deleted = None;
        if missing_fields.is_empty() {
            // Only delete the selected draft when it belongs to the member
            // being submitted; a selected draft for another member stays.
            if let Some(selected) = &selected_draft {
                if let Some(record) = self.drafts.load(selected)? {
                    if record.get("member_code") == member_code {
                        self.drafts.delete(selected)?;
                        draft_deleted = Some(selected.clone());
                    }
                }
            }
        } else {
            warn!(
                "Submission incomplete, missing: {}",
                missing_fields.join(", ")
            );
            let key = DraftKey::derive(&member_code, &template);
            let record: DraftRecord = replacements.iter().cloned().collect();
            self.drafts.save(&key, &record)?;
            draft_saved = Some(key);
        }

        let output_path = self.output_path(&member_name);
        let generation = match self.generate(&template, &replacements, &output_path) {
            Ok(()) => {
                info!("Generated {}", output_path.display());
                GenerationStatus::Generated(output_path.clone())
            }
            Err(e) => {
                error!("Document generation failed: {}", e);
                GenerationStatus::Failed(e.to_string())
            }
        };

        let output = output_path.exists().then_some(output_path);

        Ok(SubmitOutcome {
            missing_fields,
            draft_saved,
            draft_deleted,
            generation,
            output,
        })
    }

    fn generate(
        &self,
        template: &str,
        replacements: &[(String, String)],
        output_path: &Path,
    ) -> Result<(), FillError> {
        let mut docx = open_template(&self.templates_dir.join(template))?;
        substitute_document(&mut docx, replacements);
        write_document(docx, output_path)
    }
}
