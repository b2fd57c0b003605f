use draft_store::DraftStoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Mandatory fields are missing: {}", .0.join(", "))]
    MissingMandatory(Vec<String>),

    #[error(transparent)]
    Store(#[from] DraftStoreError),
}
