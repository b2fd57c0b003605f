use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DraftStoreError {
    #[error("Draft store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Draft record '{key}' is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize draft record: {0}")]
    Serialize(#[source] serde_json::Error),
}
