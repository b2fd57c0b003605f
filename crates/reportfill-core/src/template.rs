//! Template I/O
//!
//! Every generation opens a fresh copy of the template from disk; the
//! template file itself is never written back.

use std::fs;
use std::path::Path;

use docx_rs::{read_docx, Docx};

use crate::error::FillError;

/// Open a template file as a fresh in-memory document.
pub fn open_template(path: &Path) -> Result<Docx, FillError> {
    let bytes = fs::read(path)
        .map_err(|e| FillError::TemplateOpen(format!("{}: {}", path.display(), e)))?;
    read_docx(&bytes).map_err(|e| FillError::TemplateParse(e.to_string()))
}

/// Write a filled document to `path`, replacing any previous file there.
pub fn write_document(docx: Docx, path: &Path) -> Result<(), FillError> {
    let file = fs::File::create(path)
        .map_err(|e| FillError::Write(format!("{}: {}", path.display(), e)))?;
    docx.build()
        .pack(file)
        .map_err(|e| FillError::Write(e.to_string()))
}
