//! Run-level placeholder substitution for Word report templates
//!
//! This crate rewrites placeholder tokens inside a parsed `.docx` document.
//! Replacement happens within individual runs so the surrounding formatting
//! survives; a token whose characters are split across two runs is
//! intentionally left alone.
//!
//! The template file on disk is never modified: every generation opens a
//! fresh copy via [`open_template`], mutates it in memory with
//! [`substitute_document`], and writes the result with [`write_document`].

pub mod error;
pub mod substitute;
pub mod template;

pub use error::FillError;
pub use substitute::{document_text, paragraph_text, substitute_document, substitute_paragraph};
pub use template::{open_template, write_document};
