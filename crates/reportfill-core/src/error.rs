use thiserror::Error;

#[derive(Error, Debug)]
pub enum FillError {
    #[error("Failed to open template: {0}")]
    TemplateOpen(String),

    #[error("Failed to parse document: {0}")]
    TemplateParse(String),

    #[error("Failed to write document: {0}")]
    Write(String),
}
