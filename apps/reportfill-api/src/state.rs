//! Application state for the Reportfill API

use std::path::PathBuf;

use anyhow::Result;
use draft_store::DraftStore;
use reportfill_workflow::SubmissionController;

pub struct AppState {
    pub templates_dir: PathBuf,
    pub controller: SubmissionController,
}

impl AppState {
    /// Resolve directories from the environment and bootstrap them.
    pub fn new() -> Result<Self> {
        let templates_dir = env_dir("REPORTFILL_TEMPLATES_DIR", "reports");
        let drafts_dir = env_dir("REPORTFILL_DRAFTS_DIR", "data");
        let output_dir = env_dir("REPORTFILL_OUTPUT_DIR", "downloads");
        Self::with_dirs(templates_dir, drafts_dir, output_dir)
    }

    /// Build the state against explicit directories, creating them if
    /// absent. This is the single place the filesystem layout is set up;
    /// everything downstream works through the controller's handles.
    pub fn with_dirs(
        templates_dir: PathBuf,
        drafts_dir: PathBuf,
        output_dir: PathBuf,
    ) -> Result<Self> {
        std::fs::create_dir_all(&templates_dir)?;
        std::fs::create_dir_all(&output_dir)?;

        tracing::info!(
            "Using templates={} drafts={} output={}",
            templates_dir.display(),
            drafts_dir.display(),
            output_dir.display()
        );

        let drafts = DraftStore::open(drafts_dir)?;
        let controller = SubmissionController::new(templates_dir.clone(), drafts, output_dir);

        Ok(Self {
            templates_dir,
            controller,
        })
    }
}

fn env_dir(var: &str, default: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
