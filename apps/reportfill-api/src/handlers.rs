//! HTTP handlers for the Reportfill API
//!
//! Template and draft listings are read fresh on every request; the workflow
//! controller never caches them.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use draft_store::DraftKey;
use reportfill_workflow::{variant_info, SubmitRequest};

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// List the template files currently available, with their field sets.
pub async fn list_templates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TemplateListResponse>, ApiError> {
    let entries =
        std::fs::read_dir(&state.templates_dir).map_err(|e| ApiError::Internal(e.into()))?;

    let mut templates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ApiError::Internal(e.into()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.ends_with(".docx") {
            templates.push(variant_info(name));
        }
    }
    templates.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    let count = templates.len();
    Ok(Json(TemplateListResponse { templates, count }))
}

/// List the keys of every saved draft.
pub async fn list_drafts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DraftListResponse>, ApiError> {
    let mut drafts: Vec<String> = state
        .controller
        .drafts()
        .list_keys()?
        .into_iter()
        .map(|key| key.to_string())
        .collect();
    drafts.sort();

    let count = drafts.len();
    Ok(Json(DraftListResponse { drafts, count }))
}

/// Pre-fill form values from a saved draft. An absent draft yields the
/// template's empty defaults; a corrupt one is an error.
pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<PrefillQuery>,
) -> Result<Json<PrefillResponse>, ApiError> {
    let draft_key = DraftKey::from(key.clone());
    let values = state
        .controller
        .prefill(Some(&draft_key), &query.template)?;

    Ok(Json(PrefillResponse {
        key,
        template: query.template,
        values,
    }))
}

/// Run one submission.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitApiRequest>,
) -> Result<Json<SubmitApiResponse>, ApiError> {
    if req.template.is_empty() {
        return Err(ApiError::InvalidRequest("No template selected".to_string()));
    }

    tracing::info!("Submission for template {}", req.template);

    let outcome = state.controller.submit(SubmitRequest {
        selected_draft: req
            .draft_key
            .filter(|key| !key.is_empty())
            .map(DraftKey::from),
        template: req.template,
        fields: req.fields,
    })?;

    Ok(Json(SubmitApiResponse {
        missing_fields: outcome.missing_fields,
        draft_saved: outcome.draft_saved.map(|key| key.to_string()),
        draft_deleted: outcome.draft_deleted.map(|key| key.to_string()),
        generation: outcome.generation,
        download_available: outcome.output.is_some(),
    }))
}

/// Download the generated document for a member.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(member_name): Path<String>,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ApiError> {
    let path = state.controller.output_path(&member_name);
    let bytes =
        std::fs::read(&path).map_err(|_| ApiError::DocumentNotFound(member_name.clone()))?;

    Ok((
        StatusCode::OK,
        [
            (
                "Content-Type".to_string(),
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                    .to_string(),
            ),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename=\"transfer_{}.docx\"", member_name),
            ),
        ],
        bytes,
    ))
}
