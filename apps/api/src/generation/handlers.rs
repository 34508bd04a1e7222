//! Axum route handlers for excuse generation.

use axum::{extract::State, Json};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::excuse::draft_excuse;
use crate::generation::normalizer::EmailDraft;
use crate::models::excuse::{ExcuseRequest, ExcuseResponse};
use crate::state::AppState;

/// POST /api/generate-excuse
///
/// Inference failures (missing token, upstream status, timeout, transport)
/// are HTTP errors. A reply that arrives but can't be made into a draft is
/// reported in a 200 envelope with `success: false`.
pub async fn handle_generate_excuse(
    State(state): State<AppState>,
    Json(request): Json<ExcuseRequest>,
) -> Result<Json<ExcuseResponse>, AppError> {
    request.validate()?;

    info!(
        "Generating excuse for: {} - {}",
        request.category, request.tone
    );

    let fields = draft_excuse(&request, &state.llm).await?;

    let response = match EmailDraft::from_fields(fields, &request.category) {
        Ok(draft) => ExcuseResponse::drafted(draft.subject, draft.body),
        Err(e) => {
            warn!("Error generating excuse: {e}");
            ExcuseResponse::failed(e.to_string())
        }
    };

    Ok(Json(response))
}
