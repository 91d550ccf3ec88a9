//! Explain handler: local feature attribution for one client

use axum::{extract::State, Json};
use serde::Serialize;

use super::ClientData;
use crate::scoring::attribution::{Contribution, TOP_K};
use crate::{AppError, AppResult, AppState};

#[derive(Serialize)]
pub struct ExplainResponse {
    pub top_contributions: Vec<Contribution>,
}

/// Explain one prediction: additive contributions over the full schema,
/// ranked by absolute impact, truncated to the top 10.
///
/// The decomposition is CPU-bound, so it runs on the blocking pool and
/// does not stall request intake. A failure here is request-scoped; the
/// predict route stays available.
pub async fn explain(
    State(state): State<AppState>,
    Json(data): Json<ClientData>,
) -> AppResult<Json<ExplainResponse>> {
    let vector = state.ctx.reconcile(&data.features)?;
    tracing::debug!(
        "Explaining client: {} features reconciled",
        vector.len()
    );

    let ctx = state.ctx.clone();
    let top_contributions = tokio::task::spawn_blocking(move || {
        ctx.explain_vector(&vector.view(), TOP_K)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("attribution task panicked: {e}")))??;

    if let Some(strongest) = top_contributions.first() {
        tracing::debug!(
            feature = %strongest.feature,
            impact = strongest.impact,
            "Top contribution"
        );
    }

    Ok(Json(ExplainResponse { top_contributions }))
}
