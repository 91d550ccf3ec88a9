//! Predict handler: score one client and band the decision

use axum::{extract::State, Json};

use super::ClientData;
use crate::scoring::ScoreResult;
use crate::{AppResult, AppState};

/// Score a client feature map against the fitted model.
///
/// Reconciliation is total: missing schema features score as 0.0, unknown
/// keys are dropped, so any numeric map yields a valid score.
pub async fn predict(
    State(state): State<AppState>,
    Json(data): Json<ClientData>,
) -> AppResult<Json<ScoreResult>> {
    let vector = state.ctx.reconcile(&data.features)?;
    let result = state.ctx.score(&vector.view());

    tracing::debug!(
        score = result.score,
        decision = ?result.decision,
        "Scored client ({} of {} features supplied)",
        data.features.len(),
        state.ctx.feature_count(),
    );

    Ok(Json(result))
}
