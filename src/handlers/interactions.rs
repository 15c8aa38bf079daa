/// Interaction API Handler
///
/// Thin write-path hook: likes, favorites and reads recorded elsewhere call
/// this to flag interest profiles as stale. The rebuild itself happens on the
/// profile refresh worker; this endpoint only enqueues and acknowledges.
use actix_web::{post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::handlers::RecommendationHandlerState;
use crate::jobs::RefreshTrigger;
use crate::security::jwt;

#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    pub article_id: String,
    pub action: InteractionAction,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionAction {
    Like,
    Favorite,
    Read,
}

impl From<InteractionAction> for RefreshTrigger {
    fn from(action: InteractionAction) -> Self {
        match action {
            InteractionAction::Like => RefreshTrigger::Like,
            InteractionAction::Favorite => RefreshTrigger::Favorite,
            InteractionAction::Read => RefreshTrigger::Read,
        }
    }
}

#[derive(Serialize)]
struct InteractionAccepted {
    accepted: bool,
}

/// POST /api/v1/interactions
///
/// Requires an identified user; anonymous activity carries no profile to
/// refresh.
#[post("/api/v1/interactions")]
pub async fn record_interaction(
    req: HttpRequest,
    body: web::Json<InteractionRequest>,
    state: web::Data<RecommendationHandlerState>,
) -> Result<HttpResponse> {
    let user_id = jwt::resolve_identity(&req, &state.jwt_secret)
        .ok_or_else(|| AppError::Authentication("Missing or invalid credential".to_string()))?;

    debug!(
        user_id = %user_id,
        article_id = %body.article_id,
        action = ?body.action,
        "interaction recorded, scheduling profile refresh"
    );

    state.refresh_queue.enqueue(body.action.into());

    Ok(HttpResponse::Accepted().json(InteractionAccepted { accepted: true }))
}
