/// Recommendation API Handlers
///
/// HTTP surface of the recommendation pipeline
use actix_web::{get, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::jobs::ProfileRefreshQueue;
use crate::security::jwt;
use crate::services::RecommendationService;

/// Query parameters for GET /recommendations
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Number of recommendations to return (default: 12, max: 100)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    12
}

/// Handler state for the recommendation endpoints
pub struct RecommendationHandlerState {
    pub service: Arc<RecommendationService>,
    pub refresh_queue: ProfileRefreshQueue,
    pub jwt_secret: String,
}

/// GET /api/v1/recommendations
///
/// Works with or without a credential; an invalid token means anonymous
/// recommendations, never an error.
#[get("/api/v1/recommendations")]
pub async fn get_recommendations(
    req: HttpRequest,
    query: web::Query<RecommendationQuery>,
    state: web::Data<RecommendationHandlerState>,
) -> Result<HttpResponse> {
    let identity = jwt::resolve_identity(&req, &state.jwt_secret);
    let limit = query.limit.clamp(1, 100);

    debug!(
        identity = identity.as_deref().unwrap_or("anonymous"),
        limit, "recommendation request"
    );

    let response = state
        .service
        .get_recommendations(identity.as_deref(), limit)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_is_twelve() {
        assert_eq!(default_limit(), 12);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(200usize.clamp(1, 100), 100);
        assert_eq!(0usize.clamp(1, 100), 1);
        assert_eq!(12usize.clamp(1, 100), 12);
    }
}
