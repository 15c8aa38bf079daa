use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Engine output invalid: {0}")]
    EngineOutputInvalid(String),

    #[error("Engine returned no usable recommendations")]
    EmptyRecommendationSet,

    #[error("Article lookup failed: {0}")]
    ArticleLookup(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for failures the orchestrator recovers from by switching to the
    /// fallback sampler instead of surfacing an error to the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::EngineUnavailable(_)
                | AppError::EngineOutputInvalid(_)
                | AppError::EmptyRecommendationSet
                | AppError::ArticleLookup(_)
                | AppError::Database(_)
        )
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let code = self.status_code();
        let message = match self {
            AppError::Authentication(msg) | AppError::BadRequest(msg) => msg.clone(),
            // Pipeline internals never leak to the client
            _ => "Unable to generate recommendations".to_string(),
        };

        HttpResponse::build(code).json(ErrorResponse {
            success: false,
            error: message,
            code: code.as_u16(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::EngineOutputInvalid(err.to_string())
    }
}
