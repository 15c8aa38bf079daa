pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod metrics;
pub mod models;
pub mod security;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

// Re-export the recommendation pipeline components
pub use services::{
    assemble, normalize_score, recommendation_reason, sample_fallback, RecommendationService,
    DEFAULT_SCORE,
};
