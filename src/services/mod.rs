mod assembler;
mod fallback;
mod reason;
mod recommendation;
mod scoring;

pub use assembler::assemble;
pub use fallback::{sample_fallback, FALLBACK_METHOD, FALLBACK_REASON};
pub use reason::{recommendation_reason, FALLBACK_TOPIC};
pub use recommendation::RecommendationService;
pub use scoring::{normalize_score, DEFAULT_SCORE};
