mod interactions;
mod recommendations;

pub use interactions::record_interaction;
pub use recommendations::{get_recommendations, RecommendationHandlerState};
