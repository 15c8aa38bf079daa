//! Fallback sampling
//!
//! Degraded recommendation path used when the personalized pipeline fails at
//! any stage: an arbitrary sample from the article store, no personalization.
//! Scores are drawn uniformly from [50,90) so the list still renders like a
//! normal recommendation set.

use rand::Rng;
use tracing::debug;

use crate::db::ArticleStore;
use crate::error::Result;
use crate::models::ScoredRecommendation;

pub const FALLBACK_REASON: &str = "Random selection";
pub const FALLBACK_METHOD: &str = "random";

pub async fn sample_fallback(
    store: &dyn ArticleStore,
    limit: usize,
) -> Result<Vec<ScoredRecommendation>> {
    let articles = store.sample_random(limit).await?;
    debug!(sampled = articles.len(), limit, "fallback sample");

    let mut rng = rand::thread_rng();
    Ok(articles
        .into_iter()
        .map(|article| ScoredRecommendation {
            article: article.with_preview_abstract(),
            score: rng.gen_range(50..90),
            reason: FALLBACK_REASON.to_string(),
            method: FALLBACK_METHOD.to_string(),
        })
        .collect())
}
