//! Recommendation orchestrator
//!
//! Drives one recommendation request end to end through three terminal
//! paths: personalized success, fallback on any pipeline failure, and hard
//! failure when the fallback itself cannot reach the article store.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::assembler::{assemble, DEFAULT_METHOD};
use super::fallback::{sample_fallback, FALLBACK_METHOD};
use crate::db::{ArticleStore, UserStore};
use crate::engine::{RelevanceEngine, ANONYMOUS_IDENTITY};
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::{
    RecommendationMetadata, RecommendationResponse, ScoredRecommendation, UserInterestProfile,
};

pub struct RecommendationService {
    engine: Arc<dyn RelevanceEngine>,
    articles: Arc<dyn ArticleStore>,
    users: Arc<dyn UserStore>,
}

impl RecommendationService {
    pub fn new(
        engine: Arc<dyn RelevanceEngine>,
        articles: Arc<dyn ArticleStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            engine,
            articles,
            users,
        }
    }

    /// Produce a recommendation list for an optionally identified user.
    ///
    /// Never errors for pipeline failures; those switch to the fallback
    /// sample. An error return means the fallback failed too and the caller
    /// should surface a hard failure.
    pub async fn get_recommendations(
        &self,
        identity: Option<&str>,
        limit: usize,
    ) -> Result<RecommendationResponse> {
        let interests = self.load_interests(identity).await;

        match self.personalized(identity, &interests, limit).await {
            Ok((articles, source_method)) => {
                metrics::record_request_outcome("personalized");
                info!(
                    count = articles.len(),
                    source_method, "personalized recommendations served"
                );
                Ok(RecommendationResponse {
                    success: true,
                    articles,
                    used_fallback: false,
                    metadata: RecommendationMetadata {
                        interests_considered: sorted(&interests),
                        source_method,
                    },
                    error: None,
                })
            }
            Err(primary) if primary.is_recoverable() => {
                warn!(error = %primary, "primary pipeline failed, falling back to random sample");
                match sample_fallback(self.articles.as_ref(), limit).await {
                    Ok(articles) => {
                        metrics::record_request_outcome("fallback");
                        Ok(RecommendationResponse {
                            success: true,
                            articles,
                            used_fallback: true,
                            metadata: RecommendationMetadata {
                                interests_considered: sorted(&interests),
                                source_method: FALLBACK_METHOD.to_string(),
                            },
                            error: Some(primary.to_string()),
                        })
                    }
                    Err(fallback_err) => {
                        metrics::record_request_outcome("failed");
                        error!(
                            primary = %primary,
                            fallback = %fallback_err,
                            "fallback sampling failed, hard failure"
                        );
                        Err(AppError::ServiceUnavailable(
                            "recommendations unavailable".to_string(),
                        ))
                    }
                }
            }
            Err(other) => {
                metrics::record_request_outcome("failed");
                Err(other)
            }
        }
    }

    /// Interest profile snapshot. Anonymous requests and load failures both
    /// yield an empty set; a missing profile is not a pipeline failure.
    async fn load_interests(&self, identity: Option<&str>) -> UserInterestProfile {
        let Some(user_id) = identity else {
            return UserInterestProfile::default();
        };
        match self.users.interest_profile(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(user_id, error = %e, "interest profile load failed, using empty profile");
                UserInterestProfile::default()
            }
        }
    }

    async fn personalized(
        &self,
        identity: Option<&str>,
        interests: &UserInterestProfile,
        limit: usize,
    ) -> Result<(Vec<ScoredRecommendation>, String)> {
        let engine_identity = identity.unwrap_or(ANONYMOUS_IDENTITY);

        let started = Instant::now();
        let raw = self.engine.recommend(engine_identity, limit).await;
        metrics::observe_engine_call(started.elapsed(), raw.is_ok());
        let raw = raw?;

        if raw.is_empty() {
            return Err(AppError::EmptyRecommendationSet);
        }

        let source_method = raw
            .iter()
            .find_map(|r| r.method.clone())
            .unwrap_or_else(|| DEFAULT_METHOD.to_string());

        // One batch lookup keyed by the deduplicated id set
        let mut ids: Vec<String> = Vec::new();
        for rec in &raw {
            if !ids.contains(&rec.article_id) {
                ids.push(rec.article_id.clone());
            }
        }
        debug!(raw = raw.len(), unique = ids.len(), "engine output received");

        let articles = self.articles.find_many_by_ids(&ids).await?;
        let assembled = assemble(raw, articles, &interests.interests, limit);

        if assembled.is_empty() {
            // Everything the engine returned was unknown to the store
            return Err(AppError::EmptyRecommendationSet);
        }

        Ok((assembled, source_method))
    }
}

fn sorted(profile: &UserInterestProfile) -> Vec<String> {
    let mut interests: Vec<String> = profile.interests.iter().cloned().collect();
    interests.sort();
    interests
}
