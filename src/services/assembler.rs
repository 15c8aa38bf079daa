//! Recommendation assembly
//!
//! Joins the engine's raw id/score pairs with full article records, attaches
//! normalized scores and reasons, and produces the final ordered list.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::reason::recommendation_reason;
use super::scoring::normalize_score;
use crate::models::{Article, RawRecommendation, ScoredRecommendation};

/// Method tag when the engine did not label its output
pub const DEFAULT_METHOD: &str = "content";

/// Assemble the final recommendation list.
///
/// - duplicates by article id keep the first occurrence
/// - ids unknown to the article store are dropped silently; the engine and
///   the store are eventually consistent
/// - descending by normalized score, stable on ties
/// - truncated to `limit`
pub fn assemble(
    raw_recommendations: Vec<RawRecommendation>,
    mut articles: HashMap<String, Article>,
    user_interests: &HashSet<String>,
    limit: usize,
) -> Vec<ScoredRecommendation> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut scored: Vec<ScoredRecommendation> = Vec::new();
    let mut dropped = 0usize;

    for raw in raw_recommendations {
        if !seen.insert(raw.article_id.clone()) {
            continue;
        }
        let Some(article) = articles.remove(&raw.article_id) else {
            dropped += 1;
            continue;
        };

        let score = normalize_score(raw.raw_score);
        let reason = recommendation_reason(&article.topics, user_interests, score);
        scored.push(ScoredRecommendation {
            article: article.with_preview_abstract(),
            score,
            reason,
            method: raw.method.unwrap_or_else(|| DEFAULT_METHOD.to_string()),
        });
    }

    if dropped > 0 {
        debug!(dropped, "engine entries without a stored article");
    }

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, score: f64) -> RawRecommendation {
        RawRecommendation {
            article_id: id.to_string(),
            raw_score: Some(score),
            method: None,
        }
    }

    fn article(id: &str, topic: &str) -> (String, Article) {
        (
            id.to_string(),
            Article {
                id: id.to_string(),
                title: format!("Article {}", id),
                abstract_text: "An abstract".to_string(),
                topics: vec![topic.to_string()],
                authors_parsed: vec![],
            },
        )
    }

    fn store(entries: &[(&str, &str)]) -> HashMap<String, Article> {
        entries.iter().map(|(id, topic)| article(id, topic)).collect()
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let articles = store(&[("a", "physics")]);
        let out = assemble(
            vec![raw("a", 0.5), raw("a", 0.9)],
            articles,
            &HashSet::new(),
            10,
        );
        assert_eq!(out.len(), 1);
        // First occurrence's score: ((0.5+1)/2)*65+30 = 78.75 -> 79
        assert_eq!(out[0].score, 79);
    }

    #[test]
    fn unresolvable_ids_are_dropped_silently() {
        let articles = store(&[("known", "physics")]);
        let out = assemble(
            vec![raw("ghost", 0.9), raw("known", 0.5)],
            articles,
            &HashSet::new(),
            10,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].article.id, "known");
    }

    #[test]
    fn output_is_sorted_descending_by_score() {
        let articles = store(&[("low", "a"), ("high", "b"), ("mid", "c")]);
        let out = assemble(
            vec![raw("low", 40.0), raw("high", 90.0), raw("mid", 70.0)],
            articles,
            &HashSet::new(),
            10,
        );
        let scores: Vec<u8> = out.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![90, 70, 40]);
    }

    #[test]
    fn ties_preserve_input_order() {
        let articles = store(&[("first", "a"), ("second", "b"), ("third", "c")]);
        let out = assemble(
            vec![raw("first", 70.0), raw("second", 70.0), raw("third", 70.0)],
            articles,
            &HashSet::new(),
            10,
        );
        let ids: Vec<&str> = out.iter().map(|r| r.article.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn output_truncates_to_limit() {
        let entries: Vec<(String, String)> = (0..20)
            .map(|i| (format!("a{}", i), "physics".to_string()))
            .collect();
        let articles: HashMap<String, Article> = entries
            .iter()
            .map(|(id, topic)| article(id, topic))
            .collect();
        let raws: Vec<RawRecommendation> =
            entries.iter().map(|(id, _)| raw(id, 0.5)).collect();

        let out = assemble(raws, articles, &HashSet::new(), 12);
        assert_eq!(out.len(), 12);
    }

    #[test]
    fn missing_score_defaults_and_reason_embeds_score() {
        let articles = store(&[("a", "physics")]);
        let out = assemble(
            vec![RawRecommendation {
                article_id: "a".to_string(),
                raw_score: None,
                method: Some("collaborative".to_string()),
            }],
            articles,
            &HashSet::new(),
            10,
        );
        assert_eq!(out[0].score, 75);
        assert!(out[0].reason.contains("75"));
        assert!(out[0].reason.contains("physics"));
        assert_eq!(out[0].method, "collaborative");
    }

    #[test]
    fn no_duplicate_ids_in_output() {
        let articles = store(&[("a", "x"), ("b", "y")]);
        let out = assemble(
            vec![raw("a", 0.9), raw("b", 0.1), raw("a", 0.2), raw("b", 0.3)],
            articles,
            &HashSet::new(),
            10,
        );
        let mut ids: Vec<&str> = out.iter().map(|r| r.article.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), out.len());
    }
}
