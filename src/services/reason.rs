//! Recommendation reason generation
//!
//! Derives the human-readable justification shown next to each recommended
//! article. Pure and deterministic: a score tier plus an
//! interest-intersection check select one of four templates. The wording is
//! a presentation concern and may be swapped wholesale; the tier boundaries
//! (80, 60) and the interest check inside the top tier are the contract.

use std::collections::HashSet;

/// Label used when an article carries no topic classification
pub const FALLBACK_TOPIC: &str = "general science";

pub fn recommendation_reason(
    topics: &[String],
    user_interests: &HashSet<String>,
    score: u8,
) -> String {
    let main_topic = topics
        .first()
        .map(String::as_str)
        .unwrap_or(FALLBACK_TOPIC);

    if score >= 80 {
        if topics.iter().any(|t| user_interests.contains(t)) {
            format!("Matches your interest in {} ({}%)", main_topic, score)
        } else {
            format!("Very popular in {} ({}%)", main_topic, score)
        }
    } else if score >= 60 {
        format!("Potentially interesting: {} ({}%)", main_topic, score)
    } else {
        format!("Discover something new: {} ({}%)", main_topic, score)
    }
}
