use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Abstracts are cut to this length in recommendation payloads
pub const ABSTRACT_PREVIEW_CHARS: usize = 200;

/// Article as stored by the article service, read-only to this crate.
///
/// `authors_parsed` entries are `[last, first, middle]` triplets, middle may
/// be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub authors_parsed: Vec<[String; 3]>,
}

impl Article {
    /// Render `authors_parsed` as "First Middle Last, ..." for presentation.
    pub fn format_authors(&self) -> String {
        self.authors_parsed
            .iter()
            .map(|[last, first, middle]| {
                if middle.is_empty() {
                    format!("{} {}", first, last).trim().to_string()
                } else {
                    format!("{} {} {}", first, middle, last).trim().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Cut the abstract to `ABSTRACT_PREVIEW_CHARS` characters, appending an
    /// ellipsis when truncated. Char-based to stay on UTF-8 boundaries.
    pub fn with_preview_abstract(mut self) -> Self {
        if self.abstract_text.chars().count() > ABSTRACT_PREVIEW_CHARS {
            let cut: String = self.abstract_text.chars().take(ABSTRACT_PREVIEW_CHARS).collect();
            self.abstract_text = format!("{}...", cut);
        }
        self
    }
}

/// Raw entry emitted by the external relevance engine.
///
/// `raw_score` arrives in an unspecified scale (cosine-like [-1,1],
/// under-scaled fraction, or a plain percentage) and may be missing entirely;
/// normalization sorts that out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecommendation {
    #[serde(alias = "id")]
    pub article_id: String,
    #[serde(alias = "score", default)]
    pub raw_score: Option<f64>,
    #[serde(default)]
    pub method: Option<String>,
}

/// Interest profile snapshot, fetched once per request and never mutated here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInterestProfile {
    pub interests: HashSet<String>,
}

/// Final per-article output of the pipeline. Immutable once assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRecommendation {
    pub article: Article,
    /// Normalized satisfaction score in [0,100]
    pub score: u8,
    pub reason: String,
    pub method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationMetadata {
    pub interests_considered: Vec<String>,
    pub source_method: String,
}

/// Envelope returned to the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub success: bool,
    pub articles: Vec<ScoredRecommendation>,
    pub used_fallback: bool,
    pub metadata: RecommendationMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
