mod subprocess;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::RawRecommendation;

pub use subprocess::SubprocessEngine;

/// Identity passed to the engine when no user is resolved
pub const ANONYMOUS_IDENTITY: &str = "anonymous";

/// Content domain tag the engine is invoked with
pub const ENGINE_DOMAIN: &str = "articles";

/// Opaque boundary to the external relevance engine.
///
/// The engine computes raw relevance signals between a user and the article
/// corpus; everything behind this trait is a black box to the pipeline. The
/// seam lets deployments swap the subprocess invocation for an in-process
/// model or an RPC call, and lets tests substitute canned output.
#[async_trait]
pub trait RelevanceEngine: Send + Sync {
    /// Compute up to `count` raw recommendations for `identity`
    /// (`ANONYMOUS_IDENTITY` when no user is resolved).
    async fn recommend(&self, identity: &str, count: usize) -> Result<Vec<RawRecommendation>>;

    /// Rebuild precomputed interest profiles, tagged with what triggered the
    /// rebuild. Global background work with no completion guarantee.
    async fn refresh_profiles(&self, trigger: &str) -> Result<()>;
}
