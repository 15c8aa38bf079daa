//! Score normalization
//!
//! Raw relevance signals arrive in inconsistent, undocumented scales
//! depending on which engine method produced them: cosine-similarity values
//! in [-1,1], under-scaled fractions, or plain percentages. This maps all of
//! them onto a single user-presentable 0-100 integer.
//!
//! The branch thresholds are deliberately kept as-is, overlaps included
//! (exactly 1.0 is a cosine signal, exactly 30.0 is a percentage); callers
//! and tests rely on the literal behavior.

/// Score used when the engine omitted a usable signal for an article
pub const DEFAULT_SCORE: u8 = 75;

/// Map an arbitrary raw relevance score onto [0,100].
///
/// - missing, NaN, infinite or below -1: `DEFAULT_SCORE`
/// - [-1,1]: linear map, -1 -> 30 and 1 -> 95
/// - below 30: under-scaled fraction, `max(30, round(raw * 100))`
/// - otherwise: already a percentage
pub fn normalize_score(raw: Option<f64>) -> u8 {
    let raw = match raw {
        Some(v) if v.is_finite() && v >= -1.0 => v,
        _ => return DEFAULT_SCORE,
    };

    let score = if raw <= 1.0 {
        ((raw + 1.0) / 2.0 * 65.0 + 30.0).round()
    } else if raw < 30.0 {
        (raw * 100.0).round().max(30.0)
    } else {
        raw.round()
    };

    score.clamp(0.0, 100.0) as u8
}
