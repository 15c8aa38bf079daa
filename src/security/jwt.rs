//! Optional identity resolution
//!
//! Recommendations are available to everyone; a credential only personalizes
//! them. Resolution therefore never fails: a missing, malformed or expired
//! token degrades to anonymous instead of producing an error.

use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub exp: i64,
}

/// Pull a bearer token from the Authorization header or the session cookie.
fn extract_token(req: &HttpRequest) -> Option<String> {
    if let Some(header) = req.headers().get("Authorization") {
        if let Ok(value) = header.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }
    req.cookie(TOKEN_COOKIE).map(|c| c.value().to_string())
}

/// Resolve the requesting user, or `None` for anonymous.
pub fn resolve_identity(req: &HttpRequest, secret: &str) -> Option<String> {
    let token = extract_token(req)?;
    verify_token(&token, secret)
}

/// Validate a token and return its user id. Any failure means anonymous.
pub fn verify_token(token: &str, secret: &str) -> Option<String> {
    let validation = Validation::new(Algorithm::HS256);
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Some(data.claims.user_id),
        Err(e) => {
            debug!(error = %e, "invalid token, serving anonymous recommendations");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn issue_token(user_id: &str, ttl: Duration) -> String {
        let claims = Claims {
            user_id: user_id.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_resolves_user() {
        let token = issue_token("user-42", Duration::hours(1));
        assert_eq!(verify_token(&token, SECRET), Some("user-42".to_string()));
    }

    #[test]
    fn expired_token_degrades_to_anonymous() {
        let token = issue_token("user-42", Duration::hours(-1));
        assert_eq!(verify_token(&token, SECRET), None);
    }

    #[test]
    fn garbage_token_degrades_to_anonymous() {
        assert_eq!(verify_token("not.a.jwt", SECRET), None);
    }

    #[test]
    fn wrong_secret_degrades_to_anonymous() {
        let token = issue_token("user-42", Duration::hours(1));
        assert_eq!(verify_token(&token, "other-secret"), None);
    }
}
