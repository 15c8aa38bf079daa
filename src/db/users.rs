/// User Repository
///
/// The pipeline reads a single snapshot of the user's interest profile per
/// request. A user that cannot be found (or an identity that is not a valid
/// UUID) yields an empty profile rather than an error, matching the
/// anonymous-degradation contract of identity resolution.
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::models::UserInterestProfile;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn interest_profile(&self, user_id: &str) -> Result<UserInterestProfile>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn interest_profile(&self, user_id: &str) -> Result<UserInterestProfile> {
        let uuid = match Uuid::parse_str(user_id) {
            Ok(uuid) => uuid,
            Err(_) => {
                debug!(user_id, "identity is not a valid user id, empty profile");
                return Ok(UserInterestProfile::default());
            }
        };

        let interests: Option<Vec<String>> =
            sqlx::query_scalar("SELECT interests FROM users WHERE id = $1")
                .bind(uuid)
                .fetch_optional(&self.pool)
                .await?;

        Ok(UserInterestProfile {
            interests: interests.unwrap_or_default().into_iter().collect(),
        })
    }
}
