use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub engine: EngineConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub jobs: JobsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// External relevance engine invocation settings.
///
/// The engine is an opaque process (`<command> <script> <identity> <domain>
/// <count>`) that prints a JSON envelope on stdout. A call that exceeds
/// `timeout_secs` is treated as an engine failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub command: String,
    pub script_path: String,
    pub profile_script_path: String,
    #[serde(default = "default_engine_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    #[serde(default = "default_refresh_queue_size")]
    pub profile_refresh_queue_size: usize,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            profile_refresh_queue_size: default_refresh_queue_size(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                port: std::env::var("APP_PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
                log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")?,
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
            },
            engine: EngineConfig {
                command: std::env::var("ENGINE_COMMAND")
                    .unwrap_or_else(|_| "python3".to_string()),
                script_path: std::env::var("ENGINE_SCRIPT_PATH")
                    .unwrap_or_else(|_| "./scripts/recommendation.py".to_string()),
                profile_script_path: std::env::var("ENGINE_PROFILE_SCRIPT_PATH")
                    .unwrap_or_else(|_| "./scripts/user_profiles.py".to_string()),
                timeout_secs: std::env::var("ENGINE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(default_engine_timeout_secs),
            },
            auth: AuthConfig {
                jwt_secret: std::env::var("JWT_SECRET")?,
            },
            jobs: JobsConfig {
                profile_refresh_queue_size: std::env::var("PROFILE_REFRESH_QUEUE_SIZE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(default_refresh_queue_size),
            },
        })
    }
}

fn default_engine_timeout_secs() -> u64 {
    10
}

fn default_refresh_queue_size() -> usize {
    256
}
