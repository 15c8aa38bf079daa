//! Subprocess relevance engine
//!
//! Invokes the engine as a child process:
//! `<command> <script> <identity> <domain> <count>` for recommendations and
//! `<command> <profile_script> --trigger <tag>` for profile rebuilds.
//!
//! The engine prints a JSON envelope on stdout and logs on stderr. A non-zero
//! exit, a timeout, or stdout that fails to parse are all engine failures;
//! the orchestrator decides what to do about them.

use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::{RelevanceEngine, ENGINE_DOMAIN};
use crate::config::EngineConfig;
use crate::error::{AppError, Result};
use crate::models::RawRecommendation;

/// Success envelope printed by the engine on stdout
#[derive(Debug, Deserialize)]
struct EngineEnvelope {
    success: bool,
    #[serde(default)]
    recommendations: Vec<RawRecommendation>,
    #[serde(default)]
    error: Option<String>,
}

pub struct SubprocessEngine {
    config: EngineConfig,
}

impl SubprocessEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    async fn run(&self, args: &[&str], deadline: Duration) -> Result<Vec<u8>> {
        let mut command = Command::new(&self.config.command);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Abandoned invocations must not leave orphaned children behind
            .kill_on_drop(true);

        debug!(command = %self.config.command, ?args, "invoking relevance engine");

        let output = timeout(deadline, command.output())
            .await
            .map_err(|_| {
                AppError::EngineUnavailable(format!(
                    "engine timed out after {}s",
                    deadline.as_secs()
                ))
            })?
            .map_err(|e| AppError::EngineUnavailable(e.to_string()))?;

        if !output.stderr.is_empty() {
            // The engine logs diagnostics on stderr even on success
            debug!(
                stderr = %String::from_utf8_lossy(&output.stderr),
                "engine stderr"
            );
        }

        if !output.status.success() {
            return Err(AppError::EngineUnavailable(format!(
                "engine exited with {}",
                output.status
            )));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl RelevanceEngine for SubprocessEngine {
    async fn recommend(&self, identity: &str, count: usize) -> Result<Vec<RawRecommendation>> {
        let count_arg = count.to_string();
        let stdout = self
            .run(
                &[
                    self.config.script_path.as_str(),
                    identity,
                    ENGINE_DOMAIN,
                    count_arg.as_str(),
                ],
                Duration::from_secs(self.config.timeout_secs),
            )
            .await?;

        let envelope: EngineEnvelope = serde_json::from_slice(&stdout)
            .map_err(|e| AppError::EngineOutputInvalid(e.to_string()))?;

        if !envelope.success {
            return Err(AppError::EngineOutputInvalid(
                envelope
                    .error
                    .unwrap_or_else(|| "engine reported failure".to_string()),
            ));
        }

        Ok(envelope.recommendations)
    }

    async fn refresh_profiles(&self, trigger: &str) -> Result<()> {
        // Profile rebuilds scan the whole corpus; give them a wider deadline
        let deadline = Duration::from_secs(self.config.timeout_secs * 6);
        let stdout = self
            .run(
                &[
                    self.config.profile_script_path.as_str(),
                    "--trigger",
                    trigger,
                ],
                deadline,
            )
            .await?;

        if !stdout.is_empty() {
            warn!(
                stdout = %String::from_utf8_lossy(&stdout),
                "profile rebuild output"
            );
        }
        Ok(())
    }
}
