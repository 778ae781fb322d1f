#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use bon::Builder;

use crate::{
    backend::BackendClient,
    constants::{
        ARTIFACT_FILE_NAME, BACKEND_TIMEOUT_ENV, BACKEND_URL_ENV, DEFAULT_BACKEND_TIMEOUT,
        DEFAULT_BACKEND_URL,
    },
};

/// Settings the shell hands to the pipeline. The library itself never reads
/// the environment; only [`Config::from_env`] does.
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into), on(PathBuf, into))]
pub struct Config {
    /// Endpoint of the test-generation service.
    #[builder(default = DEFAULT_BACKEND_URL.to_string())]
    backend_url: String,
    /// Bound on one backend round trip.
    #[builder(default = DEFAULT_BACKEND_TIMEOUT)]
    timeout:     Duration,
    /// Where a generated artifact is written.
    #[builder(default = PathBuf::from(ARTIFACT_FILE_NAME))]
    output:      PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Config {
    /// Reads the backend endpoint and timeout from the environment, falling
    /// back to the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let backend_url = std::env::var(BACKEND_URL_ENV)
            .map(|value| value.trim().to_owned())
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        Self::builder()
            .backend_url(backend_url)
            .timeout(read_timeout_secs(BACKEND_TIMEOUT_ENV, DEFAULT_BACKEND_TIMEOUT))
            .build()
    }

    /// Returns a copy with the given overrides applied.
    pub fn with_overrides(
        mut self,
        backend_url: Option<String>,
        timeout: Option<Duration>,
        output: Option<PathBuf>,
    ) -> Self {
        if let Some(url) = backend_url {
            self.backend_url = url;
        }
        if let Some(timeout) = timeout {
            self.timeout = timeout;
        }
        if let Some(output) = output {
            self.output = output;
        }
        self
    }

    /// Endpoint of the test-generation service.
    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// Bound on one backend round trip.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Where a generated artifact is written.
    pub fn output(&self) -> &std::path::Path {
        self.output.as_path()
    }

    /// Builds a backend client from these settings.
    pub fn client(&self) -> Result<BackendClient> {
        BackendClient::builder(self.backend_url.as_str())
            .timeout(self.timeout)
            .build()
    }
}

/// Parses an environment variable into a `Duration`, falling back to
/// `default` when parsing fails or the variable is missing.
fn read_timeout_secs(env: &str, default: Duration) -> Duration {
    std::env::var(env)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}
