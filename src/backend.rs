#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{error::Error as StdError, fmt, future::Future, time::Duration};

use anyhow::{Context, Result};
use bon::bon;
use itertools::Itertools;
use reqwest::Client;

use crate::{constants::DEFAULT_BACKEND_TIMEOUT, submission::RequestPayload};

#[derive(Debug, Clone, PartialEq, Eq)]
/// What came of one submission attempt
pub enum ResponseOutcome {
    /// The backend accepted the sources and returned a bundle of tests
    Success {
        /// opaque response body, offered for download as is
        artifact: Vec<u8>,
    },
    /// The backend answered with a non-2xx status
    Failure {
        /// HTTP status code
        status_code: u16,
        /// response body as text
        message:     String,
    },
    /// The backend could not be reached or the exchange broke off
    TransportError {
        /// what went wrong, readable by a user
        message: String,
    },
}

impl ResponseOutcome {
    /// Sorts a completed HTTP exchange into success or failure.
    pub fn classify(status_code: u16, body: Vec<u8>) -> Self {
        if (200..300).contains(&status_code) {
            Self::Success { artifact: body }
        } else {
            Self::Failure {
                status_code,
                message: String::from_utf8_lossy(&body).into_owned(),
            }
        }
    }

    /// Wraps a transport fault, keeping the whole cause chain in the message.
    fn transport(err: &reqwest::Error) -> Self {
        let message = std::iter::successors(Some(err as &dyn StdError), |&e| e.source())
            .map(ToString::to_string)
            .join(": ");
        Self::TransportError { message }
    }

    /// Whether the backend produced an artifact.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The artifact bytes, if any.
    pub fn artifact(&self) -> Option<&[u8]> {
        match self {
            Self::Success { artifact } => Some(artifact.as_slice()),
            Self::Failure { .. } | Self::TransportError { .. } => None,
        }
    }
}

impl fmt::Display for ResponseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { artifact } => {
                write!(f, "Tests generated successfully ({} bytes).", artifact.len())
            }
            Self::Failure {
                status_code,
                message,
            } => write!(f, "Server rejected the request ({status_code}): {message}"),
            Self::TransportError { message } => {
                write!(f, "Could not reach the server: {message}")
            }
        }
    }
}

/// Talks to the remote test-generation service
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// endpoint the payload is posted to, passed through unvalidated
    endpoint: String,
    /// upper bound on one round trip
    timeout:  Duration,
    /// shared connection pool
    http:     Client,
}

#[bon]
impl BackendClient {
    /// Creates a client for `endpoint`.
    ///
    /// * `timeout`: bound on one round trip, defaults to
    ///   [`DEFAULT_BACKEND_TIMEOUT`]
    /// * `http`: an existing reqwest client to reuse; a fresh one is built
    ///   otherwise
    #[builder(finish_fn = build)]
    pub fn new(
        #[builder(start_fn, into)] endpoint: String,
        timeout: Option<Duration>,
        http: Option<Client>,
    ) -> Result<Self> {
        let http = match http {
            Some(client) => client,
            None => Client::builder()
                .build()
                .context("Failed to construct HTTP client for the test-generation backend")?,
        };

        Ok(Self {
            endpoint,
            timeout: timeout.unwrap_or(DEFAULT_BACKEND_TIMEOUT),
            http,
        })
    }

    /// The endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Posts `payload` once and classifies whatever comes back. Never fails;
    /// every fault ends up in the returned outcome.
    pub async fn submit(&self, payload: &RequestPayload) -> ResponseOutcome {
        tracing::info!("Submitting {} file(s) to {}", payload.files.len(), self.endpoint);

        let response = match self
            .http
            .post(self.endpoint.as_str())
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return ResponseOutcome::transport(&err),
        };

        let status = response.status();
        let outcome = match response.bytes().await {
            Ok(body) => ResponseOutcome::classify(status.as_u16(), body.to_vec()),
            Err(err) => ResponseOutcome::transport(&err),
        };

        match &outcome {
            ResponseOutcome::Success { artifact } => {
                tracing::info!("Backend returned {} byte(s)", artifact.len())
            }
            other => tracing::warn!("{other}"),
        }
        outcome
    }

    /// Like [`BackendClient::submit`], but gives up as soon as `cancel`
    /// resolves.
    pub async fn submit_until<C>(&self, payload: &RequestPayload, cancel: C) -> ResponseOutcome
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            outcome = self.submit(payload) => outcome,
            () = cancel => {
                tracing::warn!("Submission to {} cancelled", self.endpoint);
                ResponseOutcome::TransportError {
                    message: "request cancelled".to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_hundreds_are_success() {
        let outcome = ResponseOutcome::classify(200, b"PK\x05\x06".to_vec());
        assert_eq!(
            outcome,
            ResponseOutcome::Success {
                artifact: b"PK\x05\x06".to_vec(),
            }
        );
        assert!(ResponseOutcome::classify(201, Vec::new()).is_success());
    }

    #[test]
    fn anything_else_is_failure() {
        assert_eq!(
            ResponseOutcome::classify(500, b"boom".to_vec()),
            ResponseOutcome::Failure {
                status_code: 500,
                message:     "boom".to_string(),
            }
        );
        assert!(!ResponseOutcome::classify(302, Vec::new()).is_success());
        assert!(!ResponseOutcome::classify(404, Vec::new()).is_success());
    }

    #[test]
    fn messages_tell_rejection_from_unreachable() {
        let rejected = ResponseOutcome::classify(422, b"bad input".to_vec()).to_string();
        let unreachable = ResponseOutcome::TransportError {
            message: "connection refused".to_string(),
        }
        .to_string();

        assert!(rejected.starts_with("Server rejected the request (422)"));
        assert!(unreachable.starts_with("Could not reach the server"));
    }

    #[test]
    fn builder_applies_default_timeout() {
        let client = BackendClient::builder("http://localhost:8000/generate-tests")
            .build()
            .expect("client builds");
        assert_eq!(client.timeout(), DEFAULT_BACKEND_TIMEOUT);
        assert_eq!(client.endpoint(), "http://localhost:8000/generate-tests");
    }
}
