#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::future::Future;

use crate::{
    archive::{self, IntakeFailure},
    backend::{BackendClient, ResponseOutcome},
    error::SubmitError,
    source::{SourceUnit, Upload},
    submission::{Manifest, RequestPayload, Submission},
};

/// Everything one user action works on, built once and never mutated
#[derive(Debug)]
pub struct Run {
    /// units in upload order
    units:      Vec<SourceUnit>,
    /// uploads that could not be expanded
    failures:   Vec<IntakeFailure>,
    /// manifest and payload derived from `units`
    submission: Submission,
}

impl Run {
    /// Expands and scans `uploads`. Never fails; uploads that cannot be read
    /// end up in [`Run::failures`].
    pub fn prepare<'a>(uploads: impl IntoIterator<Item = &'a Upload>) -> Self {
        let expansion = archive::expand_all(uploads);
        let submission = Submission::build(&expansion.units);

        tracing::info!(
            "Prepared {} source file(s), {} upload(s) skipped",
            expansion.units.len(),
            expansion.failures.len()
        );

        Self {
            units: expansion.units,
            failures: expansion.failures,
            submission,
        }
    }

    /// Units that made it through intake.
    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    /// Uploads that were skipped and why.
    pub fn failures(&self) -> &[IntakeFailure] {
        &self.failures
    }

    /// Classes and methods found per unit.
    pub fn manifest(&self) -> &Manifest {
        &self.submission.manifest
    }

    /// What [`Run::generate`] would send.
    pub fn payload(&self) -> &RequestPayload {
        &self.submission.payload
    }

    /// Sends the payload to `client`, unless there is nothing to send.
    pub async fn generate(&self, client: &BackendClient) -> Result<ResponseOutcome, SubmitError> {
        let payload = self.gated_payload()?;
        Ok(client.submit(payload).await)
    }

    /// Like [`Run::generate`], abandoning the request once `cancel` resolves.
    pub async fn generate_until<C>(
        &self,
        client: &BackendClient,
        cancel: C,
    ) -> Result<ResponseOutcome, SubmitError>
    where
        C: Future<Output = ()>,
    {
        let payload = self.gated_payload()?;
        Ok(client.submit_until(payload, cancel).await)
    }

    /// The payload, or an error if it is empty.
    fn gated_payload(&self) -> Result<&RequestPayload, SubmitError> {
        if self.submission.payload.is_empty() {
            return Err(SubmitError::NothingToSubmit);
        }
        Ok(&self.submission.payload)
    }
}
