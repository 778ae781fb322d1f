//! # testgen
//!
//! Client side of a JUnit test generator: takes Java sources (loose or zipped),
//! lists the classes and methods they declare, and forwards the sources to a
//! remote service that returns a bundle of generated tests.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Expanding uploads (loose files or zip archives) into source units
pub mod archive;
/// Talking to the test-generation service
pub mod backend;
/// Settings for the shell
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Error types at the intake and submission seams
pub mod error;
/// Pattern-based class and method discovery
pub mod extract;
/// One immutable context per user action
pub mod pipeline;
/// Uploads and source units
pub mod source;
/// Manifest and request payload construction
pub mod submission;

pub use archive::{Expansion, IntakeFailure, expand, expand_all};
pub use backend::{BackendClient, ResponseOutcome};
pub use config::Config;
pub use constants::{ARTIFACT_FILE_NAME, ARTIFACT_MIME};
pub use error::{IntakeError, SubmitError};
pub use extract::{EntityReport, extract};
pub use pipeline::Run;
pub use source::{SourceUnit, Upload};
pub use submission::{Manifest, PayloadFile, RequestPayload, Submission};
