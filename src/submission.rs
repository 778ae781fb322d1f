#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};

use crate::{extract::EntityReport, source::SourceUnit};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// Entity reports for every unit of a submission, in upload order. Only ever
/// displayed, never sent.
pub struct Manifest {
    /// one report per unit
    reports: Vec<EntityReport>,
}

impl Manifest {
    /// Scans each unit and collects the reports.
    pub fn build(units: &[SourceUnit]) -> Self {
        Self {
            reports: units.iter().map(EntityReport::of).collect(),
        }
    }

    /// Looks up the report for a unit by name.
    pub fn get(&self, name: &str) -> Option<&EntityReport> {
        self.reports.iter().find(|r| r.file == name)
    }

    /// All reports, in upload order.
    pub fn reports(&self) -> &[EntityReport] {
        &self.reports
    }

    /// Number of reports.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Whether no unit was scanned.
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One file as it goes over the wire
pub struct PayloadFile {
    /// unit name
    pub name:    String,
    /// raw source text
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Body of the test-generation request: raw sources only, in upload order
pub struct RequestPayload {
    /// files to generate tests for
    pub files: Vec<PayloadFile>,
}

impl RequestPayload {
    /// Copies every unit's name and content into a payload.
    pub fn from_units(units: &[SourceUnit]) -> Self {
        Self {
            files: units
                .iter()
                .map(|u| PayloadFile {
                    name:    u.name().to_string(),
                    content: u.content().to_string(),
                })
                .collect(),
        }
    }

    /// Whether there is nothing to send.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// The manifest and request payload built from one set of units
pub struct Submission {
    /// what was found in each unit
    pub manifest: Manifest,
    /// what will be sent
    pub payload:  RequestPayload,
}

impl Submission {
    /// Builds the manifest and payload from the full current set of units.
    pub fn build(units: &[SourceUnit]) -> Self {
        Self {
            manifest: Manifest::build(units),
            payload:  RequestPayload::from_units(units),
        }
    }
}
