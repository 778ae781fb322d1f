#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use thiserror::Error;

#[derive(Debug, Error)]
/// Why a single upload could not be turned into source units
pub enum IntakeError {
    /// The upload looked like an archive but could not be opened or indexed
    #[error("could not read archive {upload}: {source}")]
    ArchiveRead {
        /// name of the offending upload
        upload: String,
        /// underlying zip error
        #[source]
        source: zip::result::ZipError,
    },
    /// An entry inside an otherwise valid archive could not be decompressed
    #[error("could not read {entry} from archive {upload}: {source}")]
    EntryRead {
        /// name of the archive upload
        upload: String,
        /// in-archive path of the entry
        entry:  String,
        /// underlying read error
        #[source]
        source: std::io::Error,
    },
    /// The upload carried no name to key its source unit by
    #[error("upload has an empty name")]
    EmptyName,
    /// Another upload already produced a unit with this name
    #[error("{name} was already submitted")]
    DuplicateName {
        /// the clashing unit name
        name: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Why a submission was not sent to the backend
pub enum SubmitError {
    /// No source units were collected, so there is nothing to generate tests
    /// for
    #[error("no Java sources to submit")]
    NothingToSubmit,
}
