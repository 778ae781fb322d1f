#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    collections::HashSet,
    io::{Cursor, Read},
};

use crate::{
    constants::{ARCHIVE_SUFFIX, SOURCE_SUFFIX},
    error::IntakeError,
    source::{SourceUnit, Upload},
};

/// Whether an upload name denotes a zip archive.
pub fn is_archive(name: &str) -> bool {
    name.ends_with(ARCHIVE_SUFFIX)
}

/// Whether an archive entry name denotes a Java source file.
pub fn is_source(name: &str) -> bool {
    name.ends_with(SOURCE_SUFFIX)
}

/// Largest buffer reserved up front for one entry. The declared size comes
/// from the archive itself, so it only serves as a hint.
const READ_HINT_CAP: usize = 1 << 20;

/// Initial buffer size for an entry declaring `declared` uncompressed bytes.
fn read_hint(declared: u64) -> usize {
    usize::try_from(declared).map_or(READ_HINT_CAP, |size| size.min(READ_HINT_CAP))
}

/// An upload that could not be expanded, kept so the shell can report it
#[derive(Debug)]
pub struct IntakeFailure {
    /// name of the upload that failed
    pub upload: String,
    /// what went wrong
    pub error:  IntakeError,
}

/// Everything a batch of uploads expanded into
#[derive(Debug, Default)]
pub struct Expansion {
    /// source units in upload order, archive entries in archive order
    pub units:    Vec<SourceUnit>,
    /// uploads (or units) that were skipped, in the order they were seen
    pub failures: Vec<IntakeFailure>,
}

/// Turns one upload into source units.
///
/// Archives yield one unit per `.java` entry, keyed by the in-archive path.
/// Anything else is decoded as a single unit keyed by the upload name. A
/// corrupt archive fails the whole upload.
pub fn expand(upload: &Upload) -> Result<Vec<SourceUnit>, IntakeError> {
    if upload.name().is_empty() {
        return Err(IntakeError::EmptyName);
    }

    if !is_archive(upload.name()) {
        return Ok(vec![SourceUnit::decode(upload.name(), upload.bytes())?]);
    }

    let mut archive = zip::ZipArchive::new(Cursor::new(upload.bytes())).map_err(|source| {
        IntakeError::ArchiveRead {
            upload: upload.name().to_string(),
            source,
        }
    })?;

    let mut units = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|source| IntakeError::ArchiveRead {
                upload: upload.name().to_string(),
                source,
            })?;

        if entry.is_dir() || !is_source(entry.name()) {
            continue;
        }

        let entry_name = entry.name().to_string();
        let mut bytes = Vec::with_capacity(read_hint(entry.size()));
        entry
            .read_to_end(&mut bytes)
            .map_err(|source| IntakeError::EntryRead {
                upload: upload.name().to_string(),
                entry: entry_name.clone(),
                source,
            })?;

        units.push(SourceUnit::decode(entry_name, &bytes)?);
    }

    tracing::debug!("{}: expanded into {} source file(s)", upload.name(), units.len());
    Ok(units)
}

/// Expands every upload in order, collecting failures instead of stopping at
/// the first one. Units whose name was already produced are skipped.
pub fn expand_all<'a>(uploads: impl IntoIterator<Item = &'a Upload>) -> Expansion {
    let mut expansion = Expansion::default();
    let mut seen = HashSet::new();

    for upload in uploads {
        match expand(upload) {
            Ok(units) => {
                for unit in units {
                    if seen.insert(unit.name().to_string()) {
                        expansion.units.push(unit);
                    } else {
                        tracing::warn!("{}: skipping duplicate {}", upload.name(), unit.name());
                        expansion.failures.push(IntakeFailure {
                            upload: upload.name().to_string(),
                            error:  IntakeError::DuplicateName {
                                name: unit.name().to_string(),
                            },
                        });
                    }
                }
            }
            Err(error) => {
                tracing::warn!("{}: {error}", upload.name());
                expansion.failures.push(IntakeFailure {
                    upload: upload.name().to_string(),
                    error,
                });
            }
        }
    }

    expansion
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;

    use super::*;

    fn zip_of(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in entries {
            if name.ends_with('/') {
                writer
                    .add_directory(*name, SimpleFileOptions::default())
                    .expect("add directory");
            } else {
                writer
                    .start_file(*name, SimpleFileOptions::default())
                    .expect("start entry");
                writer.write_all(bytes).expect("write entry");
            }
        }
        writer.finish().expect("finish zip").into_inner()
    }

    #[test]
    fn archive_keeps_only_java_entries() {
        let bytes = zip_of(&[
            ("A.java", b"class A {}"),
            ("B.java", b"class B {}"),
            ("notes.txt", b"class NotJava {}"),
        ]);
        let units = expand(&Upload::new("bundle.zip", bytes)).expect("valid archive");

        let names: Vec<_> = units.iter().map(SourceUnit::name).collect();
        assert_eq!(names, ["A.java", "B.java"]);
        assert_eq!(units[1].content(), "class B {}");
    }

    #[test]
    fn archive_units_use_in_archive_paths() {
        let bytes = zip_of(&[
            ("src/", b""),
            ("src/demo/", b""),
            ("src/demo/Main.java", b"class Main {}"),
        ]);
        let units = expand(&Upload::new("project.zip", bytes)).expect("valid archive");

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].name(), "src/demo/Main.java");
    }

    #[test]
    fn declared_entry_size_is_only_a_hint() {
        assert_eq!(read_hint(0), 0);
        assert_eq!(read_hint(4096), 4096);
        assert_eq!(read_hint(0xFFFF_FFF0), READ_HINT_CAP);
        assert_eq!(read_hint(u64::MAX), READ_HINT_CAP);
    }

    #[test]
    fn plain_upload_is_one_unit() {
        let units = expand(&Upload::new("Foo.java", "class Foo {}")).expect("plain upload");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].name(), "Foo.java");
        assert_eq!(units[0].content(), "class Foo {}");
    }

    #[test]
    fn corrupt_archive_is_reported() {
        let err = expand(&Upload::new("broken.zip", b"PK\x03\x04 definitely not a zip".to_vec()))
            .unwrap_err();
        assert!(matches!(err, IntakeError::ArchiveRead { ref upload, .. } if upload == "broken.zip"));
    }

    #[test]
    fn one_bad_upload_does_not_sink_the_batch() {
        let uploads = [
            Upload::new("First.java", "class First {}"),
            Upload::new("broken.zip", b"garbage".to_vec()),
            Upload::new("Second.java", "class Second {}"),
        ];
        let expansion = expand_all(&uploads);

        let names: Vec<_> = expansion.units.iter().map(SourceUnit::name).collect();
        assert_eq!(names, ["First.java", "Second.java"]);
        assert_eq!(expansion.failures.len(), 1);
        assert_eq!(expansion.failures[0].upload, "broken.zip");
    }

    #[test]
    fn duplicate_names_are_skipped() {
        let uploads = [
            Upload::new("A.java", "class A {}"),
            Upload::new("bundle.zip", zip_of(&[("A.java", b"class Other {}")])),
        ];
        let expansion = expand_all(&uploads);

        assert_eq!(expansion.units.len(), 1);
        assert_eq!(expansion.units[0].content(), "class A {}");
        assert!(matches!(
            expansion.failures[0].error,
            IntakeError::DuplicateName { ref name } if name == "A.java"
        ));
    }

    #[test]
    fn empty_name_is_a_failure() {
        let expansion = expand_all(&[Upload::new("", "class A {}")]);
        assert!(expansion.units.is_empty());
        assert!(matches!(expansion.failures[0].error, IntakeError::EmptyName));
    }
}
