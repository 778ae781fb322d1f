#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::time::Duration;

/// Suffix an upload or archive entry must carry to be treated as Java source
pub const SOURCE_SUFFIX: &str = ".java";

/// Suffix that marks an upload as a zip archive to be expanded
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// File name the generated test bundle is offered under
pub const ARTIFACT_FILE_NAME: &str = "junit-tests.zip";

/// MIME type the generated test bundle is offered with
pub const ARTIFACT_MIME: &str = "application/zip";

/// Backend endpoint used when neither the environment nor the CLI provide one
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/generate-tests";

/// Upper bound on a single backend round trip
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(120);

/// Environment variable holding the backend endpoint
pub const BACKEND_URL_ENV: &str = "TESTGEN_BACKEND_URL";

/// Environment variable holding the backend timeout, in whole seconds
pub const BACKEND_TIMEOUT_ENV: &str = "TESTGEN_TIMEOUT_SECS";

/// Pattern matching a class declaration
/// * group 1: the class name
pub const CLASS_PATTERN: &str = r"\bclass\s+(\w+)";

/// Pattern matching a method-shaped declaration: any run of modifiers, a type
/// token (generics and array brackets allowed), the name, then `(`
/// * group 1: the method name
pub const METHOD_PATTERN: &str = r"\b(?:(?:public|protected|private|static|final|synchronized|abstract|native)\s+)*[\w<>\[\]]+\s+(\w+)\s*\(";
