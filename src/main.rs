#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # testgen
//!
//! Scans Java sources (loose `.java` files or `.zip` archives of them) for
//! classes and methods, then ships the sources to a JUnit test-generation
//! service and saves the bundle it returns.
//!
//! * `testgen scan Foo.java project.zip` prints what was found as JSON.
//! * `testgen generate --backend http://host/generate-tests Foo.java` does the
//!   same, then writes `junit-tests.zip`.
//!
//! The endpoint and timeout can also come from `TESTGEN_BACKEND_URL` and
//! `TESTGEN_TIMEOUT_SECS`, including via a `.env` file.

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use bpaf::*;
use dotenvy::dotenv;
use testgen::{ARTIFACT_MIME, Config, ResponseOutcome, Run, Upload};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Print the classes and methods found in the given files
    Scan(Vec<PathBuf>),
    /// Scan, then submit to the backend and save the result
    Generate {
        /// backend endpoint override
        backend: Option<String>,
        /// timeout override, in seconds
        timeout: Option<u64>,
        /// artifact path override
        out:     Option<PathBuf>,
        /// files to upload
        files:   Vec<PathBuf>,
    },
}

/// Parsed command line.
#[derive(Debug, Clone)]
struct Opts {
    /// log at debug level
    verbose: bool,
    /// what to do
    cmd:     Cmd,
}

/// Parse the command line arguments and return the options
fn options() -> Opts {
    /// parses the files to upload
    fn f() -> impl Parser<Vec<PathBuf>> {
        positional::<PathBuf>("FILE")
            .help("Java source file or .zip archive of Java sources")
            .some("Pass at least one .java file or .zip archive")
    }

    let scan = construct!(Cmd::Scan(f()))
        .to_options()
        .command("scan")
        .help("Print the classes and methods found in the given files");

    let backend = long("backend")
        .short('b')
        .help("URL of the service that generates JUnit tests")
        .argument::<String>("URL")
        .optional();
    let timeout = long("timeout")
        .help("Give up on the backend after this many seconds")
        .argument::<u64>("SECS")
        .optional();
    let out = long("out")
        .short('o')
        .help("Where to save the generated tests")
        .argument::<PathBuf>("PATH")
        .optional();
    let files = f();

    let generate = construct!(Cmd::Generate {
        backend,
        timeout,
        out,
        files
    })
    .to_options()
    .command("generate")
    .help("Send the files to the backend and save the generated tests");

    let verbose = long("verbose")
        .short('v')
        .help("Show per-file extraction details")
        .switch();
    let cmd = construct!([scan, generate]);

    construct!(Opts { verbose, cmd })
        .to_options()
        .descr("JUnit test generator client")
        .run()
}

/// Reads every path as an upload, skipping (and logging) the unreadable ones.
fn read_uploads(files: &[PathBuf]) -> Vec<Upload> {
    files
        .iter()
        .filter_map(|path| match Upload::read(path) {
            Ok(upload) => Some(upload),
            Err(e) => {
                tracing::warn!("{e:#}");
                None
            }
        })
        .collect()
}

/// Expands, scans and prints the manifest for the given files. Only the JSON
/// goes to stdout; skipped uploads are listed on stderr.
fn scan(files: &[PathBuf]) -> Result<Run> {
    let run = Run::prepare(&read_uploads(files));
    let manifest =
        serde_json::to_string_pretty(run.manifest()).context("Could not serialize the manifest")?;
    println!("{manifest}");

    for failure in run.failures() {
        eprintln!("Skipped {}: {}", failure.upload, failure.error);
    }
    Ok(run)
}

/// Resolves once the user hits Ctrl-C. Never resolves if the signal handler
/// cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let opts = options();

    let fmt = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(if opts.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    });
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    match opts.cmd {
        Cmd::Scan(files) => {
            scan(&files)?;
        }
        Cmd::Generate {
            backend,
            timeout,
            out,
            files,
        } => {
            let config =
                Config::from_env().with_overrides(backend, timeout.map(Duration::from_secs), out);
            let run = scan(&files)?;
            let client = config.client()?;

            match run.generate_until(&client, interrupted()).await? {
                ResponseOutcome::Success { artifact } => {
                    std::fs::write(config.output(), &artifact).with_context(|| {
                        format!("Could not save tests to {}", config.output().display())
                    })?;
                    println!(
                        "Tests generated successfully. Saved {} ({ARTIFACT_MIME}, {} bytes).",
                        config.output().display(),
                        artifact.len()
                    );
                }
                outcome => anyhow::bail!("{outcome}"),
            }
        }
    };

    Ok(())
}
