//! Terminal failure kinds for one davmount run.
//!
//! Every pipeline stage returns either its value or a [`RunError`]; the run
//! coordinator is the only place that turns one into a user-facing report.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::mount::MountError;

/// Label used when the mount subsystem fails.
pub const MOUNT_ERROR_LABEL: &str = "Error during mount";

#[derive(Debug, Error)]
pub enum RunError {
    /// Remote manifest fetch returned a status outside 2xx.
    #[error("HTTP error {status}: {status_line}")]
    Fetch { status: u32, status_line: String },

    /// Remote fetch failed before a status was available (DNS, connect, timeout, body cap).
    #[error("HTTP transport error: {0}")]
    Transport(String),

    /// Local manifest could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed manifest xml: {0}")]
    MalformedXml(String),

    #[error("manifest xml document is empty")]
    EmptyDocument,

    #[error("document is not a dav mount manifest")]
    SchemaMismatch,

    #[error("manifest is missing url or open element")]
    IncompleteManifest,

    /// Mount base does not start with the literal `http` prefix.
    #[error("unsupported location scheme: {0}")]
    UnsupportedScheme(String),

    /// Derived mount URI is not a valid absolute URL.
    #[error("invalid mount uri {uri}: {reason}")]
    InvalidMountUri { uri: String, reason: String },

    #[error("mount failed: {0}")]
    Mount(#[from] MountError),
}

impl RunError {
    /// Primary and optional secondary text handed to the error reporter.
    pub fn report_text(&self) -> (String, Option<String>) {
        match self {
            RunError::Fetch { status_line, .. } => {
                ("HTTP Error".to_string(), Some(status_line.clone()))
            }
            RunError::Transport(detail) => ("HTTP Error".to_string(), Some(detail.clone())),
            RunError::Io { path, source } => (
                "Could not read manifest".to_string(),
                Some(format!("{}: {}", path.display(), source)),
            ),
            RunError::MalformedXml(detail) => {
                ("Could not parse xml".to_string(), Some(detail.clone()))
            }
            RunError::EmptyDocument => ("XML Document empty".to_string(), None),
            RunError::SchemaMismatch => ("Not a valid dav mount xml".to_string(), None),
            RunError::IncompleteManifest => ("Invalid mount spec".to_string(), None),
            RunError::UnsupportedScheme(base) => {
                ("Unsupported location scheme".to_string(), Some(base.clone()))
            }
            RunError::InvalidMountUri { uri, .. } => {
                ("Could not get file for uri".to_string(), Some(uri.clone()))
            }
            RunError::Mount(err) => (MOUNT_ERROR_LABEL.to_string(), Some(err.detail().to_string())),
        }
    }
}
