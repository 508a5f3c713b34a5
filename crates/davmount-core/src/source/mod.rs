//! Manifest acquisition: local file or a single HTTP GET.
//!
//! Both variants expose the same async `load`: the local read is deferred to
//! the next scheduler tick and the remote fetch suspends the run task until
//! the whole body has arrived.

mod fetch;

pub use fetch::fetch;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::HttpConfig;
use crate::error::RunError;

/// Where the manifest bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Local { path: PathBuf },
    Remote { url: String },
}

impl DocumentSource {
    /// Builds a source from the CLI location argument and its `--remote` flag.
    pub fn from_arg(location: &str, remote: bool) -> Self {
        if remote {
            DocumentSource::Remote {
                url: location.to_string(),
            }
        } else {
            DocumentSource::Local {
                path: PathBuf::from(location),
            }
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DocumentSource::Remote { .. })
    }

    /// Produces the manifest bytes.
    pub async fn load(&self, http: &HttpConfig) -> Result<Vec<u8>, RunError> {
        match self {
            DocumentSource::Local { path } => {
                tokio::task::yield_now().await;
                read_local(path)
            }
            DocumentSource::Remote { url } => {
                let url = url.clone();
                let http = http.clone();
                tokio::task::spawn_blocking(move || fetch(&url, &http))
                    .await
                    .map_err(|e| RunError::Transport(format!("fetch task failed: {}", e)))?
            }
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Local { path } => write!(f, "{}", path.display()),
            DocumentSource::Remote { url } => write!(f, "{}", url),
        }
    }
}

fn read_local(path: &Path) -> Result<Vec<u8>, RunError> {
    let bytes = fs::read(path).map_err(|source| RunError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "manifest read");
    Ok(bytes)
}
