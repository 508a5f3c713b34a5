//! Mount backend that shells out to `gio mount <uri>`.
//!
//! gio talks to the GVfs daemon, which owns the actual WebDAV mount. When the
//! session is interactive the child inherits the terminal so gio can ask for
//! a user name and password itself.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use super::{MountError, MountService, MountSession};

#[derive(Debug, Clone)]
pub struct GioMount {
    program: String,
}

impl GioMount {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

/// Last non-empty stderr line with gio's `gio: <location>: ` prefix removed.
pub(crate) fn failure_detail(stderr: &str, location: &str) -> Option<String> {
    let line = stderr.lines().rev().map(str::trim).find(|l| !l.is_empty())?;
    let line = line.strip_prefix("gio:").map(str::trim_start).unwrap_or(line);
    let line = line
        .strip_prefix(location)
        .and_then(|rest| rest.strip_prefix(':'))
        .map(str::trim_start)
        .unwrap_or(line);
    Some(line.to_string())
}

#[async_trait]
impl MountService for GioMount {
    async fn mount(&self, location: &str, session: &MountSession) -> Result<(), MountError> {
        let stdin = if session.is_interactive() {
            Stdio::inherit()
        } else {
            Stdio::null()
        };

        let child = Command::new(&self.program)
            .arg("mount")
            .arg(location)
            .stdin(stdin)
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| MountError::Spawn(format!("{}: {}", self.program, e)))?;

        tracing::debug!(
            session = session.id(),
            pid = ?child.id(),
            "{} mount {} started",
            self.program,
            location
        );

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| MountError::Other(format!("waiting for {}: {}", self.program, e)))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = failure_detail(&stderr, location)
            .unwrap_or_else(|| format!("{} exited with {}", self.program, output.status));
        tracing::warn!(session = session.id(), "mount of {} failed: {}", location, detail);
        Err(MountError::classify(detail))
    }
}
