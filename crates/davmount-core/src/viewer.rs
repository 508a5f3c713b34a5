//! "Open in file manager" continuation after a successful mount.
//!
//! Best-effort: a viewer that fails to start is logged, never reported as a
//! failed run.

use std::process::{Command, Stdio};
use std::thread;

pub trait Viewer: Send + Sync {
    fn open_in_viewer(&self, location: &str);
}

/// Spawns `<program> <location>` without blocking the run. The child is
/// reaped from a detached thread.
#[derive(Debug, Clone)]
pub struct CommandViewer {
    program: String,
}

impl CommandViewer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Viewer for CommandViewer {
    fn open_in_viewer(&self, location: &str) {
        let spawned = Command::new(&self.program)
            .arg(location)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(mut child) => {
                tracing::info!(pid = child.id(), "opened {} with {}", location, self.program);
                thread::spawn(move || {
                    if let Err(e) = child.wait() {
                        tracing::debug!("waiting for viewer failed: {}", e);
                    }
                });
            }
            Err(e) => tracing::warn!("could not open {} with {}: {}", location, self.program, e),
        }
    }
}

/// Used when `[viewer] enabled = false` or `--no-open` is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoViewer;

impl Viewer for NoViewer {
    fn open_in_viewer(&self, location: &str) {
        tracing::debug!("viewer disabled, not opening {}", location);
    }
}
