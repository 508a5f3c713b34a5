//! Interface to the mount subsystem.
//!
//! The subsystem is an opaque async service: it receives a WebDAV location
//! and a [`MountSession`] through which it may raise credential prompts, and
//! reports success or a [`MountError`]. davmount never handles credentials.

mod gio;

pub use gio::GioMount;

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use thiserror::Error;

/// Failure reported by the mount subsystem. Every variant carries the
/// subsystem's own message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("already mounted: {0}")]
    AlreadyMounted(String),
    #[error("location unreachable: {0}")]
    Unreachable(String),
    #[error("mount cancelled: {0}")]
    Cancelled(String),
    /// The mount program could not be started at all.
    #[error("cannot start mount program: {0}")]
    Spawn(String),
    #[error("{0}")]
    Other(String),
}

impl MountError {
    /// The subsystem's message without the category prefix.
    pub fn detail(&self) -> &str {
        match self {
            MountError::AuthenticationFailed(d)
            | MountError::Network(d)
            | MountError::AlreadyMounted(d)
            | MountError::Unreachable(d)
            | MountError::Cancelled(d)
            | MountError::Spawn(d)
            | MountError::Other(d) => d,
        }
    }

    /// Sorts a free-form subsystem message into a category.
    pub fn classify(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let lower = detail.to_ascii_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

        if has(&["already mounted"]) {
            MountError::AlreadyMounted(detail)
        } else if has(&["authentication", "password", "access denied", "unauthorized", "401"]) {
            MountError::AuthenticationFailed(detail)
        } else if has(&["cancelled", "canceled", "aborted by user"]) {
            MountError::Cancelled(detail)
        } else if has(&[
            "could not connect",
            "connection refused",
            "network",
            "timed out",
            "host not found",
            "resolve",
        ]) {
            MountError::Network(detail)
        } else if has(&["not found", "no such", "404", "unreachable", "not supported"]) {
            MountError::Unreachable(detail)
        } else {
            MountError::Other(detail)
        }
    }
}

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// One outstanding interactive mount attempt.
///
/// Created right before the mount request and dropped when the request
/// completes, whatever the outcome.
#[derive(Debug)]
pub struct MountSession {
    id: u64,
    interactive: bool,
    alive: Arc<()>,
}

impl MountSession {
    /// `interactive` tells the subsystem whether it may prompt on the terminal.
    pub fn new(interactive: bool) -> Self {
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(session = id, interactive, "mount session opened");
        Self {
            id,
            interactive,
            alive: Arc::new(()),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Handle that outlives the session and tells whether it was released.
    pub fn watch(&self) -> SessionWatch {
        SessionWatch {
            id: self.id,
            alive: Arc::downgrade(&self.alive),
        }
    }
}

/// Observer of a [`MountSession`]'s lifetime.
#[derive(Debug, Clone)]
pub struct SessionWatch {
    id: u64,
    alive: Weak<()>,
}

impl SessionWatch {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_released(&self) -> bool {
        self.alive.strong_count() == 0
    }
}

impl Drop for MountSession {
    fn drop(&mut self) {
        tracing::debug!(session = self.id, "mount session released");
    }
}

/// Asynchronous "mount enclosing volume" service.
#[async_trait]
pub trait MountService: Send + Sync {
    async fn mount(&self, location: &str, session: &MountSession) -> Result<(), MountError>;
}
