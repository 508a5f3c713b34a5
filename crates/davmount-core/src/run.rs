//! One davmount run: Load → Parse → Build → Mount → Complete.
//!
//! Each stage finishes (or fails) before the next starts. Failures travel up
//! as [`RunError`] and are turned into exactly one report when the run finishes.

use crate::config::HttpConfig;
use crate::error::RunError;
use crate::manifest::{self, ManifestResult};
use crate::mount::{MountError, MountService, MountSession};
use crate::mount_uri::{self, MountTarget};
use crate::report::ErrorReporter;
use crate::source::DocumentSource;
use crate::viewer::Viewer;

/// Position of the run in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Loading,
    Parsed,
    Invalid,
    Mounting,
    Done,
    Failed,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }
}

/// How a run ended.
#[derive(Debug)]
pub struct RunOutcome {
    pub state: RunState,
    pub result: Result<MountTarget, RunError>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Drives a single manifest through the pipeline against the given collaborators.
pub struct MountRun<'a> {
    http: &'a HttpConfig,
    mounter: &'a dyn MountService,
    viewer: &'a dyn Viewer,
    reporter: &'a dyn ErrorReporter,
    interactive: bool,
    state: RunState,
}

impl<'a> MountRun<'a> {
    pub fn new(
        http: &'a HttpConfig,
        mounter: &'a dyn MountService,
        viewer: &'a dyn Viewer,
        reporter: &'a dyn ErrorReporter,
    ) -> Self {
        Self {
            http,
            mounter,
            viewer,
            reporter,
            interactive: false,
            state: RunState::Idle,
        }
    }

    /// Whether the mount subsystem may prompt on the terminal.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn transition(&mut self, next: RunState) {
        tracing::debug!(from = ?self.state, to = ?next, "run state");
        self.state = next;
    }

    /// Full run: fetch or read the manifest, mount its location, open the target.
    pub async fn run(mut self, source: &DocumentSource) -> RunOutcome {
        let result = match self.prepare(source).await {
            Ok(target) => self.mount(target).await,
            Err(err) => Err(err),
        };
        self.finish(result)
    }

    /// Load → Parse → Build only; nothing is mounted.
    pub async fn resolve(mut self, source: &DocumentSource) -> RunOutcome {
        let result = self.prepare(source).await;
        self.finish(result)
    }

    async fn prepare(&mut self, source: &DocumentSource) -> Result<MountTarget, RunError> {
        self.transition(RunState::Loading);
        tracing::info!(remote = source.is_remote(), "loading manifest from {}", source);
        let bytes = source.load(self.http).await?;

        let manifest = self.parse(&bytes)?;
        drop(bytes);

        let target = mount_uri::build_mount_target(&manifest)?;
        tracing::info!("mount uri: {}", target);
        Ok(target)
    }

    fn parse(&mut self, bytes: &[u8]) -> Result<ManifestResult, RunError> {
        match manifest::parse_manifest(bytes) {
            Ok(manifest) => {
                self.transition(RunState::Parsed);
                tracing::debug!(
                    mount_base = %manifest.mount_base,
                    open_target = %manifest.open_target,
                    "manifest parsed"
                );
                Ok(manifest)
            }
            Err(err) => {
                self.transition(RunState::Invalid);
                Err(err)
            }
        }
    }

    async fn mount(&mut self, target: MountTarget) -> Result<MountTarget, RunError> {
        self.transition(RunState::Mounting);
        let session = MountSession::new(self.interactive);
        let result = self.mounter.mount(&target.mount_uri, &session).await;
        self.complete(target, session, result)
    }

    /// Completion continuation: releases the session and hands a mounted
    /// location to the viewer.
    fn complete(
        &mut self,
        target: MountTarget,
        session: MountSession,
        result: Result<(), MountError>,
    ) -> Result<MountTarget, RunError> {
        drop(session);
        match result {
            Ok(()) => {
                tracing::info!("mounted {}", target);
                self.viewer.open_in_viewer(&target.mount_uri);
                Ok(target)
            }
            Err(err) => Err(RunError::Mount(err)),
        }
    }

    fn finish(mut self, result: Result<MountTarget, RunError>) -> RunOutcome {
        match &result {
            Ok(_) => self.transition(RunState::Done),
            Err(err) => {
                tracing::warn!("run failed: {}", err);
                let (primary, secondary) = err.report_text();
                self.reporter.report_error(&primary, secondary.as_deref());
                self.transition(RunState::Failed);
            }
        }
        RunOutcome {
            state: self.state,
            result,
        }
    }
}
