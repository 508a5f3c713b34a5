//! Recording fakes for the run's collaborators, shared by unit and integration tests.
//!
//! ```ignore
//! use davmount_core::testing::{RecordingMount, RecordingReporter, RecordingViewer};
//!
//! let mounter = RecordingMount::succeeding();
//! // ... run ...
//! assert_eq!(mounter.locations(), vec!["dav://h/p".to_string()]);
//! ```

use async_trait::async_trait;
use std::sync::Mutex;

use crate::mount::{MountError, MountService, MountSession, SessionWatch};
use crate::report::ErrorReporter;
use crate::viewer::Viewer;

/// Mount service that records every request and answers with a fixed result.
#[derive(Debug)]
pub struct RecordingMount {
    result: Result<(), MountError>,
    calls: Mutex<Vec<(String, SessionWatch)>>,
}

impl RecordingMount {
    pub fn succeeding() -> Self {
        Self::with_result(Ok(()))
    }

    pub fn failing(err: MountError) -> Self {
        Self::with_result(Err(err))
    }

    pub fn with_result(result: Result<(), MountError>) -> Self {
        Self {
            result,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Locations passed to `mount`, in call order.
    pub fn locations(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(l, _)| l.clone()).collect()
    }

    /// Session ids passed to `mount`, in call order.
    pub fn session_ids(&self) -> Vec<u64> {
        self.calls.lock().unwrap().iter().map(|(_, w)| w.id()).collect()
    }

    /// True once every session seen by `mount` has been dropped.
    pub fn sessions_released(&self) -> bool {
        self.calls.lock().unwrap().iter().all(|(_, w)| w.is_released())
    }
}

#[async_trait]
impl MountService for RecordingMount {
    async fn mount(&self, location: &str, session: &MountSession) -> Result<(), MountError> {
        self.calls
            .lock()
            .unwrap()
            .push((location.to_string(), session.watch()));
        self.result.clone()
    }
}

#[derive(Debug, Default)]
pub struct RecordingViewer {
    opened: Mutex<Vec<String>>,
}

impl RecordingViewer {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Viewer for RecordingViewer {
    fn open_in_viewer(&self, location: &str) {
        self.opened.lock().unwrap().push(location.to_string());
    }
}

#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<(String, Option<String>)>>,
}

impl RecordingReporter {
    pub fn reports(&self) -> Vec<(String, Option<String>)> {
        self.reports.lock().unwrap().clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report_error(&self, primary: &str, secondary: Option<&str>) {
        self.reports
            .lock()
            .unwrap()
            .push((primary.to_string(), secondary.map(str::to_string)));
    }
}
