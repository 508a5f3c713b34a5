pub mod config;
pub mod logging;

pub mod error;
pub mod manifest;
pub mod mount;
pub mod mount_uri;
pub mod report;
pub mod run;
pub mod source;
pub mod testing;
pub mod viewer;

pub use error::RunError;
pub use manifest::{parse_manifest, ManifestResult, MANIFEST_NS};
pub use mount_uri::{build_mount_target, MountTarget};
pub use run::{MountRun, RunOutcome, RunState};
pub use source::DocumentSource;
