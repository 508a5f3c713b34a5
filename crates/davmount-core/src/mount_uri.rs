//! Derivation of the WebDAV mount location from a manifest.
//!
//! `http://host/path` becomes `dav://host/path` and `https://...` becomes
//! `davs://...`: the literal `http` prefix is swapped for `dav` and whatever
//! follows it is kept verbatim.

use std::fmt;

use crate::error::RunError;
use crate::manifest::ManifestResult;

/// Prefix that must start every mount base (case-sensitive).
pub const HTTP_PREFIX: &str = "http";

/// WebDAV scheme marker put in place of [`HTTP_PREFIX`].
pub const WEBDAV_PREFIX: &str = "dav";

/// Location handed to the mount subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountTarget {
    pub mount_uri: String,
}

impl fmt::Display for MountTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mount_uri)
    }
}

/// Replaces the literal `http` prefix of `mount_base` with `dav`.
///
/// Bases that do not start with `http` are rejected untouched.
pub fn webdav_base(mount_base: &str) -> Result<String, RunError> {
    let rest = mount_base
        .strip_prefix(HTTP_PREFIX)
        .ok_or_else(|| RunError::UnsupportedScheme(mount_base.to_string()))?;
    Ok(format!("{}{}", WEBDAV_PREFIX, rest))
}

/// Joins two path pieces with exactly one `/` between them.
pub fn join_path(base: &str, segment: &str) -> String {
    let base = base.trim_end_matches('/');
    let segment = segment.trim_start_matches('/');
    format!("{}/{}", base, segment)
}

/// Builds the mount target for a parsed manifest.
pub fn build_mount_target(manifest: &ManifestResult) -> Result<MountTarget, RunError> {
    let base = webdav_base(&manifest.mount_base)?;
    let mount_uri = join_path(&base, &manifest.open_target);

    if let Err(e) = url::Url::parse(&mount_uri) {
        return Err(RunError::InvalidMountUri {
            uri: mount_uri,
            reason: e.to_string(),
        });
    }

    Ok(MountTarget { mount_uri })
}
