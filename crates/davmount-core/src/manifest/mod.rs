//! WebDAV mount manifest parsing.
//!
//! A manifest looks like:
//!
//! ```xml
//! <mount xmlns="http://purl.org/NET/webdav/mount">
//!   <url>http://example.com/dav/</url>
//!   <open>docs/report.odt</open>
//! </mount>
//! ```
//!
//! Validation runs in a fixed order: well-formed markup, non-empty root,
//! `mount` root in [`MANIFEST_NS`], then extraction of `url` and `open`.
//! Unknown elements and all attributes are ignored.
//!
//! When `url` or `open` appears more than once, the last occurrence wins.
//! Existing manifests in the wild rely on this, so it is kept.

mod document;

use document::ManifestDocument;

use crate::error::RunError;

/// Namespace of every manifest element.
pub const MANIFEST_NS: &str = "http://purl.org/NET/webdav/mount";

/// Fields extracted from a valid manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestResult {
    /// HTTP(S) location of the share (`<url>`).
    pub mount_base: String,
    /// Resource path relative to `mount_base` (`<open>`).
    pub open_target: String,
}

/// Parses and validates manifest bytes.
///
/// The parsed tree lives only for the duration of this call.
pub fn parse_manifest(bytes: &[u8]) -> Result<ManifestResult, RunError> {
    let doc = ManifestDocument::parse(bytes)?;
    extract(&doc)
}

fn extract(doc: &ManifestDocument) -> Result<ManifestResult, RunError> {
    let root = doc
        .root()
        .filter(|root| !root.children.is_empty())
        .ok_or(RunError::EmptyDocument)?;

    if !root.has_name_ns("mount", MANIFEST_NS) {
        return Err(RunError::SchemaMismatch);
    }

    let mut mount_base = None;
    let mut open_target = None;
    for child in root.child_elements() {
        if child.has_name_ns("url", MANIFEST_NS) {
            if mount_base.is_some() {
                tracing::debug!("duplicate <url> in manifest, using the later one");
            }
            mount_base = Some(child.text());
        } else if child.has_name_ns("open", MANIFEST_NS) {
            if open_target.is_some() {
                tracing::debug!("duplicate <open> in manifest, using the later one");
            }
            open_target = Some(child.text());
        }
    }

    match (mount_base, open_target) {
        (Some(mount_base), Some(open_target)) => Ok(ManifestResult {
            mount_base,
            open_target,
        }),
        _ => Err(RunError::IncompleteManifest),
    }
}

#[cfg(test)]
mod tests;
