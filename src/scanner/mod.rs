//! Existing-output detection.
//!
//! Rebuilds, on every run, the set of tracks already present in the output
//! directory by parsing identifiers back out of file names. Nothing is
//! persisted between runs; the directory listing is the index.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::fetch::naming::IdentityPatterns;

/// Identifiers recovered from existing output files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownIdentities {
    /// Source track ids (`spotify:track:<id>` → `<id>`)
    pub source_track_ids: HashSet<String>,
    /// Catalog ids (YouTube video ids)
    pub catalog_ids: HashSet<String>,
}

impl KnownIdentities {
    pub fn has_source_track(&self, id: &str) -> bool {
        self.source_track_ids.contains(id)
    }

    pub fn has_catalog_id(&self, id: &str) -> bool {
        self.catalog_ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.source_track_ids.is_empty() && self.catalog_ids.is_empty()
    }
}

/// Scan `dir` (non-recursively) for `.<extension>` files and collect their
/// identifiers.
///
/// A missing directory means nothing has been downloaded yet. Any read error
/// is logged and yields empty sets, so the run re-fetches rather than
/// silently skipping.
pub fn scan_existing(dir: &Path, extension: &str) -> KnownIdentities {
    if !dir.exists() {
        info!("Output directory {:?} does not exist yet", dir);
        return KnownIdentities::default();
    }

    settle(dir, try_scan(dir, extension))
}

/// Fold a scan result into the identity sets, degrading failures to empty
fn settle(dir: &Path, scanned: Result<KnownIdentities, ScanError>) -> KnownIdentities {
    match scanned {
        Ok(known) => {
            info!(
                "Found {} existing track(s) in {:?}",
                known.source_track_ids.len().max(known.catalog_ids.len()),
                dir
            );
            known
        }
        Err(e) => {
            warn!("Could not scan {:?} for existing downloads: {}", dir, e);
            KnownIdentities::default()
        }
    }
}

fn try_scan(dir: &Path, extension: &str) -> Result<KnownIdentities, ScanError> {
    let patterns = IdentityPatterns::new(extension)?;
    let extension = extension.trim_start_matches('.');
    let mut known = KnownIdentities::default();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if !matches_ext {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some(id) = patterns.source_track_id(name) {
            known.source_track_ids.insert(id.to_string());
        }
        if let Some(id) = patterns.catalog_id(name) {
            known.catalog_ids.insert(id.to_string());
        }
        debug!("Existing file: {}", name);
    }

    Ok(known)
}

#[derive(Debug, thiserror::Error)]
enum ScanError {
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("invalid extension pattern: {0}")]
    Pattern(#[from] regex::Error),
}
