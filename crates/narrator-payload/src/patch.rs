//! Affected-file extraction from multi-file patch documents.
//!
//! Two dialects are understood:
//!
//! - the explicit form, one directive per file:
//!   `*** Add File: p`, `*** Update File: p`, `*** Delete File: p`;
//! - unified-diff headers: `--- a/p` and `+++ b/p`.
//!
//! Lines that match neither are skipped. Nothing here can fail.

use std::collections::HashSet;

/// Literal line prefixes that name a file, in match priority order.
pub const FILE_MARKERS: [&str; 5] = [
    "*** Add File:",
    "*** Update File:",
    "*** Delete File:",
    "+++ b/",
    "--- a/",
];

/// Collect the unique, non-empty paths named by `patch_text`, in order of
/// first appearance. An absent or empty patch yields no files.
pub fn extract_affected_files(patch_text: Option<&str>) -> Vec<String> {
    let Some(text) = patch_text.filter(|t| !t.is_empty()) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for line in text.lines().map(str::trim) {
        let Some(path) = FILE_MARKERS
            .iter()
            .find_map(|marker| line.strip_prefix(marker))
            .map(str::trim)
        else {
            continue;
        };

        if !path.is_empty() && seen.insert(path) {
            files.push(path.to_string());
        }
    }

    files
}
