use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Tracks which directories are currently expanded. Absent means collapsed.
///
/// Keys are created lazily on the first toggle and persist after collapsing
/// again; at interactive tree sizes the map stays tiny.
#[derive(Debug, Clone, Default)]
pub struct DisclosureState {
    expanded: HashMap<PathBuf, bool>,
}

impl DisclosureState {
    /// Flip the expansion flag for `path` (absent counts as collapsed).
    pub fn toggle(&mut self, path: &Path) {
        let flag = self.expanded.entry(path.to_path_buf()).or_insert(false);
        *flag = !*flag;
    }

    pub fn is_expanded(&self, path: &Path) -> bool {
        self.expanded.get(path).copied().unwrap_or(false)
    }
}
