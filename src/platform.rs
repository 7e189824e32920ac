use std::path::{Path, PathBuf};

use directories::UserDirs;

/// Home directory used to seed the root of the tree.
pub fn home_dir() -> PathBuf {
    UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/"))
}

/// Fire-and-forget open with the platform's default handler.
///
/// Failures are logged; the caller never observes a result.
pub fn launch_file(path: &Path) {
    if let Err(err) = open::that_detached(path) {
        log::warn!("failed to launch {}: {}", path.display(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_dir_is_absolute() {
        assert!(home_dir().is_absolute());
    }
}
