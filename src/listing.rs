use std::fs;
use std::io;
use std::path::Path;

/// One file-system item as reported by a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_directory: bool,
}

/// Boundary seam for directory enumeration.
///
/// Implementations report children in whatever order the backing store
/// yields them; callers must not assume any particular sort.
pub trait DirectoryLister: Send + Sync {
    fn list(&self, path: &Path) -> io::Result<Vec<Entry>>;
}

/// Lists directories straight off the platform file system, in native order.
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, path: &Path) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_directory: file_type.is_dir(),
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.txt"), b"hi").unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();

        let mut entries = FsLister.list(dir.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            entries,
            vec![
                Entry { name: "docs".to_string(), is_directory: true },
                Entry { name: "readme.txt".to_string(), is_directory: false },
            ]
        );
    }

    #[test]
    fn test_dotfiles_are_reported_not_hidden_here() {
        // Hidden-name filtering is a layout concern; the boundary reports
        // everything the platform does.
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".config"), b"").unwrap();

        let entries = FsLister.list(dir.path()).unwrap();
        assert!(entries.iter().any(|e| e.name == ".config"));
    }

    #[test]
    fn test_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir");

        let err = FsLister.list(&missing).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
