//! Executable lookup across the search path.

use std::env;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Ordered search directories derived from `PATH`; first match wins.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Build from the `PATH` environment variable (`:`-delimited).
    pub fn from_env() -> Self {
        let dirs = env::var("PATH")
            .map(|path| {
                path.split(':')
                    .filter(|dir| !dir.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default();
        Self { dirs }
    }

    pub fn from_dirs(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Resolve a command name to the first matching executable file.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        for dir in &self.dirs {
            let candidate = dir.join(name);
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// Names of every executable entry across the search directories.
    /// Missing or unreadable directories are skipped.
    pub fn executables(&self) -> Vec<String> {
        let mut names = Vec::new();
        for dir in &self.dirs {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.flatten() {
                if !is_executable(&entry.path()) {
                    continue;
                }
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }
        names
    }
}

fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn add_file(dir: &TempDir, name: &str, mode: u32) -> PathBuf {
        let path = dir.path().join(name);
        File::create(&path).expect("create");
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).expect("chmod");
        path
    }

    #[test]
    fn first_directory_wins() {
        let d1 = TempDir::new().expect("tempdir");
        let d2 = TempDir::new().expect("tempdir");
        let first = add_file(&d1, "foo", 0o755);
        add_file(&d2, "foo", 0o755);
        let path = SearchPath::from_dirs(vec![d1.path().into(), d2.path().into()]);
        assert_eq!(path.resolve("foo"), Some(first));
    }

    #[test]
    fn later_directory_found_when_earlier_lacks_entry() {
        let d1 = TempDir::new().expect("tempdir");
        let d2 = TempDir::new().expect("tempdir");
        let hit = add_file(&d2, "foo", 0o755);
        let path = SearchPath::from_dirs(vec![d1.path().into(), d2.path().into()]);
        assert_eq!(path.resolve("foo"), Some(hit));
    }

    #[test]
    fn non_executable_is_a_miss() {
        let d1 = TempDir::new().expect("tempdir");
        let d2 = TempDir::new().expect("tempdir");
        add_file(&d1, "foo", 0o644);
        let hit = add_file(&d2, "foo", 0o755);
        let path = SearchPath::from_dirs(vec![d1.path().into(), d2.path().into()]);
        assert_eq!(path.resolve("foo"), Some(hit));
    }

    #[test]
    fn missing_directory_is_skipped() {
        let d = TempDir::new().expect("tempdir");
        let hit = add_file(&d, "foo", 0o755);
        let path = SearchPath::from_dirs(vec![PathBuf::from("/no/such/dir"), d.path().into()]);
        assert_eq!(path.resolve("foo"), Some(hit));
        assert_eq!(path.resolve("missing"), None);
    }

    #[test]
    fn executables_lists_only_executable_files() {
        let d = TempDir::new().expect("tempdir");
        add_file(&d, "runnable", 0o755);
        add_file(&d, "plain", 0o644);
        let path = SearchPath::from_dirs(vec![d.path().into()]);
        let names = path.executables();
        assert!(names.contains(&"runnable".to_string()));
        assert!(!names.contains(&"plain".to_string()));
    }
}
