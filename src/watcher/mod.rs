//! Location file: the terminal stand-in for a URL fragment
//!
//! The current fragment is mirrored into a file after every slide change;
//! external edits to that file are picked up as hash changes.

use notify::Watcher;
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

/// Reads and writes the location fragment file
#[derive(Debug, Clone)]
pub struct LocationFile {
    path: PathBuf,
    /// Last fragment written by us, so our own writes are not seen as changes
    last_written: Option<String>,
}

impl LocationFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_written: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file content, if the file exists
    pub fn read(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
    }

    /// Replace the file content with `fragment`
    pub fn write(&mut self, fragment: &str) -> std::io::Result<()> {
        if self.last_written.as_deref() == Some(fragment) {
            return Ok(());
        }
        fs::write(&self.path, format!("{}\n", fragment))?;
        self.last_written = Some(fragment.to_string());
        Ok(())
    }

    /// Write `fragment` even if it matches our last write, overwriting
    /// whatever someone else put there since
    pub fn force_write(&mut self, fragment: &str) -> std::io::Result<()> {
        self.last_written = None;
        self.write(fragment)
    }

    /// Content written by someone else since our last write
    pub fn external_change(&self) -> Option<String> {
        let content = self.read()?;
        if self.last_written.as_deref() == Some(content.as_str()) {
            None
        } else {
            Some(content)
        }
    }
}

/// Debounced watcher on the location file
pub struct LocationWatcher {
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    rx: Receiver<Result<Vec<DebouncedEvent>, notify::Error>>,
    path: PathBuf,
}

impl LocationWatcher {
    /// Watch `path`. The parent directory is watched so atomic replaces
    /// (write to temp + rename) are seen too.
    pub fn new(path: &Path) -> anyhow::Result<Self> {
        let (tx, rx) = channel();

        let mut debouncer = new_debouncer(Duration::from_millis(200), move |res| {
            let _ = tx.send(res);
        })?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        debouncer
            .watcher()
            .watch(dir, notify::RecursiveMode::NonRecursive)?;

        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Ok(Self {
            _debouncer: debouncer,
            rx,
            path,
        })
    }

    /// Check whether the location file changed (non-blocking)
    pub fn poll(&self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.rx.try_recv() {
            if let Ok(events) = result {
                changed |= events.iter().any(|e| same_file(&e.path, &self.path));
            }
        }
        changed
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    a == b || a.canonicalize().map(|a| a == b).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read() {
        let temp = TempDir::new().unwrap();
        let mut loc = LocationFile::new(temp.path().join("location"));
        assert!(loc.read().is_none());

        loc.write("#slide-3").unwrap();
        assert_eq!(loc.read().as_deref(), Some("#slide-3"));
    }

    #[test]
    fn own_writes_are_not_external_changes() {
        let temp = TempDir::new().unwrap();
        let mut loc = LocationFile::new(temp.path().join("location"));
        loc.write("#slide-1").unwrap();
        assert!(loc.external_change().is_none());

        fs::write(loc.path(), "#slide-7\n").unwrap();
        assert_eq!(loc.external_change().as_deref(), Some("#slide-7"));
    }

    #[test]
    fn force_write_overrides_external_edit() {
        let temp = TempDir::new().unwrap();
        let mut loc = LocationFile::new(temp.path().join("location"));
        loc.write("#slide-2").unwrap();
        fs::write(loc.path(), "#slide-7\n").unwrap();

        // Same fragment as our last write: plain write leaves the edit alone
        loc.write("#slide-2").unwrap();
        assert_eq!(loc.read().as_deref(), Some("#slide-7"));

        loc.force_write("#slide-2").unwrap();
        assert_eq!(loc.read().as_deref(), Some("#slide-2"));
        assert!(loc.external_change().is_none());
    }

    #[test]
    fn watcher_starts_on_existing_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("location");
        fs::write(&path, "#slide-0\n").unwrap();
        let watcher = LocationWatcher::new(&path).unwrap();
        assert!(!watcher.poll());
    }
}
