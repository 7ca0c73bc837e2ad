use std::fs;
use std::io;
use std::path::PathBuf;

/// Name of the single durable record holding the saved-project list.
pub const PROJECTS_RECORD: &str = "docustyle_projects";

/// One logical durable record, read and replaced as a unit.
///
/// Abstracted behind a trait so the project store can be exercised in
/// tests without a filesystem, and so embedders can supply their own
/// persistence (browser storage, a database row, etc.).
pub trait StorageBackend {
    /// Read the whole record. `None` when it has never been written.
    fn read(&self) -> io::Result<Option<String>>;

    /// Replace the whole record.
    fn write(&mut self, payload: &str) -> io::Result<()>;
}

/// File-based record storage.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default record location (cross-platform):
    /// `<data dir>/docustyle/docustyle_projects.json`.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("docustyle");
        path.push(format!("{}.json", PROJECTS_RECORD));
        path
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Default for FileBackend {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, payload: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, payload)
    }
}

/// In-memory record storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryBackend {
    record: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-written record.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self { record: Some(record.into()) }
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.record.clone())
    }

    fn write(&mut self, payload: &str) -> io::Result<()> {
        self.record = Some(payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("projects.json"));
        assert_eq!(backend.read().unwrap(), None);

        backend.write("[1,2,3]").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_file_backend_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("record.json");
        let mut backend = FileBackend::new(path.clone());
        backend.write("{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_memory_backend_round_trip() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.read().unwrap(), None);
        backend.write("payload").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("payload"));
    }
}
