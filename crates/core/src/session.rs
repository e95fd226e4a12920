//! Session-scoped persistence of the active presentation.
//!
//! A store holds string blobs under string keys. The presentation lives under
//! a single well-known key and is overwritten wholesale on every mutation;
//! an absent key means there is no active presentation.

use crate::error::Result;
use crate::types::Presentation;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Key the active presentation is stored under.
pub const PRESENTATION_KEY: &str = "presentation";

/// Key/value storage scoped to one editing session.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON file mapping keys to blobs.
///
/// A missing file is an empty session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Load the active presentation, or `None` if the session has none.
pub fn load_presentation(store: &dyn SessionStore) -> Result<Option<Presentation>> {
    match store.get(PRESENTATION_KEY)? {
        Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
        None => Ok(None),
    }
}

/// Overwrite the stored presentation.
pub fn save_presentation(store: &mut dyn SessionStore, presentation: &Presentation) -> Result<()> {
    let blob = serde_json::to_string(presentation)?;
    log::debug!(
        "saving presentation {} ({} slides, {} bytes)",
        presentation.id,
        presentation.len(),
        blob.len()
    );
    store.set(PRESENTATION_KEY, blob)
}

/// End the session's presentation.
pub fn clear_presentation(store: &mut dyn SessionStore) -> Result<()> {
    store.remove(PRESENTATION_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{Slide, SlideMeta, SlideTemplate};

    fn sample() -> Presentation {
        Presentation::new(
            "Ownership",
            vec![Slide::new(SlideTemplate::Title, SlideMeta::new("Ownership in Rust"))],
        )
    }

    #[test]
    fn test_absent_key_means_no_presentation() {
        let store = MemorySessionStore::new();
        assert!(load_presentation(&store).unwrap().is_none());
    }

    #[test]
    fn test_memory_round_trip_and_clear() {
        let mut store = MemorySessionStore::new();
        let deck = sample();

        save_presentation(&mut store, &deck).unwrap();
        assert_eq!(load_presentation(&store).unwrap(), Some(deck));

        clear_presentation(&mut store).unwrap();
        assert!(load_presentation(&store).unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let mut store = MemorySessionStore::new();
        save_presentation(&mut store, &sample()).unwrap();

        let second = Presentation::new("Lifetimes", Vec::new());
        save_presentation(&mut store, &second).unwrap();

        let loaded = load_presentation(&store).unwrap().unwrap();
        assert_eq!(loaded.title, "Lifetimes");
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_corrupt_blob_is_an_error() {
        let mut store = MemorySessionStore::new();
        store.set(PRESENTATION_KEY, "{not json".to_string()).unwrap();

        assert!(matches!(load_presentation(&store), Err(Error::JsonError(_))));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let mut store = FileSessionStore::new(&path);

        assert!(load_presentation(&store).unwrap().is_none());

        let deck = sample();
        save_presentation(&mut store, &deck).unwrap();
        assert!(path.exists());

        let reopened = FileSessionStore::new(&path);
        assert_eq!(load_presentation(&reopened).unwrap(), Some(deck));
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSessionStore::new(dir.path().join("session.json"));

        store.set("theme", "dark".to_string()).unwrap();
        save_presentation(&mut store, &sample()).unwrap();
        clear_presentation(&mut store).unwrap();

        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert!(store.get(PRESENTATION_KEY).unwrap().is_none());
    }
}
