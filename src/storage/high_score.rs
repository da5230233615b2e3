//! Best-score persistence capability.

use crate::core::constants::HIGH_SCORE_FILE;
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Synchronous key-value access to a single best score.
pub trait HighScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> io::Result<()>;
}

/// On-disk format of the high-score file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

/// High score kept as `{"high_score": N}` in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonHighScoreStore {
    path: PathBuf,
}

impl JsonHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.dino-dash/high_score.json`.
    pub fn default_location() -> io::Result<Self> {
        Ok(Self::new(persistence::data_path(HIGH_SCORE_FILE)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonHighScoreStore {
    fn load(&self) -> u32 {
        persistence::load_json_or_default::<HighScoreRecord>(&self.path).high_score
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        persistence::save_json(&self.path, &HighScoreRecord { high_score: score })
    }
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub value: u32,
    pub saves: u32,
}

impl MemoryHighScoreStore {
    pub fn new(value: u32) -> Self {
        Self { value, saves: 0 }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u32 {
        self.value
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        self.value = score;
        self.saves += 1;
        Ok(())
    }
}

/// The JSON store if its location resolved, otherwise an in-memory store.
/// Scores from a memory fallback are lost on exit.
pub fn json_or_memory(location: io::Result<JsonHighScoreStore>) -> Box<dyn HighScoreStore> {
    match location {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("high score will not be saved: {}", e);
            Box::new(MemoryHighScoreStore::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonHighScoreStore::new(dir.path().join("hs.json"));
        assert_eq!(store.load(), 0);

        store.save(420).unwrap();
        assert_eq!(store.load(), 420);

        let json = std::fs::read_to_string(store.path()).unwrap();
        let record: HighScoreRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.high_score, 420);
    }

    #[test]
    fn test_json_store_corrupt_file_reads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.json");
        std::fs::write(&path, "-17").unwrap();
        assert_eq!(JsonHighScoreStore::new(path).load(), 0);
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryHighScoreStore::new(5);
        assert_eq!(store.load(), 5);
        store.save(9).unwrap();
        assert_eq!(store.load(), 9);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_unusable_location_falls_back_to_memory() {
        let location = Err(io::Error::new(io::ErrorKind::NotFound, "no home"));
        let mut store = json_or_memory(location);
        assert_eq!(store.load(), 0);
        store.save(12).unwrap();
        assert_eq!(store.load(), 12);
    }

    #[test]
    fn test_usable_location_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.json");
        let mut store = json_or_memory(Ok(JsonHighScoreStore::new(&path)));
        store.save(33).unwrap();
        assert_eq!(JsonHighScoreStore::new(&path).load(), 33);
    }
}
