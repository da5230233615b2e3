//! Persistence capabilities.

pub mod high_score;

pub use high_score::{
    json_or_memory, HighScoreRecord, HighScoreStore, JsonHighScoreStore, MemoryHighScoreStore,
};
