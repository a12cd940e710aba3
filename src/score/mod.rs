//! High-score persistence
//!
//! The game keeps exactly one persistent value: the best score seen so far.
//! Storage is deliberately forgiving: a missing or unreadable file reads as
//! zero and a failed write is logged and dropped, so no storage problem can
//! ever reach the game loop.

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// External storage for the high-score scalar
pub trait ScoreStore {
    /// Best-effort read; absent or unreadable storage reads as 0
    fn load(&mut self) -> u32;

    /// Best-effort write of a new high score
    fn save(&mut self, value: u32);
}

/// On-disk document format
#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Store backed by a small JSON file
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn try_load(&self) -> Result<u32> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {:?}", self.path))?;
        let record: HighScoreRecord =
            serde_json::from_str(&contents).context("Failed to parse high-score file")?;
        Ok(record.high_score)
    }

    fn try_save(&self, value: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
        }
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: value })
            .context("Failed to serialize high score")?;
        fs::write(&self.path, json).with_context(|| format!("Failed to write {:?}", self.path))
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&mut self) -> u32 {
        if !self.path.exists() {
            // Fresh install, nothing to report
            return 0;
        }
        match self.try_load() {
            Ok(value) => value,
            Err(err) => {
                warn!("high score unreadable, starting from 0: {err:#}");
                0
            }
        }
    }

    fn save(&mut self, value: u32) {
        if let Err(err) = self.try_save(value) {
            warn!("failed to save high score: {err:#}");
        }
    }
}

/// In-memory store, for tests and for running without persistence
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    value: u32,
}

impl MemoryScoreStore {
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> u32 {
        self.value
    }

    fn save(&mut self, value: u32) {
        self.value = value;
    }
}
