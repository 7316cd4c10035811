//! Campaign progress record
//!
//! Persisted to LocalStorage, tracks which levels are unlocked and
//! completed. Level 1 is always unlocked; corrupt or missing saves fall
//! back to a fresh record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of campaign levels
pub const LEVEL_COUNT: u32 = 10;

/// Persisted unlock/completion state
///
/// `unlocked` is indexed by level id; index 0 is unused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    pub current_level: u32,
    pub unlocked: Vec<bool>,
    #[serde(default)]
    pub completed: BTreeMap<u32, bool>,
}

impl Default for Progress {
    fn default() -> Self {
        let mut unlocked = vec![false; LEVEL_COUNT as usize + 1];
        unlocked[1] = true;
        Self {
            current_level: 1,
            unlocked,
            completed: BTreeMap::new(),
        }
    }
}

impl Progress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gunrun_progress";

    pub fn is_unlocked(&self, id: u32) -> bool {
        self.unlocked.get(id as usize).copied().unwrap_or(false)
    }

    pub fn is_completed(&self, id: u32) -> bool {
        self.completed.get(&id).copied().unwrap_or(false)
    }

    /// Mark a level completed and unlock the next one (if any exists)
    pub fn complete_level(&mut self, id: u32) {
        self.completed.insert(id, true);
        self.current_level = id;
        if id < LEVEL_COUNT {
            self.unlocked[id as usize + 1] = true;
        }
    }

    /// Repair invariants on anything that came from storage: the array
    /// covers all ids and level 1 is unlocked
    fn sanitize(mut self) -> Self {
        self.unlocked.resize(LEVEL_COUNT as usize + 1, false);
        self.unlocked[1] = true;
        self
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Progress>(&json) {
                    Ok(progress) => {
                        log::info!("Loaded campaign progress");
                        return progress.sanitize();
                    }
                    Err(e) => log::warn!("Corrupt progress record, starting fresh: {e}"),
                }
            }
        }

        log::info!("No saved progress, starting fresh");
        Self::default()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Progress saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }

    /// Parse a persisted record, falling back to defaults on corruption
    /// (shared by `load` and tests)
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str::<Progress>(json)
            .map(Self::sanitize)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_only_level_one_unlocked() {
        let p = Progress::default();
        assert!(p.is_unlocked(1));
        for id in 2..=LEVEL_COUNT {
            assert!(!p.is_unlocked(id));
        }
        assert!(!p.is_completed(1));
        assert_eq!(p.current_level, 1);
    }

    #[test]
    fn test_complete_unlocks_next() {
        let mut p = Progress::default();
        p.complete_level(6);
        assert!(p.is_completed(6));
        assert!(p.is_unlocked(7));
        assert!(!p.is_unlocked(8));
    }

    #[test]
    fn test_complete_last_level_no_overflow() {
        let mut p = Progress::default();
        p.complete_level(10);
        assert!(p.is_completed(10));
        assert_eq!(p.unlocked.len(), LEVEL_COUNT as usize + 1);
        assert!(!p.is_unlocked(11));
    }

    #[test]
    fn test_corrupt_json_falls_back_to_defaults() {
        let p = Progress::from_json("{not json");
        assert!(p.is_unlocked(1));
        assert!(!p.is_unlocked(2));
    }

    #[test]
    fn test_loaded_record_forces_level_one_unlocked() {
        let p = Progress::from_json(
            r#"{"current_level":3,"unlocked":[false,false,true,true],"completed":{"2":true}}"#,
        );
        assert!(p.is_unlocked(1));
        assert!(p.is_unlocked(3));
        assert!(p.is_completed(2));
        // Short arrays are padded out to the full catalog
        assert!(!p.is_unlocked(10));
        assert_eq!(p.unlocked.len(), LEVEL_COUNT as usize + 1);
    }

    #[test]
    fn test_round_trip() {
        let mut p = Progress::default();
        p.complete_level(1);
        p.complete_level(2);
        let json = serde_json::to_string(&p).unwrap();
        let back = Progress::from_json(&json);
        assert!(back.is_completed(2));
        assert!(back.is_unlocked(3));
        assert_eq!(back.current_level, 2);
    }
}
