//! Persisted best score
//!
//! The store holds a single integer. Missing or corrupt values read as 0, and
//! a write that fails is logged and dropped; neither ever ends a session.

/// Persistent store for the best score
pub trait HighScoreStore {
    /// Stored best score, 0 when absent or unreadable
    fn load(&self) -> u64;
    fn save(&mut self, score: u64);
}

/// Record `score` if it beats the stored best. Returns the best score after the update.
pub fn record<S: HighScoreStore + ?Sized>(store: &mut S, score: u64) -> u64 {
    let best = store.load();
    if score > best {
        store.save(score);
        log::info!("New high score: {} (was {})", score, best);
        score
    } else {
        best
    }
}

/// Parse a stored value. Accepts the plain decimal form and any JSON number;
/// fractional values are truncated, anything else reads as 0.
pub fn parse_stored(raw: &str) -> u64 {
    match serde_json::from_str::<serde_json::Value>(raw.trim()) {
        Ok(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        // A JSON string holding a number, e.g. "\"12\""
        Ok(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => {
            log::warn!("Ignoring corrupt high score value {:?}", raw);
            0
        }
    }
}

/// In-process store, used by the native runner and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub best: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u64) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.best
    }

    fn save(&mut self, score: u64) {
        self.best = score;
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "highScore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        Self::storage()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
            .map(|raw| parse_stored(&raw))
            .unwrap_or(0)
    }

    fn save(&mut self, score: u64) {
        match Self::storage() {
            Some(storage) => {
                if storage
                    .set_item(Self::STORAGE_KEY, &score.to_string())
                    .is_err()
                {
                    log::warn!("Failed to save high score");
                }
            }
            None => log::warn!("LocalStorage unavailable, high score not saved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_improves() {
        let mut store = MemoryStore::with_best(5);
        assert_eq!(record(&mut store, 3), 5);
        assert_eq!(store.best, 5);
        assert_eq!(record(&mut store, 5), 5);
        assert_eq!(record(&mut store, 8), 8);
        assert_eq!(store.best, 8);
    }

    #[test]
    fn test_record_zero_on_empty() {
        let mut store = MemoryStore::new();
        assert_eq!(record(&mut store, 0), 0);
        assert_eq!(store.best, 0);
    }

    #[test]
    fn test_parse_stored() {
        assert_eq!(parse_stored("12"), 12);
        assert_eq!(parse_stored(" 7\n"), 7);
        assert_eq!(parse_stored("3.9"), 3);
        assert_eq!(parse_stored("\"42\""), 42);
    }

    #[test]
    fn test_parse_stored_corrupt() {
        assert_eq!(parse_stored(""), 0);
        assert_eq!(parse_stored("abc"), 0);
        assert_eq!(parse_stored("-4"), 0);
        assert_eq!(parse_stored("{\"score\": 3}"), 0);
        assert_eq!(parse_stored("null"), 0);
    }
}
