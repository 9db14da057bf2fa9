// In-memory language pair store using DashMap
use crate::domain::model::LanguagePair;
use crate::domain::traits::PairStore;
use dashmap::DashMap;

/// Thread-safe, process-lifetime pair store.
///
/// Pairs are overwritten on re-pairing and never expire.
pub struct MemoryPairStore {
    map: DashMap<String, LanguagePair>,
}

impl MemoryPairStore {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }
}

impl Default for MemoryPairStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PairStore for MemoryPairStore {
    fn get(&self, user_id: &str) -> Option<LanguagePair> {
        self.map.get(user_id).map(|entry| entry.value().clone())
    }

    fn set(&self, user_id: &str, pair: LanguagePair) {
        self.map.insert(user_id.to_string(), pair);
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}
