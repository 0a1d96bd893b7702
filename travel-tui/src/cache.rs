use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

/// Fixed keys of the session cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    BusinessTrips,
    ExpenseTypes,
    Analytics,
}

impl CacheKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::BusinessTrips => "businessTripsData",
            CacheKey::ExpenseTypes => "expenseTypesData",
            CacheKey::Analytics => "analyticsData",
        }
    }
}

/// Serialized payloads kept for the lifetime of the process.
///
/// Reads happen before a fetch and writes after a successful one; mutating
/// actions clear the keys whose data they make stale.
#[derive(Debug, Default)]
pub struct SessionCache {
    enabled: bool,
    entries: HashMap<CacheKey, String>,
}

impl SessionCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: HashMap::new(),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: CacheKey) -> Option<T> {
        if !self.enabled {
            return None;
        }
        let raw = self.entries.get(&key)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key = key.as_str(), error = %err, "discarding unreadable cache entry");
                None
            }
        }
    }

    pub fn put<T: Serialize>(&mut self, key: CacheKey, value: &T) {
        if !self.enabled {
            return;
        }
        match serde_json::to_string(value) {
            Ok(raw) => {
                self.entries.insert(key, raw);
            }
            Err(err) => {
                tracing::warn!(key = key.as_str(), error = %err, "could not cache payload");
            }
        }
    }

    pub fn invalidate(&mut self, keys: &[CacheKey]) {
        for key in keys {
            if self.entries.remove(key).is_some() {
                tracing::debug!(key = key.as_str(), "cache entry invalidated");
            }
        }
    }

    #[cfg(test)]
    pub fn contains(&self, key: CacheKey) -> bool {
        self.entries.contains_key(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExpenseType;

    fn types() -> Vec<ExpenseType> {
        vec![ExpenseType {
            id: 1,
            name: "Проезд".to_string(),
        }]
    }

    #[test]
    fn stored_payload_is_served_back() {
        let mut cache = SessionCache::new(true);
        cache.put(CacheKey::ExpenseTypes, &types());

        let cached: Option<Vec<ExpenseType>> = cache.get(CacheKey::ExpenseTypes);
        assert_eq!(cached, Some(types()));
        assert!(!cache.contains(CacheKey::Analytics));
    }

    #[test]
    fn invalidate_clears_only_named_keys() {
        let mut cache = SessionCache::new(true);
        cache.put(CacheKey::ExpenseTypes, &types());
        cache.put(CacheKey::BusinessTrips, &Vec::<u8>::new());

        cache.invalidate(&[CacheKey::ExpenseTypes, CacheKey::Analytics]);

        assert!(!cache.contains(CacheKey::ExpenseTypes));
        assert!(cache.contains(CacheKey::BusinessTrips));
    }

    #[test]
    fn disabled_cache_never_stores() {
        let mut cache = SessionCache::new(false);
        cache.put(CacheKey::ExpenseTypes, &types());

        assert!(!cache.contains(CacheKey::ExpenseTypes));
        assert_eq!(cache.get::<Vec<ExpenseType>>(CacheKey::ExpenseTypes), None);
    }

    #[test]
    fn payload_of_wrong_shape_is_a_miss() {
        let mut cache = SessionCache::new(true);
        cache.put(CacheKey::Analytics, &"not analytics");

        assert_eq!(cache.get::<Vec<ExpenseType>>(CacheKey::Analytics), None);
    }
}
