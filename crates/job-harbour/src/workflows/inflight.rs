use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};

/// Targets with a collaborator call outstanding.
///
/// A marker lives exactly as long as its [`InFlightGuard`]; dropping the guard (including by
/// dropping the future that owns it) releases the target.
#[derive(Debug)]
pub(crate) struct InFlight<K> {
    active: Mutex<HashSet<K>>,
}

impl<K> Default for InFlight<K> {
    fn default() -> Self {
        Self {
            active: Mutex::new(HashSet::new()),
        }
    }
}

impl<K: Eq + Hash + Clone> InFlight<K> {
    /// `None` when `key` already has a call outstanding.
    pub(crate) fn try_begin(&self, key: K) -> Option<InFlightGuard<'_, K>> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if !active.insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            registry: self,
            key,
        })
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

#[derive(Debug)]
pub(crate) struct InFlightGuard<'a, K: Eq + Hash> {
    registry: &'a InFlight<K>,
    key: K,
}

impl<K: Eq + Hash> Drop for InFlightGuard<'_, K> {
    fn drop(&mut self) {
        self.registry
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_on_same_key_is_refused_until_guard_drops() {
        let registry = InFlight::default();
        let guard = registry.try_begin("j1").expect("first begin");
        assert!(registry.try_begin("j1").is_none());
        assert!(registry.contains(&"j1"));

        drop(guard);
        assert!(registry.is_idle());
        assert!(registry.try_begin("j1").is_some());
    }

    #[test]
    fn distinct_keys_do_not_block_each_other() {
        let registry = InFlight::default();
        let _first = registry.try_begin("j1").expect("j1");
        let _second = registry.try_begin("j2").expect("j2");
        assert!(!registry.is_idle());
    }
}
