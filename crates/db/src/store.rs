//! Keyed entity storage.
//!
//! Repositories only talk to [`KeyedStore`], so a persistent backend can
//! replace [`MemoryStore`] without touching the access logic. Every write
//! to a single key is serialized by the store; no operation spans keys.

use std::hash::Hash;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// A concurrent map from entity id to entity.
pub trait KeyedStore<K, V>: Send + Sync {
    /// Snapshot of the value stored under `key`.
    fn get(&self, key: &K) -> Option<V>;

    /// Store `value`, returning whatever it replaced.
    fn put(&self, key: K, value: V) -> Option<V>;

    /// Remove `key`, returning the removed value. Removing a missing key is a no-op.
    fn remove(&self, key: &K) -> Option<V>;

    /// Replace the value under `key` only if it currently equals `expected`
    /// (`None` meaning "absent"). On mismatch the current value is returned.
    fn compare_and_swap(&self, key: &K, expected: Option<&V>, new: V) -> Result<(), Option<V>>;

    /// Run `f` on the stored value while holding the entry exclusively.
    ///
    /// Returns `false` without calling `f` if `key` is absent.
    fn update(&self, key: &K, f: &mut dyn FnMut(&mut V)) -> bool;

    /// Snapshot of every stored value.
    fn values(&self) -> Vec<V>;

    /// Snapshot of every stored key.
    fn keys(&self) -> Vec<K>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Atomically apply `f` to the value under `key` and return its result.
///
/// `None` means the key was absent and `f` never ran.
pub fn modify<K, V, R, S>(store: &S, key: &K, f: impl FnOnce(&mut V) -> R) -> Option<R>
where
    S: KeyedStore<K, V> + ?Sized,
{
    let mut f = Some(f);
    let mut out = None;
    store.update(key, &mut |value| {
        if let Some(f) = f.take() {
            out = Some(f(value));
        }
    });
    out
}

/// In-process store backed by a sharded concurrent hash map.
#[derive(Debug)]
pub struct MemoryStore<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, V>,
}

impl<K, V> MemoryStore<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<K, V> Default for MemoryStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> KeyedStore<K, V> for MemoryStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + PartialEq + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn put(&self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    fn remove(&self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|(_, value)| value)
    }

    fn compare_and_swap(&self, key: &K, expected: Option<&V>, new: V) -> Result<(), Option<V>> {
        match self.entries.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                if expected == Some(occupied.get()) {
                    occupied.insert(new);
                    Ok(())
                } else {
                    Err(Some(occupied.get().clone()))
                }
            }
            Entry::Vacant(vacant) => {
                if expected.is_none() {
                    vacant.insert(new);
                    Ok(())
                } else {
                    Err(None)
                }
            }
        }
    }

    fn update(&self, key: &K, f: &mut dyn FnMut(&mut V)) -> bool {
        match self.entries.get_mut(key) {
            Some(mut entry) => {
                f(entry.value_mut());
                true
            }
            None => false,
        }
    }

    fn values(&self) -> Vec<V> {
        self.entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn keys(&self) -> Vec<K> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
