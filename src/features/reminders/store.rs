//! Live reminder set
//!
//! The store is the canonical owner of every pending reminder, keyed by
//! owner with insertion order preserved. All mutation goes through one
//! mutex; operations are synchronous and never perform I/O, so the lock is
//! held only for map work.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::entity::{ReminderEntity, ReminderId};
use super::resolver;

#[derive(Default)]
struct Inner {
    /// owner -> reminders in creation order.
    by_owner: HashMap<u64, Vec<ReminderEntity>>,
    /// Secondary index so `remove` does not scan every owner.
    owner_of: HashMap<ReminderId, u64>,
}

/// Thread-safe ordered collection of live reminders.
#[derive(Default)]
pub struct ReminderStore {
    inner: Mutex<Inner>,
}

impl ReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means a panicking thread held it; the map
        // itself is still structurally sound.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a reminder to the tail of its owner's list.
    pub fn add(&self, entity: ReminderEntity) {
        let mut inner = self.lock();
        inner.owner_of.insert(entity.id, entity.owner_id);
        inner.by_owner.entry(entity.owner_id).or_default().push(entity);
    }

    /// Remove a reminder by id, returning it if it was still live.
    ///
    /// Idempotent: the cancel path and the fire path can both call this for
    /// the same id, and the second call is a no-op.
    pub fn remove(&self, id: ReminderId) -> Option<ReminderEntity> {
        let mut inner = self.lock();
        let owner = inner.owner_of.remove(&id)?;
        let list = inner.by_owner.get_mut(&owner)?;
        let pos = list.iter().position(|r| r.id == id)?;
        let entity = list.remove(pos);
        if list.is_empty() {
            inner.by_owner.remove(&owner);
        }
        Some(entity)
    }

    /// Ordered snapshot of one owner's reminders.
    pub fn list(&self, owner_id: u64) -> Vec<ReminderEntity> {
        self.lock()
            .by_owner
            .get(&owner_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolve a user-supplied token (1-based index or literal text) to a
    /// live reminder.
    pub fn resolve(&self, owner_id: u64, token: &str) -> Option<ReminderEntity> {
        let inner = self.lock();
        let list = inner.by_owner.get(&owner_id)?;
        resolver::resolve(list, token).cloned()
    }

    /// Remove and return all of one owner's reminders, in order.
    pub fn take_all(&self, owner_id: u64) -> Vec<ReminderEntity> {
        let mut inner = self.lock();
        let taken = inner.by_owner.remove(&owner_id).unwrap_or_default();
        for entity in &taken {
            inner.owner_of.remove(&entity.id);
        }
        taken
    }

    /// Snapshot of every live reminder, grouped by owner in list order.
    /// Used by the persistence gateway at shutdown.
    pub fn snapshot_all(&self) -> Vec<ReminderEntity> {
        let inner = self.lock();
        let mut owners: Vec<&u64> = inner.by_owner.keys().collect();
        owners.sort_unstable();
        owners
            .into_iter()
            .flat_map(|owner| inner.by_owner[owner].iter().cloned())
            .collect()
    }

    /// Total number of live reminders across all owners.
    pub fn len(&self) -> usize {
        self.lock().owner_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn entity(owner: u64, text: &str) -> ReminderEntity {
        let now = Utc::now();
        ReminderEntity::new(owner, 1, 2, now, now + Duration::hours(1), text.to_string())
    }

    #[test]
    fn test_add_preserves_order() {
        let store = ReminderStore::new();
        store.add(entity(1, "first"));
        store.add(entity(1, "second"));
        store.add(entity(2, "other owner"));

        let list = store.list(1);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].text, "first");
        assert_eq!(list[1].text, "second");
        assert_eq!(store.list(2).len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = ReminderStore::new();
        let e = entity(1, "only");
        let id = e.id;
        store.add(e);

        assert!(store.remove(id).is_some());
        // Second removal is a no-op, not an error.
        assert!(store.remove(id).is_none());
        assert!(store.list(1).is_empty());
    }

    #[test]
    fn test_take_all_clears_owner() {
        let store = ReminderStore::new();
        store.add(entity(1, "a"));
        store.add(entity(1, "b"));
        store.add(entity(2, "keep"));

        let taken = store.take_all(1);
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].text, "a");
        assert!(store.list(1).is_empty());
        assert_eq!(store.len(), 1);
        // Ids were unindexed too.
        assert!(store.remove(taken[0].id).is_none());
    }

    #[test]
    fn test_snapshot_groups_by_owner_in_order() {
        let store = ReminderStore::new();
        store.add(entity(2, "b1"));
        store.add(entity(1, "a1"));
        store.add(entity(1, "a2"));

        let all = store.snapshot_all();
        assert_eq!(all.len(), 3);
        let owner_one: Vec<_> = all.iter().filter(|e| e.owner_id == 1).collect();
        assert_eq!(owner_one[0].text, "a1");
        assert_eq!(owner_one[1].text, "a2");
    }
}
