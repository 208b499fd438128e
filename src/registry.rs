//! Subscription registry for the continuous location stream
//!
//! The registry is plain bookkeeping, it never talks to the native side.
//! Subscriber entries live in an append-only slot vector: a released slot is
//! cleared in place and never compacted, so indices stay stable for the
//! lifetime of the collection. Every registration is stamped with a
//! monotonically increasing generation, and an id only matches a slot when
//! both index and generation agree. A stale id can therefore never release
//! an entry that reuses its index after the collection was emptied.

use crate::native::ListenerHandle;

/// Identifier of one registered subscriber
///
/// Minted by `SubscriptionRegistry::register` and valid until the entry is
/// released or the whole collection is drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    index: usize,
    generation: u64,
}

impl SubscriptionId {
    fn new(index: usize, generation: u64) -> Self {
        SubscriptionId { index, generation }
    }

    /// Slot index within the registry
    pub fn index(&self) -> usize {
        self.index
    }

    /// Generation stamp assigned at registration
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Listener handles held by one subscriber
///
/// Location and status listeners are always present, the error listener
/// only when the subscriber supplied an error handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerBindings {
    location: ListenerHandle,
    status: ListenerHandle,
    error: Option<ListenerHandle>,
}

impl ListenerBindings {
    pub fn new(location: ListenerHandle, status: ListenerHandle) -> Self {
        Self {
            location,
            status,
            error: None,
        }
    }

    pub fn with_error(mut self, handle: ListenerHandle) -> Self {
        self.error = Some(handle);
        self
    }

    /// All held handles in release order: location, status, then error
    pub fn handles(&self) -> Vec<ListenerHandle> {
        let mut handles = vec![self.location, self.status];
        if let Some(error) = self.error {
            handles.push(error);
        }
        handles
    }
}

struct Entry {
    generation: u64,
    bindings: ListenerBindings,
}

/// Registry of active positioning subscribers and the update-stream flag
pub struct SubscriptionRegistry {
    slots: Vec<Option<Entry>>,
    next_generation: u64,
    updates_enabled: bool,
}

impl SubscriptionRegistry {
    /// Create an empty registry with the update stream disabled
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_generation: 1,
            updates_enabled: false,
        }
    }

    /// Append a subscriber entry and return its id
    pub fn register(&mut self, bindings: ListenerBindings) -> SubscriptionId {
        let generation = self.next_generation;
        self.next_generation += 1;

        let id = SubscriptionId::new(self.slots.len(), generation);
        self.slots.push(Some(Entry {
            generation,
            bindings,
        }));
        id
    }

    /// Clear the entry for `id` and hand its bindings back
    ///
    /// Returns None when the id points at a cleared slot, an out-of-range
    /// index, or a slot reused under a newer generation. The slot itself
    /// stays in place so later indices are unaffected.
    pub fn release(&mut self, id: SubscriptionId) -> Option<ListenerBindings> {
        let slot = self.slots.get_mut(id.index)?;
        let is_current = matches!(slot, Some(entry) if entry.generation == id.generation);
        if is_current {
            slot.take().map(|entry| entry.bindings)
        } else {
            None
        }
    }

    /// Whether any occupied entry remains
    pub fn has_live_entries(&self) -> bool {
        self.slots.iter().any(|slot| slot.is_some())
    }

    /// Number of occupied entries
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Total number of slots, cleared ones included
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Take every occupied entry's bindings and empty the collection
    ///
    /// Previously issued ids are left permanently stale, new registrations
    /// start again at index zero under fresh generations.
    pub fn drain_live(&mut self) -> Vec<ListenerBindings> {
        self.slots
            .drain(..)
            .flatten()
            .map(|entry| entry.bindings)
            .collect()
    }

    /// Whether the native update stream is currently active
    pub fn updates_enabled(&self) -> bool {
        self.updates_enabled
    }

    pub fn set_updates_enabled(&mut self, enabled: bool) {
        self.updates_enabled = enabled;
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(base: u64) -> ListenerBindings {
        ListenerBindings::new(ListenerHandle::new(base), ListenerHandle::new(base + 1))
    }

    #[test]
    fn test_register_appends_in_order() {
        let mut registry = SubscriptionRegistry::new();

        let a = registry.register(bindings(10));
        let b = registry.register(bindings(20));
        let c = registry.register(bindings(30));

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(c.index(), 2);
        assert_eq!(registry.slot_count(), 3);
        assert_eq!(registry.live_count(), 3);
    }

    #[test]
    fn test_release_returns_bindings_exactly_once() {
        let mut registry = SubscriptionRegistry::new();
        let id = registry.register(
            bindings(10).with_error(ListenerHandle::new(12)),
        );

        let released = registry.release(id).unwrap();
        assert_eq!(
            released.handles(),
            vec![
                ListenerHandle::new(10),
                ListenerHandle::new(11),
                ListenerHandle::new(12)
            ]
        );

        // The slot is cleared, a second release finds nothing
        assert!(registry.release(id).is_none());
        assert_eq!(registry.slot_count(), 1);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_cleared_slots_keep_indices_stable() {
        let mut registry = SubscriptionRegistry::new();
        let a = registry.register(bindings(10));
        let b = registry.register(bindings(20));

        registry.release(a);
        let c = registry.register(bindings(30));

        // The cleared slot is not reused while the collection lives
        assert_eq!(c.index(), 2);
        assert_eq!(registry.release(b).unwrap().handles()[0], ListenerHandle::new(20));
    }

    #[test]
    fn test_out_of_range_id_is_ignored() {
        let mut minting = SubscriptionRegistry::new();
        minting.register(bindings(10));
        let foreign = minting.register(bindings(20));

        let mut registry = SubscriptionRegistry::new();
        registry.register(bindings(30));

        assert!(registry.release(foreign).is_none());
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn test_stale_generation_cannot_release_reused_index() {
        let mut registry = SubscriptionRegistry::new();
        let stale = registry.register(bindings(10));
        registry.drain_live();

        // Index zero is reused under a newer generation
        let fresh = registry.register(bindings(20));
        assert_eq!(fresh.index(), stale.index());
        assert_ne!(fresh.generation(), stale.generation());

        assert!(registry.release(stale).is_none());
        assert_eq!(registry.live_count(), 1);
        assert!(registry.release(fresh).is_some());
    }

    #[test]
    fn test_drain_live_empties_collection() {
        let mut registry = SubscriptionRegistry::new();
        let a = registry.register(bindings(10));
        registry.register(bindings(20));
        registry.register(bindings(30));
        registry.release(a);

        let drained = registry.drain_live();
        assert_eq!(drained.len(), 2);
        assert_eq!(registry.slot_count(), 0);
        assert!(!registry.has_live_entries());
    }

    #[test]
    fn test_updates_flag_toggles() {
        let mut registry = SubscriptionRegistry::new();
        assert!(!registry.updates_enabled());

        registry.set_updates_enabled(true);
        assert!(registry.updates_enabled());

        registry.set_updates_enabled(false);
        assert!(!registry.updates_enabled());
    }
}
