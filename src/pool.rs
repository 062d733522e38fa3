/// Fixed-capacity entity pools.
///
/// A pool is a slot array that never grows: spawning scans from slot 0 for the
/// first free slot and silently drops the spawn when none is left. Iteration is
/// always in ascending slot order, which collision tie-breaking relies on.

use serde::{Deserialize, Serialize};

/// Index of a slot inside one pool. Only meaningful for the pool that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotIndex(pub usize);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityPool<T> {
    slots: Vec<Option<T>>,
}

impl<T> EntityPool<T> {
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Place `value` in the first inactive slot. Returns `None` when the pool
    /// is exhausted; callers treat that as a dropped spawn.
    pub fn spawn(&mut self, value: T) -> Option<SlotIndex> {
        let index = self.slots.iter().position(Option::is_none)?;
        self.slots[index] = Some(value);
        Some(SlotIndex(index))
    }

    /// Free a slot, handing back what was in it.
    pub fn deactivate(&mut self, index: SlotIndex) -> Option<T> {
        self.slots.get_mut(index.0).and_then(Option::take)
    }

    pub fn is_active(&self, index: SlotIndex) -> bool {
        matches!(self.slots.get(index.0), Some(Some(_)))
    }

    pub fn get(&self, index: SlotIndex) -> Option<&T> {
        self.slots.get(index.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: SlotIndex) -> Option<&mut T> {
        self.slots.get_mut(index.0).and_then(Option::as_mut)
    }

    /// Active entries in ascending slot order.
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotIndex, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (SlotIndex(i), v)))
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (SlotIndex, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|v| (SlotIndex(i), v)))
    }

    /// Run `keep` over every active entry in slot order, deactivating those for
    /// which it returns `false`.
    pub fn update_active<F>(&mut self, mut keep: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        for slot in self.slots.iter_mut() {
            if let Some(value) = slot.as_mut() {
                if !keep(value) {
                    *slot = None;
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_reuses_lowest_free_slot() {
        let mut pool = EntityPool::new(3);
        assert_eq!(pool.spawn('a'), Some(SlotIndex(0)));
        assert_eq!(pool.spawn('b'), Some(SlotIndex(1)));
        assert_eq!(pool.spawn('c'), Some(SlotIndex(2)));
        assert_eq!(pool.deactivate(SlotIndex(1)), Some('b'));
        assert_eq!(pool.spawn('d'), Some(SlotIndex(1)));
    }

    #[test]
    fn deactivate_out_of_range_is_noop() {
        let mut pool: EntityPool<u8> = EntityPool::new(2);
        assert_eq!(pool.deactivate(SlotIndex(7)), None);
        assert!(!pool.is_active(SlotIndex(7)));
    }
}
