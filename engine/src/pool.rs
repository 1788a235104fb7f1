//! Slot Pool
//!
//! Bounded pool of reusable records shared by every entity kind in the
//! simulation (projectiles, ring and pop effects).
//!
//! Slots are allocated lazily up to the capacity and never freed; released
//! slots go onto a free-index stack so `acquire` is O(1) instead of a linear
//! scan for the first inactive entry. A slot index is stable for the life of
//! the pool, so renderers can key their own nodes by [`SlotId`].
//!
//! # Example
//!
//! ```ignore
//! use axe_toss_engine::pool::SlotPool;
//!
//! let mut pool: SlotPool<u32> = SlotPool::with_capacity(2);
//! let a = pool.acquire(10).unwrap();
//! let _b = pool.acquire(20).unwrap();
//! assert!(pool.acquire(30).is_none()); // full
//!
//! pool.release(a);
//! let c = pool.acquire(40).unwrap();
//! assert_eq!(c, a); // slot reused
//! ```

/// Stable index of a slot inside a [`SlotPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(usize);

impl SlotId {
    /// Raw slot index (0-based, dense).
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    item: T,
    active: bool,
}

/// Capacity-bounded pool with an explicit free-index stack.
#[derive(Debug, Clone)]
pub struct SlotPool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    capacity: usize,
    active_count: usize,
}

impl<T> SlotPool<T> {
    /// Create an empty pool that will grow to at most `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(64)),
            free: Vec::new(),
            capacity,
            active_count: 0,
        }
    }

    /// Activate a slot holding `item`.
    ///
    /// Reuses the most recently released slot if there is one, otherwise
    /// allocates a new slot while under capacity. Returns `None` when every
    /// slot is active and the pool is at capacity; the pool is left untouched
    /// in that case.
    pub fn acquire(&mut self, item: T) -> Option<SlotId> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            debug_assert!(!slot.active, "free list held an active slot");
            slot.item = item;
            slot.active = true;
            self.active_count += 1;
            return Some(SlotId(index));
        }

        if self.slots.len() >= self.capacity {
            return None;
        }

        let index = self.slots.len();
        self.slots.push(Slot { item, active: true });
        self.active_count += 1;
        Some(SlotId(index))
    }

    /// Deactivate a slot. Returns `true` if the slot was active.
    ///
    /// Releasing an inactive or unknown slot is a no-op.
    pub fn release(&mut self, id: SlotId) -> bool {
        match self.slots.get_mut(id.0) {
            Some(slot) if slot.active => {
                slot.active = false;
                self.free.push(id.0);
                self.active_count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Release every active slot. Allocated slots are kept for reuse.
    pub fn release_all(&mut self) {
        for index in 0..self.slots.len() {
            self.release(SlotId(index));
        }
    }

    /// Whether the slot exists and is currently active.
    #[inline]
    pub fn is_active(&self, id: SlotId) -> bool {
        self.slots.get(id.0).is_some_and(|slot| slot.active)
    }

    /// Record for an active slot.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.0)
            .filter(|slot| slot.active)
            .map(|slot| &slot.item)
    }

    /// Mutable record for an active slot.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.0)
            .filter(|slot| slot.active)
            .map(|slot| &mut slot.item)
    }

    /// Iterate over active slots in index order.
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(index, slot)| (SlotId(index), &slot.item))
    }

    /// Iterate mutably over active slots in index order.
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(index, slot)| (SlotId(index), &mut slot.item))
    }

    /// Iterate over every allocated slot, active or not.
    ///
    /// Used by the renderer hand-off, which must hide inactive slots.
    pub fn iter_slots(&self) -> impl Iterator<Item = (SlotId, &T, bool)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (SlotId(index), &slot.item, slot.active))
    }

    /// Snapshot of the active slot ids, for passes that release while iterating.
    pub fn active_ids(&self) -> Vec<SlotId> {
        self.iter_active().map(|(id, _)| id).collect()
    }

    /// Number of allocated slots (active + free).
    #[inline]
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Number of active slots.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Maximum number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `true` when no further slot can be acquired.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.free.is_empty() && self.slots.len() >= self.capacity
    }
}
