use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use super::quad::{Quad, SharedQuad};

/// Handle to a quad slot inside a [`TextureAtlas`](super::TextureAtlas).
///
/// Keys are generational: once a slot is released its key stops resolving,
/// even if the slot index is handed to another quad later.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct QuadKey {
    index: u32,
    generation: u32,
}

impl QuadKey {
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

#[derive(Debug)]
struct Entry {
    quad: Weak<RefCell<Quad>>,
    addr: usize,
}

/// Slot table of non-owning quad references, addressed by [`QuadKey`].
#[derive(Debug, Default)]
pub(super) struct QuadSlots {
    slots: Vec<Slot>,
    free: Vec<u32>,
    by_addr: FxHashMap<usize, QuadKey>,
    live: usize,
}

fn addr_of(quad: &SharedQuad) -> usize {
    Rc::as_ptr(quad) as usize
}

impl QuadSlots {
    /// Registers `quad`, or returns its existing key if it is already registered.
    pub(super) fn insert(&mut self, quad: &SharedQuad) -> QuadKey {
        let addr = addr_of(quad);

        if let Some(&key) = self.by_addr.get(&addr) {
            if self.resolve(key).is_some_and(|q| Rc::ptr_eq(&q, quad)) {
                return key;
            }
            // Address reused by a new allocation after the old quad died.
            self.remove(key);
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.entry = Some(Entry { quad: Rc::downgrade(quad), addr });
        let key = QuadKey { index, generation: slot.generation };

        self.by_addr.insert(addr, key);
        self.live += 1;
        key
    }

    /// Releases the slot behind `key`. Stale or foreign keys are ignored.
    pub(super) fn remove(&mut self, key: QuadKey) -> bool {
        let Some(slot) = self.slots.get_mut(key.index as usize) else {
            return false;
        };
        if slot.generation != key.generation {
            return false;
        }
        let Some(entry) = slot.entry.take() else {
            return false;
        };

        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(key.index);
        self.by_addr.remove(&entry.addr);
        self.live -= 1;
        true
    }

    #[inline]
    pub(super) fn contains(&self, key: QuadKey) -> bool {
        self.slots
            .get(key.index as usize)
            .is_some_and(|s| s.generation == key.generation && s.entry.is_some())
    }

    /// Upgrades the slot's quad reference. `None` for stale keys and dead quads.
    pub(super) fn resolve(&self, key: QuadKey) -> Option<SharedQuad> {
        let slot = self.slots.get(key.index as usize)?;
        if slot.generation != key.generation {
            return None;
        }
        slot.entry.as_ref()?.quad.upgrade()
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.live
    }

    /// Live quads in slot order.
    pub(super) fn iter_live(&self) -> impl Iterator<Item = SharedQuad> + '_ {
        self.slots
            .iter()
            .filter_map(|s| s.entry.as_ref().and_then(|e| e.quad.upgrade()))
    }
}
