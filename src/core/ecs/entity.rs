//=========================================================================
// Entity
//=========================================================================
//
// Generational entity handles and their allocator.
//
// An index is recycled after despawn with its generation bumped, so a
// handle kept past despawn never matches the new occupant.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Entity ==============================================================

/// Opaque entity handle: slot index plus generation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

//=== EntityAllocator =====================================================

#[derive(Debug, Default)]
pub(crate) struct EntityAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,
    live_count: usize,
}

impl EntityAllocator {
    pub(crate) fn allocate(&mut self) -> Entity {
        self.live_count += 1;

        if let Some(index) = self.free.pop() {
            let slot = index as usize;
            self.alive[slot] = true;
            return Entity::new(index, self.generations[slot]);
        }

        let index = self.generations.len() as u32;
        self.generations.push(0);
        self.alive.push(true);
        Entity::new(index, 0)
    }

    /// Frees the slot. Returns false for dead or stale handles.
    pub(crate) fn deallocate(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        let slot = entity.index as usize;
        self.alive[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free.push(entity.index);
        self.live_count -= 1;
        true
    }

    pub(crate) fn is_alive(&self, entity: Entity) -> bool {
        let slot = entity.index as usize;
        slot < self.alive.len() && self.alive[slot] && self.generations[slot] == entity.generation
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live_count
    }

    /// Kills every entity; all outstanding handles become stale.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (slot, alive) in self.alive.iter_mut().enumerate() {
            if *alive {
                *alive = false;
                self.generations[slot] = self.generations[slot].wrapping_add(1);
            }
            self.free.push(slot as u32);
        }
        // Pop order hands out low indices first.
        self.free.reverse();
        self.live_count = 0;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entities_get_sequential_indices() {
        let mut alloc = EntityAllocator::default();
        let a = alloc.allocate();
        let b = alloc.allocate();

        assert_eq!((a.index(), a.generation()), (0, 0));
        assert_eq!((b.index(), b.generation()), (1, 0));
        assert_eq!(alloc.live_count(), 2);
    }

    #[test]
    fn recycled_index_bumps_generation() {
        let mut alloc = EntityAllocator::default();
        let a = alloc.allocate();
        assert!(alloc.deallocate(a));

        let b = alloc.allocate();
        assert_eq!(b.index(), a.index());
        assert_eq!(b.generation(), 1);
        assert!(!alloc.is_alive(a));
        assert!(alloc.is_alive(b));
    }

    #[test]
    fn double_free_is_rejected() {
        let mut alloc = EntityAllocator::default();
        let a = alloc.allocate();

        assert!(alloc.deallocate(a));
        assert!(!alloc.deallocate(a));
        assert_eq!(alloc.live_count(), 0);
    }

    #[test]
    fn clear_invalidates_all_handles() {
        let mut alloc = EntityAllocator::default();
        let a = alloc.allocate();
        let b = alloc.allocate();

        alloc.clear();

        assert!(!alloc.is_alive(a));
        assert!(!alloc.is_alive(b));
        assert_eq!(alloc.live_count(), 0);
        assert_eq!(alloc.allocate().index(), 0);
    }

    #[test]
    fn debug_format_is_compact() {
        assert_eq!(format!("{:?}", Entity::new(3, 2)), "Entity(3v2)");
    }
}
