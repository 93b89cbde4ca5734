//=========================================================================
// Component Storage
//=========================================================================
//
// Sparse-set storage: one dense array per component type.
//
// Architecture:
//   sparse: Vec<Option<usize>>   entity index → dense slot
//   dense:  Vec<C>               packed components (cache-friendly iteration)
//   owners: Vec<Entity>          dense slot → owning entity
//
// Removal swap-removes, so iteration order is not insertion order once
// anything has been removed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{type_name, Any};

//=== Internal Dependencies ===============================================

use super::entity::Entity;

//=== Component Trait =====================================================

/// Anything `Send + 'static` can be a component.
pub trait Component: Send + 'static {}

impl<T: Send + 'static> Component for T {}

//=== Storage =============================================================

pub struct Storage<C: Component> {
    sparse: Vec<Option<usize>>,
    dense: Vec<C>,
    owners: Vec<Entity>,
}

impl<C: Component> Default for Storage<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Component> Storage<C> {
    pub fn new() -> Self {
        Self { sparse: Vec::new(), dense: Vec::new(), owners: Vec::new() }
    }

    /// Inserts or replaces. Returns the previous component, if any.
    pub fn insert(&mut self, entity: Entity, component: C) -> Option<C> {
        let slot = entity.index() as usize;
        if slot >= self.sparse.len() {
            self.sparse.resize(slot + 1, None);
        }

        match self.sparse[slot] {
            Some(dense) => {
                // Same slot may hold a stale generation; the new owner takes it.
                self.owners[dense] = entity;
                Some(std::mem::replace(&mut self.dense[dense], component))
            }
            None => {
                self.sparse[slot] = Some(self.dense.len());
                self.dense.push(component);
                self.owners.push(entity);
                None
            }
        }
    }

    pub fn remove(&mut self, entity: Entity) -> Option<C> {
        let dense = self.dense_index(entity)?;
        self.sparse[entity.index() as usize] = None;

        let last = self.dense.len() - 1;
        if dense != last {
            let moved = self.owners[last];
            self.sparse[moved.index() as usize] = Some(dense);
        }

        self.owners.swap_remove(dense);
        Some(self.dense.swap_remove(dense))
    }

    pub fn get(&self, entity: Entity) -> Option<&C> {
        self.dense_index(entity).map(|i| &self.dense[i])
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        self.dense_index(entity).map(move |i| &mut self.dense[i])
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.dense_index(entity).is_some()
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    //--- Iteration --------------------------------------------------------

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &C)> {
        self.owners.iter().copied().zip(self.dense.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut C)> {
        self.owners.iter().copied().zip(self.dense.iter_mut())
    }

    /// Owning entities in dense order.
    pub fn entities(&self) -> &[Entity] {
        &self.owners
    }

    pub fn clear(&mut self) {
        self.sparse.clear();
        self.dense.clear();
        self.owners.clear();
    }

    //--- Internal Helpers -------------------------------------------------

    fn dense_index(&self, entity: Entity) -> Option<usize> {
        let dense = (*self.sparse.get(entity.index() as usize)?)?;
        (self.owners[dense] == entity).then_some(dense)
    }
}

//=== AnyStorage ==========================================================

/// Type-erased storage operations the world needs for every component
/// type at once (despawn, clear).
pub(super) trait AnyStorage: Send {
    fn remove_entity(&mut self, entity: Entity) -> bool;

    fn clear_all(&mut self);

    fn component_type(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> AnyStorage for Storage<C> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn clear_all(&mut self) {
        self.clear();
    }

    fn component_type(&self) -> &'static str {
        type_name::<C>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(i32);

    fn e(index: u32) -> Entity {
        Entity::new(index, 0)
    }

    #[test]
    fn insert_get_and_replace() {
        let mut storage = Storage::new();

        assert_eq!(storage.insert(e(4), Health(100)), None);
        assert_eq!(storage.get(e(4)), Some(&Health(100)));

        assert_eq!(storage.insert(e(4), Health(50)), Some(Health(100)));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn stale_generation_is_not_found() {
        let mut storage = Storage::new();
        storage.insert(Entity::new(2, 0), Health(1));

        assert!(storage.get(Entity::new(2, 1)).is_none());
        assert!(!storage.contains(Entity::new(2, 1)));
    }

    #[test]
    fn swap_remove_keeps_other_entries_reachable() {
        let mut storage = Storage::new();
        storage.insert(e(0), Health(0));
        storage.insert(e(1), Health(10));
        storage.insert(e(2), Health(20));

        assert_eq!(storage.remove(e(0)), Some(Health(0)));

        assert_eq!(storage.get(e(1)), Some(&Health(10)));
        assert_eq!(storage.get(e(2)), Some(&Health(20)));
        assert_eq!(storage.len(), 2);
        assert_eq!(storage.remove(e(0)), None);
    }

    #[test]
    fn iter_mut_edits_in_place() {
        let mut storage = Storage::new();
        storage.insert(e(0), Health(1));
        storage.insert(e(7), Health(2));

        for (_, health) in storage.iter_mut() {
            health.0 *= 10;
        }

        let mut values: Vec<i32> = storage.iter().map(|(_, h)| h.0).collect();
        values.sort();
        assert_eq!(values, vec![10, 20]);
        assert_eq!(storage.entities().len(), 2);
    }

    #[test]
    fn erased_storage_removes_and_names_type() {
        let mut storage = Storage::new();
        storage.insert(e(3), Health(5));

        let erased: &mut dyn AnyStorage = &mut storage;
        assert!(erased.component_type().ends_with("Health"));
        assert!(erased.remove_entity(e(3)));
        assert!(!erased.remove_entity(e(3)));
    }
}
