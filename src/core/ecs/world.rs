//=========================================================================
// World
//=========================================================================
//
// Owns every entity and one sparse-set storage per component type.
//
// Architecture:
//   EntityAllocator                 (generational ids)
//   HashMap<TypeId, Box<dyn AnyStorage>>
//        ↓ downcast
//   Storage<C>                      (typed access)
//
// Operations on dead or stale entities are no-ops.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

use log::trace;

//=== Internal Dependencies ===============================================

use super::entity::{Entity, EntityAllocator};
use super::storage::{AnyStorage, Component, Storage};

//=== World ===============================================================

#[derive(Default)]
pub struct World {
    entities: EntityAllocator,
    storages: HashMap<TypeId, Box<dyn AnyStorage>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Entity Lifecycle -------------------------------------------------

    pub fn spawn(&mut self) -> Entity {
        self.entities.allocate()
    }

    /// Spawns an entity and returns a builder for attaching components.
    ///
    /// ```
    /// use rotorfort::core::ecs::World;
    ///
    /// struct Position(f32, f32);
    /// struct Name(&'static str);
    ///
    /// let mut world = World::new();
    /// let e = world.build_entity().with(Position(1.0, 2.0)).with(Name("pad")).build();
    ///
    /// assert!(world.has::<Position>(e));
    /// assert_eq!(world.get::<Name>(e).map(|n| n.0), Some("pad"));
    /// ```
    pub fn build_entity(&mut self) -> EntityBuilder<'_> {
        let entity = self.spawn();
        EntityBuilder { world: self, entity }
    }

    /// Removes the entity and all of its components.
    ///
    /// Returns false if the entity was already dead.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.entities.deallocate(entity) {
            return false;
        }

        for storage in self.storages.values_mut() {
            if storage.remove_entity(entity) {
                trace!("Despawn {:?}: dropped {}", entity, storage.component_type());
            }
        }
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.live_count()
    }

    /// Despawns everything. Storages keep their allocations.
    pub fn clear(&mut self) {
        for storage in self.storages.values_mut() {
            storage.clear_all();
        }
        self.entities.clear();
    }

    //--- Components -------------------------------------------------------

    /// Attaches or replaces a component. Returns false for dead entities.
    pub fn insert<C: Component>(&mut self, entity: Entity, component: C) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        if let Some(storage) = self.storage_mut::<C>() {
            storage.insert(entity, component);
            return true;
        }

        let mut storage = Storage::<C>::new();
        storage.insert(entity, component);
        self.storages.insert(TypeId::of::<C>(), Box::new(storage));
        true
    }

    pub fn remove<C: Component>(&mut self, entity: Entity) -> Option<C> {
        if !self.is_alive(entity) {
            return None;
        }
        self.storage_mut::<C>()?.remove(entity)
    }

    pub fn get<C: Component>(&self, entity: Entity) -> Option<&C> {
        if !self.is_alive(entity) {
            return None;
        }
        self.storage::<C>()?.get(entity)
    }

    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        if !self.is_alive(entity) {
            return None;
        }
        self.storage_mut::<C>()?.get_mut(entity)
    }

    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        self.get::<C>(entity).is_some()
    }

    //--- Storage Access ---------------------------------------------------

    pub fn storage<C: Component>(&self) -> Option<&Storage<C>> {
        self.storages
            .get(&TypeId::of::<C>())
            .and_then(|s| s.as_any().downcast_ref::<Storage<C>>())
    }

    pub fn storage_mut<C: Component>(&mut self) -> Option<&mut Storage<C>> {
        self.storages
            .get_mut(&TypeId::of::<C>())
            .and_then(|s| s.as_any_mut().downcast_mut::<Storage<C>>())
    }

    /// Snapshot of every entity holding `C`, so callers may mutate the
    /// world while walking it.
    pub fn entities_with<C: Component>(&self) -> Vec<Entity> {
        self.storage::<C>()
            .map(|s| s.entities().to_vec())
            .unwrap_or_default()
    }

    pub fn count<C: Component>(&self) -> usize {
        self.storage::<C>().map_or(0, Storage::len)
    }
}

//=== EntityBuilder =======================================================

/// Chained component attachment for a freshly spawned entity.
pub struct EntityBuilder<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl EntityBuilder<'_> {
    pub fn with<C: Component>(self, component: C) -> Self {
        self.world.insert(self.entity, component);
        self
    }

    pub fn build(self) -> Entity {
        self.entity
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Position(f32, f32);

    #[derive(Debug, PartialEq)]
    struct Health(i32);

    struct Marker;

    //=====================================================================
    // Entity Lifecycle
    //=====================================================================

    #[test]
    fn despawn_removes_every_component() {
        let mut world = World::new();
        let e = world.build_entity().with(Position(0.0, 0.0)).with(Health(3)).build();

        assert!(world.despawn(e));

        assert!(!world.is_alive(e));
        assert_eq!(world.count::<Position>(), 0);
        assert_eq!(world.count::<Health>(), 0);
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn despawn_twice_returns_false() {
        let mut world = World::new();
        let e = world.spawn();

        assert!(world.despawn(e));
        assert!(!world.despawn(e));
    }

    #[test]
    fn recycled_slot_does_not_inherit_components() {
        let mut world = World::new();
        let old = world.build_entity().with(Health(10)).build();
        world.despawn(old);

        let new = world.spawn();
        assert_eq!(new.index(), old.index());
        assert!(world.get::<Health>(new).is_none());
        assert!(world.get::<Health>(old).is_none());
    }

    #[test]
    fn clear_kills_everything() {
        let mut world = World::new();
        let a = world.build_entity().with(Marker).build();
        let b = world.build_entity().with(Health(1)).build();

        world.clear();

        assert!(!world.is_alive(a));
        assert!(!world.is_alive(b));
        assert_eq!(world.entity_count(), 0);
        assert!(world.entities_with::<Marker>().is_empty());
    }

    //=====================================================================
    // Components
    //=====================================================================

    #[test]
    fn insert_on_dead_entity_is_ignored() {
        let mut world = World::new();
        let e = world.spawn();
        world.despawn(e);

        assert!(!world.insert(e, Health(5)));
        assert_eq!(world.count::<Health>(), 0);
    }

    #[test]
    fn get_mut_edits_component() {
        let mut world = World::new();
        let e = world.build_entity().with(Health(100)).build();

        if let Some(health) = world.get_mut::<Health>(e) {
            health.0 -= 10;
        }

        assert_eq!(world.get::<Health>(e), Some(&Health(90)));
    }

    #[test]
    fn remove_detaches_single_component() {
        let mut world = World::new();
        let e = world.build_entity().with(Health(1)).with(Marker).build();

        assert_eq!(world.remove::<Health>(e), Some(Health(1)));
        assert!(!world.has::<Health>(e));
        assert!(world.has::<Marker>(e));
        assert_eq!(world.remove::<Position>(e), None);
    }

    #[test]
    fn entities_with_lists_holders_only() {
        let mut world = World::new();
        let a = world.build_entity().with(Marker).build();
        let _b = world.build_entity().with(Health(1)).build();
        let c = world.build_entity().with(Marker).with(Health(2)).build();

        let mut holders = world.entities_with::<Marker>();
        holders.sort();
        assert_eq!(holders, vec![a, c]);
        assert_eq!(world.count::<Health>(), 2);
    }

    #[test]
    fn storage_mut_iterates_all_components() {
        let mut world = World::new();
        world.build_entity().with(Position(1.0, 1.0)).build();
        world.build_entity().with(Position(2.0, 2.0)).build();

        if let Some(positions) = world.storage_mut::<Position>() {
            for (_, p) in positions.iter_mut() {
                p.0 += 10.0;
            }
        }

        let sum: f32 = world
            .storage::<Position>()
            .map(|s| s.iter().map(|(_, p)| p.0).sum())
            .unwrap_or(0.0);
        assert_eq!(sum, 23.0);
    }

    #[test]
    fn unknown_component_storage_is_none() {
        let world = World::new();
        assert!(world.storage::<Health>().is_none());
        assert_eq!(world.count::<Health>(), 0);
    }
}
