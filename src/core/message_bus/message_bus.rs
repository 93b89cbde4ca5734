//=========================================================================
// Message Bus
//=========================================================================
//
// Type-safe multi-consumer message queue for inter-system communication.
//
// Architecture:
//   Systems → push<M>() → HashMap<TypeId, Vec<M>>
//                              ↓
//   Multiple consumers ← read<M>() (shared)
//   Single consumer    ← drain<M>() (owned)
//                              ↓
//   Owner ───────────→ clear<M>() at tick boundary
//
// Each message type has exactly one owner that clears it. Action events
// are owned by the input pipeline, scene transitions by the scene
// manager, game events by the scene that consumes them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

use log::trace;

//=== Internal Dependencies ===============================================

use super::message_queue::MessageQueue;

//=== Message Trait =======================================================

/// Anything `Send + 'static` can travel on the bus.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=== MessageBus ==========================================================

/// One queue per message type, created on first push.
#[derive(Default)]
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Message Operations -----------------------------------------------

    /// Appends a message to the queue for its type.
    pub fn push<M: Message>(&mut self, msg: M) {
        let queue = self
            .queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()));

        // Keyed by TypeId, so the downcast always succeeds.
        if let Some(vec) = queue.as_any_mut().downcast_mut::<Vec<M>>() {
            vec.push(msg);
        }
    }

    /// All queued messages of type `M`, oldest first.
    ///
    /// Any number of systems may read the same messages within a tick.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queue::<M>().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes and returns every queued message of type `M`.
    ///
    /// For message types with a single consumer. The queue keeps its
    /// allocation.
    pub fn drain<M: Message>(&mut self) -> Vec<M> {
        self.queue_mut::<M>()
            .map(|vec| vec.drain(..).collect())
            .unwrap_or_default()
    }

    //--- Query API --------------------------------------------------------

    pub fn has_messages<M: Message>(&self) -> bool {
        self.count::<M>() > 0
    }

    pub fn count<M: Message>(&self) -> usize {
        self.queue::<M>().map_or(0, Vec::len)
    }

    /// Total number of messages across every type.
    pub fn total_count(&self) -> usize {
        self.queues.values().map(|q| q.len()).sum()
    }

    //--- Clearing ---------------------------------------------------------

    /// Empties the queue for `M`, keeping its allocation.
    pub fn clear<M: Message>(&mut self) {
        if let Some(vec) = self.queue_mut::<M>() {
            vec.clear();
        }
    }

    /// Empties every queue.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            if !queue.is_empty() {
                trace!("Clearing {} queued {}", queue.len(), queue.message_type());
            }
            queue.clear_queue();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn queue<M: Message>(&self) -> Option<&Vec<M>> {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
    }

    fn queue_mut<M: Message>(&mut self) -> Option<&mut Vec<M>> {
        self.queues
            .get_mut(&TypeId::of::<M>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<M>>())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Hit {
        damage: i32,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Alert {
        Crash,
        Landed,
    }

    //=====================================================================
    // Push & Read
    //=====================================================================

    #[test]
    fn empty_bus_reads_nothing() {
        let bus = MessageBus::new();
        assert!(bus.read::<Hit>().is_empty());
        assert!(!bus.has_messages::<Hit>());
        assert_eq!(bus.total_count(), 0);
    }

    #[test]
    fn messages_are_read_in_push_order() {
        let mut bus = MessageBus::new();
        bus.push(Hit { damage: 10 });
        bus.push(Hit { damage: 20 });

        let hits = bus.read::<Hit>();
        assert_eq!(hits, &[Hit { damage: 10 }, Hit { damage: 20 }]);
    }

    #[test]
    fn types_do_not_share_queues() {
        let mut bus = MessageBus::new();
        bus.push(Hit { damage: 10 });
        bus.push(Alert::Crash);
        bus.push(Alert::Landed);

        assert_eq!(bus.count::<Hit>(), 1);
        assert_eq!(bus.count::<Alert>(), 2);
        assert_eq!(bus.total_count(), 3);
    }

    #[test]
    fn repeated_reads_see_the_same_messages() {
        let mut bus = MessageBus::new();
        bus.push(Alert::Crash);

        assert_eq!(bus.read::<Alert>().len(), 1);
        assert_eq!(bus.read::<Alert>().len(), 1);
    }

    //=====================================================================
    // Drain & Clear
    //=====================================================================

    #[test]
    fn drain_takes_messages_of_one_type() {
        let mut bus = MessageBus::new();
        bus.push(Hit { damage: 5 });
        bus.push(Alert::Landed);

        let drained = bus.drain::<Hit>();

        assert_eq!(drained, vec![Hit { damage: 5 }]);
        assert!(!bus.has_messages::<Hit>());
        assert!(bus.has_messages::<Alert>());
    }

    #[test]
    fn drain_of_unknown_type_is_empty() {
        let mut bus = MessageBus::new();
        assert!(bus.drain::<Hit>().is_empty());
    }

    #[test]
    fn clear_is_per_type() {
        let mut bus = MessageBus::new();
        bus.push(Hit { damage: 1 });
        bus.push(Alert::Crash);

        bus.clear::<Hit>();

        assert_eq!(bus.count::<Hit>(), 0);
        assert_eq!(bus.count::<Alert>(), 1);
    }

    #[test]
    fn clear_all_then_reuse() {
        let mut bus = MessageBus::new();
        for damage in 0..40 {
            bus.push(Hit { damage });
        }
        bus.push(Alert::Crash);

        bus.clear_all();
        assert_eq!(bus.total_count(), 0);

        bus.push(Hit { damage: 99 });
        assert_eq!(bus.read::<Hit>(), &[Hit { damage: 99 }]);
    }
}
