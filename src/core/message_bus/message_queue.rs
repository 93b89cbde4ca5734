//=========================================================================
// Message Queue
//=========================================================================
//
// Type-erased view over `Vec<M>` so the bus can keep queues of every
// message type in one map.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{type_name, Any};

//=== Internal Dependencies ===============================================

use super::Message;

//=== MessageQueue ========================================================

/// Operations the bus needs without knowing the concrete message type.
pub(super) trait MessageQueue: Send {
    /// Empties the queue, keeping its allocation.
    fn clear_queue(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rust type name of the queued messages, for diagnostics.
    fn message_type(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<M: Message> MessageQueue for Vec<M> {
    fn clear_queue(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn message_type(&self) -> &'static str {
        type_name::<M>()
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
