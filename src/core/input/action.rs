//=========================================================================
// Action Trait & Input Context
//=========================================================================
//
// Actions: game-defined identifiers, routed by the engine, interpreted by
// scenes. Contexts: separate binding sets for separate game states.
// ActionEvent: what the InputSystem publishes on the message bus each tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for game-defined action enums.
///
/// ```
/// use rotorfort::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum ShipAction { Thrust, Fire }
///
/// impl Action for ShipAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== InputContext ========================================================

/// Identifies which set of bindings is active.
///
/// ```
/// # use rotorfort::prelude::*;
/// const FLIGHT: InputContext = InputContext::Primary;
/// const MENU: InputContext = InputContext::custom(0);
/// assert_ne!(FLIGHT, MENU);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputContext {
    #[default]
    Primary,
    Custom(u32),
}

impl InputContext {
    #[inline]
    pub const fn custom(id: u32) -> Self {
        Self::Custom(id)
    }
}

//=== ActionPhase =========================================================

/// Lifecycle of a bound input within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    /// A bound key went down this tick.
    Pressed,
    /// A bound key is down (also reported on the Pressed tick).
    Held,
    /// A bound key went up this tick.
    Released,
}

//=== ActionEvent =========================================================

/// Action message published on the bus by the InputSystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionEvent<A: Action> {
    pub action: A,
    pub phase: ActionPhase,
}

impl<A: Action> ActionEvent<A> {
    pub fn new(action: A, phase: ActionPhase) -> Self {
        Self { action, phase }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Fire,
        Pause,
    }

    impl Action for TestAction {}

    #[test]
    fn action_is_send_and_static() {
        fn assert_bounds<T: Send + 'static>() {}
        assert_bounds::<TestAction>();
    }

    #[test]
    fn input_context_defaults_to_primary() {
        assert_eq!(InputContext::default(), InputContext::Primary);
        assert_ne!(InputContext::Primary, InputContext::custom(0));
    }

    #[test]
    fn action_events_distinguish_phase() {
        let mut set = HashSet::new();
        set.insert(ActionEvent::new(TestAction::Fire, ActionPhase::Pressed));
        set.insert(ActionEvent::new(TestAction::Fire, ActionPhase::Held));
        set.insert(ActionEvent::new(TestAction::Fire, ActionPhase::Held));
        set.insert(ActionEvent::new(TestAction::Pause, ActionPhase::Pressed));

        assert_eq!(set.len(), 3);
    }
}
