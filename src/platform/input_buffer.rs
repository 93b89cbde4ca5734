//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-frame accumulator between winit callbacks and the core thread.
//
// Two lanes:
//   discrete:   key/button transitions, in arrival order
//   continuous: cursor motion, coalesced so only the latest survives
//
// Flushed once per RedrawRequested. Capacity is kept across frames.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: Option<InputEvent>,
}

impl InputBuffer {
    const DISCRETE_CAPACITY: usize = 64;

    pub(crate) fn new() -> Self {
        Self {
            discrete: Vec::with_capacity(Self::DISCRETE_CAPACITY),
            continuous: None,
        }
    }

    /// Appends a key or button transition. An exact repeat of the last
    /// event (OS key repeat) is dropped.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// Replaces any pending cursor motion.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous = Some(event);
    }

    /// Takes both lanes, or `None` if nothing was buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = self.discrete.drain(..).collect();
        let continuous = self.continuous.take().into_iter().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + usize::from(self.continuous.is_some())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;

    fn mouse_move(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    #[test]
    fn repeated_key_down_is_dropped() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(InputEvent::key_down(KeyCode::ArrowUp));
        buffer.push_discrete(InputEvent::key_down(KeyCode::ArrowUp));
        buffer.push_discrete(InputEvent::key_down(KeyCode::Space));

        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn tap_within_one_frame_keeps_both_edges() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(InputEvent::key_down(KeyCode::Space));
        buffer.push_discrete(InputEvent::key_up(KeyCode::Space));

        let (discrete, _) = buffer.drain().unwrap();
        assert_eq!(
            discrete,
            vec![InputEvent::key_down(KeyCode::Space), InputEvent::key_up(KeyCode::Space)]
        );
    }

    #[test]
    fn cursor_motion_keeps_latest_only() {
        let mut buffer = InputBuffer::new();
        buffer.push_continuous(mouse_move(10.0, 10.0));
        buffer.push_continuous(mouse_move(20.0, 30.0));

        let (_, continuous) = buffer.drain().unwrap();
        assert_eq!(continuous.len(), 1);
        match continuous[0] {
            InputEvent::MouseMoved { x, y } => assert_eq!((x, y), (20.0, 30.0)),
            ref other => panic!("expected MouseMoved, got {:?}", other),
        }
    }

    #[test]
    fn empty_buffer_drains_to_none() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());
    }

    #[test]
    fn drain_leaves_buffer_empty_with_capacity() {
        let mut buffer = InputBuffer::new();
        for key in [KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC] {
            buffer.push_discrete(InputEvent::key_down(key));
        }
        buffer.push_continuous(mouse_move(1.0, 2.0));
        let capacity = buffer.discrete.capacity();

        assert!(buffer.drain().is_some());

        assert!(buffer.is_empty());
        assert_eq!(buffer.discrete.capacity(), capacity);
    }
}
