//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, stack operations, and lifecycle.
//
// Scenes are stored in a HashMap by key and referenced via a stack
// of keys, so a scene keeps its state between activations.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::globals::GlobalContext;
use crate::core::render::RenderFrame;

//=== Scene Transition ====================================================

/// Scene stack operations, published on the message bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition<K: SceneKey> {
    /// Adds a scene to the top of the stack.
    Push(K),

    /// Removes a scene from the stack wherever it sits.
    Remove(K),

    /// Swaps the first scene for the second, in place.
    Replace(K, K),

    /// Removes every scene. An empty stack ends the run.
    Clear,

    /// No-op.
    Empty,
}

impl<K: SceneKey> Default for SceneTransition<K> {
    fn default() -> Self {
        Self::Empty
    }
}

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers, typically a game enum.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Manager =======================================================

/// Stack-based scene lifecycle manager.
pub struct SceneManager<S: SceneKey> {
    scenes: HashMap<S, Box<dyn Scene<S>>>,
    stack: Vec<S>,
}

impl<S: SceneKey> Default for SceneManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SceneKey> SceneManager<S> {
    pub fn new() -> Self {
        Self { scenes: HashMap::new(), stack: Vec::new() }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene. Scenes must be registered before being pushed.
    pub fn register_scene<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        if self.scenes.insert(key, Box::new(scene)).is_some() {
            warn!("Scene {:?} was already registered and has been replaced", key);
        }
    }

    /// Registers a scene and places it on the stack as the starting scene.
    ///
    /// Its `on_enter` runs when the manager is started.
    pub fn register_default<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        self.register_scene(key, scene);

        if self.stack.contains(&key) {
            warn!("Scene {:?} is already in the stack", key);
        } else {
            debug!("Registered scene {:?} as default", key);
            self.stack.push(key);
        }
    }

    /// Calls `on_enter` on every scene already on the stack.
    pub fn start(&mut self, context: &mut GlobalContext) {
        let initial = self.stack.clone();
        for key in initial {
            info!("Starting scene {:?}", key);
            match self.scenes.get_mut(&key) {
                Some(scene) => scene.on_enter(context),
                None => warn!("Initial scene {:?} not registered", key),
            }
        }
    }

    //--- Update & Render --------------------------------------------------

    /// Updates the top scene and every scene beneath it down to (and
    /// including) the first opaque one.
    pub fn update(&mut self, context: &mut GlobalContext) {
        for key in self.collect_active_scenes() {
            if let Some(scene) = self.scenes.get_mut(&key) {
                scene.update(context);
            }
        }
    }

    /// Renders every stacked scene, bottom to top.
    pub fn render(&self, frame: &mut RenderFrame) {
        for key in &self.stack {
            if let Some(scene) = self.scenes.get(key) {
                scene.render(frame);
            }
        }
    }

    //--- Transition Processing --------------------------------------------

    /// Applies every queued `SceneTransition<S>` in FIFO order.
    ///
    /// Called at the tick boundary after scene updates.
    pub fn process_transitions(&mut self, context: &mut GlobalContext) {
        for transition in context.message_bus.drain::<SceneTransition<S>>() {
            match transition {
                SceneTransition::Push(key) => self.push_internal(key, context),
                SceneTransition::Remove(key) => self.remove_internal(key, context),
                SceneTransition::Replace(old_key, new_key) => {
                    self.replace_internal(old_key, new_key, context)
                }
                SceneTransition::Clear => self.clear_internal(context),
                SceneTransition::Empty => {}
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Scene keys from bottom to top.
    pub fn stack(&self) -> &[S] {
        &self.stack
    }

    pub fn top(&self) -> Option<S> {
        self.stack.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn is_registered(&self, key: S) -> bool {
        self.scenes.contains_key(&key)
    }

    //--- Internal Helpers -------------------------------------------------

    fn push_internal(&mut self, key: S, context: &mut GlobalContext) {
        if self.stack.contains(&key) {
            warn!("Scene {:?} is already in the stack, skipping push", key);
            return;
        }

        let Some(scene) = self.scenes.get_mut(&key) else {
            warn!("Attempted to push unregistered scene {:?}", key);
            return;
        };

        debug!("Pushing scene {:?} onto stack", key);
        self.stack.push(key);
        scene.on_enter(context);
    }

    fn remove_internal(&mut self, key: S, context: &mut GlobalContext) {
        let Some(pos) = self.stack.iter().position(|&k| k == key) else {
            debug!("Scene {:?} not found in stack, skipping removal", key);
            return;
        };

        debug!("Removing scene {:?} from stack at position {}", key, pos);
        self.stack.remove(pos);

        if let Some(scene) = self.scenes.get_mut(&key) {
            scene.on_exit(context);
        }
    }

    fn replace_internal(&mut self, old_key: S, new_key: S, context: &mut GlobalContext) {
        let Some(pos) = self.stack.iter().position(|&k| k == old_key) else {
            warn!("Scene {:?} not found in stack, skipping replacement", old_key);
            return;
        };

        if self.stack.contains(&new_key) {
            warn!("Scene {:?} is already in the stack, skipping replacement", new_key);
            return;
        }

        if !self.scenes.contains_key(&new_key) {
            warn!("Attempted to replace with unregistered scene {:?}", new_key);
            return;
        }

        debug!("Replacing scene {:?} with {:?} at position {}", old_key, new_key, pos);

        if let Some(scene) = self.scenes.get_mut(&old_key) {
            scene.on_exit(context);
        }

        self.stack[pos] = new_key;

        if let Some(scene) = self.scenes.get_mut(&new_key) {
            scene.on_enter(context);
        }
    }

    fn clear_internal(&mut self, context: &mut GlobalContext) {
        debug!("Clearing all scenes from stack");

        // Exit top-down, the reverse of entry order.
        for key in std::mem::take(&mut self.stack).into_iter().rev() {
            if let Some(scene) = self.scenes.get_mut(&key) {
                scene.on_exit(context);
            }
        }
    }

    fn collect_active_scenes(&self) -> Vec<S> {
        let mut active = Vec::new();

        // Walk top-down, stop after the first opaque scene, then restore
        // bottom-to-top order.
        for &key in self.stack.iter().rev() {
            active.push(key);

            if let Some(scene) = self.scenes.get(&key) {
                if !scene.is_transparent() {
                    break;
                }
            }
        }

        active.reverse();
        active
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        A,
        B,
        C,
    }

    impl SceneKey for TestScene {}

    type Log = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        transparent: bool,
        log: Log,
    }

    impl Recorder {
        fn new(name: &'static str, transparent: bool, log: &Log) -> Self {
            Self { name, transparent, log: Arc::clone(log) }
        }

        fn record(&self, what: &str) {
            self.log.lock().unwrap().push(format!("{}:{}", self.name, what));
        }
    }

    impl Scene<TestScene> for Recorder {
        fn on_enter(&mut self, _context: &mut GlobalContext) {
            self.record("enter");
        }

        fn on_exit(&mut self, _context: &mut GlobalContext) {
            self.record("exit");
        }

        fn update(&mut self, _context: &mut GlobalContext) {
            self.record("update");
        }

        fn render(&self, frame: &mut RenderFrame) {
            frame.set_title(self.name);
        }

        fn is_transparent(&self) -> bool {
            self.transparent
        }
    }

    fn manager(log: &Log) -> SceneManager<TestScene> {
        let mut manager = SceneManager::new();
        manager.register_default(TestScene::A, Recorder::new("A", false, log));
        manager.register_scene(TestScene::B, Recorder::new("B", false, log));
        manager.register_scene(TestScene::C, Recorder::new("C", true, log));
        manager
    }

    fn drain(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    fn transition(
        manager: &mut SceneManager<TestScene>,
        context: &mut GlobalContext,
        t: SceneTransition<TestScene>,
    ) {
        context.request_transition(t);
        manager.process_transitions(context);
    }

    //=====================================================================
    // SceneTransition
    //=====================================================================

    #[test]
    fn transition_default_is_empty() {
        let transition: SceneTransition<TestScene> = SceneTransition::default();
        assert_eq!(transition, SceneTransition::Empty);
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn start_enters_default_scene() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();

        manager.start(&mut context);

        assert_eq!(drain(&log), vec!["A:enter"]);
        assert_eq!(manager.stack(), &[TestScene::A]);
        assert_eq!(manager.top(), Some(TestScene::A));
    }

    #[test]
    fn push_and_remove_call_hooks() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();

        transition(&mut manager, &mut context, SceneTransition::Push(TestScene::B));
        transition(&mut manager, &mut context, SceneTransition::Remove(TestScene::B));

        assert_eq!(drain(&log), vec!["B:enter", "B:exit"]);
        assert_eq!(manager.stack(), &[TestScene::A]);
    }

    #[test]
    fn duplicate_and_unregistered_pushes_are_ignored() {
        let log = Log::default();
        let mut manager = SceneManager::new();
        manager.register_default(TestScene::A, Recorder::new("A", false, &log));
        let mut context = GlobalContext::new();

        transition(&mut manager, &mut context, SceneTransition::Push(TestScene::A));
        transition(&mut manager, &mut context, SceneTransition::Push(TestScene::B));

        assert!(drain(&log).is_empty());
        assert_eq!(manager.stack(), &[TestScene::A]);
        assert!(!manager.is_registered(TestScene::B));
    }

    #[test]
    fn replace_swaps_in_place() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();

        transition(&mut manager, &mut context, SceneTransition::Push(TestScene::C));
        drain(&log);
        transition(&mut manager, &mut context, SceneTransition::Replace(TestScene::A, TestScene::B));

        assert_eq!(drain(&log), vec!["A:exit", "B:enter"]);
        assert_eq!(manager.stack(), &[TestScene::B, TestScene::C]);
    }

    #[test]
    fn replace_of_missing_scene_does_nothing() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();

        transition(&mut manager, &mut context, SceneTransition::Replace(TestScene::B, TestScene::C));

        assert!(drain(&log).is_empty());
        assert_eq!(manager.stack(), &[TestScene::A]);
    }

    #[test]
    fn clear_exits_everything_top_down() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();
        transition(&mut manager, &mut context, SceneTransition::Push(TestScene::B));
        drain(&log);

        transition(&mut manager, &mut context, SceneTransition::Clear);

        assert_eq!(drain(&log), vec!["B:exit", "A:exit"]);
        assert!(manager.is_empty());
    }

    #[test]
    fn transitions_apply_in_fifo_order() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();

        context.request_transition(SceneTransition::Push(TestScene::B));
        context.request_transition(SceneTransition::Remove(TestScene::B));
        context.request_transition(SceneTransition::Push(TestScene::C));
        manager.process_transitions(&mut context);

        assert_eq!(drain(&log), vec!["B:enter", "B:exit", "C:enter"]);
        assert_eq!(manager.stack(), &[TestScene::A, TestScene::C]);
        assert!(!context.message_bus.has_messages::<SceneTransition<TestScene>>());
    }

    //=====================================================================
    // Update & Render
    //=====================================================================

    #[test]
    fn opaque_top_blocks_updates_below() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();
        transition(&mut manager, &mut context, SceneTransition::Push(TestScene::B));
        drain(&log);

        manager.update(&mut context);

        assert_eq!(drain(&log), vec!["B:update"]);
    }

    #[test]
    fn transparent_top_lets_scenes_below_update() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();
        transition(&mut manager, &mut context, SceneTransition::Push(TestScene::C));
        drain(&log);

        manager.update(&mut context);

        assert_eq!(drain(&log), vec!["A:update", "C:update"]);
    }

    #[test]
    fn render_draws_every_scene_bottom_up() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();
        transition(&mut manager, &mut context, SceneTransition::Push(TestScene::B));

        let mut frame = RenderFrame::default();
        manager.render(&mut frame);

        // Last writer wins: B sits on top.
        assert_eq!(frame.title.as_deref(), Some("B"));
    }
}
