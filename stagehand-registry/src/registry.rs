use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender};
use stagehand_base::hashing::HashMap;
use stagehand_base::{
    LoadSceneParams, SceneAccessor, SceneInstance, ScenePath, UnloadSceneOptions,
};

use crate::events::{EventBroadcaster, SceneCommand, SceneEvent};
use crate::loader::{LoadId, RegistryEvent, SceneLoadOp, SceneLoaderIO};
use crate::scene_state::{SceneAccessorResolver, SceneState};

struct RegistryInner {
    next_load_id: u64,

    // Presence in this map is what de-duplicates load requests: one entry per
    // path means at most one outstanding external load per path. The entry is
    // inserted when a load is accepted and removed by unload, nothing else.
    scenes: HashMap<ScenePath, SceneState>,

    default_load_params: LoadSceneParams,
    default_unload_options: UnloadSceneOptions,

    // The host subsystems that do the actual work
    loader_io: Box<dyn SceneLoaderIO>,
    accessor_resolver: Box<dyn SceneAccessorResolver>,

    // Completion events posted by in-flight SceneLoadOps, possibly from other
    // threads, applied to the map during update()
    events_tx: Sender<RegistryEvent>,
    events_rx: Receiver<RegistryEvent>,

    // Inbound load/unload commands, equivalent to the direct calls
    commands_tx: Sender<SceneCommand>,
    commands_rx: Receiver<SceneCommand>,

    notifications: EventBroadcaster,
}

impl RegistryInner {
    // Drain inbound commands, then apply completions reported by the loader
    #[profiling::function]
    fn update(&mut self) {
        while let Ok(command) = self.commands_rx.try_recv() {
            log::debug!("handle command {:?}", command);
            match command {
                SceneCommand::Load(path) => self.load_scene(path, None),
                SceneCommand::Unload(path) => self.unload_scene(&path, None),
            }
        }

        while let Ok(event) = self.events_rx.try_recv() {
            log::debug!("handle event {:?}", event);
            match event {
                RegistryEvent::LoadCompleted {
                    path,
                    load_id,
                    instance,
                } => self.handle_load_completed(path, load_id, instance),
            }
        }
    }

    fn allocate_load_id(&mut self) -> LoadId {
        let load_id = LoadId(self.next_load_id);
        self.next_load_id += 1;
        load_id
    }

    fn load_scene(
        &mut self,
        path: ScenePath,
        params: Option<LoadSceneParams>,
    ) {
        if self.scenes.contains_key(&path) {
            // Already created or loaded; duplicate requests are silent no-ops
            log::debug!("load_scene {:?} already requested, ignoring", path);
            return;
        }

        let load_id = self.allocate_load_id();
        log::debug!("load_scene {:?} accepted as {:?}", path, load_id);

        self.scenes.insert(path.clone(), SceneState::new(path.clone()));

        let load_op = SceneLoadOp::new(self.events_tx.clone(), path.clone(), load_id);
        self.loader_io.begin_load(
            &path,
            params.unwrap_or(self.default_load_params),
            load_op,
        );

        self.scenes.get_mut(&path).unwrap().init(load_id);
    }

    fn unload_scene(
        &mut self,
        path: &ScenePath,
        options: Option<UnloadSceneOptions>,
    ) {
        let Some(state) = self.scenes.get_mut(path) else {
            log::debug!("unload_scene {:?} has no entry, ignoring", path);
            return;
        };

        log::debug!("unload_scene {:?}", path);

        // Notification and will-unload hook fire before the external unload is
        // issued, while the content is still resident
        state.deactivate(&mut self.notifications);

        self.loader_io.begin_unload(
            state.instance(),
            options.unwrap_or(self.default_unload_options),
        );

        state.deinit();
        self.scenes.remove(path);
    }

    fn handle_load_completed(
        &mut self,
        path: ScenePath,
        load_id: LoadId,
        instance: SceneInstance,
    ) {
        let Some(state) = self.scenes.get_mut(&path) else {
            // The scene was unloaded while its load was still in flight
            log::debug!("discarding completion for {:?}, no longer tracked", path);
            return;
        };

        if state.load_id() != load_id {
            // The scene was unloaded and requested again while the original
            // load was in flight; only the current generation may complete
            log::debug!("discarding stale completion {:?} for {:?}", load_id, path);
            return;
        }

        state.complete_load(instance, self.accessor_resolver.as_ref(), &mut self.notifications);
    }

    fn try_get_accessor(
        &self,
        path: &ScenePath,
    ) -> Option<Option<Arc<dyn SceneAccessor>>> {
        self.scenes.get(path).map(|state| state.accessor())
    }

    fn is_created(
        &self,
        path: &ScenePath,
    ) -> bool {
        self.scenes.get(path).map_or(false, |state| state.is_created())
    }

    fn is_loaded(
        &self,
        path: &ScenePath,
    ) -> bool {
        self.scenes.get(path).map_or(false, |state| state.is_loaded())
    }

    fn active_scenes(&self) -> Vec<ScenePath> {
        self.scenes.keys().cloned().collect()
    }
}

/// The scene registry: the public load/unload/query surface.
///
/// One explicitly constructed registry is expected to serve the whole process;
/// that is a deployment convention rather than an enforced singleton. The
/// registry is cheap to clone and all clones share state.
///
/// Every public operation returns immediately. Completions reported by the
/// loader are applied during [`SceneRegistry::update`], which the host should
/// call regularly (typically once per frame). Dropping the last clone discards
/// all entries without running deactivation hooks - unload explicitly if
/// graceful teardown is required.
#[derive(Clone)]
pub struct SceneRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl SceneRegistry {
    pub fn new(
        loader_io: Box<dyn SceneLoaderIO>,
        accessor_resolver: Box<dyn SceneAccessorResolver>,
    ) -> Self {
        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        let (commands_tx, commands_rx) = crossbeam_channel::unbounded();

        let inner = RegistryInner {
            // start at 1 because 0 means null
            next_load_id: 1,
            scenes: Default::default(),
            default_load_params: LoadSceneParams::default(),
            default_unload_options: UnloadSceneOptions::default(),
            loader_io,
            accessor_resolver,
            events_tx,
            events_rx,
            commands_tx,
            commands_rx,
            notifications: EventBroadcaster::new(),
        };

        SceneRegistry {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Process queued commands and load completions.
    pub fn update(&self) {
        self.inner.lock().unwrap().update();
    }

    /// Override the default load parameters applied when [`Self::load_scene`]
    /// is called without an explicit override. In-flight loads are unaffected.
    pub fn set_default_load_params(
        &self,
        params: LoadSceneParams,
    ) {
        self.inner.lock().unwrap().default_load_params = params;
    }

    /// Override the default unload options applied when [`Self::unload_scene`]
    /// is called without an explicit override. In-flight work is unaffected.
    pub fn set_default_unload_options(
        &self,
        options: UnloadSceneOptions,
    ) {
        self.inner.lock().unwrap().default_unload_options = options;
    }

    /// Request an asynchronous load of the scene at `path`.
    ///
    /// If the path already has an entry - still loading or fully loaded - the
    /// call is a silent no-op; the load is not re-triggered and no error is
    /// reported. Pass `None` to use the default parameters.
    pub fn load_scene(
        &self,
        path: impl Into<ScenePath>,
        params: Option<LoadSceneParams>,
    ) {
        self.inner.lock().unwrap().load_scene(path.into(), params);
    }

    /// Unload the scene at `path`. A path with no entry is silently ignored.
    ///
    /// The will-unload notification and hook run synchronously before the
    /// external unload is issued; the entry is gone when this returns, before
    /// the external unload is confirmed. Pass `None` to use the default
    /// options.
    pub fn unload_scene(
        &self,
        path: impl Into<ScenePath>,
        options: Option<UnloadSceneOptions>,
    ) {
        self.inner.lock().unwrap().unload_scene(&path.into(), options);
    }

    /// Attempt to retrieve the accessor for the scene at `path`.
    ///
    /// Returns `None` if the path has no entry at all, and `Some(None)` if the
    /// scene exists but no accessor is available - still loading, content
    /// without an accessor, or an accessor the host has already destroyed.
    pub fn try_get_accessor(
        &self,
        path: &ScenePath,
    ) -> Option<Option<Arc<dyn SceneAccessor>>> {
        self.inner.lock().unwrap().try_get_accessor(path)
    }

    /// Check if the scene at `path` is created. This includes scenes that are
    /// still loading.
    pub fn is_created(
        &self,
        path: &ScenePath,
    ) -> bool {
        self.inner.lock().unwrap().is_created(path)
    }

    /// Check if the scene at `path` is loaded. This only includes scenes that
    /// have finished loading and bound an accessor.
    pub fn is_loaded(
        &self,
        path: &ScenePath,
    ) -> bool {
        self.inner.lock().unwrap().is_loaded(path)
    }

    /// Returns the paths of all scenes the registry currently tracks.
    pub fn active_scenes(&self) -> Vec<ScenePath> {
        self.inner.lock().unwrap().active_scenes()
    }

    /// Subscribe to lifecycle notifications. Every subscriber receives every
    /// event posted after it subscribed.
    pub fn subscribe(&self) -> Receiver<SceneEvent> {
        self.inner.lock().unwrap().notifications.subscribe()
    }

    /// Returns a sender for inbound load/unload commands. Commands are applied
    /// on the next [`SceneRegistry::update`], with default configuration.
    pub fn command_sender(&self) -> Sender<SceneCommand> {
        self.inner.lock().unwrap().commands_tx.clone()
    }
}
