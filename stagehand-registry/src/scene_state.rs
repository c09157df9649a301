use std::sync::{Arc, Weak};

use stagehand_base::{SceneAccessor, SceneInstance, ScenePath};

use crate::events::{EventBroadcaster, SceneEvent};
use crate::loader::LoadId;

/// Resolves the accessor object for a loaded scene.
///
/// Given the instance the loader produced, the host walks the scene's
/// top-level content and returns the first member that exposes
/// [`SceneAccessor`], or `None` if the scene carries no accessor. How the
/// content is enumerated is entirely the host's concern.
pub trait SceneAccessorResolver: Send + Sync {
    fn resolve(
        &self,
        instance: SceneInstance,
    ) -> Option<Arc<dyn SceneAccessor>>;
}

// Lifecycle record for a single scene path.
//
// Tracks one load generation from acceptance to deinit. The registry removes
// the record from its map immediately after deinit; a later load for the same
// path gets a fresh record.
pub(crate) struct SceneState {
    path: ScenePath,
    load_id: LoadId,
    instance: SceneInstance,
    // Bound on load completion. The host's content destruction path owns the
    // accessor's lifetime, so only a weak reference is held here.
    accessor: Option<Weak<dyn SceneAccessor>>,
    created: bool,
}

impl SceneState {
    pub fn new(path: ScenePath) -> Self {
        SceneState {
            path,
            load_id: LoadId(0),
            instance: SceneInstance::null(),
            accessor: None,
            created: false,
        }
    }

    /// Marks the state created and records the load generation. Called exactly
    /// once, immediately after the external load has been issued.
    pub fn init(
        &mut self,
        load_id: LoadId,
    ) {
        self.created = true;
        self.load_id = load_id;
    }

    pub fn load_id(&self) -> LoadId {
        self.load_id
    }

    pub fn instance(&self) -> SceneInstance {
        self.instance
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    // True once an accessor has been bound. A scene whose content has no
    // accessor never becomes loaded.
    pub fn is_loaded(&self) -> bool {
        self.accessor.is_some()
    }

    pub fn accessor(&self) -> Option<Arc<dyn SceneAccessor>> {
        self.accessor.as_ref().and_then(Weak::upgrade)
    }

    // Applies a load completion: capture the instance, bind the accessor if
    // the host resolves one and fire its did-load hook, then post the
    // notification. The notification goes out whether or not an accessor was
    // found; the hook always runs before it.
    pub fn complete_load(
        &mut self,
        instance: SceneInstance,
        resolver: &dyn SceneAccessorResolver,
        events: &mut EventBroadcaster,
    ) {
        self.instance = instance;

        if let Some(accessor) = resolver.resolve(instance) {
            self.accessor = Some(Arc::downgrade(&accessor));
            accessor.on_scene_did_load();
        } else {
            log::debug!("no accessor found in {:?}", self.path);
        }

        events.post(SceneEvent::DidLoad(self.path.clone()));
    }

    // Announces the upcoming unload: the notification first, then the
    // will-unload hook if an accessor is bound and still alive. Safe to call
    // with nothing bound.
    pub fn deactivate(
        &mut self,
        events: &mut EventBroadcaster,
    ) {
        events.post(SceneEvent::WillUnload(self.path.clone()));

        if let Some(accessor) = self.accessor() {
            accessor.on_scene_will_unload();
        }
    }

    // Clears the record. The instance and accessor are gone after this; the
    // registry drops the state right away and never touches it again.
    pub fn deinit(&mut self) {
        self.instance = SceneInstance::null();
        self.accessor = None;
        self.created = false;
    }
}
