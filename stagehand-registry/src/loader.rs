use crossbeam_channel::Sender;
use stagehand_base::{LoadSceneParams, SceneInstance, ScenePath, UnloadSceneOptions};

/// Generation tag for an accepted load request.
///
/// A fresh id is allocated every time the registry accepts a load, so a
/// completion arriving after its scene was unloaded (or unloaded and requested
/// again) can be told apart from a live one and discarded.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct LoadId(pub u64);

// Completion events posted by in-flight load work and applied to the scene
// map by the registry pump
#[derive(Debug)]
pub(crate) enum RegistryEvent {
    LoadCompleted {
        path: ScenePath,
        load_id: LoadId,
        instance: SceneInstance,
    },
}

/// One-shot completion signal for a load issued through [`SceneLoaderIO`].
///
/// The loader consumes this with [`SceneLoadOp::complete`] once the scene's
/// content is resident. This may happen from any thread; the registry applies
/// the completion on its own update. Dropping the op without completing it is
/// not an error - the scene just stays created-but-never-loaded.
pub struct SceneLoadOp {
    sender: Option<Sender<RegistryEvent>>,
    path: ScenePath,
    load_id: LoadId,
}

impl SceneLoadOp {
    pub(crate) fn new(
        sender: Sender<RegistryEvent>,
        path: ScenePath,
        load_id: LoadId,
    ) -> Self {
        Self {
            sender: Some(sender),
            path,
            load_id,
        }
    }

    /// Returns the path this load was issued for.
    pub fn path(&self) -> &ScenePath {
        &self.path
    }

    /// Signals that the load finished and produced `instance`.
    pub fn complete(
        mut self,
        instance: SceneInstance,
    ) {
        log::debug!("load op for {:?} complete", self.path);
        let _ = self
            .sender
            .as_ref()
            .unwrap()
            .send(RegistryEvent::LoadCompleted {
                path: self.path.clone(),
                load_id: self.load_id,
                instance,
            });
        self.sender = None;
    }
}

impl Drop for SceneLoadOp {
    fn drop(&mut self) {
        if self.sender.is_some() {
            log::warn!(
                "load op for {:?} dropped without completing, scene will never finish loading",
                self.path
            );
        }
    }
}

/// The host subsystem that performs the actual scene load/unload work.
///
/// `begin_load` must return promptly; the work happens on the loader's own
/// scheduling domain and the registry observes completion only through the
/// [`SceneLoadOp`]. `begin_unload` is fire-and-forget - the registry forgets
/// the scene before the unload is confirmed and nothing is reported back.
pub trait SceneLoaderIO: Send + Sync {
    fn begin_load(
        &self,
        path: &ScenePath,
        params: LoadSceneParams,
        load_op: SceneLoadOp,
    );

    fn begin_unload(
        &self,
        instance: SceneInstance,
        options: UnloadSceneOptions,
    );
}
