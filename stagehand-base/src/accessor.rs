/// Per-scene callback object, discovered inside loaded scene content.
///
/// Implement this on an object reachable from the scene's root content. After
/// a load completes, the registry asks the host's resolver for the scene's
/// accessor and binds the first one it yields; the hooks below are then
/// invoked around the scene's lifecycle. The registry does not own the
/// accessor - the host's content destruction path does - so an accessor may
/// disappear while its scene is still tracked.
///
/// Hooks run while the registry's internal lock is held. A hook must not call
/// back into the registry directly; post a command on the registry's command
/// channel instead.
pub trait SceneAccessor: Send + Sync {
    /// Called immediately after the containing scene finishes loading.
    fn on_scene_did_load(&self) {}

    /// Called immediately before the containing scene is unloaded.
    fn on_scene_will_unload(&self) {}
}
