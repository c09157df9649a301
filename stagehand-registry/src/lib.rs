mod events;
mod loader;
mod registry;
mod scene_state;

pub use events::{SceneCommand, SceneEvent};
pub use loader::{LoadId, SceneLoadOp, SceneLoaderIO};
pub use registry::SceneRegistry;
pub use scene_state::SceneAccessorResolver;

// Scene states, per path:
//
// Absent -> load_scene -> Created (external load in flight)
// Created -> completion, accessor resolved -> Loaded
// Created -> completion, no accessor -> Created (terminal unless unloaded)
// Created | Loaded -> unload_scene -> Absent
//
// Only map membership plus the created/loaded predicates are externally
// observable; Created and Loaded occupy the same map entry. Presence in the
// map is also the dedup key, so a path can never have two external loads
// outstanding at once.
//
// Completions arrive on a channel and are applied during update(), so a
// completion can race an unload. Each accepted load carries a generation id;
// a completion whose path is gone or whose generation does not match the
// current entry is dropped on the floor.
