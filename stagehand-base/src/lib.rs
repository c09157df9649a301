pub mod hashing;

mod accessor;
mod instance;
mod params;
mod scene_path;

pub use accessor::SceneAccessor;
pub use instance::SceneInstance;
pub use params::{LoadSceneMode, LoadSceneParams, UnloadSceneOptions};
pub use scene_path::{ScenePath, ScenePathReference};
