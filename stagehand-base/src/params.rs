use serde::{Deserialize, Serialize};

/// How newly loaded scene content combines with content that is already
/// resident.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadSceneMode {
    /// Replace all currently loaded content.
    Single,
    /// Load alongside currently loaded content.
    Additive,
}

/// Configuration for a load request. The registry passes this through to the
/// loader verbatim; only the loader interprets it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSceneParams {
    pub mode: LoadSceneMode,
}

impl Default for LoadSceneParams {
    fn default() -> Self {
        LoadSceneParams {
            mode: LoadSceneMode::Additive,
        }
    }
}

/// Configuration for an unload request, passed through to the loader verbatim.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnloadSceneOptions {
    /// Also release objects embedded in the scene's content.
    pub release_embedded_objects: bool,
}

impl Default for UnloadSceneOptions {
    fn default() -> Self {
        UnloadSceneOptions {
            release_embedded_objects: true,
        }
    }
}
