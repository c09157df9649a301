use std::fmt;
use std::fmt::{Debug, Formatter};

/// Opaque reference to loaded scene content, produced by the host's loader.
///
/// The registry never interprets the value; it only stores it while the scene
/// is resident and hands it back when issuing the unload.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub struct SceneInstance(pub u64);

impl SceneInstance {
    pub const fn null() -> Self {
        SceneInstance(0)
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl Debug for SceneInstance {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        f.debug_tuple("SceneInstance").field(&self.0).finish()
    }
}
