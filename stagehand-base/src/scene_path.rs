use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde::de::Visitor;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Identifies a loadable scene by its resolved path string.
///
/// A `ScenePath` can be constructed from a raw string or from a
/// [`ScenePathReference`]. Equality and hashing only consider the resolved
/// string, so a path built from a literal compares equal to (and hashes the
/// same as) the same path resolved through a reference. This is required
/// because scene paths are used as map keys.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScenePath(Arc<str>);

impl ScenePath {
    pub fn new<S: AsRef<str>>(path: S) -> Self {
        ScenePath(Arc::from(path.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScenePath {
    fn from(path: &str) -> Self {
        ScenePath::new(path)
    }
}

impl From<String> for ScenePath {
    fn from(path: String) -> Self {
        ScenePath::new(path)
    }
}

impl From<&ScenePath> for ScenePath {
    fn from(path: &ScenePath) -> Self {
        path.clone()
    }
}

impl From<&ScenePathReference> for ScenePath {
    fn from(reference: &ScenePathReference) -> Self {
        ScenePath::new(reference.path())
    }
}

impl Debug for ScenePath {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        f.debug_tuple("ScenePath").field(&self.0).finish()
    }
}

impl fmt::Display for ScenePath {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ScenePath {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct ScenePathVisitor;

impl<'a> Visitor<'a> for ScenePathVisitor {
    type Value = ScenePath;

    fn expecting(
        &self,
        fmt: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(fmt, "a scene path string")
    }

    fn visit_str<E: de::Error>(
        self,
        s: &str,
    ) -> Result<Self::Value, E> {
        Ok(ScenePath::new(s))
    }
}

impl<'de> Deserialize<'de> for ScenePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ScenePathVisitor)
    }
}

/// A named, indirectly-resolved reference to a scene path.
///
/// Stands in for an authored asset that owns the concrete path. Call sites
/// hold the reference and resolve it to a [`ScenePath`] at the point of use;
/// the resolved path is what participates in identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenePathReference {
    name: String,
    path: String,
}

impl ScenePathReference {
    pub fn new<N: Into<String>, P: Into<String>>(
        name: N,
        path: P,
    ) -> Self {
        ScenePathReference {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::HashMap;

    #[test]
    fn literal_and_reference_paths_compare_equal() {
        let literal = ScenePath::from("levels/hub");
        let reference = ScenePathReference::new("Hub", "levels/hub");
        let resolved = ScenePath::from(&reference);

        assert_eq!(literal, resolved);
        assert_ne!(literal, ScenePath::from("levels/hub_b"));
    }

    #[test]
    fn equal_paths_hash_equal() {
        // Construction path must not affect lookup
        let reference = ScenePathReference::new("Hub", "levels/hub");

        let mut map = HashMap::default();
        map.insert(ScenePath::from("levels/hub"), 7);
        assert_eq!(map.get(&ScenePath::from(&reference)), Some(&7));
    }

    #[test]
    fn serde_uses_the_resolved_string() {
        let path = ScenePath::from(&ScenePathReference::new("Hub", "levels/hub"));
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"levels/hub\"");

        let roundtripped: ScenePath = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtripped, path);
    }
}
