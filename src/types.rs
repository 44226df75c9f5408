use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a graph entity (user, page, album, photo).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Sentinel identifier meaning "no album could be determined".
    pub const NOT_FOUND: &'static str = "0";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the `"0"` sentinel.
    pub fn is_not_found(&self) -> bool {
        self.0 == Self::NOT_FOUND
    }

    pub(crate) fn not_found() -> Self {
        Self(Self::NOT_FOUND.to_string())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Outcome of resolving the album that owns a photo.
///
/// Zero-row and multi-row query results are distinct variants so callers
/// can tell "no album" from "ambiguous album"; both collapse to the `"0"`
/// sentinel under [`AlbumResolution::into_object_id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlbumResolution {
    /// Exactly one matching album.
    Found(ObjectId),
    /// The query returned no rows for the photo.
    Missing,
    /// The query returned more than one row; the count is kept for logging.
    Ambiguous(usize),
}

impl AlbumResolution {
    /// Collapse to the sentinel contract: the album id when found, `"0"`
    /// otherwise.
    pub fn into_object_id(self) -> ObjectId {
        match self {
            AlbumResolution::Found(id) => id,
            AlbumResolution::Missing | AlbumResolution::Ambiguous(_) => ObjectId::not_found(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_detection() {
        assert!(ObjectId::from("0").is_not_found());
        assert!(!ObjectId::from("123").is_not_found());
    }

    #[test]
    fn test_resolution_collapses_to_sentinel() {
        let found = AlbumResolution::Found(ObjectId::from("42"));
        assert_eq!(found.into_object_id(), ObjectId::from("42"));
        assert!(AlbumResolution::Missing.into_object_id().is_not_found());
        assert!(AlbumResolution::Ambiguous(3).into_object_id().is_not_found());
    }

    #[test]
    fn test_display_is_raw_id() {
        assert_eq!(ObjectId::from("10001_55").to_string(), "10001_55");
    }
}
