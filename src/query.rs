//! FQL query construction.
//!
//! The helpers only ever issue two query shapes, so each is a fixed
//! template with a single identifier bound as a typed parameter. The
//! identifier is escaped at render time, never spliced raw into the
//! template text.

use std::fmt;

use crate::types::ObjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Template {
    AlbumOfPhoto,
    PhotosInAlbum,
}

/// An FQL query with its identifier parameter already bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FqlQuery {
    template: Template,
    param: ObjectId,
}

impl FqlQuery {
    /// Query for the album whose photo set contains `photo_id`.
    pub fn album_of_photo(photo_id: &ObjectId) -> Self {
        Self {
            template: Template::AlbumOfPhoto,
            param: photo_id.clone(),
        }
    }

    /// Query for every photo in `album_id`.
    pub fn photos_in_album(album_id: &ObjectId) -> Self {
        Self {
            template: Template::PhotosInAlbum,
            param: album_id.clone(),
        }
    }

    /// Render the query text with the bound identifier escaped.
    pub fn render(&self) -> String {
        let id = escape(self.param.as_str());
        match self.template {
            Template::AlbumOfPhoto => format!(
                "SELECT object_id, aid FROM album WHERE aid IN \
                 (SELECT aid FROM photo WHERE object_id = \"{id}\")"
            ),
            Template::PhotosInAlbum => format!(
                "SELECT object_id, pid FROM photo WHERE aid IN \
                 (SELECT aid FROM album WHERE object_id = \"{id}\")"
            ),
        }
    }
}

impl fmt::Display for FqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Escape an identifier for embedding in a double-quoted FQL string
/// literal.
fn escape(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for c in id.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_album_of_photo_binds_id() {
        let q = FqlQuery::album_of_photo(&ObjectId::from("123"));
        assert_eq!(
            q.render(),
            "SELECT object_id, aid FROM album WHERE aid IN \
             (SELECT aid FROM photo WHERE object_id = \"123\")"
        );
    }

    #[test]
    fn test_photos_in_album_binds_id() {
        let q = FqlQuery::photos_in_album(&ObjectId::from("456"));
        assert_eq!(
            q.render(),
            "SELECT object_id, pid FROM photo WHERE aid IN \
             (SELECT aid FROM album WHERE object_id = \"456\")"
        );
    }

    #[test]
    fn test_quoting_characters_are_escaped() {
        let q = FqlQuery::album_of_photo(&ObjectId::from(r#"1" OR "1"="1"#));
        let rendered = q.render();
        assert!(rendered.contains(r#"object_id = "1\" OR \"1\"=\"1""#));
    }

    #[test]
    fn test_backslash_is_escaped() {
        let q = FqlQuery::photos_in_album(&ObjectId::from(r"a\b"));
        assert!(q.render().contains(r#"object_id = "a\\b""#));
    }

    #[test]
    fn test_display_matches_render() {
        let q = FqlQuery::album_of_photo(&ObjectId::from("9"));
        assert_eq!(q.to_string(), q.render());
    }
}
