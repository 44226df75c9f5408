//! The retrieval helper.
//!
//! Translates "get X for entity Y" requests into sequential calls against
//! a [`GraphClient`] and normalizes the results: albums come back with
//! their photo lists attached, optionally with album-level comments.
//! Every method is stateless; only [`Helper::get_tagged`] carries a
//! worklist, and it is local to the invocation.

use serde_json::Value;
use tracing::{debug, error, info};

use crate::client::GraphClient;
use crate::error::GraphError;
use crate::query::FqlQuery;
use crate::record::{self, expect_array};
use crate::types::{AlbumResolution, ObjectId};

// Listing caps. The client owns pagination up to these; the helper never
// follows paging links itself.
const EDGE_LIMIT: u64 = 5000;
const ALBUM_LIST_LIMIT: u64 = 100;
const ALBUM_PHOTOS_LIMIT: u64 = 500;
const TAGGED_LIMIT: u64 = 5000;

pub struct Helper {
    client: Box<dyn GraphClient>,
}

impl Helper {
    /// Wrap a graph client. The helper holds no other state; every method
    /// is one or more sequential calls against `client`.
    pub fn new(client: Box<dyn GraphClient>) -> Self {
        Self { client }
    }

    /// Resolve the album that owns `photo_id`.
    ///
    /// Exactly one row is the only success. Zero rows and multiple rows
    /// are reported as distinct outcomes, each logged with the rendered
    /// query, the input id, and the raw response.
    pub async fn resolve_album(
        &self,
        photo_id: &ObjectId,
    ) -> Result<AlbumResolution, GraphError> {
        let query = FqlQuery::album_of_photo(photo_id);
        let rows = self.client.fql(&query).await?;

        if rows.len() == 1 {
            return Ok(AlbumResolution::Found(record::object_id_of(
                &rows[0], "album",
            )?));
        }

        error!("{query}");
        if rows.is_empty() {
            error!("no owning album for photo {photo_id}");
            error!("response: []");
            Ok(AlbumResolution::Missing)
        } else {
            let n = rows.len();
            error!("ambiguous owning album for photo {photo_id}: {n} rows");
            let body = Value::Array(rows);
            error!("response: {}", body);
            Ok(AlbumResolution::Ambiguous(n))
        }
    }

    /// Sentinel form of [`Self::resolve_album`]: the album id when exactly
    /// one album matches, `"0"` otherwise.
    pub async fn find_album_id(&self, photo_id: &ObjectId) -> Result<ObjectId, GraphError> {
        Ok(self.resolve_album(photo_id).await?.into_object_id())
    }

    /// Every photo row in `album_id`. An empty result is logged but still
    /// returned as-is.
    pub async fn find_album_photos(
        &self,
        album_id: &ObjectId,
    ) -> Result<Vec<Value>, GraphError> {
        let query = FqlQuery::photos_in_album(album_id);
        let rows = self.client.fql(&query).await?;
        if rows.is_empty() {
            error!("no photos for album {album_id}");
            error!("response: []");
        }
        Ok(rows)
    }

    /// The caller's own profile record.
    pub async fn get_me(&self) -> Result<Value, GraphError> {
        self.client.get_object("me", None).await
    }

    /// Friend listing for `id`, capped at 5000 entries.
    pub async fn get_friends(&self, id: &ObjectId) -> Result<Vec<Value>, GraphError> {
        self.get_edge(id, "friends", EDGE_LIMIT).await
    }

    /// Subscription listing for `id`, capped at 5000 entries.
    pub async fn get_subscriptions(&self, id: &ObjectId) -> Result<Vec<Value>, GraphError> {
        self.get_edge(id, "subscribedto", EDGE_LIMIT).await
    }

    /// Liked-page listing for `id`, capped at 5000 entries.
    pub async fn get_pages(&self, id: &ObjectId) -> Result<Vec<Value>, GraphError> {
        self.get_edge(id, "likes", EDGE_LIMIT).await
    }

    /// Album summaries for `id`, capped at 100. Entries are shallow;
    /// [`Self::get_album`] and [`Self::get_albums`] attach photos and
    /// comments.
    pub async fn get_album_list(&self, id: &ObjectId) -> Result<Vec<Value>, GraphError> {
        self.get_edge(id, "albums", ALBUM_LIST_LIMIT).await
    }

    /// Fetch one album with its photo list attached.
    ///
    /// With `include_comments`, album-level comments are fetched and
    /// attached when the record already exposes a `comments` key.
    /// Comments on individual photos are left unexpanded.
    pub async fn get_album(
        &self,
        id: &ObjectId,
        include_comments: bool,
    ) -> Result<Value, GraphError> {
        info!("begin get_album: {id}");

        let mut album = self.client.get_object(id.as_str(), None).await?;
        let album_id = ObjectId::from(record::id_of(&album, "album")?);

        if include_comments && !album["comments"].is_null() {
            let comments = self
                .client
                .get_object(&format!("{album_id}/comments"), None)
                .await?;
            album["comments"] = comments;
        }

        let photos = self
            .client
            .get_object(&format!("{album_id}/photos"), Some(ALBUM_PHOTOS_LIMIT))
            .await?;
        album["photos"] = photos;

        Ok(album)
    }

    /// Every album uploaded by `id`, each enriched via [`Self::get_album`].
    pub async fn get_albums(
        &self,
        id: &ObjectId,
        include_comments: bool,
    ) -> Result<Vec<Value>, GraphError> {
        info!("begin get_albums: {id}");

        let summaries = self.get_album_list(id).await?;
        let mut albums = Vec::with_capacity(summaries.len());
        for summary in &summaries {
            let album_id = ObjectId::from(record::id_of(summary, "album")?);
            albums.push(self.get_album(&album_id, include_comments).await?);
        }
        Ok(albums)
    }

    /// Every album containing at least one photo in which `id` is tagged.
    ///
    /// With `full`, each returned album carries its complete photo list;
    /// otherwise the list is trimmed to the tagged photos themselves.
    ///
    /// Albums are discovered by resolving the worklist head's owning album
    /// and subtracting that album's photos from the worklist until it is
    /// exhausted. The head always belongs to the album just resolved, so
    /// each pass shrinks the worklist and the loop runs at most once per
    /// tagged photo.
    pub async fn get_tagged(
        &self,
        id: &ObjectId,
        include_comments: bool,
        full: bool,
    ) -> Result<Vec<Value>, GraphError> {
        info!("begin get_tagged: {id}");

        let mut pending = self.get_edge(id, "photos", TAGGED_LIMIT).await?;
        let mut albums = Vec::new();

        while !pending.is_empty() {
            debug!("pending tagged photos: {}", pending.len());

            let head_id = ObjectId::from(record::id_of(&pending[0], "photo")?);
            let album_id = self.find_album_id(&head_id).await?;
            let mut album = self.get_album(&album_id, include_comments).await?;
            let member_ids = record::photo_id_set(&album)?;

            // Partition against the pre-removal worklist: members are this
            // album's tagged photos, the rest stay pending.
            let mut members = Vec::new();
            let mut rest = Vec::new();
            for photo in pending {
                let photo_id = record::id_of(&photo, "photo")?;
                if member_ids.contains(photo_id) {
                    members.push(photo);
                } else {
                    rest.push(photo);
                }
            }
            pending = rest;

            if !full {
                album["photos"] = Value::Array(members);
            }
            albums.push(album);
        }

        Ok(albums)
    }

    async fn get_edge(
        &self,
        id: &ObjectId,
        edge: &str,
        limit: u64,
    ) -> Result<Vec<Value>, GraphError> {
        let path = format!("{id}/{edge}");
        let value = self.client.get_object(&path, Some(limit)).await?;
        expect_array(value, &path)
    }
}
