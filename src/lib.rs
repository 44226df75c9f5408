//! graphback — backup-oriented retrieval helpers for a social graph API.
//!
//! Wraps a graph/query client and reshapes its paginated JSON responses
//! into nested structures: albums containing photos containing comments.
//! The interesting part is [`Helper::get_tagged`], which reconciles a flat
//! list of tagged photos back into the albums that own them.
//!
//! Authentication, transport pagination, and rate limiting belong to the
//! [`GraphClient`] implementation; persistence of the returned records
//! belongs to the caller.

#![warn(clippy::all)]

mod client;
mod error;
mod helper;
mod query;
mod record;
mod types;

pub use client::{GraphClient, HttpGraphClient, DEFAULT_API_BASE};
pub use error::GraphError;
pub use helper::Helper;
pub use query::FqlQuery;
pub use types::{AlbumResolution, ObjectId};
