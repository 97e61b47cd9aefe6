//! Typed endpoint surface for the admin panel backend.
//!
//! Each submodule mirrors one backend resource and contributes an
//! `impl ApiClient` block plus the payload and response types for its calls.
//! The heavy lifting — marker header, envelope interpretation, null
//! sanitation, failure notification — happens in the unified client; these
//! are a mechanical enumeration of verb + path + wire shape.

mod directories;
mod images;
mod tags;

pub use images::{ImageItem, ImagePage, ImageQuery, ImageUpload};
pub use tags::{TagDetails, TagItem};
