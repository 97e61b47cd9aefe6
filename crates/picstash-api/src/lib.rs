//! API client for the Picstash image/tag admin panel.
//!
//! This crate is the panel's HTTP layer: it issues calls to the backend and
//! exposes typed results to UI code. All calls go through one unified client
//! that interprets the backend's success/failure envelope uniformly:
//!
//! - successful calls resolve with the **whole** sanitized [`Envelope`]
//!   (explicit nulls collapsed to absent at any depth);
//! - backend-declared failures report their message through an injected
//!   [`Notifier`] and error with the raw envelope;
//! - transport faults propagate unmodified and stay silent.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use picstash_api::{ApiClient, BufferedNotifier, LoadingTracker};
//!
//! let notifier = Arc::new(BufferedNotifier::new());
//! let client = ApiClient::builder("https://panel.example.com")
//!     .notifier(notifier.clone())
//!     .build()?;
//!
//! // Typed endpoint calls
//! let directories = client.directory_list().await?.into_data().unwrap_or_default();
//! client.delete_images(&[1, 2, 3]).await?;
//!
//! // Wrap a unit of work with a busy indicator that always clears
//! let loading = LoadingTracker::new();
//! let details = loading.scope(|| client.tag_details()).await?;
//! ```
//!
//! # Generic calls
//!
//! Endpoints not covered by the typed surface are reachable through the verb
//! methods directly:
//!
//! ```ignore
//! use serde_json::Value;
//!
//! let envelope = client
//!     .get::<Value, _>("/api/directory", None::<&()>)
//!     .await?;
//! ```

mod client;
pub mod endpoints;
mod envelope;
mod error;
mod loading;
mod notify;

pub use client::{
    ApiClient, ApiClientBuilder, CallOptions, MARKER_HEADER, MARKER_VALUE, RequestSpec, Verb,
};
pub use endpoints::{ImageItem, ImagePage, ImageQuery, ImageUpload, TagDetails, TagItem};
pub use envelope::{Envelope, Status, strip_nulls};
pub use error::{ApiError, ApiResult};
pub use loading::{LoadingGuard, LoadingTracker};
pub use notify::{BufferedNotifier, LogNotifier, Notifier};
