//! Image endpoints: listing, upload, deletion and tag assignment.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::client::ApiClient;
use crate::envelope::Envelope;
use crate::error::ApiResult;

/// One image row as the backend returns it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    /// Backend id of the image.
    pub id: i64,
    /// Display name of the file.
    pub name: String,
    /// Full-size URL.
    pub url: String,
    /// Thumbnail URL.
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: String,
    /// Tags attached to the image.
    #[serde(default)]
    pub tags: Vec<String>,
    /// File size in bytes.
    pub size: u64,
    /// Creation timestamp as the backend formats it.
    pub created_at: String,
}

/// One page of the image listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagePage {
    /// Images on this page.
    #[serde(default)]
    pub list: Vec<ImageItem>,
    /// Total number of images matching the query.
    #[serde(default)]
    pub total: u64,
}

/// Filter and pagination for [`ApiClient::image_list`].
#[derive(Clone, Debug, Serialize)]
pub struct ImageQuery {
    /// Directory to list.
    pub directory: String,
    /// Tags the images must carry; empty means no tag filter.
    pub tags: Vec<String>,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub page_size: u32,
}

impl ImageQuery {
    /// Query one directory page with no tag filter.
    pub fn directory_page(directory: impl Into<String>, page: u32, page_size: u32) -> Self {
        Self {
            directory: directory.into(),
            tags: Vec::new(),
            page,
            page_size,
        }
    }

    /// Restrict the query to images carrying all of `tags`.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// A file upload destined for `POST /api/upload`.
#[derive(Clone, Debug)]
pub struct ImageUpload {
    /// Target directory.
    pub directory: String,
    /// File name reported to the backend.
    pub file_name: String,
    /// File content.
    pub content: Bytes,
    /// MIME type of the file, when known.
    pub mime_type: Option<String>,
    /// Tags to attach on upload; joined comma-separated on the wire.
    pub tags: Vec<String>,
}

impl ImageUpload {
    /// Create an upload with no MIME type and no tags.
    pub fn new(
        directory: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
            content: content.into(),
            mime_type: None,
            tags: Vec::new(),
        }
    }

    /// Set the MIME type of the file.
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Attach tags at upload time.
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    fn into_form(self) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new().text("directory", self.directory);
        if !self.tags.is_empty() {
            form = form.text("tags", self.tags.join(","));
        }

        let part =
            reqwest::multipart::Part::bytes(self.content.to_vec()).file_name(self.file_name.clone());
        let part = match &self.mime_type {
            Some(mime_type) => match part.mime_str(mime_type) {
                Ok(part) => part,
                Err(error) => {
                    tracing::warn!(
                        target: "picstash_api::images",
                        "invalid MIME type '{mime_type}': {error}"
                    );
                    reqwest::multipart::Part::bytes(self.content.to_vec())
                        .file_name(self.file_name.clone())
                }
            },
            None => part,
        };
        form.part("file", part)
    }
}

impl ApiClient {
    /// Fetch one page of images, optionally filtered by tags.
    ///
    /// `POST /api/images`
    pub async fn image_list(&self, query: &ImageQuery) -> ApiResult<Envelope<ImagePage>> {
        self.post("/api/images", Some(query)).await
    }

    /// Upload one image file into a directory.
    ///
    /// `POST /api/upload` (multipart)
    pub async fn upload_image(&self, upload: ImageUpload) -> ApiResult<Envelope<Value>> {
        self.post_multipart("/api/upload", upload.into_form()).await
    }

    /// Delete images by id.
    ///
    /// `DELETE /api/images` — the id list travels in the request body, which
    /// is the backend's deletion convention.
    pub async fn delete_images(&self, ids: &[i64]) -> ApiResult<Envelope<Value>> {
        self.delete("/api/images", Some(&json!({ "ids": ids }))).await
    }

    /// Attach tags to a set of images.
    ///
    /// `POST /api/images/tags`
    pub async fn assign_tags(&self, image_ids: &[i64], tags: &[String]) -> ApiResult<Envelope<Value>> {
        self.post(
            "/api/images/tags",
            Some(&json!({ "image_ids": image_ids, "tags": tags })),
        )
        .await
    }
}
