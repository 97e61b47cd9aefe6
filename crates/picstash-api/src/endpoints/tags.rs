//! Tag endpoints: the tag vocabulary and its usage counts.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::client::ApiClient;
use crate::envelope::Envelope;
use crate::error::ApiResult;

/// One tag with its usage count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagItem {
    /// Tag name.
    pub name: String,
    /// Number of images carrying the tag.
    #[serde(default)]
    pub count: u64,
}

/// Response payload of [`ApiClient::tag_details`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TagDetails {
    /// All tags with their usage counts.
    #[serde(default)]
    pub list: Vec<TagItem>,
}

impl ApiClient {
    /// List all tag names.
    ///
    /// `GET /api/tags`
    pub async fn tag_list(&self) -> ApiResult<Envelope<Vec<String>>> {
        self.get("/api/tags", None::<&()>).await
    }

    /// Create a tag.
    ///
    /// `POST /api/tags`
    pub async fn create_tag(&self, name: &str) -> ApiResult<Envelope<Value>> {
        self.post("/api/tags", Some(&json!({ "name": name }))).await
    }

    /// Delete a tag by name. The name travels in the request body.
    ///
    /// `DELETE /api/tags`
    pub async fn delete_tag(&self, name: &str) -> ApiResult<Envelope<Value>> {
        self.delete("/api/tags", Some(&json!({ "name": name }))).await
    }

    /// Rename a tag.
    ///
    /// `PUT /api/tags`
    pub async fn rename_tag(&self, old_name: &str, new_name: &str) -> ApiResult<Envelope<Value>> {
        self.put(
            "/api/tags",
            Some(&json!({ "old_name": old_name, "new_name": new_name })),
        )
        .await
    }

    /// List all tags with their usage counts.
    ///
    /// `GET /api/tags/details`
    pub async fn tag_details(&self) -> ApiResult<Envelope<TagDetails>> {
        self.get("/api/tags/details", None::<&()>).await
    }
}
