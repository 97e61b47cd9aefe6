//! Directory endpoints.

use crate::client::ApiClient;
use crate::envelope::Envelope;
use crate::error::ApiResult;

impl ApiClient {
    /// List the storage directories known to the backend.
    ///
    /// `GET /api/directory`
    pub async fn directory_list(&self) -> ApiResult<Envelope<Vec<String>>> {
        self.get("/api/directory", None::<&()>).await
    }
}
