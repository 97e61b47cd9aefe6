//! The unified request client.

use std::sync::Arc;
use std::time::Duration;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::envelope::{Envelope, strip_nulls};
use crate::error::{ApiError, ApiResult};
use crate::notify::{LogNotifier, Notifier};

/// Fixed request-tagging header attached to every outbound call.
///
/// The backend uses it to recognize panel traffic; name and value are a
/// wire convention, not configuration.
pub const MARKER_HEADER: &str = "n";
/// Value sent for [`MARKER_HEADER`].
pub const MARKER_VALUE: &str = "n";

/// HTTP verbs the unified client speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    /// HTTP GET; the payload travels in the query string.
    Get,
    /// HTTP POST; the payload travels in the body.
    Post,
    /// HTTP PUT; the payload travels in the body.
    Put,
    /// HTTP DELETE; the payload travels in the body (deletion by id
    /// list/criteria, the backend's convention).
    Delete,
}

impl Verb {
    /// Convert to reqwest method.
    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Opaque per-call transport extras.
#[derive(Clone, Debug, Default)]
pub struct CallOptions {
    /// Extra headers for this call. The marker header still wins on conflict.
    pub headers: HeaderMap,
    /// Per-call timeout override.
    pub timeout: Option<Duration>,
}

impl CallOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header to the call. Invalid names or values are ignored.
    pub fn header(
        mut self,
        name: impl TryInto<HeaderName>,
        value: impl TryInto<HeaderValue>,
    ) -> Self {
        if let (Ok(name), Ok(value)) = (name.try_into(), value.try_into()) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Override the timeout for this call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// One outbound call: verb, target path, optional JSON payload and per-call
/// extras. Constructed per call, consumed once, discarded.
#[derive(Clone, Debug)]
pub struct RequestSpec {
    /// The HTTP verb.
    pub verb: Verb,
    /// Path relative to the client's base URL.
    pub path: String,
    /// The payload; placement depends on the verb.
    pub payload: Option<Value>,
    /// Per-call transport extras.
    pub options: CallOptions,
}

impl RequestSpec {
    /// Create a spec with no payload and default options.
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            payload: None,
            options: CallOptions::default(),
        }
    }
}

/// Builder for configuring an [`ApiClient`].
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    default_headers: HeaderMap,
    notifier: Arc<dyn Notifier>,
}

impl ApiClientBuilder {
    /// Create a new builder with the specified base URL.
    ///
    /// All request paths will be appended to this base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Some(Duration::from_secs(30)),
            user_agent: Some(format!("picstash-api/{}", env!("CARGO_PKG_VERSION"))),
            default_headers: HeaderMap::new(),
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable the request timeout.
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add a default header sent with every request.
    /// Invalid names or values are ignored.
    pub fn default_header(
        mut self,
        name: impl TryInto<HeaderName>,
        value: impl TryInto<HeaderValue>,
    ) -> Self {
        if let (Ok(name), Ok(value)) = (name.try_into(), value.try_into()) {
            self.default_headers.insert(name, value);
        }
        self
    }

    /// Set the notification channel for backend failure messages.
    ///
    /// Defaults to [`LogNotifier`].
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Build the client.
    pub fn build(self) -> ApiResult<ApiClient> {
        url::Url::parse(&self.base_url)?;

        // Session credentials ride on the cookie store; always enabled.
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(ref user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        builder = builder.default_headers(self.default_headers);
        let http = builder.build()?;

        Ok(ApiClient {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: self.base_url.trim_end_matches('/').to_string(),
                notifier: self.notifier,
            }),
        })
    }
}

/// Internal state for the client.
struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    notifier: Arc<dyn Notifier>,
}

/// The unified request client for the admin panel backend.
///
/// Every call issues exactly one transport request and is interpreted
/// uniformly regardless of verb: transport faults (network errors, non-2xx)
/// propagate unmodified, 2xx bodies are read as an [`Envelope`] — an explicit
/// failure reports its message through the injected [`Notifier`] and errors
/// with the raw envelope, anything else is null-sanitized and returned whole.
///
/// The client is cheaply cloneable and thread-safe; clones share the
/// connection pool and cookie store. Calls are stateless and independent —
/// concurrent calls may complete in any order.
///
/// # Example
///
/// ```ignore
/// use picstash_api::ApiClient;
///
/// let client = ApiClient::builder("https://panel.example.com").build()?;
///
/// let envelope = client.tag_details().await?;
/// for tag in envelope.into_data().unwrap_or_default().list {
///     println!("{}: {}", tag.name, tag.count);
/// }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl ApiClient {
    /// Create a builder for configuring a new client.
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Issue a GET request; `params` is serialized into the query string.
    pub async fn get<T, P>(&self, path: &str, params: Option<&P>) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.get_with(path, params, CallOptions::default()).await
    }

    /// Issue a GET request with per-call transport extras.
    pub async fn get_with<T, P>(
        &self,
        path: &str,
        params: Option<&P>,
        options: CallOptions,
    ) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.execute(self.spec(Verb::Get, path, params, options)?)
            .await
    }

    /// Issue a POST request; `body` is serialized as the JSON body.
    pub async fn post<T, P>(&self, path: &str, body: Option<&P>) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.post_with(path, body, CallOptions::default()).await
    }

    /// Issue a POST request with per-call transport extras.
    pub async fn post_with<T, P>(
        &self,
        path: &str,
        body: Option<&P>,
        options: CallOptions,
    ) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.execute(self.spec(Verb::Post, path, body, options)?)
            .await
    }

    /// Issue a PUT request; `body` is serialized as the JSON body.
    pub async fn put<T, P>(&self, path: &str, body: Option<&P>) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.put_with(path, body, CallOptions::default()).await
    }

    /// Issue a PUT request with per-call transport extras.
    pub async fn put_with<T, P>(
        &self,
        path: &str,
        body: Option<&P>,
        options: CallOptions,
    ) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.execute(self.spec(Verb::Put, path, body, options)?)
            .await
    }

    /// Issue a DELETE request.
    ///
    /// The payload is sent as the request body, not query parameters —
    /// deletion happens by id list or criteria, per the backend convention.
    pub async fn delete<T, P>(&self, path: &str, body: Option<&P>) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.delete_with(path, body, CallOptions::default()).await
    }

    /// Issue a DELETE request with per-call transport extras.
    pub async fn delete_with<T, P>(
        &self,
        path: &str,
        body: Option<&P>,
        options: CallOptions,
    ) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.execute(self.spec(Verb::Delete, path, body, options)?)
            .await
    }

    /// Issue a multipart POST (file upload) and interpret the envelope.
    ///
    /// Multipart bodies sidestep the JSON payload placement but share the
    /// marker header, cookie and envelope handling of every other call.
    pub async fn post_multipart<T>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        self.post_multipart_with(path, form, CallOptions::default())
            .await
    }

    /// Issue a multipart POST with per-call transport extras.
    pub async fn post_multipart_with<T>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        options: CallOptions,
    ) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(path)?;
        tracing::debug!(target: "picstash_api::client", url = %url, "dispatching multipart request");

        let request = self
            .apply_options(self.inner.http.post(url).multipart(form), &options);
        let response = request.send().await?.error_for_status()?;
        let raw: Value = response.json().await?;
        self.interpret(raw)
    }

    /// Issue one transport call for `spec` and interpret the envelope.
    pub async fn execute<T>(&self, spec: RequestSpec) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(&spec.path)?;
        tracing::debug!(
            target: "picstash_api::client",
            verb = %spec.verb,
            url = %url,
            "dispatching request"
        );

        let mut request = self.inner.http.request(spec.verb.to_reqwest(), url);

        // Payload placement: GET uses the query string, everything else the
        // JSON body. An absent body payload defaults to an empty object.
        match spec.verb {
            Verb::Get => {
                if let Some(payload) = &spec.payload {
                    request = request.query(&query_pairs(payload));
                }
            }
            _ => {
                let body = spec.payload.unwrap_or_else(|| Value::Object(Map::new()));
                request = request.json(&body);
            }
        }

        let request = self.apply_options(request, &spec.options);
        let response = request.send().await?.error_for_status()?;
        let raw: Value = response.json().await?;
        self.interpret(raw)
    }

    fn spec<P>(
        &self,
        verb: Verb,
        path: &str,
        payload: Option<&P>,
        options: CallOptions,
    ) -> ApiResult<RequestSpec>
    where
        P: Serialize + ?Sized,
    {
        let payload = payload.map(serde_json::to_value).transpose()?;
        Ok(RequestSpec {
            verb,
            path: path.to_string(),
            payload,
            options,
        })
    }

    fn endpoint_url(&self, path: &str) -> ApiResult<url::Url> {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Ok(url::Url::parse(&format!(
            "{}{}",
            self.inner.base_url, path
        ))?)
    }

    fn apply_options(
        &self,
        mut request: reqwest::RequestBuilder,
        options: &CallOptions,
    ) -> reqwest::RequestBuilder {
        // Merge the marker header over the caller's headers; insert replaces,
        // so a caller-supplied marker cannot survive.
        let mut headers = options.headers.clone();
        headers.insert(
            HeaderName::from_static(MARKER_HEADER),
            HeaderValue::from_static(MARKER_VALUE),
        );
        request = request.headers(headers);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    /// Interpret a decoded response body as the unified envelope.
    fn interpret<T>(&self, raw: Value) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        // Panel routing rule: only an explicit "failure" takes the failure
        // path; everything else is success.
        let is_failure = raw.get("status").and_then(Value::as_str) == Some("failure");
        if is_failure {
            if let Some(msg) = raw.get("msg").and_then(Value::as_str)
                && !msg.is_empty()
            {
                self.inner.notifier.report(msg);
            }
            tracing::debug!(target: "picstash_api::client", "backend reported failure");
            let envelope: Envelope<Value> = serde_json::from_value(raw)?;
            return Err(ApiError::Backend(envelope));
        }

        // A null body collapses to an empty envelope.
        let raw = if raw.is_null() {
            Value::Object(Map::new())
        } else {
            raw
        };
        Ok(serde_json::from_value(strip_nulls(raw))?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish()
    }
}

/// Flatten a JSON payload into query pairs.
///
/// Scalars render with their display form, arrays repeat the key, and null
/// entries are skipped. Nested objects are not part of the panel's wire
/// conventions and fall back to compact JSON.
fn query_pairs(payload: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Some(map) = payload.as_object() {
        for (key, value) in map {
            append_query_value(&mut pairs, key, value);
        }
    }
    pairs
}

fn append_query_value(pairs: &mut Vec<(String, String)>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for item in items {
                append_query_value(pairs, key, item);
            }
        }
        Value::String(text) => pairs.push((key.to_string(), text.clone())),
        Value::Bool(flag) => pairs.push((key.to_string(), flag.to_string())),
        Value::Number(number) => pairs.push((key.to_string(), number.to_string())),
        Value::Object(_) => pairs.push((key.to_string(), value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::query_pairs;

    #[test]
    fn query_pairs_flatten_scalars_and_arrays() {
        let pairs = query_pairs(&json!({
            "directory": "pets",
            "page": 2,
            "archived": false,
            "tags": ["cat", "dog"],
            "cursor": null,
        }));

        assert_eq!(
            pairs,
            vec![
                ("archived".to_string(), "false".to_string()),
                ("directory".to_string(), "pets".to_string()),
                ("page".to_string(), "2".to_string()),
                ("tags".to_string(), "cat".to_string()),
                ("tags".to_string(), "dog".to_string()),
            ]
        );
    }

    #[test]
    fn query_pairs_ignore_non_object_payloads() {
        assert!(query_pairs(&json!([1, 2, 3])).is_empty());
        assert!(query_pairs(&json!("scalar")).is_empty());
    }
}
