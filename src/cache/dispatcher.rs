//! Request dispatcher answering API calls from the cache when possible

use std::collections::HashMap;
use std::future::Future;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use super::key::construct_key;
use super::store::{CacheError, CacheMap, CacheStore};

/// Query parameters or request headers
pub type Params = HashMap<String, String>;

/// Errors raised by a live request
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Errors that can occur when fetching through the cache
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Performs a live GET request and decodes the body as JSON
pub trait Transport {
    fn get_json(
        &self,
        endpoint: &str,
        params: &Params,
        headers: &Params,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// Transport backed by a reqwest client
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get_json(
        &self,
        endpoint: &str,
        params: &Params,
        headers: &Params,
    ) -> Result<Value, TransportError> {
        let mut request = self.client.get(endpoint).query(params);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Answers requests from the cache, falling back to the transport on a miss
///
/// Owns the in-memory mapping. Every miss stores the decoded body and
/// rewrites the whole cache file.
#[derive(Debug)]
pub struct CachedClient<T> {
    transport: T,
    store: CacheStore,
    entries: CacheMap,
}

impl<T: Transport> CachedClient<T> {
    /// Creates a client and loads the current cache file
    pub fn new(transport: T, store: CacheStore) -> Self {
        let entries = store.load();
        Self {
            transport,
            store,
            entries,
        }
    }

    /// Replaces the in-memory mapping with the file's current content
    pub fn reload(&mut self) {
        self.entries = self.store.load();
    }

    /// Returns the in-memory mapping
    pub fn entries(&self) -> &CacheMap {
        &self.entries
    }

    /// Returns the underlying transport for uncached calls
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the backing store
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Fetches `endpoint` with `params`, using the cached body if present
    ///
    /// # Returns
    /// * `Ok(Value)` - The cached or freshly decoded body
    /// * `Err(FetchError)` - If the live call fails or the cache cannot be saved
    pub async fn fetch(
        &mut self,
        endpoint: &str,
        params: &Params,
        headers: &Params,
    ) -> Result<Value, FetchError> {
        let key = construct_key(endpoint, params);

        if let Some(cached) = self.entries.get(&key) {
            log::info!("cache hit! {}", key);
            return Ok(cached.clone());
        }

        log::info!("cache miss! {}", key);
        let body = self.transport.get_json(endpoint, params, headers).await?;
        self.entries.insert(key, body.clone());
        self.store.save(&self.entries)?;

        Ok(body)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// A recorded call: endpoint, params, headers
    pub(crate) type Call = (String, Params, Params);

    /// Transport double returning canned bodies by endpoint
    #[derive(Clone, Default)]
    pub(crate) struct FakeTransport {
        pub(crate) responses: Arc<Mutex<HashMap<String, Value>>>,
        pub(crate) calls: Arc<Mutex<Vec<Call>>>,
    }

    impl FakeTransport {
        pub(crate) fn respond(self, endpoint: &str, body: Value) -> Self {
            self.responses.lock().unwrap().insert(endpoint.to_string(), body);
            self
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Transport for FakeTransport {
        async fn get_json(
            &self,
            endpoint: &str,
            params: &Params,
            headers: &Params,
        ) -> Result<Value, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint.to_string(), params.clone(), headers.clone()));
            match self.responses.lock().unwrap().get(endpoint) {
                Some(body) => Ok(body.clone()),
                None => Err(serde_json::from_str::<Value>("not json")
                    .unwrap_err()
                    .into()),
            }
        }
    }

    /// Serves `router` on an ephemeral local port and returns its base URL
    pub(crate) async fn serve_locally(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind local port");
        let addr = listener.local_addr().expect("Should have local address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Local server failed");
        });
        format!("http://{}", addr)
    }

    /// Routes that echo the request, fail with a JSON body, or answer in plain text
    fn echo_router() -> axum::Router {
        use axum::extract::Query;
        use axum::http::{HeaderMap, StatusCode};
        use axum::routing::get;
        use axum::Json;

        async fn echo(
            Query(query): Query<HashMap<String, String>>,
            headers: HeaderMap,
        ) -> Json<Value> {
            let authorization = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            Json(json!({"query": query, "authorization": authorization}))
        }

        async fn server_error() -> (StatusCode, Json<Value>) {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": {"code": "INTERNAL_ERROR"}})),
            )
        }

        async fn plain_text() -> &'static str {
            "<html>not json</html>"
        }

        axum::Router::new()
            .route("/echo", get(echo))
            .route("/error", get(server_error))
            .route("/text", get(plain_text))
    }

    const ENDPOINT: &str = "https://api.example.com/search";

    fn params() -> Params {
        Params::from([
            ("location".to_string(), "ann arbor".to_string()),
            ("term".to_string(), "pizza".to_string()),
        ])
    }

    fn headers() -> Params {
        Params::from([("Authorization".to_string(), "Bearer secret".to_string())])
    }

    fn create_store() -> (CacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CacheStore::at(temp_dir.path().join("cache.json"));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_cache_hit_skips_transport() {
        let (store, _temp_dir) = create_store();
        let stored = json!({"businesses": [{"name": "Cached Slice"}]});
        let mut map = CacheMap::new();
        map.insert(construct_key(ENDPOINT, &params()), stored.clone());
        store.save(&map).unwrap();

        let transport = FakeTransport::default().respond(ENDPOINT, json!({"businesses": []}));
        let mut client = CachedClient::new(transport.clone(), store);

        let body = client.fetch(ENDPOINT, &params(), &headers()).await.unwrap();

        assert_eq!(body, stored);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cache_miss_calls_transport_and_persists() {
        let (store, _temp_dir) = create_store();
        let live = json!({"businesses": [{"name": "Fresh Slice"}]});
        let transport = FakeTransport::default().respond(ENDPOINT, live.clone());
        let mut client = CachedClient::new(transport.clone(), store.clone());

        let body = client.fetch(ENDPOINT, &params(), &headers()).await.unwrap();

        assert_eq!(body, live);
        assert_eq!(transport.call_count(), 1);
        let persisted = store.load();
        assert_eq!(&persisted, client.entries());
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted.get(&construct_key(ENDPOINT, &params())), Some(&live));
    }

    #[tokio::test]
    async fn test_transport_receives_params_and_headers() {
        let (store, _temp_dir) = create_store();
        let transport = FakeTransport::default().respond(ENDPOINT, json!({}));
        let mut client = CachedClient::new(transport.clone(), store);

        client.fetch(ENDPOINT, &params(), &headers()).await.unwrap();

        let calls = transport.calls.lock().unwrap();
        let (endpoint, sent_params, sent_headers) = &calls[0];
        assert_eq!(endpoint, ENDPOINT);
        assert_eq!(sent_params, &params());
        assert_eq!(sent_headers, &headers());
    }

    #[tokio::test]
    async fn test_second_fetch_is_a_hit() {
        let (store, _temp_dir) = create_store();
        let transport = FakeTransport::default().respond(ENDPOINT, json!({"n": 1}));
        let mut client = CachedClient::new(transport.clone(), store);

        client.fetch(ENDPOINT, &params(), &headers()).await.unwrap();
        client.fetch(ENDPOINT, &params(), &headers()).await.unwrap();

        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_call_stores_nothing() {
        let (store, _temp_dir) = create_store();
        let transport = FakeTransport::default();
        let mut client = CachedClient::new(transport, store.clone());

        let result = client.fetch(ENDPOINT, &params(), &headers()).await;

        assert!(matches!(result, Err(FetchError::Transport(_))));
        assert!(client.entries().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_miss_keeps_existing_entries_in_file() {
        let (store, _temp_dir) = create_store();
        let mut map = CacheMap::new();
        map.insert("older_key".to_string(), json!("old"));
        store.save(&map).unwrap();

        let transport = FakeTransport::default().respond(ENDPOINT, json!("new"));
        let mut client = CachedClient::new(transport, store.clone());
        client.fetch(ENDPOINT, &params(), &headers()).await.unwrap();

        let persisted = store.load();
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted.get("older_key"), Some(&json!("old")));
    }

    #[tokio::test]
    async fn test_reload_picks_up_external_changes() {
        let (store, _temp_dir) = create_store();
        let transport = FakeTransport::default();
        let mut client = CachedClient::new(transport.clone(), store.clone());
        assert!(client.entries().is_empty());

        let mut map = CacheMap::new();
        map.insert(construct_key(ENDPOINT, &params()), json!({"external": true}));
        store.save(&map).unwrap();
        client.reload();

        let body = client.fetch(ENDPOINT, &params(), &headers()).await.unwrap();
        assert_eq!(body, json!({"external": true}));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_http_transport_sends_params_and_headers() {
        let base = serve_locally(echo_router()).await;

        let body = HttpTransport::new()
            .get_json(&format!("{}/echo", base), &params(), &headers())
            .await
            .expect("Should fetch echo");

        assert_eq!(body["query"], json!({"location": "ann arbor", "term": "pizza"}));
        assert_eq!(body["authorization"], json!("Bearer secret"));
    }

    #[tokio::test]
    async fn test_http_transport_ignores_status_code() {
        let base = serve_locally(echo_router()).await;

        let body = HttpTransport::new()
            .get_json(&format!("{}/error", base), &Params::new(), &Params::new())
            .await
            .expect("A JSON error body is still decoded");

        assert_eq!(body, json!({"error": {"code": "INTERNAL_ERROR"}}));
    }

    #[tokio::test]
    async fn test_http_transport_non_json_body_fails_to_decode() {
        let base = serve_locally(echo_router()).await;

        let result = HttpTransport::new()
            .get_json(&format!("{}/text", base), &Params::new(), &Params::new())
            .await;

        assert!(matches!(result, Err(TransportError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_http_transport_connection_failure() {
        let result = HttpTransport::new()
            .get_json("http://127.0.0.1:9/echo", &Params::new(), &Params::new())
            .await;

        assert!(matches!(result, Err(TransportError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_cached_client_over_http_persists_live_body() {
        let base = serve_locally(echo_router()).await;
        let endpoint = format!("{}/echo", base);
        let (store, _temp_dir) = create_store();
        let mut client = CachedClient::new(HttpTransport::new(), store.clone());

        let live = client.fetch(&endpoint, &params(), &headers()).await.unwrap();
        let cached = client.fetch(&endpoint, &params(), &headers()).await.unwrap();

        assert_eq!(live, cached);
        assert_eq!(
            store.load().get(&construct_key(&endpoint, &params())),
            Some(&live)
        );
    }
}
