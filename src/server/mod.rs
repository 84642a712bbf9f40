//! Results page server
//!
//! Serves the latest search report on `/`. Each request renders from a
//! snapshot of the report taken under a read lock.

pub mod page;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::data::SearchReport;

pub use page::render_page;

/// Latest report shared between the console loop and the page server
#[derive(Debug, Clone, Default)]
pub struct PageState {
    latest: Arc<RwLock<Option<SearchReport>>>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the report shown on the page
    pub async fn publish(&self, report: SearchReport) {
        *self.latest.write().await = Some(report);
    }

    /// Returns a copy of the current report
    pub async fn snapshot(&self) -> Option<SearchReport> {
        self.latest.read().await.clone()
    }
}

pub fn create_router(state: PageState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .with_state(state)
}

pub async fn index_handler(State(state): State<PageState>) -> Html<String> {
    let report = state.snapshot().await;
    Html(render_page(report.as_ref()))
}

/// Binds the page server and runs it in a background task
///
/// # Returns
/// * `Ok(JoinHandle)` once the listener is bound
/// * `Err(std::io::Error)` if the address cannot be bound
pub async fn spawn_server(
    addr: SocketAddr,
    state: PageState,
) -> std::io::Result<JoinHandle<()>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("results page at http://{}/", listener.local_addr()?);

    let routes = create_router(state);
    Ok(tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, routes).await {
            log::error!("results page server stopped: {}", err);
        }
    }))
}
