use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::models::MovieSummary;
use crate::tmdb::CatalogApi;
use crate::view::Phase;

/// Quiet period before a query change is sent to the remote service.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

const SEARCH_FAILED: &str = "Search failed";

#[derive(Debug, Clone, Default)]
pub struct SearchSnapshot {
    pub phase: Phase,
    /// Updated synchronously by `set_query`, before any debounce fires.
    pub query: String,
    pub results: Vec<MovieSummary>,
}

/// Debounced remote search. Every `set_query` takes a ticket from a
/// generation counter; a debounce firing or a response arriving with an old
/// ticket is dropped, so only the newest query's results are ever committed
/// regardless of network ordering.
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn CatalogApi>,
    generation: AtomicU64,
    tx: watch::Sender<SearchSnapshot>,
}

impl SearchController {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        let (tx, _) = watch::channel(SearchSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                api,
                generation: AtomicU64::new(0),
                tx,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.inner.tx.subscribe()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.inner.tx.borrow().clone()
    }

    pub fn query(&self) -> String {
        self.inner.tx.borrow().query.clone()
    }

    /// Stores the query immediately and restarts the debounce. The pending
    /// timer of a superseded call never sends a request.
    pub fn set_query(&self, query: &str) {
        let query = query.to_string();
        self.inner.tx.send_modify(|s| s.query = query.clone());
        let ticket = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE).await;
            if inner.generation.load(Ordering::SeqCst) != ticket {
                return;
            }
            inner.run_search(ticket, &query).await;
        });
    }
}

impl Inner {
    async fn run_search(&self, ticket: u64, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            // No network call and no Loading state for a blank query.
            self.tx.send_modify(|s| {
                s.phase = Phase::Ready;
                s.results = Vec::new();
            });
            return;
        }

        self.tx.send_modify(|s| s.phase = Phase::Loading);
        let outcome = self.api.search(query, 1).await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!("Discarding stale search response for '{query}'");
            return;
        }
        match outcome {
            Ok(page) => {
                debug!("Search '{query}' returned {} results", page.results.len());
                self.tx.send_modify(|s| {
                    s.phase = Phase::Ready;
                    s.results = page.results;
                });
            }
            Err(e) => {
                warn!("Search '{query}' failed: {e:#}");
                self.tx.send_modify(|s| {
                    s.phase = Phase::Failed(SEARCH_FAILED.to_string());
                    s.results = Vec::new();
                });
            }
        }
    }
}
