//! Catalog fetch state machine.
//!
//! Each query change opens a new fetch cycle with a higher generation number.
//! The task that runs a cycle only writes its result back if the channel still
//! holds that cycle's generation, so superseded responses are dropped.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{Instrument, debug, info, instrument};

use crime_salad_core::CollectionQuery;

use super::{CatalogTransport, FetchState, fetch_collection};

/// Current catalog state together with the cycle that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    /// Number of cycles started so far; `0` before the first query.
    pub generation: u64,
    /// Query of the current cycle.
    pub query: Option<CollectionQuery>,
    /// State of the current cycle.
    pub state: FetchState,
}

/// Owns the [`FetchState`] for the current [`CollectionQuery`].
///
/// Cheap to clone; clones share the same state.
pub struct CatalogFetcher<T> {
    inner: Arc<FetcherInner<T>>,
}

struct FetcherInner<T> {
    transport: T,
    tx: watch::Sender<CatalogSnapshot>,
}

impl<T> Clone for CatalogFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: CatalogTransport> CatalogFetcher<T> {
    /// Create a fetcher in the `NotStarted` state.
    #[must_use]
    pub fn new(transport: T) -> Self {
        let (tx, _rx) = watch::channel(CatalogSnapshot::default());
        Self {
            inner: Arc::new(FetcherInner { transport, tx }),
        }
    }

    /// The transport requests go through.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Submit a query.
    ///
    /// Returns `false` and does nothing when `query` equals the current one.
    /// Otherwise starts a new cycle and returns `true`: the state becomes
    /// `Loading` and one request is spawned, or `MissingCredential` when the
    /// query has no token.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip_all, fields(shop = %query.shop(), collection = %query.collection()))]
    pub fn set_query(&self, query: CollectionQuery) -> bool {
        let has_token = query.token().is_some();
        let mut generation = 0;

        let started = self.inner.tx.send_if_modified(|snap| {
            if snap.query.as_ref() == Some(&query) {
                return false;
            }
            snap.generation += 1;
            snap.query = Some(query.clone());
            snap.state = if has_token {
                FetchState::Loading
            } else {
                FetchState::MissingCredential
            };
            generation = snap.generation;
            true
        });

        if !started {
            debug!("Query unchanged; keeping current state");
            return false;
        }

        if has_token {
            info!(generation, "Starting catalog fetch");
            let inner = Arc::clone(&self.inner);
            tokio::spawn(
                async move { inner.run_cycle(generation, query).await }.in_current_span(),
            );
        } else {
            info!(generation, "No storefront token; skipping fetch");
        }

        true
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FetchState {
        self.inner.tx.borrow().state.clone()
    }

    /// Current state with its generation and query.
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.inner.tx.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.inner.tx.subscribe()
    }

    /// Wait until the current cycle leaves `Loading`, then return its state.
    ///
    /// Returns immediately with `NotStarted` if no query was ever submitted.
    pub async fn wait_settled(&self) -> FetchState {
        let mut rx = self.inner.tx.subscribe();
        match rx
            .wait_for(|snap| !matches!(snap.state, FetchState::Loading))
            .await
        {
            Ok(snap) => snap.state.clone(),
            // The sender lives in `self`, so the channel cannot close here.
            Err(_) => self.state(),
        }
    }
}

impl<T: CatalogTransport> FetcherInner<T> {
    async fn run_cycle(&self, generation: u64, query: CollectionQuery) {
        let state = FetchState::from(fetch_collection(&self.transport, &query).await);
        let label = state.label();

        let applied = self.tx.send_if_modified(|snap| {
            if snap.generation != generation {
                return false;
            }
            snap.state = state;
            true
        });

        if applied {
            info!(generation, state = label, "Catalog fetch settled");
        } else {
            debug!(generation, "Discarding response of superseded catalog fetch");
        }
    }
}
