//! Loader — populates a [`SharedStore`] from a [`DocumentSource`].
//!
//! The three documents are fetched concurrently. Each one is indexed outside
//! the store lock and installed as soon as it is ready, so readers can see any
//! subset of collections populated while the others are still in flight.
//! Failures are logged and leave the collection absent; nothing is retried and
//! nothing is propagated, but the returned [`LoadReport`] records the outcome.

use std::sync::{Arc, OnceLock};

use idlescape_core::{DataConfig, DataStore, Document, KeyPolicy, SharedStore};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::FetchError;
use crate::source::{DocumentSource, HttpSource};

/// Outcome of one load pass.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Documents installed, with their record counts.
    pub loaded: Vec<(Document, usize)>,
    /// Documents that failed, with the error message.
    pub failed: Vec<(Document, String)>,
}

impl LoadReport {
    /// Whether every document loaded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, document: Document, outcome: Result<usize, FetchError>) {
        match outcome {
            Ok(count) => self.loaded.push((document, count)),
            Err(e) => self.failed.push((document, e.to_string())),
        }
    }
}

/// Fetches documents from a source and installs them into a store.
pub struct Loader<S> {
    source: S,
    policy: KeyPolicy,
}

impl<S: DocumentSource + Sync> Loader<S> {
    /// Create a loader.
    pub fn new(source: S, policy: KeyPolicy) -> Self {
        Self { source, policy }
    }

    /// Fetch, index and install a single document.
    ///
    /// # Errors
    /// Returns the fetch error, or the indexing error under
    /// [`KeyPolicy::Strict`]. The store is not modified on error.
    pub async fn load_document(&self, store: &SharedStore, document: Document) -> Result<usize, FetchError> {
        let raw = self.source.fetch(document).await?;

        let mut staged = DataStore::new();
        let count = staged.ingest(document, raw, self.policy)?;
        store.write().merge(staged);

        Ok(count)
    }

    /// Load all three documents concurrently into `store`.
    pub async fn load_into(&self, store: &SharedStore) -> LoadReport {
        let (enchantments, items, locations) = tokio::join!(
            self.load_logged(store, Document::Enchantments),
            self.load_logged(store, Document::Items),
            self.load_logged(store, Document::Locations),
        );

        let mut report = LoadReport::default();
        report.record(Document::Enchantments, enchantments);
        report.record(Document::Items, items);
        report.record(Document::Locations, locations);
        report
    }

    async fn load_logged(&self, store: &SharedStore, document: Document) -> Result<usize, FetchError> {
        let outcome = self.load_document(store, document).await;
        match &outcome {
            Ok(count) => info!(document = %document, records = count, "Loaded document"),
            Err(e) => error!(document = %document, error = %e, "Failed to load document"),
        }
        outcome
    }
}

impl<S: DocumentSource + Send + Sync + 'static> Loader<S> {
    /// Load in the background on the current tokio runtime.
    ///
    /// Dropping the handle does not cancel the load.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn spawn(self, store: SharedStore) -> JoinHandle<LoadReport> {
        tokio::spawn(async move { self.load_into(&store).await })
    }
}

/// Create an empty store and load it from the configured HTTP source.
pub async fn load_default(config: &DataConfig) -> (SharedStore, LoadReport) {
    let store = DataStore::new().into_shared();
    let loader = Loader::new(HttpSource::new(config.source.clone()), config.index.key_policy());
    let report = loader.load_into(&store).await;
    (store, report)
}

/// Idempotent default initializer over a caller-owned slot.
///
/// The first call creates the store and starts loading it in the background
/// from the configured HTTP source; later calls return the same store. Without
/// a tokio runtime the store is created but not loaded, and an error is logged.
pub fn create_default(slot: &OnceLock<SharedStore>, config: &DataConfig) -> SharedStore {
    slot.get_or_init(|| {
        let store = DataStore::new().into_shared();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let loader = Loader::new(HttpSource::new(config.source.clone()), config.index.key_policy());
                let task_store = Arc::clone(&store);
                handle.spawn(async move { loader.load_into(&task_store).await });
            }
            Err(e) => {
                error!(error = %e, "No tokio runtime available, default store will stay empty");
            }
        }
        store
    })
    .clone()
}
