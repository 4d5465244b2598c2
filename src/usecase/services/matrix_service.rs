use std::sync::Arc;

use crate::domain::entities::feature::FeatureResult;
use crate::domain::entities::grid::RawGrid;
use crate::domain::error::MatrixError;
use crate::domain::layout::MatrixLayout;
use crate::domain::query;
use crate::domain::snapshot::Snapshot;
use crate::usecase::ports::grid_source::GridSource;
use crate::usecase::services::snapshot_store::SnapshotStore;

pub struct MatrixService {
    source: Arc<dyn GridSource>,
    layout: MatrixLayout,
    store: SnapshotStore,
    refresh_before_search: bool,
}

impl MatrixService {
    pub fn new(source: Arc<dyn GridSource>, layout: MatrixLayout) -> Self {
        Self {
            source,
            layout,
            store: SnapshotStore::new(),
            refresh_before_search: false,
        }
    }

    /// Re-fetch the matrix before every search instead of serving the last snapshot.
    pub fn with_refresh_before_search(mut self, enabled: bool) -> Self {
        self.refresh_before_search = enabled;
        self
    }

    pub fn source_label(&self) -> String {
        self.source.describe()
    }

    /// Fetches from the provider and publishes a new snapshot.
    ///
    /// On any failure the previously published snapshot stays current.
    pub fn refresh(&self) -> Result<Arc<Snapshot>, MatrixError> {
        let provider = self.source.describe();
        let ticket = self.store.next_ticket();
        tracing::info!(provider = %provider, ticket, "refreshing feature matrix");

        let raw = self.source.fetch().map_err(|err| {
            let message = format!("{err:#}");
            tracing::warn!(provider = %provider, error = %message, "provider fetch failed");
            MatrixError::ProviderFetchFailure {
                provider: provider.clone(),
                message,
            }
        })?;

        self.publish_raw(raw, &provider, ticket)
    }

    /// Publishes a grid handed over by the caller.
    pub fn refresh_with(&self, raw: RawGrid) -> Result<Arc<Snapshot>, MatrixError> {
        let ticket = self.store.next_ticket();
        self.publish_raw(raw, "caller", ticket)
    }

    fn publish_raw(
        &self,
        raw: RawGrid,
        provider: &str,
        ticket: u64,
    ) -> Result<Arc<Snapshot>, MatrixError> {
        let snapshot = Snapshot::build(raw, &self.layout, provider).inspect_err(|err| {
            tracing::warn!(provider = %provider, error = %err, "feature matrix rejected");
        })?;

        tracing::info!(
            provider = %provider,
            rows = snapshot.grid.height(),
            columns = snapshot.grid.width(),
            features = snapshot.index.len(),
            "feature matrix published"
        );
        Ok(self.store.publish(snapshot, ticket))
    }

    pub fn snapshot(&self) -> Result<Arc<Snapshot>, MatrixError> {
        self.store.current()
    }

    pub fn search(&self, term: &str) -> Result<Vec<FeatureResult>, MatrixError> {
        let snapshot = if self.refresh_before_search {
            self.refresh()?
        } else {
            self.store.current()?
        };

        let results = query::search(&snapshot, term);
        tracing::debug!(term, matches = results.len(), "feature search");
        Ok(results)
    }
}
