use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::error::MatrixError;
use crate::domain::snapshot::Snapshot;

#[derive(Debug)]
struct Published {
    ticket: u64,
    snapshot: Arc<Snapshot>,
}

/// Holds the currently published snapshot.
///
/// Publishing swaps one `Arc`; readers clone it and search without holding
/// the lock, so a reader sees either the old or the new snapshot, never a mix.
///
/// Every refresh takes a ticket before it starts fetching. A publish carrying
/// an older ticket than the one already published is discarded, so a slow
/// fetch cannot overwrite newer data.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    tickets: AtomicU64,
    current: RwLock<Option<Published>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_ticket(&self) -> u64 {
        self.tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publishes `snapshot` unless a newer ticket already won; returns whichever is current.
    pub fn publish(&self, snapshot: Snapshot, ticket: u64) -> Arc<Snapshot> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(published) = current.as_ref().filter(|published| published.ticket > ticket) {
            tracing::debug!(
                ticket,
                current_ticket = published.ticket,
                provider = %snapshot.provider,
                "stale snapshot discarded"
            );
            return published.snapshot.clone();
        }

        let snapshot = Arc::new(snapshot);
        *current = Some(Published {
            ticket,
            snapshot: snapshot.clone(),
        });
        snapshot
    }

    pub fn current(&self) -> Result<Arc<Snapshot>, MatrixError> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|published| published.snapshot.clone())
            .ok_or(MatrixError::UninitializedData)
    }
}
