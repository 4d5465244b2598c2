use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::feature::FeatureResult;
use crate::domain::snapshot::Snapshot;
use crate::usecase::ports::repo::SheetMeta;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub provider: String,
    pub rows: usize,
    pub columns: usize,
    pub features: usize,
    pub refreshed_at: String,
}

impl SnapshotSummary {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            provider: snapshot.provider.clone(),
            rows: snapshot.grid.height(),
            columns: snapshot.grid.width(),
            features: snapshot.index.len(),
            refreshed_at: snapshot.refreshed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

pub struct AppState {
    pub sheets: Signal<Vec<SheetMeta>>,
    pub snapshot: Signal<Option<SnapshotSummary>>,
    pub search_term: Signal<String>,
    pub results: Signal<Vec<FeatureResult>>,
    pub show_grid: Signal<bool>,
    pub grid_rows: Signal<Vec<Vec<String>>>,
    pub show_json: Signal<bool>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            sheets: use_signal(Vec::<SheetMeta>::new),
            snapshot: use_signal(|| None::<SnapshotSummary>),
            search_term: use_signal(String::new),
            results: use_signal(Vec::<FeatureResult>::new),
            show_grid: use_signal(|| false),
            grid_rows: use_signal(Vec::<Vec<String>>::new),
            show_json: use_signal(|| false),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
        }
    }
}
