use std::sync::Arc;

use dioxus::prelude::*;
use rfd::FileDialog;

use crate::config::{AppConfig, MatrixSource};
use crate::domain::entities::feature::{results_to_json, FeatureResult};
use crate::domain::error::MatrixError;
use crate::infra::import::csv::CsvGridSource;
use crate::infra::import::xlsx::XlsxGridSource;
use crate::infra::sqlite::repo::SqliteRepo;
use crate::infra::sqlite::source::StoredSheetSource;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::{AppState, SnapshotSummary};
use crate::usecase::ports::grid_source::GridSource;
use crate::usecase::ports::repo::{SheetMeta, SheetRepository};
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::matrix_service::MatrixService;

const GRID_PREVIEW_ROWS: usize = 300;

#[derive(Clone)]
struct Services {
    config: Arc<AppConfig>,
    matrix: Arc<MatrixService>,
    import: Arc<ImportService>,
}

fn build_services(config: AppConfig) -> anyhow::Result<Services> {
    let repo = Arc::new(SqliteRepo {
        db_path: config.db_path.clone(),
    });
    repo.init().map_err(|err| anyhow::anyhow!(err.to_string()))?;

    let source = grid_source(&config, repo.clone());
    tracing::info!(source = %source.describe(), "feature matrix source selected");
    let matrix = MatrixService::new(source, config.layout.clone())
        .with_refresh_before_search(config.refresh_before_search);

    Ok(Services {
        config: Arc::new(config),
        matrix: Arc::new(matrix),
        import: Arc::new(ImportService::new(repo)),
    })
}

fn grid_source(config: &AppConfig, repo: Arc<SqliteRepo>) -> Arc<dyn GridSource> {
    match &config.source {
        MatrixSource::Store => Arc::new(StoredSheetSource::new(repo, config.sheet_range.clone())),
        MatrixSource::Csv(path) => Arc::new(CsvGridSource {
            csv_path: path.clone(),
        }),
        MatrixSource::Xlsx(path) => Arc::new(XlsxGridSource {
            xlsx_path: path.clone(),
            range: config.sheet_range.clone(),
        }),
    }
}

#[derive(Clone, Debug, PartialEq)]
struct ResultRow {
    key: String,
    name: String,
    description: String,
    link: String,
    supported: Vec<String>,
}

fn result_rows(results: &[FeatureResult]) -> Vec<ResultRow> {
    results
        .iter()
        .map(|result| ResultRow {
            key: format!("{}-{}", result.row, result.name),
            name: result.name.clone(),
            description: result.details.description.clone(),
            link: result.details.more_info_link.clone(),
            supported: result
                .details
                .editions_skus
                .iter()
                .map(|pair| format!("{} / {}", pair.edition, pair.sku))
                .collect(),
        })
        .collect()
}

fn summary_line(summary: &SnapshotSummary) -> String {
    format!(
        "{} | {} rows x {} columns | {} features | refreshed {}",
        summary.provider, summary.rows, summary.columns, summary.features, summary.refreshed_at
    )
}

fn refresh_summary(matrix: &MatrixService) -> Result<SnapshotSummary, MatrixError> {
    matrix
        .refresh()
        .map(|snapshot| SnapshotSummary::from_snapshot(&snapshot))
}

fn grid_preview(matrix: &MatrixService) -> Result<Vec<Vec<String>>, MatrixError> {
    let snapshot = matrix.snapshot()?;
    Ok(snapshot
        .grid
        .rows()
        .iter()
        .take(GRID_PREVIEW_ROWS)
        .cloned()
        .collect())
}

#[component]
pub fn App() -> Element {
    let AppState {
        mut sheets,
        mut snapshot,
        mut search_term,
        mut results,
        mut show_grid,
        mut grid_rows,
        mut show_json,
        mut busy,
        mut status,
    } = AppState::new();

    let services = use_hook(build_services_or_message);
    let services = match services {
        Ok(services) => services,
        Err(err) => {
            return rsx! {
                div {
                    p { "Unable to start: {err}" }
                }
            };
        }
    };

    let services_for_init = services.clone();
    use_effect(move || {
        *busy.write() = true;
        let outcome = run_blocking("initial refresh", || {
            let listed = services_for_init.import.list_sheets();
            (listed, refresh_summary(&services_for_init.matrix))
        });
        match outcome {
            (Ok(available), Ok(summary)) => {
                *sheets.write() = available;
                *status.write() = format!("Loaded {}", summary.provider);
                *snapshot.write() = Some(summary);
            }
            (listed, Err(err)) => {
                *sheets.write() = listed.unwrap_or_default();
                *status.write() = format!(
                    "No feature matrix loaded from {}: {err}",
                    services_for_init.matrix.source_label()
                );
            }
            (Err(err), Ok(summary)) => {
                *snapshot.write() = Some(summary);
                *status.write() = format!("Failed to list stored sheets: {err:#}");
            }
        }
        *busy.write() = false;
    });

    let services_for_import = services.clone();
    let services_for_refresh = services.clone();
    let services_for_search = services.clone();
    let services_for_grid = services.clone();

    let rows = result_rows(&results());
    let results_json = results_to_json(&results()).unwrap_or_else(|err| err.to_string());
    let summary_text = snapshot().as_ref().map(summary_line);
    let grid_view: Vec<(usize, Vec<String>)> = grid_rows()
        .into_iter()
        .enumerate()
        .map(|(row_idx, cells)| (row_idx + 1, cells))
        .collect();
    let sheet_entries: Vec<(String, String, Services)> = sheets()
        .iter()
        .map(|sheet: &SheetMeta| {
            let label = format!(
                "{} ({} rows, imported {} from {})",
                sheet.name, sheet.row_count, sheet.imported_at, sheet.source_path
            );
            (sheet.name.clone(), label, services.clone())
        })
        .collect();
    let source_label = services.matrix.source_label();

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 12px;",
            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        if busy() {
                            return;
                        }

                        let Some(file_path) = FileDialog::new()
                            .add_filter("Feature matrix", &["csv", "xlsx"])
                            .pick_file() else {
                            *status.write() = "Import cancelled".to_string();
                            return;
                        };

                        *busy.write() = true;
                        *status.write() = format!("Importing {}", file_path.display());

                        let sheet_name = services_for_import.config.sheet_range.sheet.clone();
                        let imported = run_blocking("import", || {
                            services_for_import.import.import_file(&file_path, &sheet_name)
                        });

                        match imported {
                            Ok(imported) => {
                                if let Ok(available) = services_for_import.import.list_sheets() {
                                    *sheets.write() = available;
                                }
                                match run_blocking("refresh", || refresh_summary(&services_for_import.matrix)) {
                                    Ok(summary) => {
                                        *status.write() = format!(
                                            "Imported {} rows into {} (sheet #{}); {} features indexed",
                                            imported.row_count,
                                            imported.sheet_name,
                                            imported.sheet_id.0,
                                            summary.features
                                        );
                                        *snapshot.write() = Some(summary);
                                        *results.write() = Vec::new();
                                        *grid_rows.write() = Vec::new();
                                        *show_grid.write() = false;
                                    }
                                    Err(err) => {
                                        *status.write() = format!("Imported, but refresh failed: {err}");
                                    }
                                }
                            }
                            Err(err) => {
                                *status.write() = format!("Import failed: {err:#}");
                            }
                        }

                        *busy.write() = false;
                    },
                    "Import matrix"
                }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        *busy.write() = true;
                        match run_blocking("refresh", || refresh_summary(&services_for_refresh.matrix)) {
                            Ok(summary) => {
                                *status.write() = format!("Refreshed from {}", summary.provider);
                                *snapshot.write() = Some(summary);
                                if show_grid() {
                                    *grid_rows.write() = grid_preview(&services_for_refresh.matrix)
                                        .unwrap_or_default();
                                }
                            }
                            Err(err) => {
                                *status.write() = format!("Refresh failed: {err}");
                            }
                        }
                        *busy.write() = false;
                    },
                    "Refresh"
                }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let next = !show_grid();
                        if next {
                            match grid_preview(&services_for_grid.matrix) {
                                Ok(loaded) => *grid_rows.write() = loaded,
                                Err(err) => {
                                    *status.write() = format!("Cannot show grid: {err}");
                                    return;
                                }
                            }
                        }
                        *show_grid.write() = next;
                    },
                    if show_grid() { "Hide grid" } else { "Show grid" }
                }
                button {
                    onclick: move |_| {
                        let next = !show_json();
                        *show_json.write() = next;
                    },
                    if show_json() { "Show table" } else { "Show JSON" }
                }
            }

            p { "{status}" }
            if let Some(text) = summary_text {
                p { style: "color: #555;", "{text}" }
            }

            div {
                label { "Feature search " }
                input {
                    disabled: busy(),
                    value: search_term(),
                    placeholder: "e.g. sso",
                    onchange: move |event| {
                        let term = event.value();
                        *search_term.write() = term.clone();
                        *busy.write() = true;

                        match run_blocking("search", || services_for_search.matrix.search(&term)) {
                            Ok(found) => {
                                *status.write() = format!("{} feature(s) match \"{}\"", found.len(), term);
                                *results.write() = found;
                                if let Ok(current) = services_for_search.matrix.snapshot() {
                                    *snapshot.write() = Some(SnapshotSummary::from_snapshot(&current));
                                }
                            }
                            Err(err) => {
                                *results.write() = Vec::new();
                                *status.write() = format!("Search failed: {err}");
                            }
                        }

                        *busy.write() = false;
                    },
                }
            }

            if show_json() {
                pre {
                    style: "background: #f6f6f6; padding: 8px; overflow: auto;",
                    "{results_json}"
                }
            } else {
                table {
                    style: "border-collapse: collapse; margin-top: 8px;",
                    thead {
                        tr {
                            th { "Feature" }
                            th { "Description" }
                            th { "More info" }
                            th { "Editions / SKUs" }
                        }
                    }
                    tbody {
                        for row in rows {
                            tr {
                                key: "{row.key}",
                                td { "{row.name}" }
                                td { "{row.description}" }
                                td {
                                    a { href: "{row.link}", "{row.link}" }
                                }
                                td {
                                    for pair in row.supported {
                                        div { "{pair}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if show_grid() {
                h3 { "Current grid" }
                table {
                    style: "border-collapse: collapse; font-size: 12px;",
                    tbody {
                        for (row_number, cells) in grid_view {
                            tr {
                                td { style: "color: #888;", "{row_number}" }
                                for cell in cells {
                                    td { "{cell}" }
                                }
                            }
                        }
                    }
                }
            }

            h3 { "Stored sheets" }
            p { "Reading from: {source_label}" }
            ul {
                for (name, label, entry_services) in sheet_entries {
                    li {
                        "{label} "
                        button {
                            disabled: busy(),
                            onclick: move |_| {
                                *busy.write() = true;
                                match run_blocking("delete sheet", || entry_services.import.delete_sheet(&name)) {
                                    Ok(()) => {
                                        *status.write() = format!("Deleted sheet {name}");
                                        if let Ok(available) = entry_services.import.list_sheets() {
                                            *sheets.write() = available;
                                        }
                                    }
                                    Err(err) => {
                                        *status.write() = format!("Delete failed: {err:#}");
                                    }
                                }
                                *busy.write() = false;
                            },
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

fn build_services_or_message() -> Result<Services, String> {
    AppConfig::load()
        .and_then(build_services)
        .map_err(|err| format!("{err:#}"))
}
