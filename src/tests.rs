use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::Connection;
use serde_json::json;

use crate::config::DEFAULT_SHEET_RANGE;
use crate::domain::entities::feature::results_to_json;
use crate::domain::entities::grid::RawGrid;
use crate::domain::entities::sheet::SheetRange;
use crate::domain::error::MatrixError;
use crate::domain::layout::MatrixLayout;
use crate::infra::import::csv::CsvGridSource;
use crate::infra::import::xlsx::XlsxGridSource;
use crate::infra::sqlite::repo::SqliteRepo;
use crate::infra::sqlite::schema::init_db;
use crate::infra::sqlite::source::StoredSheetSource;
use crate::usecase::ports::grid_source::GridSource;
use crate::usecase::ports::repo::{NewSheetMeta, RepoError, SheetRepository};
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::matrix_service::MatrixService;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("feature-matrix-{prefix}-{nanos}"))
}

struct NoSource;

impl GridSource for NoSource {
    fn describe(&self) -> String {
        "none".to_string()
    }

    fn fetch(&self) -> anyhow::Result<RawGrid> {
        anyhow::bail!("no provider configured")
    }
}

/// Ten columns: three static, then data. Rows 0..=3 are header/section rows.
fn matrix_grid(features: &[&str]) -> RawGrid {
    let mut rows = vec![
        vec!["Feature".to_string(), "Description".to_string(), "Link".to_string()],
        vec!["Complete Feature Matrix".to_string()],
        (0..10)
            .map(|col| if col < 3 { String::new() } else { format!("SKU-{col}") })
            .collect(),
        vec!["Directory".to_string()],
    ];
    for name in features {
        let mut row = vec![String::new(); 10];
        row[0] = name.to_string();
        row[1] = format!("{name} description");
        row[2] = format!("https://example.com/{}", name.to_lowercase());
        row[3] = "X".to_string();
        row[7] = "X".to_string();
        rows.push(row);
    }
    rows
}

fn sheet_repo(prefix: &str) -> (PathBuf, Arc<SqliteRepo>) {
    let temp_dir = unique_test_dir(prefix);
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let repo = Arc::new(SqliteRepo {
        db_path: temp_dir.join("sheets.sqlite"),
    });
    repo.init().expect("repo should init");
    (temp_dir, repo)
}

#[test]
fn widget_row_resolves_both_supported_columns() {
    let service = MatrixService::new(Arc::new(NoSource), MatrixLayout::default());
    service
        .refresh_with(matrix_grid(&["Widget"]))
        .expect("refresh should succeed");

    let results = service.search("wid").expect("search should succeed");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].row, 4);
    let skus: Vec<&str> = results[0]
        .details
        .editions_skus
        .iter()
        .map(|pair| pair.sku.as_str())
        .collect();
    assert_eq!(skus, vec!["SKU-3", "SKU-7"]);
    assert!(results[0]
        .details
        .editions_skus
        .iter()
        .all(|pair| pair.edition == "IT Products"));
}

#[test]
fn search_results_serialize_keyed_by_feature_name() {
    let service = MatrixService::new(Arc::new(NoSource), MatrixLayout::default());
    service
        .refresh_with(matrix_grid(&["Widget"]))
        .expect("refresh should succeed");
    let results = service.search("WIDGET").expect("search should succeed");

    let text = results_to_json(&results).expect("json should render");
    let value: serde_json::Value = serde_json::from_str(&text).expect("json should parse");

    assert_eq!(
        value,
        json!([{
            "Widget": {
                "description": "Widget description",
                "moreInfoLink": "https://example.com/widget",
                "editions_skus": [
                    {"edition": "IT Products", "sku": "SKU-3"},
                    {"edition": "IT Products", "sku": "SKU-7"}
                ]
            }
        }])
    );
}

#[test]
fn section_rows_are_never_returned() {
    let service = MatrixService::new(Arc::new(NoSource), MatrixLayout::default());
    service
        .refresh_with(matrix_grid(&["Directory Integrations", "Widget"]))
        .expect("refresh should succeed");

    let results = service.search("directory").expect("search should succeed");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Directory Integrations");
    assert!(service
        .search("")
        .expect("search should succeed")
        .iter()
        .all(|result| result.row > 3));
}

#[test]
fn init_db_creates_sheet_tables() {
    let temp_dir = unique_test_dir("init-db");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("sheets.sqlite");

    let result = init_db(&db_path);

    assert!(result.is_ok(), "init_db should succeed: {result:?}");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('sheet','sheet_cell')",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");

    assert_eq!(table_count, 2, "required tables should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn stored_sheet_round_trip_keeps_ragged_rows() {
    let (temp_dir, repo) = sheet_repo("sheet-round-trip");
    let rows = vec![
        vec!["a".to_string(), "b".to_string()],
        Vec::new(),
        vec!["c".to_string(), String::new(), "d".to_string()],
    ];

    repo.replace_sheet(
        NewSheetMeta {
            name: "Matrix".to_string(),
            source_path: "matrix.csv".to_string(),
        },
        rows.clone(),
    )
    .expect("sheet should be stored");

    assert_eq!(repo.load_sheet("Matrix").expect("sheet should load"), rows);

    let sheets = repo.list_sheets().expect("sheets should list");
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].name, "Matrix");
    assert_eq!(sheets[0].row_count, 3);
    assert_eq!(sheets[0].col_count, 3);
    assert_eq!(sheets[0].source_path, "matrix.csv");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn replacing_a_sheet_drops_the_previous_import() {
    let (temp_dir, repo) = sheet_repo("sheet-replace");
    for (source, value) in [("old.csv", "old"), ("new.csv", "new")] {
        repo.replace_sheet(
            NewSheetMeta {
                name: "Matrix".to_string(),
                source_path: source.to_string(),
            },
            vec![vec![value.to_string()]],
        )
        .expect("sheet should be stored");
    }

    assert_eq!(
        repo.load_sheet("Matrix").expect("sheet should load"),
        vec![vec!["new".to_string()]]
    );
    let sheets = repo.list_sheets().expect("sheets should list");
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].source_path, "new.csv");

    repo.delete_sheet("Matrix").expect("sheet should delete");
    assert_eq!(
        repo.load_sheet("Matrix").expect_err("sheet should be gone"),
        RepoError::SheetNotFound("Matrix".to_string())
    );
    assert_eq!(
        repo.delete_sheet("Matrix").expect_err("second delete should fail"),
        RepoError::SheetNotFound("Matrix".to_string())
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn missing_stored_sheet_is_a_provider_failure() {
    let (temp_dir, repo) = sheet_repo("sheet-missing");
    let range = SheetRange::parse("Missing!A1:AK").expect("range should parse");
    let service = MatrixService::new(
        Arc::new(StoredSheetSource::new(repo, range)),
        MatrixLayout::default(),
    );

    let err = service.refresh().expect_err("refresh should fail");

    match err {
        MatrixError::ProviderFetchFailure { provider, message } => {
            assert_eq!(provider, "sheet store: Missing!A1:AK");
            assert!(message.contains("sheet not found: Missing"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        service.snapshot().expect_err("nothing published"),
        MatrixError::UninitializedData
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn imported_csv_is_searchable_through_the_sheet_store() {
    let (temp_dir, repo) = sheet_repo("import-csv");
    let csv_path = temp_dir.join("matrix.csv");
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&csv_path)
        .expect("should create csv");
    for row in matrix_grid(&["Widget", "Gadget"]) {
        writer.write_record(&row).expect("should write csv row");
    }
    writer.flush().expect("should flush csv");

    let import = ImportService::new(repo.clone());
    let imported = import
        .import_file(&csv_path, "Matrix")
        .expect("csv should import");
    assert_eq!(imported.sheet_name, "Matrix");
    assert_eq!(imported.row_count, 6);

    let range = SheetRange::parse("Matrix!A1:AK").expect("range should parse");
    let service = MatrixService::new(
        Arc::new(StoredSheetSource::new(repo, range)),
        MatrixLayout::default(),
    )
    .with_refresh_before_search(true);

    let results = service.search("gadget").expect("search should succeed");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].row, 5);
    assert_eq!(results[0].details.editions_skus.len(), 2);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_source_feeds_the_matrix_service_directly() {
    let temp_dir = unique_test_dir("csv-direct");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("matrix.csv");
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&csv_path)
        .expect("should create csv");
    for row in matrix_grid(&["Widget"]) {
        writer.write_record(&row).expect("should write csv row");
    }
    writer.flush().expect("should flush csv");

    let service = MatrixService::new(
        Arc::new(CsvGridSource {
            csv_path: csv_path.clone(),
        }),
        MatrixLayout::default(),
    );
    let snapshot = service.refresh().expect("refresh should succeed");

    assert_eq!(snapshot.grid.width(), 10);
    assert_eq!(snapshot.index.len(), 1);
    assert!(service.source_label().starts_with("csv: "));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

fn xlsx_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("matrix_test.xlsx")
}

#[test]
fn xlsx_import_falls_back_to_first_sheet_and_is_searchable() {
    let (temp_dir, repo) = sheet_repo("import-xlsx-fallback");
    let range = SheetRange::parse(DEFAULT_SHEET_RANGE).expect("range should parse");
    let import = ImportService::new(repo.clone());

    let imported = import
        .import_file(&xlsx_fixture(), &range.sheet)
        .expect("xlsx should import");

    assert_eq!(imported.sheet_name, "Okta Features and SKU (Current)");
    assert_eq!(imported.row_count, 6);

    let service = MatrixService::new(
        Arc::new(StoredSheetSource::new(repo.clone(), range)),
        MatrixLayout::default(),
    );
    service.refresh().expect("refresh should succeed");
    let results = service.search("gadget").expect("search should succeed");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].row, 5);
    assert_eq!(results[0].details.more_info_link, "https://example.com/gadget");
    let skus: Vec<&str> = results[0]
        .details
        .editions_skus
        .iter()
        .map(|pair| pair.sku.as_str())
        .collect();
    assert_eq!(skus, vec!["SKU-3", "SKU-7"]);

    import
        .delete_sheet("Okta Features and SKU (Current)")
        .expect("sheet should delete");
    assert!(import.list_sheets().expect("sheets should list").is_empty());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn xlsx_import_reads_the_named_sheet_with_offsets() {
    let (temp_dir, repo) = sheet_repo("import-xlsx-named");
    let import = ImportService::new(repo.clone());

    let imported = import
        .import_file(&xlsx_fixture(), "Offset")
        .expect("xlsx should import");
    let stored = repo.load_sheet("Offset").expect("sheet should load");

    assert_eq!(imported.row_count, 5);
    assert!(stored[0].is_empty());
    assert!(stored[1].is_empty());
    assert_eq!(stored[2][1], "a");
    assert_eq!(stored[4][3], "42");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn xlsx_source_feeds_the_matrix_service_directly() {
    let service = MatrixService::new(
        Arc::new(XlsxGridSource {
            xlsx_path: xlsx_fixture(),
            range: SheetRange::parse("Matrix!A1:AK").expect("range should parse"),
        }),
        MatrixLayout::default(),
    );

    let snapshot = service.refresh().expect("refresh should succeed");
    let results = service.search("WIDGET").expect("search should succeed");

    assert_eq!(snapshot.grid.width(), 10);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].row, 4);
    assert_eq!(results[0].details.description, "Widget description");
}

#[test]
fn concurrent_refreshes_never_mix_snapshots() {
    let service = Arc::new(MatrixService::new(Arc::new(NoSource), MatrixLayout::default()));
    service
        .refresh_with(matrix_grid(&["A-one", "A-two", "A-three"]))
        .expect("refresh should succeed");

    let writers: Vec<_> = ["A", "B"]
        .into_iter()
        .map(|prefix| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let names: Vec<String> = (0..5).map(|n| format!("{prefix}-{n}")).collect();
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                for _ in 0..50 {
                    service
                        .refresh_with(matrix_grid(&names))
                        .expect("refresh should succeed");
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for _ in 0..200 {
                    let results = service.search("").expect("search should succeed");
                    assert!(!results.is_empty());
                    let prefix = &results[0].name[..2];
                    assert!(
                        results.iter().all(|result| result.name.starts_with(prefix)),
                        "mixed snapshot: {results:?}"
                    );
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().expect("thread should finish");
    }
}
