pub mod import_service;
pub mod matrix_service;
pub mod snapshot_store;
