pub mod classify;
pub mod entities;
pub mod error;
pub mod index;
pub mod layout;
pub mod query;
pub mod row_filter;
pub mod snapshot;
