use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("feature matrix has not been loaded yet; refresh before searching")]
    UninitializedData,

    #[error("provider `{provider}` returned no rows")]
    EmptyGrid { provider: String },

    #[error("row {row} has {columns} column(s) but column {column} is required")]
    MalformedRow {
        row: usize,
        column: usize,
        columns: usize,
    },

    #[error("failed to fetch feature matrix from `{provider}`: {message}")]
    ProviderFetchFailure { provider: String, message: String },
}
