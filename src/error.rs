use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    DataSource(#[from] crate::data_sources::DataSourceError),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}
