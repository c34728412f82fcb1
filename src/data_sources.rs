pub mod sqlserver_basic_instances;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::providers::ServiceError;
use crate::providers::tencentcloud::TencentCloudClient;
use crate::schema::{Resource, ResourceData, SchemaError};

pub use sqlserver_basic_instances::SqlserverBasicInstances;

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("unknown data source: {0}")]
    UnknownDataSource(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("invalid {key}: {message}")]
    InvalidArgument { key: String, message: String },

    #[error("output error: {0}")]
    Output(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait DataSource: Send + Sync {
    fn name(&self) -> &str;
    fn schema(&self) -> Resource;
    async fn read(&self, d: &mut ResourceData) -> Result<(), DataSourceError>;
}

/// Validates `config` against the data source schema, reads, and returns the resulting state.
pub async fn read_data_source(
    data_source: &dyn DataSource,
    config: Map<String, Value>,
) -> Result<Value, DataSourceError> {
    let mut d = ResourceData::from_config(data_source.schema(), config)?;
    data_source.read(&mut d).await?;
    Ok(d.state())
}

pub fn get_data_source(
    name: &str,
    client: &TencentCloudClient,
) -> Result<Box<dyn DataSource>, DataSourceError> {
    match name {
        sqlserver_basic_instances::DATA_SOURCE_NAME => {
            let client = Arc::new(client.clone());
            Ok(Box::new(SqlserverBasicInstances::new(
                client.clone(),
                client.clone(),
                client.region().to_string(),
            )))
        }
        other => Err(DataSourceError::UnknownDataSource(other.to_string())),
    }
}
