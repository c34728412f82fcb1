//! tcsqlserver - Tencent Cloud SQL Server basic instances data source
//!
//! A library for querying SQL Server basic instances and their tags, shaped
//! like the `tencentcloud_sqlserver_basic_instances` Terraform data source.

pub mod cli;
pub mod data_sources;
pub mod error;
pub mod helper;
pub mod output;
pub mod providers;
pub mod schema;

pub use data_sources::{
    DataSource, DataSourceError, SqlserverBasicInstances, get_data_source, read_data_source,
};
pub use error::AppError;
pub use providers::tencentcloud::{Credential, TencentCloudClient, TencentCloudError};
pub use providers::{DbInstance, InstanceFilter, ServiceError, SqlserverService, TagService};
pub use schema::{Attribute, AttributeType, Resource, ResourceData, SchemaError};
