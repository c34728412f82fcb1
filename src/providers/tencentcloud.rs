mod client;
mod error;
mod sign;
mod types;

pub use client::{Credential, TencentCloudClient};
pub use error::TencentCloudError;
pub use types::{DbInstance, TagResource};

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{InstanceFilter, ServiceError, SqlserverService, TagService};

#[async_trait]
impl SqlserverService for TencentCloudClient {
    async fn describe_sqlserver_instances(
        &self,
        filter: &InstanceFilter,
    ) -> Result<Vec<DbInstance>, ServiceError> {
        let instances = self.describe_db_instances(filter).await?;
        tracing::debug!(count = instances.len(), "SQL Server instances listed");
        Ok(instances)
    }
}

#[async_trait]
impl TagService for TencentCloudClient {
    async fn describe_resource_tags(
        &self,
        service_type: &str,
        resource_type: &str,
        region: &str,
        resource_id: &str,
    ) -> Result<BTreeMap<String, String>, ServiceError> {
        Ok(self
            .describe_resource_tags_by_resource_ids(service_type, resource_type, region, resource_id)
            .await?)
    }
}
