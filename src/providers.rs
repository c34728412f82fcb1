pub mod tencentcloud;

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

pub use tencentcloud::DbInstance;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("tencentcloud error: {0}")]
    TencentCloud(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Filters accepted by the SQL Server listing call. `None` means "do not filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceFilter {
    pub instance_id: Option<String>,
    pub project_id: Option<i64>,
    pub vpc_id: Option<String>,
    pub subnet_id: Option<String>,
}

#[async_trait]
pub trait SqlserverService: Send + Sync {
    async fn describe_sqlserver_instances(
        &self,
        filter: &InstanceFilter,
    ) -> Result<Vec<DbInstance>, ServiceError>;
}

#[async_trait]
pub trait TagService: Send + Sync {
    /// Returns the tag key/value pairs bound to a single resource.
    async fn describe_resource_tags(
        &self,
        service_type: &str,
        resource_type: &str,
        region: &str,
        resource_id: &str,
    ) -> Result<BTreeMap<String, String>, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_unfiltered() {
        let filter = InstanceFilter::default();
        assert!(filter.instance_id.is_none());
        assert!(filter.project_id.is_none());
        assert!(filter.vpc_id.is_none());
        assert!(filter.subnet_id.is_none());
    }

    #[test]
    fn test_service_error_display() {
        let err = ServiceError::Unavailable("tag api down".to_string());
        assert_eq!(err.to_string(), "service unavailable: tag api down");
    }

    #[test]
    fn test_tencentcloud_error_display() {
        let err = ServiceError::TencentCloud("API error [InternalError] boom".to_string());
        assert!(err.to_string().starts_with("tencentcloud error:"));
    }
}
