use serde::{Deserialize, Serialize};

pub const SQLSERVER_SERVICE: &str = "sqlserver";
pub const SQLSERVER_API_VERSION: &str = "2018-03-28";
pub const TAG_SERVICE: &str = "tag";
pub const TAG_API_VERSION: &str = "2018-08-13";

pub const DESCRIBE_DB_INSTANCES_PAGE_SIZE: u64 = 20;
pub const DESCRIBE_RESOURCE_TAGS_PAGE_SIZE: u64 = 50;

/// Every API v3 reply is wrapped in a top-level `Response` object.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(rename = "Response")]
    pub response: ApiResponse<T>,
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(rename = "Error", default)]
    pub error: Option<ApiError>,
    #[serde(rename = "RequestId", default)]
    pub request_id: Option<String>,
    #[serde(flatten)]
    pub result: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDbInstancesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instance_id_set: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDbInstancesResponse {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(rename = "DBInstances", default)]
    pub db_instances: Vec<DbInstance>,
}

/// A SQL Server instance as returned by `DescribeDBInstances`.
///
/// The API omits fields freely, so everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DbInstance {
    pub instance_id: Option<String>,
    pub name: Option<String>,
    pub project_id: Option<i64>,
    pub region_id: Option<i64>,
    pub zone_id: Option<i64>,
    pub vpc_id: Option<i64>,
    pub subnet_id: Option<i64>,
    pub status: Option<i64>,
    pub vip: Option<String>,
    pub vport: Option<i64>,
    pub create_time: Option<String>,
    pub memory: Option<i64>,
    pub storage: Option<i64>,
    pub used_storage: Option<i64>,
    pub cpu: Option<i64>,
    pub region: Option<String>,
    pub zone: Option<String>,
    pub pay_mode: Option<i64>,
    pub version: Option<String>,
    pub version_name: Option<String>,
    #[serde(rename = "Type")]
    pub type_: Option<String>,
    pub uniq_vpc_id: Option<String>,
    pub uniq_subnet_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeResourceTagsRequest {
    pub service_type: String,
    pub resource_prefix: String,
    pub resource_ids: Vec<String>,
    pub resource_region: String,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeResourceTagsResponse {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub tags: Vec<TagResource>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagResource {
    pub tag_key: String,
    pub tag_value: String,
    #[serde(default)]
    pub resource_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_instance_deserialization_pascal_case() {
        let json = r#"{
            "InstanceId": "mssql-3cdq7kx5",
            "Name": "basic",
            "ProjectId": 0,
            "RegionId": 1,
            "ZoneId": 100003,
            "Status": 2,
            "Vip": "10.0.0.12",
            "Vport": 1433,
            "CreateTime": "2020-05-20 14:30:00",
            "Memory": 2,
            "Storage": 20,
            "UsedStorage": 0,
            "Cpu": 1,
            "Zone": "ap-guangzhou-3",
            "PayMode": 0,
            "Version": "2008R2",
            "Type": "BI",
            "UniqVpcId": "vpc-26w7r56z",
            "UniqSubnetId": "subnet-lvlr6eeu",
            "Model": 2,
            "BackupTime": "00:00-06:00"
        }"#;

        let instance: DbInstance = serde_json::from_str(json).unwrap();
        assert_eq!(instance.instance_id.as_deref(), Some("mssql-3cdq7kx5"));
        assert_eq!(instance.vport, Some(1433));
        assert_eq!(instance.type_.as_deref(), Some("BI"));
        assert_eq!(instance.uniq_vpc_id.as_deref(), Some("vpc-26w7r56z"));
        assert_eq!(instance.pay_mode, Some(0));
    }

    #[test]
    fn test_db_instance_missing_fields_are_none() {
        let instance: DbInstance = serde_json::from_str(r#"{"InstanceId": "mssql-1"}"#).unwrap();
        assert_eq!(instance.instance_id.as_deref(), Some("mssql-1"));
        assert!(instance.name.is_none());
        assert!(instance.pay_mode.is_none());
    }

    #[test]
    fn test_describe_db_instances_request_skips_unset_filters() {
        let request = DescribeDbInstancesRequest {
            limit: DESCRIBE_DB_INSTANCES_PAGE_SIZE,
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"Offset": 0, "Limit": 20}));
    }

    #[test]
    fn test_describe_db_instances_request_with_filters() {
        let request = DescribeDbInstancesRequest {
            project_id: Some(1001),
            instance_id_set: vec!["mssql-1".to_string()],
            vpc_id: Some("vpc-1".to_string()),
            subnet_id: Some("subnet-1".to_string()),
            offset: 20,
            limit: 20,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["ProjectId"], 1001);
        assert_eq!(json["InstanceIdSet"], serde_json::json!(["mssql-1"]));
        assert_eq!(json["VpcId"], "vpc-1");
        assert_eq!(json["SubnetId"], "subnet-1");
        assert_eq!(json["Offset"], 20);
    }

    #[test]
    fn test_envelope_with_result() {
        let json = r#"{
            "Response": {
                "TotalCount": 1,
                "DBInstances": [{"InstanceId": "mssql-1"}],
                "RequestId": "req-1"
            }
        }"#;

        let envelope: ApiEnvelope<DescribeDbInstancesResponse> =
            serde_json::from_str(json).unwrap();
        assert!(envelope.response.error.is_none());
        assert_eq!(envelope.response.request_id.as_deref(), Some("req-1"));
        let result = envelope.response.result.unwrap();
        assert_eq!(result.total_count, Some(1));
        assert_eq!(result.db_instances.len(), 1);
    }

    #[test]
    fn test_envelope_with_error() {
        let json = r#"{
            "Response": {
                "Error": {"Code": "AuthFailure.SignatureFailure", "Message": "signature mismatch"},
                "RequestId": "req-2"
            }
        }"#;

        let envelope: ApiEnvelope<DescribeDbInstancesResponse> =
            serde_json::from_str(json).unwrap();
        let error = envelope.response.error.unwrap();
        assert_eq!(error.code, "AuthFailure.SignatureFailure");
        assert_eq!(error.message, "signature mismatch");
    }

    #[test]
    fn test_tags_response_deserialization() {
        let json = r#"{
            "TotalCount": 2,
            "Tags": [
                {"TagKey": "env", "TagValue": "test", "ResourceId": "mssql-1"},
                {"TagKey": "team", "TagValue": "db"}
            ]
        }"#;

        let response: DescribeResourceTagsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.tags.len(), 2);
        assert_eq!(response.tags[0].tag_key, "env");
        assert_eq!(response.tags[1].resource_id, None);
    }
}
