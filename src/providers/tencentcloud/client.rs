use std::collections::BTreeMap;

use reqwest::Url;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::TencentCloudError;
use super::sign::{self, SigningRequest};
use super::types::{
    ApiEnvelope, DESCRIBE_DB_INSTANCES_PAGE_SIZE, DESCRIBE_RESOURCE_TAGS_PAGE_SIZE, DbInstance,
    DescribeDbInstancesRequest, DescribeDbInstancesResponse, DescribeResourceTagsRequest,
    DescribeResourceTagsResponse, SQLSERVER_API_VERSION, SQLSERVER_SERVICE, TAG_API_VERSION,
    TAG_SERVICE,
};
use crate::providers::InstanceFilter;

const TENCENTCLOUD_API_DOMAIN: &str = "tencentcloudapi.com";

/// A short page ends the listing, as does reaching the reported total.
fn is_last_page(count: u64, offset: u64, limit: u64, total_count: Option<u64>) -> bool {
    count < limit || total_count.is_some_and(|total| offset + count >= total)
}

#[derive(Clone)]
pub struct Credential {
    pub secret_id: String,
    pub secret_key: String,
    pub token: Option<String>,
}

impl Credential {
    pub fn new(secret_id: String, secret_key: String) -> Self {
        Self {
            secret_id,
            secret_key,
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"[REDACTED]")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Clone)]
pub struct TencentCloudClient {
    client: reqwest::Client,
    credential: Credential,
    region: String,
    base_url: Option<String>,
}

impl TencentCloudClient {
    pub fn new(credential: Credential, region: String) -> Result<Self, TencentCloudError> {
        Self::create_client(credential, region, None)
    }

    /// Sends every action to `base_url` instead of `https://{service}.tencentcloudapi.com`.
    ///
    /// NOTE: Used for private endpoints and for testing with mock servers.
    pub fn with_base_url(
        credential: Credential,
        region: String,
        base_url: String,
    ) -> Result<Self, TencentCloudError> {
        Self::create_client(credential, region, Some(base_url))
    }

    fn create_client(
        credential: Credential,
        region: String,
        base_url: Option<String>,
    ) -> Result<Self, TencentCloudError> {
        if credential.secret_id.is_empty() || credential.secret_key.is_empty() {
            return Err(TencentCloudError::Auth {
                message: "secret id and secret key must both be set".to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(sign::CONTENT_TYPE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(TencentCloudError::Network)?;

        Ok(Self {
            client,
            credential,
            region,
            base_url,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn endpoint(&self, service: &str) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}.{}", service, TENCENTCLOUD_API_DOMAIN),
        }
    }

    /// Signs and posts a single API action, unwrapping the `Response` envelope.
    pub async fn call<Req, Resp>(
        &self,
        service: &str,
        version: &str,
        action: &str,
        request: &Req,
    ) -> Result<Resp, TencentCloudError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let endpoint = self.endpoint(service);
        let url = Url::parse(&endpoint).map_err(|e| TencentCloudError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            message: e.to_string(),
        })?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(TencentCloudError::InvalidEndpoint {
                    endpoint,
                    message: "missing host".to_string(),
                });
            }
        };

        let payload = serde_json::to_vec(request).map_err(|e| TencentCloudError::Parse {
            action: action.to_string(),
            message: format!("failed to encode request: {}", e),
        })?;
        let timestamp = chrono::Utc::now().timestamp();

        let authorization = sign::authorization(
            &self.credential.secret_id,
            &self.credential.secret_key,
            &SigningRequest {
                service,
                host: &host,
                payload: &payload,
                timestamp,
            },
        )?;

        let mut builder = self
            .client
            .post(url)
            .header(AUTHORIZATION, authorization)
            .header("X-TC-Action", action)
            .header("X-TC-Version", version)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("X-TC-Region", &self.region);
        if let Some(token) = &self.credential.token {
            builder = builder.header("X-TC-Token", token);
        }

        tracing::debug!(service, action, "calling Tencent Cloud API");

        let response = builder.body(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiEnvelope<Resp> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(TencentCloudError::Http {
                    status: status.as_u16(),
                    message: status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string(),
                });
            }
            Err(e) => {
                return Err(TencentCloudError::Parse {
                    action: action.to_string(),
                    message: e.to_string(),
                });
            }
        };

        let request_id = envelope.response.request_id.unwrap_or_default();

        if let Some(error) = envelope.response.error {
            tracing::warn!(action, code = %error.code, request_id = %request_id, "API call failed");
            return Err(TencentCloudError::Api {
                code: error.code,
                message: error.message,
                request_id,
            });
        }

        envelope
            .response
            .result
            .ok_or_else(|| TencentCloudError::Parse {
                action: action.to_string(),
                message: "response body is missing".to_string(),
            })
    }

    pub async fn describe_db_instances(
        &self,
        filter: &InstanceFilter,
    ) -> Result<Vec<DbInstance>, TencentCloudError> {
        let project_id = filter
            .project_id
            .map(u64::try_from)
            .transpose()
            .map_err(|_| TencentCloudError::InvalidRequest {
                action: "DescribeDBInstances".to_string(),
                message: format!(
                    "ProjectId must not be negative, got {}",
                    filter.project_id.unwrap_or_default()
                ),
            })?;

        let mut request = DescribeDbInstancesRequest {
            project_id,
            instance_id_set: filter.instance_id.iter().cloned().collect(),
            vpc_id: filter.vpc_id.clone(),
            subnet_id: filter.subnet_id.clone(),
            offset: 0,
            limit: DESCRIBE_DB_INSTANCES_PAGE_SIZE,
        };

        let mut instances = Vec::new();

        loop {
            let page: DescribeDbInstancesResponse = self
                .call(
                    SQLSERVER_SERVICE,
                    SQLSERVER_API_VERSION,
                    "DescribeDBInstances",
                    &request,
                )
                .await?;

            let count = page.db_instances.len() as u64;
            instances.extend(page.db_instances);

            if is_last_page(count, request.offset, request.limit, page.total_count) {
                break;
            }

            request.offset += request.limit;
        }

        Ok(instances)
    }

    pub async fn describe_resource_tags_by_resource_ids(
        &self,
        service_type: &str,
        resource_prefix: &str,
        region: &str,
        resource_id: &str,
    ) -> Result<BTreeMap<String, String>, TencentCloudError> {
        let mut request = DescribeResourceTagsRequest {
            service_type: service_type.to_string(),
            resource_prefix: resource_prefix.to_string(),
            resource_ids: vec![resource_id.to_string()],
            resource_region: region.to_string(),
            offset: 0,
            limit: DESCRIBE_RESOURCE_TAGS_PAGE_SIZE,
        };

        let mut tags = BTreeMap::new();

        loop {
            let page: DescribeResourceTagsResponse = self
                .call(
                    TAG_SERVICE,
                    TAG_API_VERSION,
                    "DescribeResourceTagsByResourceIds",
                    &request,
                )
                .await?;

            let count = page.tags.len() as u64;
            tags.extend(
                page.tags
                    .into_iter()
                    .filter(|t| t.resource_id.as_deref().is_none_or(|id| id == resource_id))
                    .map(|t| (t.tag_key, t.tag_value)),
            );

            if is_last_page(count, request.offset, request.limit, page.total_count) {
                break;
            }

            request.offset += request.limit;
        }

        Ok(tags)
    }
}

impl std::fmt::Debug for TencentCloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TencentCloudClient")
            .field("credential", &self.credential)
            .field("region", &self.region)
            .finish()
    }
}
