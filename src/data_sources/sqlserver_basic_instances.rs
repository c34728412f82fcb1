//! `tencentcloud_sqlserver_basic_instances`: lists SQL Server basic instances
//! with their tags.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::Instrument;

use super::{DataSource, DataSourceError};
use crate::helper::{data_resource_ids_hash, write_to_file};
use crate::providers::{DbInstance, InstanceFilter, SqlserverService, TagService};
use crate::schema::{Attribute, Resource, ResourceData};

pub const DATA_SOURCE_NAME: &str = "tencentcloud_sqlserver_basic_instances";

pub const CHARGE_TYPE_PREPAID: &str = "PREPAID";
pub const CHARGE_TYPE_POSTPAID: &str = "POSTPAID_BY_HOUR";
const PAY_MODE_PREPAID: i64 = 1;
const PROJECT_ID_ANY: i64 = -1;

const TAG_SERVICE_TYPE: &str = "sqlserver";
const TAG_RESOURCE_TYPE: &str = "instance";

pub fn basic_instances_schema() -> Resource {
    let instance = Resource::new()
        .with_attribute(
            "id",
            Attribute::computed_string("ID of the SQL Server basic instance."),
        )
        .with_attribute(
            "name",
            Attribute::computed_string("Name of the SQL Server basic instance."),
        )
        .with_attribute(
            "charge_type",
            Attribute::computed_string(
                "Pay type of the SQL Server basic instance. For now, only `POSTPAID_BY_HOUR` is valid.",
            ),
        )
        .with_attribute(
            "engine_version",
            Attribute::computed_string(
                "Version of the SQL Server basic database engine. Allowed values are `2008R2`(SQL Server 2008 Enerprise), \
                 `2012SP3`(SQL Server 2012 Enterprise), `2016SP1` (SQL Server 2016 Enterprise), `201602`(SQL Server 2016 Standard) \
                 and `2017`(SQL Server 2017 Enterprise). Default is `2008R2`.",
            ),
        )
        .with_attribute("vpc_id", Attribute::computed_string("ID of VPC."))
        .with_attribute("subnet_id", Attribute::computed_string("ID of subnet."))
        .with_attribute(
            "storage",
            Attribute::computed_int(
                "Disk size (in GB). Allowed value must be a multiple of 10. The storage must be set with the limit of \
                 `storage_min` and `storage_max` which data source `tencentcloud_sqlserver_specinfos` provides.",
            ),
        )
        .with_attribute(
            "memory",
            Attribute::computed_int(
                "Memory size (in GB). Allowed value must be larger than `memory` that data source \
                 `tencentcloud_sqlserver_specinfos` provides.",
            ),
        )
        .with_attribute(
            "cpu",
            Attribute::computed_int("The CPU number of the SQL Server basic instance."),
        )
        .with_attribute(
            "project_id",
            Attribute::computed_int("Project ID, default value is 0."),
        )
        .with_attribute(
            "availability_zone",
            Attribute::computed_string("Availability zone."),
        )
        .with_attribute("used_storage", Attribute::computed_int("Used storage."))
        .with_attribute("vip", Attribute::computed_string("IP for private access."))
        .with_attribute("vport", Attribute::computed_int("Port for private access."))
        .with_attribute(
            "create_time",
            Attribute::computed_string("Create time of the SQL Server basic instance."),
        )
        .with_attribute(
            "status",
            Attribute::computed_int(
                "Status of the SQL Server basic instance. 1 for applying, 2 for running, 3 for running with limit, \
                 4 for isolated, 5 for recycling, 6 for recycled, 7 for running with task, 8 for off-line, \
                 9 for expanding, 10 for migrating, 11 for readonly, 12 for rebooting.",
            ),
        )
        .with_attribute(
            "tags",
            Attribute::computed_map("Tags of the SQL Server basic instance."),
        );

    Resource::new()
        .with_attribute(
            "id",
            Attribute::optional_string("ID of the SQL Server basic instance to be query."),
        )
        .with_attribute(
            "project_id",
            Attribute::optional_int("Project ID of the SQL Server basic instance to be query."),
        )
        .with_attribute(
            "vpc_id",
            Attribute::optional_string("Vpc ID of the SQL Server basic instance to be query."),
        )
        .with_attribute(
            "subnet_id",
            Attribute::optional_string("Subnet ID of the SQL Server basic instance to be query."),
        )
        .with_attribute(
            "result_output_file",
            Attribute::optional_string("Used to save results."),
        )
        .with_attribute(
            "instance_list",
            Attribute::computed_list(
                "A list of SQL Server basic instances. Each element contains the following attributes.",
                instance,
            ),
        )
}

pub fn charge_type(pay_mode: Option<i64>) -> &'static str {
    match pay_mode {
        Some(PAY_MODE_PREPAID) => CHARGE_TYPE_PREPAID,
        _ => CHARGE_TYPE_POSTPAID,
    }
}

/// Flattens one instance into the `instance_list` element shape, without tags.
pub fn flatten_instance(instance: &DbInstance) -> Map<String, Value> {
    let mut item = Map::new();
    item.insert("id".to_string(), json!(instance.instance_id));
    item.insert("name".to_string(), json!(instance.name));
    item.insert("project_id".to_string(), json!(instance.project_id));
    item.insert("storage".to_string(), json!(instance.storage));
    item.insert("memory".to_string(), json!(instance.memory));
    item.insert("availability_zone".to_string(), json!(instance.zone));
    item.insert("create_time".to_string(), json!(instance.create_time));
    item.insert("vpc_id".to_string(), json!(instance.uniq_vpc_id));
    item.insert("subnet_id".to_string(), json!(instance.uniq_subnet_id));
    item.insert("engine_version".to_string(), json!(instance.version));
    item.insert("vip".to_string(), json!(instance.vip));
    item.insert("vport".to_string(), json!(instance.vport));
    item.insert("used_storage".to_string(), json!(instance.used_storage));
    item.insert("status".to_string(), json!(instance.status));
    item.insert("cpu".to_string(), json!(instance.cpu));
    item.insert(
        "charge_type".to_string(),
        json!(charge_type(instance.pay_mode)),
    );
    item
}

/// `-1` is the "any project" sentinel; other negative IDs are rejected.
fn project_filter(value: Option<Value>) -> Result<Option<i64>, DataSourceError> {
    match value.as_ref().and_then(Value::as_i64) {
        None | Some(PROJECT_ID_ANY) => Ok(None),
        Some(id) if id < 0 => Err(DataSourceError::InvalidArgument {
            key: "project_id".to_string(),
            message: format!("{} is not a valid project ID", id),
        }),
        Some(id) => Ok(Some(id)),
    }
}

fn filter_from(d: &ResourceData) -> Result<InstanceFilter, DataSourceError> {
    let non_empty = |v: Value| v.as_str().map(str::to_string).filter(|s| !s.is_empty());

    Ok(InstanceFilter {
        instance_id: non_empty(d.get("id")),
        project_id: project_filter(d.get_ok("project_id"))?,
        vpc_id: d.get_ok("vpc_id").and_then(non_empty),
        subnet_id: d.get_ok("subnet_id").and_then(non_empty),
    })
}

pub struct SqlserverBasicInstances {
    sqlserver: Arc<dyn SqlserverService>,
    tags: Arc<dyn TagService>,
    region: String,
}

impl SqlserverBasicInstances {
    pub fn new(
        sqlserver: Arc<dyn SqlserverService>,
        tags: Arc<dyn TagService>,
        region: String,
    ) -> Self {
        Self {
            sqlserver,
            tags,
            region,
        }
    }

    async fn read_instances(
        &self,
        d: &mut ResourceData,
        log_id: &str,
    ) -> Result<(), DataSourceError> {
        let filter = filter_from(d)?;
        tracing::debug!(?filter, "listing SQL Server basic instances");

        let instances = self.sqlserver.describe_sqlserver_instances(&filter).await?;

        let mut ids = Vec::with_capacity(instances.len());
        let mut list = Vec::with_capacity(instances.len());

        for instance in &instances {
            let mut item = flatten_instance(instance);
            let instance_id = instance.instance_id.clone().unwrap_or_default();

            let tags = if instance_id.is_empty() {
                tracing::warn!("instance without an ID, skipping tag lookup");
                Default::default()
            } else {
                self.tags
                    .describe_resource_tags(
                        TAG_SERVICE_TYPE,
                        TAG_RESOURCE_TYPE,
                        &self.region,
                        &instance_id,
                    )
                    .await?
            };

            item.insert("tags".to_string(), json!(tags));
            list.push(Value::Object(item));
            ids.push(instance_id);
        }

        d.set_id(data_resource_ids_hash(&ids));

        let list = Value::Array(list);
        if let Err(e) = d.set("instance_list", list.clone()) {
            tracing::error!(log_id, reason = %e, "provider set instance_list fail");
            return Err(e.into());
        }

        tracing::info!(count = ids.len(), "SQL Server basic instances read");

        if let Some(Value::String(output)) = d.get_ok("result_output_file") {
            let path = write_to_file(&output, &list)?;
            tracing::info!(path = %path.display(), "result saved");
        }

        Ok(())
    }
}

#[async_trait]
impl DataSource for SqlserverBasicInstances {
    fn name(&self) -> &str {
        DATA_SOURCE_NAME
    }

    fn schema(&self) -> Resource {
        basic_instances_schema()
    }

    async fn read(&self, d: &mut ResourceData) -> Result<(), DataSourceError> {
        let log_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "data_source.tencentcloud_sqlserver_basic_instances.read",
            log_id = %log_id
        );
        let started = Instant::now();

        let result = self
            .read_instances(d, &log_id)
            .instrument(span.clone())
            .await;

        span.in_scope(|| {
            tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "read finished")
        });

        result
    }
}
