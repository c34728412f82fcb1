use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

use crate::data_sources::{self, sqlserver_basic_instances};
use crate::error::AppError;
use crate::output::{self, OutputFormat};
use crate::providers::tencentcloud::{Credential, TencentCloudClient};

pub const DEFAULT_REGION: &str = "ap-guangzhou";

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: ProviderCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProviderCommand {
    Sqlserver {
        #[command(subcommand)]
        command: SqlserverCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum SqlserverCommand {
    /// Query SQL Server basic instances
    BasicInstances(BasicInstancesArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct CredentialArgs {
    #[arg(long, env = "TENCENTCLOUD_SECRET_ID", hide_env_values = true)]
    pub secret_id: Option<String>,

    #[arg(long, env = "TENCENTCLOUD_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    #[arg(long, env = "TENCENTCLOUD_SECURITY_TOKEN", hide_env_values = true)]
    pub security_token: Option<String>,

    #[arg(long, env = "TENCENTCLOUD_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Override the API endpoint for every service
    #[arg(long, env = "TENCENTCLOUD_ENDPOINT")]
    pub endpoint: Option<String>,
}

impl CredentialArgs {
    pub fn client(&self) -> Result<TencentCloudClient, AppError> {
        let secret_id = self.secret_id.clone().ok_or_else(|| {
            AppError::Config(
                "No secret id provided. Set TENCENTCLOUD_SECRET_ID or use --secret-id flag"
                    .to_string(),
            )
        })?;
        let secret_key = self.secret_key.clone().ok_or_else(|| {
            AppError::Config(
                "No secret key provided. Set TENCENTCLOUD_SECRET_KEY or use --secret-key flag"
                    .to_string(),
            )
        })?;

        let credential =
            Credential::new(secret_id, secret_key).with_token(self.security_token.clone());
        let region = self.region.clone();

        let client = match &self.endpoint {
            Some(endpoint) => {
                TencentCloudClient::with_base_url(credential, region, endpoint.clone())
            }
            None => TencentCloudClient::new(credential, region),
        };
        client.map_err(|e| AppError::Config(e.to_string()))
    }
}

#[derive(clap::Args, Debug)]
pub struct BasicInstancesArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// ID of the SQL Server basic instance to be query
    #[arg(long)]
    pub id: Option<String>,

    /// Project ID of the SQL Server basic instance to be query
    #[arg(long)]
    pub project_id: Option<i64>,

    /// Vpc ID of the SQL Server basic instance to be query
    #[arg(long)]
    pub vpc_id: Option<String>,

    /// Subnet ID of the SQL Server basic instance to be query
    #[arg(long)]
    pub subnet_id: Option<String>,

    /// Used to save results
    #[arg(long)]
    pub result_output_file: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

impl BasicInstancesArgs {
    /// Data source configuration built from the flags that were given.
    pub fn config(&self) -> Map<String, Value> {
        let mut config = Map::new();
        if let Some(id) = &self.id {
            config.insert("id".to_string(), Value::from(id.clone()));
        }
        if let Some(project_id) = self.project_id {
            config.insert("project_id".to_string(), Value::from(project_id));
        }
        if let Some(vpc_id) = &self.vpc_id {
            config.insert("vpc_id".to_string(), Value::from(vpc_id.clone()));
        }
        if let Some(subnet_id) = &self.subnet_id {
            config.insert("subnet_id".to_string(), Value::from(subnet_id.clone()));
        }
        if let Some(path) = &self.result_output_file {
            config.insert("result_output_file".to_string(), Value::from(path.clone()));
        }
        config
    }

    /// Reads the data source and renders its state in the requested format.
    pub async fn run(&self) -> Result<String, AppError> {
        let client = self.credentials.client()?;
        let data_source =
            data_sources::get_data_source(sqlserver_basic_instances::DATA_SOURCE_NAME, &client)?;

        let state = data_sources::read_data_source(data_source.as_ref(), self.config()).await?;
        tracing::info!(id = state["id"].as_str().unwrap_or_default(), "read complete");

        Ok(output::render(&state, self.output)?)
    }
}
