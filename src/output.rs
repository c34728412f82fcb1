use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Debug, Tabled)]
struct InstanceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ZONE")]
    zone: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "CHARGE TYPE")]
    charge_type: String,
    #[tabled(rename = "CPU/MEM/DISK")]
    size: String,
    #[tabled(rename = "VIP")]
    vip: String,
    #[tabled(rename = "TAGS")]
    tags: String,
}

fn text(item: &Value, key: &str) -> String {
    match &item[key] {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl InstanceRow {
    fn from_item(item: &Value) -> Self {
        let tags = item["tags"]
            .as_object()
            .map(|tags| {
                tags.iter()
                    .map(|(k, v)| format!("{}={}", k, v.as_str().unwrap_or_default()))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_default();

        let vip = match (&item["vip"], &item["vport"]) {
            (Value::String(vip), Value::Number(port)) => format!("{}:{}", vip, port),
            _ => text(item, "vip"),
        };

        Self {
            id: text(item, "id"),
            name: text(item, "name"),
            zone: text(item, "availability_zone"),
            status: text(item, "status"),
            charge_type: text(item, "charge_type"),
            size: format!(
                "{}C/{}G/{}G",
                text(item, "cpu"),
                text(item, "memory"),
                text(item, "storage")
            ),
            vip,
            tags,
        }
    }
}

/// Renders the data source state in the requested format.
pub fn render(state: &Value, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(state),
        OutputFormat::Table => {
            let rows: Vec<InstanceRow> = state["instance_list"]
                .as_array()
                .map(|items| items.iter().map(InstanceRow::from_item).collect())
                .unwrap_or_default();
            Ok(Table::new(rows).with(Style::psql()).to_string())
        }
    }
}
