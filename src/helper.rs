use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::data_sources::DataSourceError;

/// Deterministic ID for a data source result: CRC32 of `"{id}-"` for each id, as decimal.
pub fn data_resource_ids_hash<S: AsRef<str>>(ids: &[S]) -> String {
    let mut buf = String::new();
    for id in ids {
        buf.push_str(id.as_ref());
        buf.push('-');
    }
    crc32fast::hash(buf.as_bytes()).to_string()
}

fn expand_home(path: &str) -> Result<PathBuf, DataSourceError> {
    match path.strip_prefix('~') {
        Some(rest) => {
            let home = dirs::home_dir().ok_or_else(|| {
                DataSourceError::Output("cannot resolve home directory".to_string())
            })?;
            Ok(home.join(rest.trim_start_matches('/')))
        }
        None => Ok(PathBuf::from(path)),
    }
}

/// Writes `data` as tab-indented JSON, replacing any existing file at `path`.
pub fn write_to_file<T: Serialize + ?Sized>(
    path: &str,
    data: &T,
) -> Result<PathBuf, DataSourceError> {
    let path = expand_home(path)?;

    if let Ok(metadata) = fs::metadata(&path) {
        if metadata.is_dir() {
            return Err(DataSourceError::Output(format!(
                "{} is a directory",
                path.display()
            )));
        }
        fs::remove_file(&path)?;
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer)
        .map_err(|e| DataSourceError::Output(format!("failed to encode result: {}", e)))?;

    fs::write(&path, buf)?;
    tracing::debug!(path = %path.display(), "result written");

    Ok(path)
}
