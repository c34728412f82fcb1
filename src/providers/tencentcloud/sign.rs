//! TC3-HMAC-SHA256 request signing for Tencent Cloud API v3.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use super::TencentCloudError;

pub const ALGORITHM: &str = "TC3-HMAC-SHA256";
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";
const SIGNED_HEADERS: &str = "content-type;host";

type HmacSha256 = Hmac<Sha256>;

/// Inputs needed to sign a single POST request.
#[derive(Debug, Clone, Copy)]
pub struct SigningRequest<'a> {
    pub service: &'a str,
    pub host: &'a str,
    pub payload: &'a [u8],
    pub timestamp: i64,
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, TencentCloudError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| TencentCloudError::Auth {
        message: format!("invalid signing key: {}", e),
    })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn utc_date(timestamp: i64) -> Result<String, TencentCloudError> {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .ok_or_else(|| TencentCloudError::Auth {
            message: format!("timestamp {} out of range", timestamp),
        })
}

/// Builds the `Authorization` header value for `request`.
pub fn authorization(
    secret_id: &str,
    secret_key: &str,
    request: &SigningRequest<'_>,
) -> Result<String, TencentCloudError> {
    let canonical_request = format!(
        "POST\n/\n\ncontent-type:{}\nhost:{}\n\n{}\n{}",
        CONTENT_TYPE,
        request.host,
        SIGNED_HEADERS,
        sha256_hex(request.payload)
    );

    let date = utc_date(request.timestamp)?;
    let credential_scope = format!("{}/{}/tc3_request", date, request.service);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        request.timestamp,
        credential_scope,
        sha256_hex(canonical_request.as_bytes())
    );

    let secret_date = hmac_sha256(format!("TC3{}", secret_key).as_bytes(), date.as_bytes())?;
    let secret_service = hmac_sha256(&secret_date, request.service.as_bytes())?;
    let secret_signing = hmac_sha256(&secret_service, b"tc3_request")?;
    let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes())?);

    Ok(format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, secret_id, credential_scope, SIGNED_HEADERS, signature
    ))
}
