//! Content hashing utilities for cache keys.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Compute SHA256 hash of a serializable value.
///
/// The value is serialized to JSON before hashing, ensuring deterministic output.
/// Returns a 64-character lowercase hexadecimal string.
///
/// # Errors
/// Returns an error if the value cannot be serialized to JSON.
pub fn compute_hash<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Compute the cache key hash for a connection.
pub fn connection_hash(driver: &str, connection_string: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(driver.as_bytes());
    hasher.update(b"\x00");
    hasher.update(connection_string.as_bytes());
    let hex = format!("{:x}", hasher.finalize());
    // 16 hex chars keep keys readable and are plenty for collision
    // avoidance among a handful of configured connections.
    hex[..16].to_string()
}
