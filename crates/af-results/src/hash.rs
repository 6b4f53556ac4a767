//! Content-based hashing for run IDs.

use af_project::schema::{DefaultsDef, DesignDef};
use sha2::{Digest, Sha256};

/// Hex SHA-256 over the design, the project defaults it inherits, and the engine version.
pub fn compute_run_id(design: &DesignDef, defaults: &DefaultsDef, engine_version: &str) -> String {
    let mut hasher = Sha256::new();

    let design_json = serde_json::to_string(design).unwrap_or_default();
    hasher.update(design_json.as_bytes());

    let defaults_json = serde_json::to_string(defaults).unwrap_or_default();
    hasher.update(defaults_json.as_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
