pub mod analyze;
pub mod config;
pub mod validate;

use std::path::Path;

/// Read a keypoint JSONL file, with a clear message when it is missing.
pub(crate) fn read_stream(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read keypoint stream {}: {e}", path.display()))
}
