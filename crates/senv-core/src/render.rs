//! Env-file rendering
//!
//! Output is one `KEY="VALUE"` line per entry in map order. Values are written
//! verbatim; no quoting or escaping is applied.

use std::path::Path;

use crate::{CoreError, Result, SecretMap};

pub fn render(secrets: &SecretMap) -> String {
    secrets
        .iter()
        .map(|(key, value)| format!("{key}=\"{value}\"\n"))
        .collect()
}

/// Write the rendered map to `path`, replacing any existing file.
pub fn write_env_file(secrets: &SecretMap, path: &Path) -> Result<()> {
    let content = render(secrets);
    std::fs::write(path, content).map_err(|source| CoreError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })
}
