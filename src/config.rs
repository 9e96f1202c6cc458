// src/config.rs
use serde::Deserialize;

use crate::error::Result;

pub(crate) const DEFAULT_EXECUTABLE: &str = "bpmncode";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct BpmnlsConfig {
    /// Checker program. If not an absolute path, the `PATH` is searched in
    /// an OS-defined way.
    pub(crate) executable_path: String,
}

impl Default for BpmnlsConfig {
    fn default() -> Self {
        Self {
            executable_path: DEFAULT_EXECUTABLE.to_string(),
        }
    }
}

pub(crate) fn parse_config(content: &str) -> Result<BpmnlsConfig> {
    Ok(serde_yml::from_str(content)?)
}
