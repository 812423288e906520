use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};
use strum_macros::{Display, EnumString};

use crate::{Error, Result};

/// Settings for a whole source-to-document run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub eval: EvalConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Reject `var` on names that are not bound yet.
    #[serde(default)]
    pub strict_references: bool,

    #[serde(default)]
    pub frame_mode: FrameMode,

    #[serde(default = "default_max_call_depth")]
    pub max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            strict_references: false,
            frame_mode: FrameMode::default(),
            max_call_depth: default_max_call_depth(),
        }
    }
}

/// How a procedure body sees the caller's stack.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FrameMode {
    /// The body runs directly on the caller's stack.
    #[default]
    Shared,
    /// The body gets a fresh stack holding only its declared inputs.
    Isolated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_codephy_version")]
    pub codephy_version: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub title: Option<String>,

    /// Emit a `metadata` block (tool, version, creation time).
    #[serde(default = "default_true")]
    pub metadata: bool,

    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            codephy_version: default_codephy_version(),
            model: default_model(),
            title: None,
            metadata: default_true(),
            pretty: default_true(),
        }
    }
}

fn default_max_call_depth() -> usize {
    256
}

fn default_codephy_version() -> String {
    "0.1".to_string()
}

fn default_model() -> String {
    "phylo_model".to_string()
}

fn default_true() -> bool {
    true
}

impl PipelineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        from_file(path)
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::Config(format!("Failed to open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}
