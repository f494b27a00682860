use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
    #[error("not running from the root level of a project: '{}' is not readable", .path.display())]
    NotProjectRoot {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not read config file: '{}'", .path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config file: '{}'", .path.display())]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write config file: '{}'", .path.display())]
    WriteConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(#[source] serde_json::Error),
    #[error("config file has no 'component.default' entry")]
    MissingDefaultComponent,
    #[error("component type '{0}' does not exist under 'component' in the config file")]
    UnknownComponentType(String),
    #[error("custom template path '{}' does not exist", .path.display())]
    MissingCustomTemplate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("customDirectory [{pattern}] for {name} does not contain a templatable value")]
    UntemplatableDirectory { pattern: String, name: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Writes `contents`, creating missing parent directories first.
pub(crate) fn write_all(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

pub(crate) fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(value) => *value,
        serde_json::Value::String(value) => value == "true",
        _ => false,
    }
}

/// Deserializes an optional string, treating any non-string value as absent.
pub(crate) fn string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(value)) => Some(value),
        _ => None,
    })
}
