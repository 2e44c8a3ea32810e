use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/todos";
const DEFAULT_CONFIG_FILE: &str = "todo.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: Url,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid api url '{value}' from {origin}: {source}")]
    InvalidUrl {
        origin: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to read config file '{}': {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config file '{}': {source}", path.display())]
    MalformedFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
}

/// Layers, lowest first: built-in default, config file, `API_URL`,
/// `APP__API_URL`, then the command-line flag.
pub fn load_settings(flag_api_url: Option<&str>) -> Result<Settings, SettingsError> {
    let (path, required) = match std::env::var("TODO_CONFIG") {
        Ok(path) => (PathBuf::from(path), true),
        Err(_) => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    let file_contents = read_config_file(&path, required)?;
    let env: HashMap<String, String> = ["API_URL", "APP__API_URL"]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok().map(|value| (key.to_string(), value)))
        .collect();

    resolve_settings(
        file_contents.as_deref().map(|raw| (path.as_path(), raw)),
        &env,
        flag_api_url,
    )
}

fn read_config_file(path: &Path, required: bool) -> Result<Option<String>, SettingsError> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => Ok(None),
        Err(source) => Err(SettingsError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn resolve_settings(
    file: Option<(&Path, &str)>,
    env: &HashMap<String, String>,
    flag_api_url: Option<&str>,
) -> Result<Settings, SettingsError> {
    let mut candidate = ("default", DEFAULT_API_URL.to_string());

    if let Some((path, raw)) = file {
        let file_cfg: FileSettings =
            toml::from_str(raw).map_err(|source| SettingsError::MalformedFile {
                path: path.to_path_buf(),
                source,
            })?;
        if let Some(v) = file_cfg.api_url {
            candidate = ("config file", v);
        }
    }

    if let Some(v) = env.get("API_URL") {
        candidate = ("API_URL", v.clone());
    }
    if let Some(v) = env.get("APP__API_URL") {
        candidate = ("APP__API_URL", v.clone());
    }

    if let Some(v) = flag_api_url {
        candidate = ("--api-url", v.to_string());
    }

    let (origin, value) = candidate;
    let api_url = Url::parse(value.trim()).map_err(|source| SettingsError::InvalidUrl {
        origin,
        value: value.clone(),
        source,
    })?;

    Ok(Settings { api_url })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
