use std::{env, path::Path};

use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DATABRICKS_HOST_ENV: &str = "DATABRICKS_HOST";
pub const DATABRICKS_TOKEN_ENV: &str = "DATABRICKS_TOKEN";

/// Databricks control-plane settings.
#[derive(Debug, Clone)]
pub struct DatabricksSection {
    pub host: String,
    pub token: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawDatabricksSection {
    pub host: Option<String>,
    pub token: Option<String>,
}

/// Config values win; `DATABRICKS_HOST` / `DATABRICKS_TOKEN` fill the gaps,
/// matching how the Databricks SDK resolves its own credentials.
pub fn parse_databricks_section(
    raw: Option<RawDatabricksSection>,
    path: &Path,
) -> Result<DatabricksSection, ConfigError> {
    let databricks_raw = raw.unwrap_or_default();

    let host = databricks_raw
        .host
        .or_else(|| non_empty_env(DATABRICKS_HOST_ENV))
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingField {
            path: path.to_path_buf(),
            field: "databricks.host",
        })?;

    let token = databricks_raw
        .token
        .or_else(|| non_empty_env(DATABRICKS_TOKEN_ENV))
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingField {
            path: path.to_path_buf(),
            field: "databricks.token",
        })?;

    Ok(DatabricksSection { host, token })
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
