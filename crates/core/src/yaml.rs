use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::Read, path::PathBuf};
use thiserror::Error;

use crate::authgate_error;

/// The single credential pair every request is validated against.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CredentialConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub host: Option<String>,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SetupConfig {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    /// Protection space announced in the WWW-Authenticate challenge.
    pub realm: String,
    pub credential: CredentialConfig,
    pub api_config: ApiConfig,
}

/// Substitutes environment variables in YAML content.
fn substitute_env_variables(contents: &str) -> Result<String, regex::Error> {
    let re = Regex::new(r"\$\{([^}]+)\}")?;
    let result = re.replace_all(contents, |caps: &Captures| {
        let var_name = &caps[1];
        match env::var(var_name) {
            Ok(val) => val,
            Err(_) => {
                authgate_error!("Environment variable {} not found", var_name);
                panic!("Environment variable {} not found", var_name)
            }
        }
    });
    Ok(result.into_owned())
}

#[derive(Error, Debug)]
pub enum ReadYamlError {
    #[error("Can not find yaml")]
    CanNotFindYaml,

    #[error("Can not read yaml")]
    CanNotReadYaml,

    #[error("Setup config is invalid yaml and does not match the struct - {0}")]
    SetupConfigInvalidYaml(String),

    #[error("Environment variable substitution failed: {0}")]
    EnvironmentVariableSubstitutionFailed(#[from] regex::Error),

    #[error("The realm must not be empty")]
    RealmNotDefined,

    #[error("The credential username and password must not be empty")]
    CredentialNotDefined,
}

/// Reads and parses the authgate configuration YAML file.
///
/// Realm and credential fields are validated here; past startup the rest
/// of the crate assumes they are present and well-formed.
pub fn read(file_path: &PathBuf, raw_yaml: bool) -> Result<SetupConfig, ReadYamlError> {
    let mut file = File::open(file_path).map_err(|_| ReadYamlError::CanNotFindYaml)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|_| ReadYamlError::CanNotReadYaml)?;

    let substituted_contents =
        if raw_yaml { contents } else { substitute_env_variables(&contents)? };

    let config: SetupConfig = serde_yaml::from_str(&substituted_contents)
        .map_err(|e| ReadYamlError::SetupConfigInvalidYaml(e.to_string()))?;

    if config.realm.trim().is_empty() {
        return Err(ReadYamlError::RealmNotDefined);
    }

    if config.credential.username.is_empty() || config.credential.password.is_empty() {
        return Err(ReadYamlError::CredentialNotDefined);
    }

    Ok(config)
}
