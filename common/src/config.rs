use crate::error::Error;
use crate::file_utils::{open_file, path_concat2};
use crate::json::{Encoding, JsonOptions};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct JsonConfig {
    pub encoding: Encoding,
    #[serde(flatten)]
    pub options: JsonOptions,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SanitizeConfig {
    /// Replaces invalid characters, they are dropped when empty
    pub replacement: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub json: JsonConfig,
    pub sanitize: SanitizeConfig,
}

pub const CONFIG_FILE_NAME: &str = "cinante.yml";

const DEFAULT_CONFIG_LOCATION: &[&str] = &["~/.cinante/", "/etc/cinante/"];

pub fn parse_yaml_from_file<P: AsRef<Path>, D: DeserializeOwned>(file: P) -> Result<D, Error> {
    let reader = open_file(&file)?;
    serde_yaml::from_reader(reader).map_err(|source| Error::Config {
        path: file.as_ref().to_string_lossy().into(),
        source,
    })
}

fn expand<P: AsRef<Path>>(path: P) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.as_ref().to_string_lossy()).into_owned())
}

/// First existing config file: the provided one, then the default locations.
///
/// A provided file that does not exist is an error, a missing default one is not.
pub fn find_config<P: AsRef<Path>, T: AsRef<Path>>(
    provided_config: &Option<P>,
    name: T,
) -> Result<Option<PathBuf>, Error> {
    if let Some(provided) = provided_config {
        let provided = expand(provided);
        return if provided.exists() {
            Ok(Some(provided))
        } else {
            Err(Error::ConfigNotFound(provided.to_string_lossy().into()))
        };
    }
    Ok(DEFAULT_CONFIG_LOCATION
        .iter()
        .map(|loc| path_concat2(expand(loc), &name))
        .find(|loc| loc.exists()))
}

impl Config {
    pub fn parse<P: AsRef<Path>>(provided_config: &Option<P>) -> Result<Config, Error> {
        match find_config(provided_config, CONFIG_FILE_NAME)? {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                parse_yaml_from_file(path)
            }
            None => {
                debug!("No config file found, using defaults");
                Ok(Config::default())
            }
        }
    }
}
