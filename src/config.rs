use std::fs;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::client::DEFAULT_BASE_URL;
use crate::domain::ExperimentType;
use crate::error::MgnifyError;

/// Optional JSON settings file, read only when `--config` is given.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub experiment: Option<String>,
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Values given on the command line. `None` means "not passed".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub experiment: Option<ExperimentType>,
    pub output_dir: Option<Utf8PathBuf>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub experiment: ExperimentType,
    pub output_dir: Utf8PathBuf,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&Utf8Path>, overrides: Overrides) -> Result<Settings, MgnifyError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Config::default(),
        };
        Self::resolve_config(config, overrides)
    }

    pub fn load(path: &Utf8Path) -> Result<Config, MgnifyError> {
        let content = fs::read_to_string(path.as_std_path())
            .map_err(|_| MgnifyError::ConfigRead(path.to_path_buf()))?;
        serde_json::from_str(&content).map_err(|err| MgnifyError::ConfigParse(err.to_string()))
    }

    pub fn resolve_config(config: Config, overrides: Overrides) -> Result<Settings, MgnifyError> {
        let file_experiment = config
            .experiment
            .map(|value| value.parse::<ExperimentType>())
            .transpose()?;

        Ok(Settings {
            experiment: overrides
                .experiment
                .or(file_experiment)
                .unwrap_or_default(),
            output_dir: overrides
                .output_dir
                .or_else(|| config.output_dir.map(Utf8PathBuf::from))
                .unwrap_or_else(|| Utf8PathBuf::from(".")),
            base_url: overrides
                .base_url
                .or(config.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: overrides
                .timeout_secs
                .or(config.timeout_secs)
                .map(Duration::from_secs),
        })
    }
}
