use crate::profile::{NameFilter, Profile};
use crate::script::ScriptKind;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

/// One profile to run: a built-in script and the message names it listens to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub script: ScriptKind,
    pub names: Vec<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            script: ScriptKind::RunningAverage,
            names: Vec::new(),
        }
    }
}

impl ProfileConfig {
    pub fn build(&self, id: usize) -> Profile {
        Profile::new(id, self.script.build(), NameFilter::new(self.names.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub profiles: Vec<ProfileConfig>,
    pub pretty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profiles: vec![ProfileConfig::default()],
            pretty: false,
        }
    }
}

impl AppConfig {
    pub const CONFIG_FILE_NAME: &'static str = "profiler_config.json";

    /// Profiles are numbered from 1 in config order.
    pub fn build_profiles(&self) -> Vec<Profile> {
        self.profiles
            .iter()
            .enumerate()
            .map(|(i, profile)| profile.build(i + 1))
            .collect()
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("App config saved to {}", path.display());
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str(&json) {
                    Ok(config) => {
                        log::info!("App config loaded from {}", path.display());
                        return config;
                    }
                    Err(e) => log::warn!("Failed to parse app config file: {}", e),
                },
                Err(e) => log::warn!("Failed to read app config file: {}", e),
            }
        } else {
            log::info!("No app config file found, using defaults");
        }
        Self::default()
    }
}
