use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Subcommand;
use quiesce_core::EmitterConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PROFILE_PATH: &str = "quiesce.toml";

/// Errors from profile load/save.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to read profile {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write profile {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse profile {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize profile: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// TOML config profile. Currently just emitter tuning; scenarios that omit
/// an emitter section pick these values up via `play --config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub emitter: EmitterConfig,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ProfileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ProfileError> {
        let body = toml::to_string_pretty(self)?;
        let content = format!("# quiesce profile, generated {}\n{body}", Utc::now());
        std::fs::write(path, content).map_err(|source| ProfileError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a default profile
    Init {
        /// Profile path
        #[arg(long, default_value = DEFAULT_PROFILE_PATH)]
        path: PathBuf,
    },
    /// Print the profile as JSON
    Show {
        /// Profile path
        #[arg(long, default_value = DEFAULT_PROFILE_PATH)]
        path: PathBuf,
    },
    /// Print the default profile path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Init { path } => {
            Profile::default().save(&path)?;
            println!("profile written to {}", path.display());
        }
        ConfigAction::Show { path } => {
            let profile = Profile::load(&path)?;
            let json = serde_json::to_string_pretty(&profile)?;
            println!("{json}");
        }
        ConfigAction::Path => {
            println!("{DEFAULT_PROFILE_PATH}");
        }
    }
    Ok(())
}
