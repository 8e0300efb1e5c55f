use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, IoContext, Result};
use crate::paths::Defaults;

/// Name of the profile that first-time setup seeds.
pub const DEFAULT_PROFILE: &str = "default";

/// The persisted configuration record.
///
/// All three fields must be present for normal operation; a missing field
/// means the tool has not been set up yet and only setup is useful.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root directory holding one subdirectory per profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles_dir: Option<PathBuf>,

    /// Name of the profile the installation currently points at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_profile: Option<String>,

    /// The live game directory whose tracked items get swapped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minecraft_dir: Option<PathBuf>,
}

impl Config {
    /// A record fully populated from the platform's default locations.
    pub fn defaults(paths: &Defaults) -> Self {
        Self {
            profiles_dir: Some(paths.profiles_dir.clone()),
            current_profile: Some(DEFAULT_PROFILE.to_string()),
            minecraft_dir: Some(paths.minecraft_dir.clone()),
        }
    }

    /// Read the record from `path`.
    ///
    /// A missing file is `Ok(None)` so callers can fall back to
    /// [`Config::defaults`]. A file that exists but does not parse is an
    /// error the caller has to handle explicitly; silently replacing a
    /// record the user may have edited by hand would lose their layout.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::Io {
                    action: format!("read configuration file {}", path.display()),
                    source,
                });
            }
        };

        let config = serde_json::from_str(&raw).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }

    /// Write the record to `path`, creating parent directories as needed.
    ///
    /// The content goes to a temporary file first and is renamed into
    /// place, so a crash mid-write never leaves a truncated record behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .io_context(|| format!("create configuration directory {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| Error::Io {
            action: "encode the configuration record".to_string(),
            source: io::Error::other(e),
        })?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .io_context(|| format!("write configuration file {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .io_context(|| format!("move configuration file into place at {}", path.display()))
    }

    /// Whether every field needed for profile operations is present.
    pub fn is_configured(&self) -> bool {
        self.profiles_dir.is_some() && self.current_profile.is_some() && self.minecraft_dir.is_some()
    }

    /// The profiles root, or `NotConfigured` before setup has run.
    pub fn profiles_root(&self) -> Result<&Path> {
        self.profiles_dir.as_deref().ok_or(Error::NotConfigured)
    }

    /// The live game directory, or `NotConfigured` before setup has run.
    pub fn installation_dir(&self) -> Result<&Path> {
        self.minecraft_dir.as_deref().ok_or(Error::NotConfigured)
    }
}
