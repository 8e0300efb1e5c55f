use std::env;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::{Error, Result};

/// Environment variable that overrides where the configuration file lives.
pub const CONFIG_PATH_ENV: &str = "MCPROF_CONFIG_PATH";

/// Built-in locations, following the same convention Minecraft itself uses:
/// everything sits under `%APPDATA%` on Windows and under the home
/// directory everywhere else.
#[derive(Debug, Clone)]
pub struct Defaults {
    /// ~/.mcprof
    pub base_dir: PathBuf,
    /// ~/.mcprof/mcprof.json
    pub config_file: PathBuf,
    /// ~/.mcprof/profiles
    pub profiles_dir: PathBuf,
    /// ~/.minecraft
    pub minecraft_dir: PathBuf,
}

impl Defaults {
    pub fn new() -> Result<Self> {
        let base_dirs = BaseDirs::new().ok_or_else(|| Error::Io {
            action: "determine the home directory".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no home directory"),
        })?;

        #[cfg(windows)]
        let root = base_dirs.config_dir().to_path_buf();
        #[cfg(not(windows))]
        let root = base_dirs.home_dir().to_path_buf();

        let base_dir = root.join(".mcprof");
        Ok(Self {
            config_file: base_dir.join("mcprof.json"),
            profiles_dir: base_dir.join("profiles"),
            minecraft_dir: root.join(".minecraft"),
            base_dir,
        })
    }
}

/// Where the configuration file lives: an explicit override wins, then the
/// `MCPROF_CONFIG_PATH` environment variable, then the platform default.
/// An empty override or variable counts as unset.
pub fn config_file_path(cli_override: Option<&Path>, defaults: &Defaults) -> PathBuf {
    if let Some(path) = cli_override
        && !path.as_os_str().is_empty()
    {
        return path.to_path_buf();
    }

    if let Ok(from_env) = env::var(CONFIG_PATH_ENV)
        && !from_env.is_empty()
    {
        return PathBuf::from(from_env);
    }

    defaults.config_file.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn fake_defaults() -> Defaults {
        Defaults {
            base_dir: PathBuf::from("/home/user/.mcprof"),
            config_file: PathBuf::from("/home/user/.mcprof/mcprof.json"),
            profiles_dir: PathBuf::from("/home/user/.mcprof/profiles"),
            minecraft_dir: PathBuf::from("/home/user/.minecraft"),
        }
    }

    #[test]
    fn test_default_layout() {
        let defaults = Defaults::new().unwrap();
        assert!(defaults.config_file.ends_with(".mcprof/mcprof.json"));
        assert!(defaults.profiles_dir.ends_with(".mcprof/profiles"));
        assert!(defaults.minecraft_dir.ends_with(".minecraft"));
        assert!(defaults.profiles_dir.starts_with(&defaults.base_dir));
    }

    #[test]
    #[serial]
    fn test_override_beats_environment() {
        unsafe { env::set_var(CONFIG_PATH_ENV, "/from/env.json") };
        let path = config_file_path(Some(Path::new("/from/flag.json")), &fake_defaults());
        unsafe { env::remove_var(CONFIG_PATH_ENV) };

        assert_eq!(path, PathBuf::from("/from/flag.json"));
    }

    #[test]
    #[serial]
    fn test_environment_beats_default() {
        unsafe { env::set_var(CONFIG_PATH_ENV, "/from/env.json") };
        let path = config_file_path(None, &fake_defaults());
        unsafe { env::remove_var(CONFIG_PATH_ENV) };

        assert_eq!(path, PathBuf::from("/from/env.json"));
    }

    #[test]
    #[serial]
    fn test_empty_values_count_as_unset() {
        unsafe { env::set_var(CONFIG_PATH_ENV, "") };
        let path = config_file_path(Some(Path::new("")), &fake_defaults());
        unsafe { env::remove_var(CONFIG_PATH_ENV) };

        assert_eq!(path, fake_defaults().config_file);
    }

    #[test]
    #[serial]
    fn test_default_when_nothing_is_set() {
        unsafe { env::remove_var(CONFIG_PATH_ENV) };
        let path = config_file_path(None, &fake_defaults());
        assert_eq!(path, fake_defaults().config_file);
    }
}
