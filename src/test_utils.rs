//! Helpers shared across the test modules.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::Config;

/// Lay out a fake Minecraft installation with every tracked item under
/// `dir`, creating the directory itself as needed.
pub fn populate_installation(dir: &Path) {
    fs::create_dir_all(dir.join("config")).unwrap();
    fs::create_dir_all(dir.join("mods")).unwrap();
    fs::write(dir.join("options.txt"), "fov:1.0\n").unwrap();
    fs::write(dir.join("optionsof.txt"), "ofFogType:3\n").unwrap();
    fs::write(dir.join("config/forge.cfg"), "[general]\n").unwrap();
    fs::write(dir.join("mods/examplemod-1.2.jar"), b"PK\x03\x04").unwrap();
}

/// A configured record pointing at a fresh store and a populated fake
/// installation under the temp dir. No profiles exist yet and no profile
/// is current; tests create and activate what they need.
pub fn setup_test_env(temp: &TempDir) -> (Config, PathBuf, PathBuf) {
    let profiles_dir = temp.path().join("profiles");
    let minecraft_dir = temp.path().join("minecraft");
    fs::create_dir_all(&profiles_dir).unwrap();
    populate_installation(&minecraft_dir);

    let config = Config {
        profiles_dir: Some(profiles_dir.clone()),
        current_profile: None,
        minecraft_dir: Some(minecraft_dir.clone()),
    };
    (config, profiles_dir, minecraft_dir)
}
