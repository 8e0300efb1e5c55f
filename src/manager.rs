//! Orchestration of the profile store, the materializer, and the
//! configuration record.
//!
//! Functions here take the record explicitly and mutate it in memory at
//! most. Filesystem effects are immediate; persisting the record is the
//! caller's responsibility, so an interactive session can batch its
//! changes behind an explicit save.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, DEFAULT_PROFILE};
use crate::error::{Error, IoContext, Result};
use crate::materialize;
use crate::profiles;

/// Switch the installation over to profile `name`.
///
/// The name is resolved at call time: a profile removed out-of-band since
/// the last listing is reported as missing, not fought. On success the
/// record's current profile is updated in memory.
pub fn activate_profile(config: &mut Config, name: &str) -> Result<()> {
    let profiles_root = config.profiles_root()?;
    let installation = config.installation_dir()?;

    let profile = profiles::profile_dir(profiles_root, name);
    if !profile.is_dir() {
        return Err(Error::ProfileNotFound(name.to_string()));
    }
    if !installation.is_dir() {
        return Err(Error::PathNotFound(installation.to_path_buf()));
    }

    materialize::activate(&profile, installation)?;
    config.current_profile = Some(name.to_string());
    Ok(())
}

/// First-time setup: seed a profile named `default` from the installation
/// and return a fresh, fully populated record.
///
/// The installation keeps its real files; they only become symlinks on the
/// first activation.
pub fn first_time_setup(profiles_dir: &Path, minecraft_dir: &Path) -> Result<Config> {
    if !minecraft_dir.is_dir() {
        return Err(Error::PathNotFound(minecraft_dir.to_path_buf()));
    }
    fs::create_dir_all(profiles_dir)
        .io_context(|| format!("create profiles root {}", profiles_dir.display()))?;

    profiles::create(profiles_dir, DEFAULT_PROFILE, minecraft_dir)?;

    Ok(Config {
        profiles_dir: Some(absolute(profiles_dir)?),
        current_profile: Some(DEFAULT_PROFILE.to_string()),
        minecraft_dir: Some(absolute(minecraft_dir)?),
    })
}

/// Point the record at a different installation directory.
///
/// Moves nothing: the new installation keeps whatever tracked items it has
/// until the next activation replaces them.
pub fn change_installation_path(config: &mut Config, new_path: &Path) -> Result<()> {
    if !new_path.is_dir() {
        return Err(Error::PathNotFound(new_path.to_path_buf()));
    }
    config.minecraft_dir = Some(absolute(new_path)?);
    Ok(())
}

/// Create profile `name` seeded from the installation's current items.
pub fn create_profile(config: &Config, name: &str) -> Result<()> {
    let root = config.profiles_root()?;
    let installation = config.installation_dir()?;
    profiles::create(root, name, installation).map(|_| ())
}

/// Delete profile `name`.
///
/// Deleting the active profile would leave the installation's links
/// dangling, so it is refused; switch away first.
pub fn remove_profile(config: &Config, name: &str) -> Result<()> {
    if config.current_profile.as_deref() == Some(name) {
        return Err(Error::ProfileActive(name.to_string()));
    }
    profiles::remove(config.profiles_root()?, name)
}

/// Copy profile `src` to a new profile `dest`.
///
/// Allowed on the active profile: copying leaves the source in place, so
/// the installation's links stay valid.
pub fn duplicate_profile(config: &Config, src: &str, dest: &str) -> Result<()> {
    profiles::duplicate(config.profiles_root()?, src, dest).map(|_| ())
}

/// Rename profile `src` to `dest`.
///
/// Renaming the active profile would move the directory out from under the
/// installation's links, so it is refused; switch away first.
pub fn rename_profile(config: &Config, src: &str, dest: &str) -> Result<()> {
    if config.current_profile.as_deref() == Some(src) {
        return Err(Error::ProfileActive(src.to_string()));
    }
    profiles::rename(config.profiles_root()?, src, dest)
}

/// Move the whole store to `new_root` and update the record.
///
/// Existing installation links keep pointing at the old location; the next
/// activation refreshes them.
pub fn relocate_profiles(config: &mut Config, new_root: &Path) -> Result<()> {
    let root = config.profiles_root()?.to_path_buf();
    profiles::relocate(&root, new_root)?;
    config.profiles_dir = Some(absolute(new_root)?);
    Ok(())
}

/// Copy the whole store to `dest`; the record is untouched.
pub fn export_profiles(config: &Config, dest: &Path) -> Result<()> {
    profiles::export(config.profiles_root()?, dest)
}

/// Relative paths entered by the user are pinned down before they go into
/// the record, so the record stays valid from any working directory.
fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .io_context(|| format!("resolve the absolute path of {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::TrackedItem;
    use crate::test_utils::{populate_installation, setup_test_env};
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn test_activate_updates_record_and_links() {
        let temp = TempDir::new().unwrap();
        let (mut config, profiles_dir, minecraft_dir) = setup_test_env(&temp);
        create_profile(&config, "default").unwrap();
        create_profile(&config, "survival").unwrap();
        config.current_profile = Some("default".to_string());

        activate_profile(&mut config, "survival").unwrap();

        assert_eq!(config.current_profile.as_deref(), Some("survival"));
        let mods_target = fs::read_link(minecraft_dir.join("mods")).unwrap();
        assert_eq!(mods_target, profiles_dir.join("survival/mods"));
    }

    #[test]
    fn test_activate_missing_profile_changes_nothing() {
        let temp = TempDir::new().unwrap();
        let (mut config, _, minecraft_dir) = setup_test_env(&temp);
        config.current_profile = Some("default".to_string());

        let err = activate_profile(&mut config, "ghost").unwrap_err();
        assert!(matches!(err, Error::ProfileNotFound(_)));
        assert_eq!(config.current_profile.as_deref(), Some("default"));
        assert!(minecraft_dir.join("options.txt").is_file());
    }

    #[test]
    fn test_activate_unconfigured_record() {
        let mut config = Config::default();
        let err = activate_profile(&mut config, "any").unwrap_err();
        assert!(matches!(err, Error::NotConfigured));
    }

    #[test]
    fn test_first_time_setup_seeds_default_profile() {
        let temp = TempDir::new().unwrap();
        let profiles_dir = temp.path().join("profiles");
        let minecraft_dir = temp.path().join("minecraft");
        populate_installation(&minecraft_dir);

        let config = first_time_setup(&profiles_dir, &minecraft_dir).unwrap();

        assert!(config.is_configured());
        assert_eq!(config.current_profile.as_deref(), Some(DEFAULT_PROFILE));
        assert!(config.profiles_dir.as_ref().unwrap().is_absolute());
        assert!(config.minecraft_dir.as_ref().unwrap().is_absolute());

        let default_dir = profiles_dir.join(DEFAULT_PROFILE);
        for item in TrackedItem::ALL {
            assert!(item.path_under(&default_dir).exists());
        }
        // The installation itself is untouched by setup.
        assert!(minecraft_dir.join("options.txt").is_file());
    }

    #[test]
    fn test_first_time_setup_aborts_on_missing_item() {
        let temp = TempDir::new().unwrap();
        let profiles_dir = temp.path().join("profiles");
        let minecraft_dir = temp.path().join("minecraft");
        populate_installation(&minecraft_dir);
        fs::remove_file(minecraft_dir.join("optionsof.txt")).unwrap();

        let err = first_time_setup(&profiles_dir, &minecraft_dir).unwrap_err();
        assert!(matches!(
            err,
            Error::ItemMissing {
                item: TrackedItem::OptionsOf,
                ..
            }
        ));
        assert!(!profiles_dir.join(DEFAULT_PROFILE).exists());
    }

    #[test]
    fn test_first_time_setup_requires_installation() {
        let temp = TempDir::new().unwrap();
        let err = first_time_setup(&temp.path().join("profiles"), &temp.path().join("nope"))
            .unwrap_err();
        assert!(matches!(err, Error::PathNotFound(_)));
    }

    #[test]
    fn test_change_installation_path() {
        let temp = TempDir::new().unwrap();
        let (mut config, _, _) = setup_test_env(&temp);

        let err = change_installation_path(&mut config, &temp.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, Error::PathNotFound(_)));

        let other = temp.path().join("other-minecraft");
        populate_installation(&other);
        change_installation_path(&mut config, &other).unwrap();
        assert_eq!(config.minecraft_dir.as_deref(), Some(other.as_path()));
    }

    #[test]
    fn test_remove_active_profile_is_refused() {
        let temp = TempDir::new().unwrap();
        let (mut config, profiles_dir, _) = setup_test_env(&temp);
        create_profile(&config, "main").unwrap();
        config.current_profile = Some("main".to_string());

        let err = remove_profile(&config, "main").unwrap_err();
        assert!(matches!(err, Error::ProfileActive(_)));
        assert!(profiles_dir.join("main").is_dir());
    }

    #[test]
    fn test_rename_active_profile_is_refused() {
        let temp = TempDir::new().unwrap();
        let (mut config, _, _) = setup_test_env(&temp);
        create_profile(&config, "main").unwrap();
        config.current_profile = Some("main".to_string());

        let err = rename_profile(&config, "main", "renamed").unwrap_err();
        assert!(matches!(err, Error::ProfileActive(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_duplicate_active_profile_is_allowed() {
        let temp = TempDir::new().unwrap();
        let (mut config, profiles_dir, minecraft_dir) = setup_test_env(&temp);
        create_profile(&config, "main").unwrap();
        activate_profile(&mut config, "main").unwrap();

        duplicate_profile(&config, "main", "fork").unwrap();

        assert!(profiles_dir.join("fork").is_dir());
        // The installation still points at the original.
        assert_eq!(
            fs::read_link(minecraft_dir.join("mods")).unwrap(),
            profiles_dir.join("main/mods")
        );
    }

    #[test]
    fn test_relocate_updates_record() {
        let temp = TempDir::new().unwrap();
        let (mut config, profiles_dir, _) = setup_test_env(&temp);
        create_profile(&config, "main").unwrap();
        let new_root = temp.path().join("moved-profiles");

        relocate_profiles(&mut config, &new_root).unwrap();

        assert_eq!(config.profiles_dir.as_deref(), Some(new_root.as_path()));
        assert!(!profiles_dir.exists());
        assert!(new_root.join("main").is_dir());
    }

    #[test]
    fn test_export_leaves_record_alone() {
        let temp = TempDir::new().unwrap();
        let (config, profiles_dir, _) = setup_test_env(&temp);
        create_profile(&config, "main").unwrap();
        let dest = temp.path().join("exported");

        let before = config.profiles_dir.clone();
        export_profiles(&config, &dest).unwrap();

        assert_eq!(config.profiles_dir, before);
        assert!(profiles_dir.join("main").is_dir());
        assert!(dest.join("main").is_dir());
    }
}
