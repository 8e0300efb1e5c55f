//! The on-disk profile store.
//!
//! A profile is nothing more than a subdirectory of the profiles root
//! holding a copy of every tracked item. Every operation here takes the
//! root explicitly and resolves names at call time, so a store changed
//! behind our back is picked up rather than fought. Nothing here prompts
//! or confirms; that is the driver's job.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, IoContext, Result};
use crate::fs_utils::copy_dir_recursive;
use crate::materialize;

/// Longest accepted profile name.
const MAX_NAME_LEN: usize = 64;

/// The directory a profile of this name occupies, or would occupy.
pub fn profile_dir(root: &Path, name: &str) -> PathBuf {
    root.join(name)
}

/// Whether a profile of this name exists under `root`.
pub fn exists(root: &Path, name: &str) -> bool {
    profile_dir(root, name).is_dir()
}

/// Profile names double as directory names, so reject anything that could
/// escape the root or fail to round-trip through a path.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.chars().count() > MAX_NAME_LEN {
        Some("name is longer than 64 characters")
    } else if name == "." || name == ".." {
        Some("name must not be '.' or '..'")
    } else if name.contains(['/', '\\']) {
        Some("name must not contain path separators")
    } else if name.contains('\0') {
        Some("name must not contain NUL")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Profile names under `root`, sorted for stable listings.
///
/// Only directory entries count; stray files in the root are ignored.
pub fn list(root: &Path) -> Result<Vec<String>> {
    let mut profiles = Vec::new();
    if root.exists() {
        for entry in
            fs::read_dir(root).io_context(|| format!("read profiles root {}", root.display()))?
        {
            let entry =
                entry.io_context(|| format!("read profiles root {}", root.display()))?;
            if entry.path().is_dir()
                && let Some(name) = entry.file_name().to_str()
            {
                profiles.push(name.to_string());
            }
        }
    }
    profiles.sort();
    Ok(profiles)
}

/// Create profile `name` populated from the tracked items under `seed`.
///
/// The seed is either the live installation or another profile's
/// directory. A profile either gets all its items or is not left behind
/// at all: when copying fails partway, the half-made directory is removed
/// before the error is returned.
pub fn create(root: &Path, name: &str, seed: &Path) -> Result<PathBuf> {
    validate_name(name)?;

    let dir = profile_dir(root, name);
    if dir.symlink_metadata().is_ok() {
        return Err(Error::ProfileExists(name.to_string()));
    }

    fs::create_dir_all(&dir)
        .io_context(|| format!("create profile directory {}", dir.display()))?;

    if let Err(e) = materialize::copy_into(seed, &dir) {
        let _ = fs::remove_dir_all(&dir);
        return Err(e);
    }
    Ok(dir)
}

/// Recursively delete profile `name`.
pub fn remove(root: &Path, name: &str) -> Result<()> {
    let dir = profile_dir(root, name);
    if !dir.is_dir() {
        return Err(Error::ProfileNotFound(name.to_string()));
    }
    fs::remove_dir_all(&dir)
        .io_context(|| format!("remove profile directory {}", dir.display()))
}

/// Copy profile `src` to a new profile `dest`.
///
/// The copy preserves symlinks as symlinks, so the duplicate is
/// independent of the original from the moment it exists.
pub fn duplicate(root: &Path, src: &str, dest: &str) -> Result<PathBuf> {
    validate_name(dest)?;

    let src_dir = profile_dir(root, src);
    let dest_dir = profile_dir(root, dest);
    if !src_dir.is_dir() {
        return Err(Error::ProfileNotFound(src.to_string()));
    }
    if dest_dir.symlink_metadata().is_ok() {
        return Err(Error::ProfileExists(dest.to_string()));
    }

    copy_dir_recursive(&src_dir, &dest_dir)?;
    Ok(dest_dir)
}

/// Rename profile `src` to `dest` with a filesystem-level move.
pub fn rename(root: &Path, src: &str, dest: &str) -> Result<()> {
    validate_name(dest)?;

    let src_dir = profile_dir(root, src);
    let dest_dir = profile_dir(root, dest);
    if !src_dir.is_dir() {
        return Err(Error::ProfileNotFound(src.to_string()));
    }
    if dest_dir.symlink_metadata().is_ok() {
        return Err(Error::ProfileExists(dest.to_string()));
    }

    fs::rename(&src_dir, &dest_dir)
        .io_context(|| format!("rename {} to {}", src_dir.display(), dest_dir.display()))
}

/// Move the whole store from `root` to `new_root`.
///
/// Copies first and deletes the original only once the copy succeeded, so
/// the store is never the only casualty of a failed move. The destination
/// must not exist at all; even an empty directory is refused rather than
/// merged into.
pub fn relocate(root: &Path, new_root: &Path) -> Result<()> {
    copy_store(root, new_root)?;
    fs::remove_dir_all(root)
        .io_context(|| format!("remove old profiles root {}", root.display()))
}

/// Copy the whole store to `dest`, leaving the original in place.
pub fn export(root: &Path, dest: &Path) -> Result<()> {
    copy_store(root, dest)
}

fn copy_store(root: &Path, dest: &Path) -> Result<()> {
    if !root.is_dir() {
        return Err(Error::PathNotFound(root.to_path_buf()));
    }
    if dest.symlink_metadata().is_ok() {
        return Err(Error::DestinationNotEmpty(dest.to_path_buf()));
    }
    if dest.starts_with(root) {
        return Err(Error::DestinationInsideSource {
            dest: dest.to_path_buf(),
            root: root.to_path_buf(),
        });
    }
    copy_dir_recursive(root, dest)
}
