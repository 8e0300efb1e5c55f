//! Making an installation directory reflect a profile, and seeding profiles
//! from an installation.
//!
//! Two primitives, both per tracked item: [`copy_into`] produces independent
//! copies (setup, new profiles), [`activate`] replaces the installation's
//! entries with symlinks into the profile store. Activation does not roll
//! back: an error partway through leaves the installation partially
//! updated, and the error names the item and step so the caller can report
//! exactly where things stopped.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, IoContext, Result};
use crate::fs_utils::{copy_dir_recursive, make_symlink};
use crate::items::TrackedItem;

/// What currently sits at an installation entry, inspected without
/// following symlinks.
#[derive(Debug)]
pub enum EntryStatus {
    Missing,
    File,
    Directory,
    Symlink { target: PathBuf },
    BrokenSymlink { target: PathBuf },
}

impl EntryStatus {
    pub fn detect(path: &Path) -> Self {
        if let Ok(target) = fs::read_link(path) {
            // exists() follows the link, which is exactly what separates a
            // live symlink from a broken one.
            if path.exists() {
                Self::Symlink { target }
            } else {
                Self::BrokenSymlink { target }
            }
        } else if path.is_dir() {
            Self::Directory
        } else if path.exists() {
            Self::File
        } else {
            Self::Missing
        }
    }
}

/// Copy every tracked item from `src_root` into `dst_root` as an
/// independent, fully owned duplicate.
///
/// A symlinked source file is dereferenced, so seeding from an activated
/// installation copies the content rather than the link. Fails with
/// `ItemMissing` on the first absent source item; the caller decides what
/// to do with whatever was copied before that.
pub fn copy_into(src_root: &Path, dst_root: &Path) -> Result<()> {
    for item in TrackedItem::ALL {
        copy_item(item, src_root, dst_root)?;
    }
    Ok(())
}

fn copy_item(item: TrackedItem, src_root: &Path, dst_root: &Path) -> Result<()> {
    let src = item.path_under(src_root);
    let dst = item.path_under(dst_root);

    if !src.exists() {
        return Err(Error::ItemMissing {
            item,
            dir: src_root.to_path_buf(),
        });
    }

    if item.is_dir() {
        copy_dir_recursive(&src, &dst)
    } else {
        fs::copy(&src, &dst)
            .map(|_| ())
            .io_context(|| format!("copy {} to {}", src.display(), dst.display()))
    }
}

/// Point every tracked item in `installation_root` at the copy under
/// `profile_root`.
///
/// The profile must hold all tracked items; that is checked up front,
/// before anything in the installation is touched. Per item: whatever sits
/// at the installation entry is removed (a file or symlink is unlinked, a
/// real directory is deleted recursively), then a symlink to the profile's
/// copy is created in its place.
pub fn activate(profile_root: &Path, installation_root: &Path) -> Result<()> {
    for item in TrackedItem::ALL {
        if !item.path_under(profile_root).exists() {
            return Err(Error::ItemMissing {
                item,
                dir: profile_root.to_path_buf(),
            });
        }
    }

    for item in TrackedItem::ALL {
        displace(item, installation_root)?;
        link_item(item, profile_root, installation_root)?;
    }
    Ok(())
}

fn displace(item: TrackedItem, installation_root: &Path) -> Result<()> {
    let path = item.path_under(installation_root);
    match EntryStatus::detect(&path) {
        EntryStatus::Missing => Ok(()),
        EntryStatus::Directory => fs::remove_dir_all(&path).io_context(|| {
            format!("remove {item} directory from {}", installation_root.display())
        }),
        // Symlinks are unlinked, never followed; a broken one still counts.
        EntryStatus::File | EntryStatus::Symlink { .. } | EntryStatus::BrokenSymlink { .. } => {
            fs::remove_file(&path)
                .io_context(|| format!("remove {item} from {}", installation_root.display()))
        }
    }
}

fn link_item(item: TrackedItem, profile_root: &Path, installation_root: &Path) -> Result<()> {
    let target = item.path_under(profile_root);
    let link = item.path_under(installation_root);
    make_symlink(&target, &link, item.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::populate_installation;
    use tempfile::TempDir;

    #[test]
    fn test_copy_into_copies_all_items() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("minecraft");
        let dst = temp.path().join("profile");
        populate_installation(&src);
        fs::create_dir(&dst).unwrap();

        copy_into(&src, &dst).unwrap();

        for item in TrackedItem::ALL {
            assert!(item.path_under(&dst).exists(), "{item} should be copied");
        }
        assert_eq!(
            fs::read_to_string(dst.join("options.txt")).unwrap(),
            fs::read_to_string(src.join("options.txt")).unwrap()
        );
    }

    #[test]
    fn test_copy_into_makes_independent_copies() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("minecraft");
        let dst = temp.path().join("profile");
        populate_installation(&src);
        fs::create_dir(&dst).unwrap();

        copy_into(&src, &dst).unwrap();
        fs::write(src.join("options.txt"), "fov:0.5\n").unwrap();
        fs::write(src.join("mods/newmod.jar"), b"PK\x03\x04").unwrap();

        assert_eq!(
            fs::read_to_string(dst.join("options.txt")).unwrap(),
            "fov:1.0\n"
        );
        assert!(!dst.join("mods/newmod.jar").exists());
    }

    #[test]
    fn test_copy_into_reports_missing_item() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("minecraft");
        let dst = temp.path().join("profile");
        populate_installation(&src);
        fs::remove_file(src.join("optionsof.txt")).unwrap();
        fs::create_dir(&dst).unwrap();

        let err = copy_into(&src, &dst).unwrap_err();
        assert!(matches!(
            err,
            Error::ItemMissing {
                item: TrackedItem::OptionsOf,
                ..
            }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_into_dereferences_symlinked_files() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("minecraft");
        let dst = temp.path().join("profile");
        let real = temp.path().join("real-options.txt");
        populate_installation(&src);
        fs::write(&real, "fov:2.0\n").unwrap();
        fs::remove_file(src.join("options.txt")).unwrap();
        std::os::unix::fs::symlink(&real, src.join("options.txt")).unwrap();
        fs::create_dir(&dst).unwrap();

        copy_into(&src, &dst).unwrap();

        let copied = dst.join("options.txt");
        assert!(!copied.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&copied).unwrap(), "fov:2.0\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_activate_links_every_item() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join("profiles/survival");
        let minecraft = temp.path().join("minecraft");
        populate_installation(&profile);
        populate_installation(&minecraft);

        activate(&profile, &minecraft).unwrap();

        for item in TrackedItem::ALL {
            let link = item.path_under(&minecraft);
            assert_eq!(fs::read_link(&link).unwrap(), item.path_under(&profile));
        }
        // Content is reachable through the links.
        assert_eq!(
            fs::read_to_string(minecraft.join("options.txt")).unwrap(),
            "fov:1.0\n"
        );
        assert!(minecraft.join("mods/examplemod-1.2.jar").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_activate_displaces_real_entries() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join("profiles/creative");
        let minecraft = temp.path().join("minecraft");
        populate_installation(&profile);
        populate_installation(&minecraft);
        fs::write(minecraft.join("mods/oldmod.jar"), b"PK\x03\x04").unwrap();

        activate(&profile, &minecraft).unwrap();

        // The old real mods directory is gone along with its content.
        assert!(!minecraft.join("mods/oldmod.jar").exists());
        assert!(
            minecraft
                .join("mods")
                .symlink_metadata()
                .unwrap()
                .file_type()
                .is_symlink()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_activate_twice_leaves_no_stale_links() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("profiles/first");
        let second = temp.path().join("profiles/second");
        let minecraft = temp.path().join("minecraft");
        populate_installation(&first);
        populate_installation(&second);
        populate_installation(&minecraft);

        activate(&first, &minecraft).unwrap();
        activate(&second, &minecraft).unwrap();

        for item in TrackedItem::ALL {
            let target = fs::read_link(item.path_under(&minecraft)).unwrap();
            assert!(target.starts_with(&second), "{item} still points elsewhere");
            assert!(!target.starts_with(&first));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_activate_replaces_broken_symlinks() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join("profiles/fresh");
        let minecraft = temp.path().join("minecraft");
        populate_installation(&profile);
        fs::create_dir_all(&minecraft).unwrap();
        std::os::unix::fs::symlink(temp.path().join("deleted"), minecraft.join("options.txt"))
            .unwrap();

        activate(&profile, &minecraft).unwrap();

        assert_eq!(
            fs::read_link(minecraft.join("options.txt")).unwrap(),
            profile.join("options.txt")
        );
    }

    #[test]
    fn test_activate_refuses_incomplete_profile() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join("profiles/partial");
        let minecraft = temp.path().join("minecraft");
        populate_installation(&profile);
        populate_installation(&minecraft);
        fs::remove_dir_all(profile.join("mods")).unwrap();

        let err = activate(&profile, &minecraft).unwrap_err();
        assert!(matches!(
            err,
            Error::ItemMissing {
                item: TrackedItem::Mods,
                ..
            }
        ));
        // Checked before anything was displaced: the installation is intact.
        assert!(!minecraft
            .join("options.txt")
            .symlink_metadata()
            .unwrap()
            .file_type()
            .is_symlink());
    }

    #[cfg(unix)]
    #[test]
    fn test_entry_status_detect() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        let dir = temp.path().join("dir");
        let link = temp.path().join("link");
        let broken = temp.path().join("broken");

        assert!(matches!(EntryStatus::detect(&file), EntryStatus::Missing));

        fs::write(&file, "x").unwrap();
        fs::create_dir(&dir).unwrap();
        std::os::unix::fs::symlink(&file, &link).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), &broken).unwrap();

        assert!(matches!(EntryStatus::detect(&file), EntryStatus::File));
        assert!(matches!(EntryStatus::detect(&dir), EntryStatus::Directory));
        assert!(matches!(
            EntryStatus::detect(&link),
            EntryStatus::Symlink { .. }
        ));
        assert!(matches!(
            EntryStatus::detect(&broken),
            EntryStatus::BrokenSymlink { .. }
        ));
    }
}
