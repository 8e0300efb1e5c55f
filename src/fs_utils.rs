//! Filesystem helpers shared by the profile store and the materializer.
//!
//! Everything here treats symlinks as objects in their own right: recursive
//! copies recreate them with the same target instead of following them, and
//! size calculations skip them.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, IoContext, Result};

/// Recursively copy `src` into `dst`, preserving symlinks as symlinks.
///
/// `dst` and any missing parents are created. Regular files are copied
/// byte for byte, directories are recreated, and a symlink inside the tree
/// is recreated pointing at the same target rather than dereferenced.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(Error::PathNotFound(src.to_path_buf()));
    }

    fs::create_dir_all(dst).io_context(|| format!("create directory {}", dst.display()))?;

    for entry in fs::read_dir(src).io_context(|| format!("read directory {}", src.display()))? {
        let entry = entry.io_context(|| format!("read directory {}", src.display()))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .io_context(|| format!("inspect {}", src_path.display()))?;

        if file_type.is_symlink() {
            copy_symlink(&src_path, &dst_path)?;
        } else if file_type.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).io_context(|| {
                format!("copy {} to {}", src_path.display(), dst_path.display())
            })?;
        }
    }

    Ok(())
}

/// Recreate the symlink at `src` as `dst`, keeping the original target.
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let target = fs::read_link(src).io_context(|| format!("read link {}", src.display()))?;
    // metadata() follows the link; a broken one is recreated as a file link.
    let dir_link = fs::metadata(src).map(|m| m.is_dir()).unwrap_or(false);
    make_symlink(&target, dst, dir_link)
}

/// Create a symlink at `link` pointing at `target`.
///
/// Windows distinguishes file links from directory links, so callers say
/// which kind they need; unix has only one kind and ignores the flag.
pub fn make_symlink(target: &Path, link: &Path, dir_link: bool) -> Result<()> {
    #[cfg(unix)]
    {
        let _ = dir_link;
        std::os::unix::fs::symlink(target, link)
            .io_context(|| format!("link {} to {}", link.display(), target.display()))?;
    }

    #[cfg(windows)]
    {
        let result = if dir_link {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        };
        result.io_context(|| format!("link {} to {}", link.display(), target.display()))?;
    }

    Ok(())
}

/// Total size in bytes of every regular file under `path`.
///
/// Symlinks are not followed, so a store full of activated profiles never
/// counts anything twice.
pub fn dir_size(path: &Path) -> io::Result<u64> {
    let mut total = 0;
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if metadata.is_file() {
            total += metadata.len();
        } else if metadata.is_dir() {
            total += dir_size(&entry.path())?;
        }
    }
    Ok(total)
}
