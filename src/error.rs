use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::items::TrackedItem;

/// Result alias used throughout the core modules.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything the core operations can fail with.
///
/// The not-found and already-exists variants are recoverable by asking the
/// user for a different input; parse and I/O failures are not. See
/// [`Error::user_recoverable`].
#[derive(Debug, Error)]
pub enum Error {
    /// No profile directory with this name under the profiles root.
    #[error("profile '{0}' does not exist")]
    ProfileNotFound(String),

    /// A directory the operation needs is missing.
    #[error("{} does not exist", .0.display())]
    PathNotFound(PathBuf),

    /// A seed directory is missing one of the tracked items.
    #[error("{item} is missing from {}", .dir.display())]
    ItemMissing { item: TrackedItem, dir: PathBuf },

    /// A profile directory with this name already exists.
    #[error("profile '{0}' already exists")]
    ProfileExists(String),

    /// Store copies never merge into a directory they did not create.
    #[error("destination {} already exists", .0.display())]
    DestinationNotEmpty(PathBuf),

    /// Copying the store into itself would recurse forever.
    #[error("destination {} is inside the profiles root {}", .dest.display(), .root.display())]
    DestinationInsideSource { dest: PathBuf, root: PathBuf },

    /// Profile names double as directory names, so not everything goes.
    #[error("invalid profile name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// The operation would pull the installation's links out from under it.
    #[error("profile '{0}' is currently active")]
    ProfileActive(String),

    /// The configuration record is missing a required directory.
    #[error("mcprof is not set up yet (profiles or minecraft directory is not configured)")]
    NotConfigured,

    /// The configuration file exists but does not hold valid JSON.
    #[error("malformed configuration file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A filesystem call failed. `action` names the item and step so the
    /// caller can report exactly where things stopped.
    #[error("could not {action}")]
    Io {
        action: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Whether the driver should treat this as "ask again" rather than as a
    /// hard failure.
    pub fn user_recoverable(&self) -> bool {
        !matches!(self, Error::Parse { .. } | Error::Io { .. })
    }
}

/// Attaches an action description to an `io::Result`, the typed-error
/// counterpart of anyhow's `with_context`.
pub(crate) trait IoContext<T> {
    fn io_context<F>(self, action: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context<F>(self, action: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| Error::Io {
            action: action(),
            source,
        })
    }
}
