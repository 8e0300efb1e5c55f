use std::fmt;
use std::path::{Path, PathBuf};

/// The fixed set of filesystem entries that make up a profile.
///
/// These are the parts of a Minecraft installation worth swapping between
/// profiles. The set is static: anything else under the game directory is
/// left alone by every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedItem {
    /// `options.txt`, the vanilla settings file.
    Options,
    /// `optionsof.txt`, the OptiFine settings file.
    OptionsOf,
    /// `config/`, per-mod configuration.
    Config,
    /// `mods/`, the mod jars themselves.
    Mods,
}

impl TrackedItem {
    /// Every tracked item, in the order operations process them.
    pub const ALL: [TrackedItem; 4] = [
        TrackedItem::Options,
        TrackedItem::OptionsOf,
        TrackedItem::Config,
        TrackedItem::Mods,
    ];

    /// The entry name this item has under a profile or installation root.
    pub fn file_name(self) -> &'static str {
        match self {
            TrackedItem::Options => "options.txt",
            TrackedItem::OptionsOf => "optionsof.txt",
            TrackedItem::Config => "config",
            TrackedItem::Mods => "mods",
        }
    }

    /// Whether this item is a directory rather than a plain file.
    pub fn is_dir(self) -> bool {
        matches!(self, TrackedItem::Config | TrackedItem::Mods)
    }

    /// Where this item lives under `root`.
    pub fn path_under(self, root: &Path) -> PathBuf {
        root.join(self.file_name())
    }
}

impl fmt::Display for TrackedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_names() {
        assert_eq!(TrackedItem::Options.file_name(), "options.txt");
        assert_eq!(TrackedItem::OptionsOf.file_name(), "optionsof.txt");
        assert_eq!(TrackedItem::Config.file_name(), "config");
        assert_eq!(TrackedItem::Mods.file_name(), "mods");
    }

    #[test]
    fn test_item_kinds() {
        assert!(!TrackedItem::Options.is_dir());
        assert!(!TrackedItem::OptionsOf.is_dir());
        assert!(TrackedItem::Config.is_dir());
        assert!(TrackedItem::Mods.is_dir());
    }

    #[test]
    fn test_path_under() {
        let root = Path::new("/data/profiles/survival");
        assert_eq!(
            TrackedItem::Mods.path_under(root),
            PathBuf::from("/data/profiles/survival/mods")
        );
    }

    #[test]
    fn test_all_covers_every_item() {
        assert_eq!(TrackedItem::ALL.len(), 4);
        let names: Vec<_> = TrackedItem::ALL.iter().map(|i| i.file_name()).collect();
        assert_eq!(names, ["options.txt", "optionsof.txt", "config", "mods"]);
    }

    #[test]
    fn test_display_matches_file_name() {
        assert_eq!(TrackedItem::Config.to_string(), "config");
    }
}
