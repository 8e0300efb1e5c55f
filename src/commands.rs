//! Command handlers and the interactive session.
//!
//! Subcommands are one-shot: they load the configuration record, do their
//! work, and persist the record immediately when they changed it. The
//! interactive session instead batches record changes in memory and only
//! writes them on "save" or "save and exit"; filesystem effects (created
//! profiles, switched links) are immediate in both modes.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anstyle::AnsiColor;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use inquire::{Confirm, InquireError, Select, Text};

use crate::config::Config;
use crate::error::Error;
use crate::fs_utils::dir_size;
use crate::items::TrackedItem;
use crate::manager;
use crate::materialize::EntryStatus;
use crate::paths::Defaults;
use crate::profiles;
use crate::ui::Ui;

/// Load the record from `path`, writing a fully populated default record
/// first if the file does not exist yet.
pub fn load_or_init(path: &Path, defaults: &Defaults, ui: &Ui) -> Result<Config> {
    match Config::load(path)? {
        Some(config) => Ok(config),
        None => {
            let config = Config::defaults(defaults);
            config.save(path)?;
            ui.info(format!("Created configuration file at {}", path.display()));
            Ok(config)
        }
    }
}

/// List all profiles, marking the current one.
pub fn list(config: &Config, ui: &Ui) -> Result<()> {
    let Ok(root) = config.profiles_root() else {
        ui.warn("mcprof is not set up yet.");
        ui.println(format!("Run {} to get started.", ui.bold("mcprof setup")));
        return Ok(());
    };

    let names = profiles::list(root)?;
    if names.is_empty() {
        ui.warn("No profiles found.");
        ui.newline();
        ui.println("Create one from the current installation with:");
        ui.println(format!("  {} new <name>", ui.bold("mcprof")));
        return Ok(());
    }

    let current = config.current_profile.as_deref();

    let mut table = ui.simple_table();
    table.set_header(vec![
        ui.header_cell(""),
        ui.header_cell("Profile"),
        ui.header_cell("Modified"),
        ui.header_cell("Status"),
    ]);
    for name in &names {
        let is_current = Some(name.as_str()) == current;
        let marker = if is_current { ui.icon_ok() } else { " " };
        let status = if is_current {
            ui.colored_cell("current", AnsiColor::Green)
        } else {
            ui.cell("-")
        };
        table.add_row(vec![
            ui.cell(marker),
            ui.cell(name),
            ui.cell(modified_display(&profiles::profile_dir(root, name))),
            status,
        ]);
    }

    ui.section("Profiles");
    ui.println(table.to_string());
    Ok(())
}

/// Show the record's current profile and the real state of every tracked
/// item in the installation. The two can disagree after out-of-band edits,
/// which is exactly what this view is for.
pub fn current(config: &Config, ui: &Ui) -> Result<()> {
    ui.section("Current profile");
    ui.newline();

    match config.current_profile.as_deref() {
        Some(name) => ui.println(format!("Selected profile: {}", ui.bold(name))),
        None => ui.println("Selected profile: (none)"),
    }

    let (Ok(root), Ok(installation)) = (config.profiles_root(), config.installation_dir())
    else {
        ui.newline();
        ui.warn("mcprof is not set up yet; nothing to inspect.");
        return Ok(());
    };

    ui.println(format!("Installation:     {}", installation.display()));
    ui.newline();

    let mut table = ui.table();
    table.set_header(vec![
        ui.header_cell("Item"),
        ui.header_cell("State"),
        ui.header_cell("Profile"),
    ]);
    for item in TrackedItem::ALL {
        let status = EntryStatus::detect(&item.path_under(installation));
        let (state, profile) = match &status {
            EntryStatus::Missing => (ui.colored_cell("missing", AnsiColor::Yellow), ui.cell("-")),
            EntryStatus::File => (ui.cell("regular file"), ui.cell("-")),
            EntryStatus::Directory => (ui.cell("regular directory"), ui.cell("-")),
            EntryStatus::Symlink { target } => (
                ui.cell(format!("symlink -> {}", target.display())),
                match profile_of_target(target, root) {
                    Some(name) => ui.colored_cell(name, AnsiColor::Green),
                    None => ui.colored_cell("outside the store", AnsiColor::Yellow),
                },
            ),
            EntryStatus::BrokenSymlink { target } => (
                ui.colored_cell(
                    format!("broken symlink -> {}", target.display()),
                    AnsiColor::Red,
                ),
                ui.cell("-"),
            ),
        };
        table.add_row(vec![ui.cell(item.file_name()), state, profile]);
    }

    ui.println(table.to_string());
    Ok(())
}

/// Which profile a symlink target points into, if it is inside the store.
fn profile_of_target(target: &Path, profiles_root: &Path) -> Option<String> {
    target
        .strip_prefix(profiles_root)
        .ok()?
        .components()
        .next()
        .and_then(|c| c.as_os_str().to_str())
        .map(String::from)
}

/// Switch the installation to profile `name`.
pub fn use_profile(config: &mut Config, name: &str, ui: &Ui) -> Result<()> {
    if !profiles::exists(config.profiles_root()?, name) {
        bail!(
            "Profile '{}' does not exist.\nHint: run 'mcprof list' to see the available profiles.",
            name
        );
    }

    let spinner = ui.spinner(format!("Switching to '{name}'..."));
    match manager::activate_profile(config, name) {
        Ok(()) => {
            ui.spinner_finish_ok(&spinner, format!("Active profile: {name}"));
            Ok(())
        }
        Err(e) => {
            ui.spinner_finish_err(&spinner, format!("Failed to switch to '{name}': {e}"));
            Err(e.into())
        }
    }
}

/// Create a new profile from the installation's current items.
pub fn new(config: &Config, name: &str, ui: &Ui) -> Result<()> {
    let installation = config.installation_dir()?.to_path_buf();

    let spinner = ui.spinner(format!("Copying {} into '{name}'...", installation.display()));
    match manager::create_profile(config, name) {
        Ok(()) => {
            ui.spinner_finish_ok(&spinner, format!("Created profile '{name}'"));
            for item in TrackedItem::ALL {
                ui.println(format!("  {} {item}", ui.icon_ok()));
            }
            ui.newline();
            ui.println("To activate it:");
            ui.println(format!("  {} use {}", ui.bold("mcprof"), name));
            Ok(())
        }
        Err(e) => {
            ui.spinner_finish_err(&spinner, format!("Failed to create '{name}': {e}"));
            Err(e.into())
        }
    }
}

/// Delete a profile, asking first unless `force` is set.
pub fn remove(config: &Config, name: &str, force: bool, ui: &Ui) -> Result<()> {
    if !profiles::exists(config.profiles_root()?, name) {
        bail!(
            "Profile '{}' does not exist.\nHint: run 'mcprof list' to see the available profiles.",
            name
        );
    }
    if config.current_profile.as_deref() == Some(name) {
        bail!(
            "Profile '{}' is currently active.\nHint: switch to another profile first with 'mcprof use <profile>'.",
            name
        );
    }

    if !force {
        let confirmed = Confirm::new(&format!("Delete profile '{name}'?"))
            .with_default(false)
            .with_help_message("Permanently deletes the profile's options, config and mods")
            .prompt()
            .context("Confirmation cancelled")?;
        if !confirmed {
            ui.warn("Removal cancelled.");
            return Ok(());
        }
    }

    manager::remove_profile(config, name)?;
    ui.ok(format!("Removed profile '{name}'"));
    Ok(())
}

/// Copy a profile under a new name.
pub fn copy(config: &Config, src: &str, dest: &str, ui: &Ui) -> Result<()> {
    if !profiles::exists(config.profiles_root()?, src) {
        bail!(
            "Profile '{}' does not exist.\nHint: run 'mcprof list' to see the available profiles.",
            src
        );
    }

    let spinner = ui.spinner(format!("Copying '{src}' to '{dest}'..."));
    match manager::duplicate_profile(config, src, dest) {
        Ok(()) => {
            ui.spinner_finish_ok(&spinner, format!("Copied '{src}' to '{dest}'"));
            Ok(())
        }
        Err(e) => {
            ui.spinner_finish_err(&spinner, format!("Failed to copy '{src}': {e}"));
            Err(e.into())
        }
    }
}

/// Rename a profile.
pub fn rename(config: &Config, src: &str, dest: &str, ui: &Ui) -> Result<()> {
    if !profiles::exists(config.profiles_root()?, src) {
        bail!(
            "Profile '{}' does not exist.\nHint: run 'mcprof list' to see the available profiles.",
            src
        );
    }
    if config.current_profile.as_deref() == Some(src) {
        bail!(
            "Profile '{}' is currently active.\nHint: switch to another profile first with 'mcprof use <profile>'.",
            src
        );
    }

    manager::rename_profile(config, src, dest)?;
    ui.ok(format!("Renamed profile '{src}' to '{dest}'"));
    Ok(())
}

/// Print where the profiles are stored, with the size on disk.
pub fn location(config: &Config, ui: &Ui) -> Result<()> {
    let root = config.profiles_root()?;
    ui.println(format!("Your profiles are located at {}", root.display()));
    if let Ok(size) = dir_size(root) {
        ui.println(ui.dim(format!("{} on disk", format_bytes(size))));
    }
    Ok(())
}

/// Move the whole store and update the record.
pub fn relocate(config: &mut Config, dest: &Path, ui: &Ui) -> Result<()> {
    let old_root = config.profiles_root()?.to_path_buf();

    let spinner = ui.spinner(format!("Moving profiles to {}...", dest.display()));
    match manager::relocate_profiles(config, dest) {
        Ok(()) => {
            ui.spinner_finish_ok(
                &spinner,
                format!(
                    "Profiles moved from {} to {}",
                    old_root.display(),
                    dest.display()
                ),
            );
            if links_into(config, &old_root) {
                ui.warn("The installation still links into the old location.");
                ui.println(format!(
                    "Run {} again to refresh the links.",
                    ui.bold("mcprof use <profile>")
                ));
            }
            Ok(())
        }
        Err(e) => {
            ui.spinner_finish_err(&spinner, format!("Failed to move profiles: {e}"));
            Err(e.into())
        }
    }
}

/// Whether any tracked item in the installation points under `root`.
fn links_into(config: &Config, root: &Path) -> bool {
    let Ok(installation) = config.installation_dir() else {
        return false;
    };
    TrackedItem::ALL.iter().any(|item| {
        matches!(
            EntryStatus::detect(&item.path_under(installation)),
            EntryStatus::Symlink { target } | EntryStatus::BrokenSymlink { target }
                if target.starts_with(root)
        )
    })
}

/// Copy the whole store somewhere else, leaving the original in place.
pub fn export(config: &Config, dest: &Path, ui: &Ui) -> Result<()> {
    let spinner = ui.spinner(format!("Copying profiles to {}...", dest.display()));
    match manager::export_profiles(config, dest) {
        Ok(()) => {
            ui.spinner_finish_ok(&spinner, format!("Profiles copied to {}", dest.display()));
            Ok(())
        }
        Err(e) => {
            ui.spinner_finish_err(&spinner, format!("Failed to copy profiles: {e}"));
            Err(e.into())
        }
    }
}

/// Point the record at a different Minecraft installation.
pub fn set_minecraft_dir(config: &mut Config, path: &Path, ui: &Ui) -> Result<()> {
    if !path.is_dir() {
        bail!("Minecraft is not installed at {}", path.display());
    }
    manager::change_installation_path(config, path)?;
    ui.ok(format!(
        "Minecraft directory set to {}",
        config.installation_dir()?.display()
    ));
    Ok(())
}

/// First-time setup. Directories given as flags skip their prompt, so
/// scripted setups work without a terminal.
pub fn setup(
    defaults: &Defaults,
    profiles_dir: Option<PathBuf>,
    minecraft_dir: Option<PathBuf>,
    ui: &Ui,
) -> Result<Config> {
    let profiles_dir = match profiles_dir {
        Some(dir) => dir,
        None => ask_profiles_dir(defaults, ui)?,
    };
    let minecraft_dir = match minecraft_dir {
        Some(dir) => dir,
        None => ask_minecraft_dir(defaults, ui)?,
    };

    let spinner = ui.spinner("Seeding the 'default' profile from your installation...");
    match manager::first_time_setup(&profiles_dir, &minecraft_dir) {
        Ok(config) => {
            ui.spinner_finish_ok(
                &spinner,
                format!("Profile 'default' created under {}", profiles_dir.display()),
            );
            Ok(config)
        }
        Err(e) => {
            ui.spinner_finish_err(&spinner, format!("Setup failed: {e}"));
            Err(e.into())
        }
    }
}

fn ask_profiles_dir(defaults: &Defaults, ui: &Ui) -> Result<PathBuf> {
    loop {
        let answer = Text::new("Where do you want to store your profiles?")
            .with_default(&defaults.profiles_dir.to_string_lossy())
            .with_help_message("Created if missing; an existing directory must be empty")
            .prompt()?;
        let dir = PathBuf::from(answer.trim());

        if dir.as_os_str().is_empty() {
            ui.warn("No input given.");
            continue;
        }
        if dir.is_file() {
            ui.warn(format!("{} is a file.", dir.display()));
            continue;
        }
        if dir.is_dir() {
            let occupied = fs::read_dir(&dir)
                .map(|mut entries| entries.next().is_some())
                .unwrap_or(true);
            if occupied {
                ui.warn(format!("{} has things stored inside it.", dir.display()));
                continue;
            }
        }
        return Ok(dir);
    }
}

fn ask_minecraft_dir(defaults: &Defaults, ui: &Ui) -> Result<PathBuf> {
    loop {
        let answer = Text::new("Where is Minecraft installed?")
            .with_default(&defaults.minecraft_dir.to_string_lossy())
            .prompt()?;
        let dir = PathBuf::from(answer.trim());

        if !dir.is_dir() {
            ui.warn(format!("Minecraft is not installed at {}", dir.display()));
            continue;
        }
        return Ok(dir);
    }
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

enum MenuAction {
    Switch { name: String, current: bool },
    Current,
    New,
    Remove,
    Copy,
    Rename,
    Location,
    MoveStore,
    ExportStore,
    SetMinecraftDir,
    Save,
    SaveAndExit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Switch { name, current: true } => {
                write!(f, "switch to profile: {name} (current)")
            }
            Self::Switch { name, current: false } => write!(f, "switch to profile: {name}"),
            Self::Current => f.write_str("show the current profile"),
            Self::New => f.write_str("new profile"),
            Self::Remove => f.write_str("remove a profile"),
            Self::Copy => f.write_str("copy a profile"),
            Self::Rename => f.write_str("rename a profile"),
            Self::Location => f.write_str("show the location of your profiles"),
            Self::MoveStore => f.write_str("move the profiles folder"),
            Self::ExportStore => f.write_str("copy the profiles folder elsewhere"),
            Self::SetMinecraftDir => f.write_str("change the minecraft location"),
            Self::Save => f.write_str("save"),
            Self::SaveAndExit => f.write_str("save and exit"),
        }
    }
}

fn menu_actions(names: &[String], current: Option<&str>) -> Vec<MenuAction> {
    let mut actions: Vec<MenuAction> = names
        .iter()
        .map(|name| MenuAction::Switch {
            name: name.clone(),
            current: Some(name.as_str()) == current,
        })
        .collect();
    actions.extend([
        MenuAction::Current,
        MenuAction::New,
        MenuAction::Remove,
        MenuAction::Copy,
        MenuAction::Rename,
        MenuAction::Location,
        MenuAction::MoveStore,
        MenuAction::ExportStore,
        MenuAction::SetMinecraftDir,
        MenuAction::Save,
        MenuAction::SaveAndExit,
    ]);
    actions
}

/// Run the menu-driven session.
///
/// The record is only written on "save" or "save and exit"; leaving with
/// Esc or Ctrl+C discards record changes, while filesystem effects stay.
pub fn interactive(defaults: &Defaults, config_path: &Path, ui: &Ui) -> Result<()> {
    let mut config = match Config::load(config_path) {
        Ok(Some(config)) => config,
        Ok(None) => {
            let config = Config::defaults(defaults);
            config.save(config_path)?;
            ui.info(format!(
                "Created configuration file at {}",
                config_path.display()
            ));
            config
        }
        Err(e @ Error::Parse { .. }) => {
            ui.err(e.to_string());
            let regenerate = matches!(
                Confirm::new("Throw the file away and start over with defaults?")
                    .with_default(false)
                    .prompt(),
                Ok(true)
            );
            if !regenerate {
                return Err(e.into());
            }
            let config = Config::defaults(defaults);
            config.save(config_path)?;
            ui.ok("Configuration file regenerated.");
            config
        }
        Err(e) => return Err(e.into()),
    };

    ui.println(ui.dim("Press Esc or Ctrl+C to leave at any time without saving."));

    let mut dirty = false;
    loop {
        ui.newline();

        // Re-read the store every round: profiles can change out-of-band
        // between commands, and the menu must reflect what is really there.
        let names = match config.profiles_root() {
            Ok(root) => {
                fs::create_dir_all(root).with_context(|| {
                    format!("Failed to create profiles root {}", root.display())
                })?;
                profiles::list(root)?
            }
            Err(_) => Vec::new(),
        };

        if !config.is_configured() || names.is_empty() {
            match offer_setup(defaults, config_path, &mut config, ui)? {
                SetupOutcome::Done => continue,
                SetupOutcome::Declined => return Ok(()),
            }
        }

        let actions = menu_actions(&names, config.current_profile.as_deref());
        let choice = match Select::new("What do you want to do?", actions).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return leave(ui, dirty);
            }
            Err(e) => return Err(e.into()),
        };

        let outcome = match choice {
            MenuAction::Switch { name, .. } => {
                let result = use_profile(&mut config, &name, ui);
                if result.is_ok() {
                    dirty = true;
                }
                result
            }
            MenuAction::Current => current(&config, ui),
            MenuAction::New => prompt_new(&config, ui),
            MenuAction::Remove => prompt_remove(&config, &names, ui),
            MenuAction::Copy => prompt_copy(&config, &names, ui),
            MenuAction::Rename => prompt_rename(&config, &names, ui),
            MenuAction::Location => location(&config, ui),
            MenuAction::MoveStore => {
                let result = prompt_relocate(&mut config, ui);
                if result.is_ok() {
                    dirty = true;
                }
                result
            }
            MenuAction::ExportStore => prompt_export(&config, ui),
            MenuAction::SetMinecraftDir => {
                let result = prompt_set_minecraft(&mut config, defaults, ui);
                if result.is_ok() {
                    dirty = true;
                }
                result
            }
            MenuAction::Save => {
                let result = save(&config, config_path, ui);
                if result.is_ok() {
                    dirty = false;
                }
                result
            }
            MenuAction::SaveAndExit => {
                save(&config, config_path, ui)?;
                return Ok(());
            }
        };

        if let Err(e) = outcome {
            if is_interrupted(&e) {
                return leave(ui, dirty);
            }
            report_error(&e, ui);
        }
    }
}

enum SetupOutcome {
    Done,
    Declined,
}

/// Before setup has produced a usable store the menu would be all dead
/// ends, so offer setup instead.
fn offer_setup(
    defaults: &Defaults,
    config_path: &Path,
    config: &mut Config,
    ui: &Ui,
) -> Result<SetupOutcome> {
    ui.warn("mcprof is not set up yet (no usable profiles found).");
    let go = match Confirm::new("Run first-time setup now?")
        .with_default(true)
        .prompt()
    {
        Ok(go) => go,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            return Ok(SetupOutcome::Declined);
        }
        Err(e) => return Err(e.into()),
    };
    if !go {
        return Ok(SetupOutcome::Declined);
    }

    match setup(defaults, None, None, ui) {
        Ok(new_config) => {
            *config = new_config;
            save(config, config_path, ui)?;
            Ok(SetupOutcome::Done)
        }
        Err(e) if is_interrupted(&e) => Ok(SetupOutcome::Declined),
        Err(e) => {
            report_error(&e, ui);
            Ok(SetupOutcome::Done)
        }
    }
}

fn prompt_new(config: &Config, ui: &Ui) -> Result<()> {
    let Some(name) = ask_text("What is the name of the new profile?", ui)? else {
        return Ok(());
    };
    new(config, &name, ui)
}

fn prompt_remove(config: &Config, names: &[String], ui: &Ui) -> Result<()> {
    let Some(name) = ask_profile("Which profile do you want to remove?", names)? else {
        return Ok(());
    };
    remove(config, &name, false, ui)
}

fn prompt_copy(config: &Config, names: &[String], ui: &Ui) -> Result<()> {
    let Some(src) = ask_profile("Which profile do you want to copy?", names)? else {
        return Ok(());
    };
    let Some(dest) = ask_text("What should the copy be called?", ui)? else {
        return Ok(());
    };
    copy(config, &src, &dest, ui)
}

fn prompt_rename(config: &Config, names: &[String], ui: &Ui) -> Result<()> {
    let Some(src) = ask_profile("Which profile do you want to rename?", names)? else {
        return Ok(());
    };
    let Some(dest) = ask_text("What should it be called?", ui)? else {
        return Ok(());
    };
    rename(config, &src, &dest, ui)
}

fn prompt_relocate(config: &mut Config, ui: &Ui) -> Result<()> {
    let Some(dest) = ask_text("Where do you want to move your profiles to?", ui)? else {
        return Ok(());
    };
    relocate(config, Path::new(&dest), ui)
}

fn prompt_export(config: &Config, ui: &Ui) -> Result<()> {
    let Some(dest) = ask_text("Where do you want to copy your profiles to?", ui)? else {
        return Ok(());
    };
    export(config, Path::new(&dest), ui)
}

fn prompt_set_minecraft(config: &mut Config, defaults: &Defaults, ui: &Ui) -> Result<()> {
    let answer = match Text::new("Where is Minecraft installed?")
        .with_default(&defaults.minecraft_dir.to_string_lossy())
        .prompt()
    {
        Ok(answer) => answer,
        Err(InquireError::OperationCanceled) => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    set_minecraft_dir(config, Path::new(answer.trim()), ui)
}

/// Text prompt that treats Esc as "go back" and re-asks on empty input.
fn ask_text(message: &str, ui: &Ui) -> Result<Option<String>> {
    loop {
        match Text::new(message).prompt() {
            Ok(answer) => {
                let answer = answer.trim().to_string();
                if answer.is_empty() {
                    ui.warn("No input given.");
                    continue;
                }
                return Ok(Some(answer));
            }
            Err(InquireError::OperationCanceled) => return Ok(None),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Profile picker that treats Esc as "go back".
fn ask_profile(message: &str, names: &[String]) -> Result<Option<String>> {
    match Select::new(message, names.to_vec()).prompt() {
        Ok(name) => Ok(Some(name)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn save(config: &Config, path: &Path, ui: &Ui) -> Result<()> {
    config.save(path)?;
    ui.ok(format!("Saved configuration to {}", path.display()));
    Ok(())
}

fn leave(ui: &Ui, dirty: bool) -> Result<()> {
    if dirty {
        ui.warn("Left without saving; configuration changes were discarded.");
    }
    Ok(())
}

fn is_interrupted(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<InquireError>(),
        Some(InquireError::OperationInterrupted)
    )
}

/// Recoverable mistakes get a warning and the menu comes back; anything
/// else is printed with its full cause chain.
fn report_error(e: &anyhow::Error, ui: &Ui) {
    match e.downcast_ref::<Error>() {
        Some(core) if core.user_recoverable() => ui.warn(e.to_string()),
        _ => ui.err(format!("{e:#}")),
    }
}

/// Modification time of a profile directory, for display only.
fn modified_display(dir: &Path) -> String {
    match fs::metadata(dir).and_then(|m| m.modified()) {
        Ok(mtime) => {
            let local: DateTime<Local> = mtime.into();
            local.format("%Y-%m-%d %H:%M").to_string()
        }
        Err(_) => "-".to_string(),
    }
}

/// Format a byte count in human-readable form.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
