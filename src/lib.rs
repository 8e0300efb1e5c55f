pub mod commands;
pub mod config;
pub mod error;
pub mod fs_utils;
pub mod items;
pub mod manager;
pub mod materialize;
pub mod paths;
pub mod profiles;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
