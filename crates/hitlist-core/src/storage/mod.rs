mod config;
pub mod database;

pub use config::{CelebrationsConfig, Config, HabitsConfig};
pub use database::HabitStore;

use std::path::PathBuf;

use crate::error::Result;

/// Returns the data directory, creating it if needed.
///
/// `HITLIST_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/hitlist[-dev]/`, with `HITLIST_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("HITLIST_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("HITLIST_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("hitlist-dev")
            } else {
                base_dir.join("hitlist")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
