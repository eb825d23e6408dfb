use std::path::PathBuf;

const CONFIG_FILE: &str = ".redesc.toml";

/// Load config file content from CWD first, then the config directory
///
/// Searches for:
/// 1. `.redesc.toml` in the current working directory
/// 2. `config.toml` in the platform config directory (`~/.config/redesc/` on Linux)
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
        log::debug!("Loaded config from {}", CONFIG_FILE);
        return Some(content);
    }

    if let Some(global_config) = global_config_path() {
        if let Ok(content) = std::fs::read_to_string(&global_config) {
            log::debug!("Loaded config from {}", global_config.display());
            return Some(content);
        }
    }

    None
}

fn global_config_path() -> Option<PathBuf> {
    crate::paths::app_config_path().ok()
}
