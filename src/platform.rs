// tabshell platform paths
//
// Linux:   $XDG_CONFIG_HOME/tabshell, $XDG_DATA_HOME/tabshell
// macOS:   ~/Library/Application Support/tabshell
// Windows: %APPDATA%\tabshell

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "tabshell";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the platform-specific configuration directory.
pub fn get_config_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        return windows_app_data();
    }
    if cfg!(target_os = "macos") {
        return mac_app_support();
    }
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg).join(APP_DIR),
        Err(_) => home_dir().join(".config").join(APP_DIR),
    }
}

/// Returns the platform-specific data directory.
pub fn get_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        return windows_app_data();
    }
    if cfg!(target_os = "macos") {
        return mac_app_support();
    }
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) => PathBuf::from(xdg).join(APP_DIR),
        Err(_) => home_dir().join(".local").join("share").join(APP_DIR),
    }
}

fn mac_app_support() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join(APP_DIR)
}

fn windows_app_data() -> PathBuf {
    let base = env::var("APPDATA").map(PathBuf::from).unwrap_or_else(|_| home_dir());
    base.join(APP_DIR)
}
