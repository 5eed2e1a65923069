//! Configuration file loading and environment variable handling.
//!
//! Precedence: CLI args > Environment vars > Config file > Defaults

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use subnetcalc_core::FamilyHint;

/// Default config file content for `--config-init`.
pub const DEFAULT_CONFIG: &str = r#"# subnetcalc configuration
# See: subnetcalc --help for all options

# Address family: "auto", "v4" or "v6"
family = "auto"

# Print results as JSON
json = false

# Single-line JSON (only with json = true)
compact = false

# Disable colored output
no_color = false
"#;

/// Configuration loaded from file and environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub family: Option<FamilyHint>,
    pub json: Option<bool>,
    pub compact: Option<bool>,
    pub no_color: Option<bool>,
}

impl Config {
    /// Get the config file path.
    ///
    /// - Linux: `~/.config/subnetcalc/config.toml`
    /// - macOS: `~/Library/Application Support/subnetcalc/config.toml`
    /// - Windows: `%APPDATA%\subnetcalc\config.toml`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("subnetcalc").join("config.toml"))
    }

    /// Load config from the standard location. Returns default if missing.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from a specific file. Returns default if it doesn't exist.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };

        toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Read value from environment variable.
    fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
        std::env::var(name).ok()?.parse().ok()
    }

    /// Get family hint with precedence: env > config > default.
    pub fn family(&self) -> FamilyHint {
        Self::env_var("SUBNETCALC_FAMILY")
            .or(self.family)
            .unwrap_or_default()
    }

    /// Get json with precedence: env > config > default.
    pub fn json(&self) -> bool {
        Self::env_var("SUBNETCALC_JSON")
            .or(self.json)
            .unwrap_or(false)
    }

    pub fn compact(&self) -> bool {
        self.compact.unwrap_or(false)
    }

    /// Get no_color with precedence: env > config > default.
    ///
    /// Respects the `NO_COLOR` standard (https://no-color.org/).
    pub fn no_color(&self) -> bool {
        // NO_COLOR is a standard - presence means disable color
        if std::env::var("NO_COLOR").is_ok() {
            return true;
        }
        if std::env::var("SUBNETCALC_NO_COLOR").is_ok() {
            return true;
        }
        self.no_color.unwrap_or(false)
    }
}

/// Create a default config file at the standard location.
pub fn init_config() -> Result<PathBuf, String> {
    let path = Config::path().ok_or("Cannot determine config directory")?;
    init_config_at(&path)?;
    Ok(path)
}

/// Write the default config to `path`, refusing to overwrite.
pub fn init_config_at(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("Config file already exists: {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {}", e))?;
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|e| format!("Failed to write config: {}", e))
}
