//! User settings: which columns formulas use and where sheets go.

use caspr_core::Format;
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_SETTINGS_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Column the user types variable values into.
    pub variable_column: String,
    /// First column of the formula cells on a description row.
    pub formula_column: String,
    pub format: Format,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            variable_column: "C".to_string(),
            formula_column: "B".to_string(),
            format: Format::Grd,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Load settings from `config_file`, or from the user's config directory.
///
/// Never fails: problems are returned as warnings and defaults are used.
pub fn load_settings(config_file: Option<&Path>) -> (Settings, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let config_path = config_file.map(Path::to_path_buf).or_else(user_settings_path);

    let Some(path) = config_path else {
        return (Settings::default(), warnings);
    };
    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Settings file not found: {}", path.display()));
        }
        return (Settings::default(), warnings);
    }

    let settings = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_SETTINGS_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_SETTINGS_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<Settings>(&content) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    };

    (settings.unwrap_or_default(), warnings)
}

fn user_settings_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "caspr")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("settings.toml");
    Some(path)
}
