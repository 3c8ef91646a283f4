//! Loading of `config.toml`.
//!
//! ```toml
//! [sheet]
//! cycle_policy = "detect"
//! keep_format_on_clear = false
//! invalid_formula_text = "#INVALID FORMULA"
//! cyclic_text = "#ERROR CYCLIC"
//! ```

use directories::ProjectDirs;
use serde::Deserialize;
use sheetcalc_core::SheetConfig;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    sheet: Option<SheetConfig>,
}

/// Read the sheet settings from `config_file`, or from the user config
/// directory when none is given.
///
/// Never fails: problems are returned as warnings and the defaults are used.
pub fn load_config(config_file: Option<&Path>) -> (SheetConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let Some(path) = config_file.map(Path::to_path_buf).or_else(user_config_path) else {
        return (SheetConfig::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (SheetConfig::default(), warnings);
    }

    let file = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<ConfigFile>(&content) {
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

    let config = file.and_then(|f| f.sheet).unwrap_or_default();
    (config, warnings)
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "sheetcalc")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
