use crate::error::{RewardError, Result};
use crate::types::tuning::{Tuning, TuningPreset};
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_TUNING_FILE: &str = "reward.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".reward/local.toml";
pub const DEFAULT_GLOBAL_TUNING_FILE: &str = ".config/racer-reward/tuning.toml";

/// Key naming the preset a tuning file overlays.
pub const BASE_KEY: &str = "base";

/// Loads one tuning file on top of the preset it names (`lookahead-v3` when
/// it names none).
pub fn load_tuning(path: &Path) -> Result<Tuning> {
    if !path.exists() {
        return Err(RewardError::PathNotFound(path.display().to_string()));
    }
    let value = read_toml_value(path)?;
    resolve(value)
}

/// Looks up `reward.toml` under `root`, layering the global file beneath it
/// and `.reward/local.toml` above it.
pub fn load_tuning_layers(root: &Path) -> Result<Option<Tuning>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_TUNING_FILE));
    load_tuning_with_global(root, global.as_deref())
}

pub(crate) fn load_tuning_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<Tuning>> {
    let repo_path = root.join(DEFAULT_TUNING_FILE);
    if !repo_path.exists() {
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &repo_path)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    resolve(merged).map(Some)
}

pub fn parse_tuning(content: &str) -> Result<Tuning> {
    let value: Value =
        toml::from_str(content).map_err(|e| RewardError::ConfigParse(e.to_string()))?;
    resolve(value)
}

fn resolve(mut overlay: Value) -> Result<Tuning> {
    let preset = match overlay.as_table_mut().and_then(|table| table.remove(BASE_KEY)) {
        Some(Value::String(name)) => name.parse::<TuningPreset>()?,
        Some(other) => {
            return Err(RewardError::ConfigParse(format!(
                "{BASE_KEY} must be a preset name (found {other})"
            )))
        }
        None => TuningPreset::LookaheadV3,
    };

    let mut merged = Value::try_from(preset.tuning())?;
    merge_toml(&mut merged, overlay);

    let tuning: Tuning = merged
        .try_into()
        .map_err(|e: toml::de::Error| RewardError::ConfigParse(e.to_string()))?;
    tuning.validate()?;
    Ok(tuning)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| RewardError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
