// ABOUTME: Settings command - reads and changes the persisted settings file
// ABOUTME: Values are validated against the typed settings before they are written
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use anyhow::bail;
use dreamband::config::EngineConfig;
use dreamband::settings::{FileStore, SettingUpdate, SettingsManager};
use tracing::info;

use crate::helpers::display::{display_settings, print_json};

fn open(config: &EngineConfig) -> SettingsManager<FileStore> {
    SettingsManager::load(FileStore::new(&config.settings_path))
}

/// Print every setting, or the value of `key`
pub fn get(config: &EngineConfig, key: Option<&str>, json: bool) -> anyhow::Result<()> {
    let manager = open(config);
    let Some(key) = key else {
        return if json {
            print_json(manager.settings())
        } else {
            display_settings(manager.settings())
        };
    };

    let value = serde_json::to_value(manager.settings())?;
    match value.get(key) {
        Some(field) => println!("{field}"),
        None => bail!(
            "unknown setting '{key}', expected one of: {}",
            SettingUpdate::KEYS.join(", ")
        ),
    }
    Ok(())
}

/// Change one setting and persist it
pub fn set(config: &EngineConfig, key: &str, value: &str) -> anyhow::Result<()> {
    let update = SettingUpdate::parse(key, value)?;
    let mut manager = open(config);
    manager.update(update)?;
    info!(key, value, path = %config.settings_path.display(), "Setting updated");
    println!("Success {key} = {value}");
    Ok(())
}

/// Restore default settings
pub fn reset(config: &EngineConfig) -> anyhow::Result<()> {
    let mut manager = open(config);
    manager.reset()?;
    println!("Success settings restored to defaults");
    Ok(())
}
