// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Composition serialization and deserialization.
//!
//! This module handles saving and restoring the overlay placement and
//! caption in YAML and JSON formats.

use crate::models::scene::SceneData;
use anyhow::Result;
use std::path::Path;

/// Export a composition to YAML format.
pub fn export_yaml(data: &SceneData, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a composition to JSON format.
pub fn export_json(data: &SceneData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import a composition from YAML format.
pub fn import_yaml(path: &Path) -> Result<SceneData> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import a composition from JSON format.
pub fn import_json(path: &Path) -> Result<SceneData> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}
