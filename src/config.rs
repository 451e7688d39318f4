// src/config.rs

//! Configuration loading utilities.
//!
//! This module provides convenience functions for loading configuration
//! and the site catalogue from a data directory.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{Catalog, Config};

pub const CONFIG_FILE: &str = "config.toml";
pub const CATALOG_FILE: &str = "catalog.toml";

/// Load `config.toml`, apply environment overrides and validate.
///
/// A missing or unreadable file falls back to defaults; an invalid
/// result after overrides is an error.
pub fn load_config(data_dir: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(data_dir.join(CONFIG_FILE));
    config.apply_env();
    config.validate()?;
    Ok(config)
}

/// Load `catalog.toml` if present, else the built-in catalogue.
pub fn load_catalog(data_dir: &Path) -> Result<Catalog> {
    let catalog = Catalog::load_or_default(data_dir.join(CATALOG_FILE));
    catalog
        .validate()
        .map_err(|e| AppError::config(format!("Invalid catalog: {e}")))?;
    Ok(catalog)
}

/// Load and validate both config and catalogue.
pub fn load_all(data_dir: &Path) -> Result<(Config, Catalog)> {
    let config = load_config(data_dir)?;
    let catalog = load_catalog(data_dir)?;
    log::debug!(
        "Loaded catalog: {} services, {} testimonials, {} keywords",
        catalog.services.len(),
        catalog.testimonials.len(),
        catalog.keywords.len()
    );
    Ok((config, catalog))
}
