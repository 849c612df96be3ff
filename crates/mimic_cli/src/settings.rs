//! Provider configuration loading

use std::path::Path;

use anyhow::{Context, Result};
use mimic_tts::ProviderConfig;
use tracing::debug;

/// Load the provider configuration
///
/// Without a path the built-in defaults are used. A file may set any subset
/// of keys; the rest keep their defaults.
pub fn load(path: Option<&Path>) -> Result<ProviderConfig> {
    let Some(path) = path else {
        debug!("No configuration file given, using defaults");
        return Ok(ProviderConfig::default());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

    let config: ProviderConfig = toml::from_str(&raw)
        .with_context(|| format!("Invalid configuration file {}", path.display()))?;

    debug!(path = %path.display(), effects = config.effects.len(), "Loaded configuration");

    Ok(config)
}
