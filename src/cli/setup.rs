use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;

const HEADER: &str = "# Configuration file for ipon\n\
# currency: code for amounts shown (PHP, USD, EUR, GBP, JPY; others print the code)\n\
# palette: colors for chart slices and account cards, reused in order\n\
# institutions: names offered when adding an account; \"Other\" allows a custom name\n\
# storage: file | fjall\n";

/// Creates a default configuration file at the default location
pub fn setup() -> Result<()> {
    let path = AppConfig::default_config_path()?;
    setup_at_path(path)
}

/// Creates a default configuration file at the specified path
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let body = serde_yaml::to_string(&AppConfig::default())
        .context("Failed to render default configuration")?;
    std::fs::write(path, format!("{HEADER}{body}"))
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
