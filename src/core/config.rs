use crate::core::format::currency_symbol;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Name of the institution entry that switches the form to a free-form name.
pub const OTHER_INSTITUTION: &str = "Other";

const DEFAULT_INSTITUTIONS: &[&str] = &[
    "BDO Unibank",
    "Bank of the Philippine Islands (BPI)",
    "Metrobank",
    "GCash",
    "Maya",
    "CASH",
    "CIMB",
    "Maribank",
    "UNO",
    "GoTyme",
    "Land Bank of the Philippines",
    "Security Bank",
    "Rizal Commercial Banking Corporation (RCBC)",
    "Philippine National Bank (PNB)",
    "China Bank",
    "UnionBank of the Philippines",
    "EastWest Bank",
    "CREDIT CARD",
    OTHER_INSTITUTION,
];

const DEFAULT_PALETTE: &[&str] = &[
    "#007AFF", "#5856D6", "#34C759", "#FF9500", "#FF3B30", "#00C7BE", "#3A3A3C", "#E91E63",
    "#9C27B0", "#4CAF50", "#FFEB3B", "#FF5722",
];

/// Ordered, never-empty list of colors assigned to chart slices and cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Palette(Vec<String>);

impl Palette {
    /// Builds a palette, falling back to the default colors when `colors` is empty.
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            debug!("Empty palette configured, using default colors");
            return Self::default();
        }
        Self(colors)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Color for a position, wrapping around once the palette is exhausted.
    pub fn color(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect())
    }
}

impl From<Vec<String>> for Palette {
    fn from(colors: Vec<String>) -> Self {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        palette.0
    }
}

fn default_institutions() -> Vec<String> {
    DEFAULT_INSTITUTIONS.iter().map(|s| s.to_string()).collect()
}

fn default_currency() -> String {
    "PHP".to_string()
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// A single JSON file in the data directory.
    #[default]
    File,
    /// A fjall keyspace in the data directory.
    Fjall,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default = "default_institutions")]
    pub institutions: Vec<String>,
    #[serde(default)]
    pub storage: StorageKind,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            palette: Palette::default(),
            institutions: default_institutions(),
            storage: StorageKind::default(),
            data_path: None,
        }
    }
}

impl AppConfig {
    /// Symbol printed before amounts, derived from `currency`.
    pub fn currency_symbol(&self) -> String {
        currency_symbol(&self.currency)
    }

    /// Loads the config from the default location, or defaults when none exists.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("ph", "ipon", "ipon")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("ph", "ipon", "ipon")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let mut config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        if config.institutions.is_empty() {
            config.institutions = default_institutions();
        }
        if !config
            .institutions
            .iter()
            .any(|name| name == OTHER_INSTITUTION)
        {
            config.institutions.push(OTHER_INSTITUTION.to_string());
        }
        debug!("Successfully loaded config");
        Ok(config)
    }
}
