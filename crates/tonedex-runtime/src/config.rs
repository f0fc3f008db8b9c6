use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_page_size() -> u32 {
    20
}

fn default_page_range() -> u32 {
    3
}

fn default_margin_pages() -> u32 {
    1
}

/// Listing configuration, validated once at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Models per page. The data layer computes `total` against this.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Pages kept visible around the current index in the control row.
    #[serde(default = "default_page_range")]
    pub page_range: u32,

    /// Pages kept visible at each end of the control row.
    #[serde(default = "default_margin_pages")]
    pub margin_pages: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_range: default_page_range(),
            margin_pages: default_margin_pages(),
        }
    }
}

impl ListingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        if self.page_range == 0 {
            return Err(Error::Config("page_range must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: ListingConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
