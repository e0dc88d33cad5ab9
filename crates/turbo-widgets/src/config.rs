//! Storefront widget configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::carousel::CarouselConfig;
use crate::cart::CartConfig;
use crate::error::WidgetError;
use crate::header::HeaderConfig;
use crate::menu::{CategoryEntry, CategoryMenu, SidebarConfig};
use crate::notify::NotificationConfig;
use crate::search::SearchConfig;

/// Every widget tunable, keyed the way the storefront templates refer to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Carousel instances by name (`category_strip`, `mobile_categories`, ...).
    pub carousels: BTreeMap<String, CarouselConfig>,
    pub search: SearchConfig,
    pub cart: CartConfig,
    pub sidebar: SidebarConfig,
    pub header: HeaderConfig,
    pub notifications: NotificationConfig,
    /// Category tree for the menu, when it is not rendered server-side.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategoryEntry>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        let carousels = [
            ("category_strip", CarouselConfig::category_strip()),
            ("mobile_categories", CarouselConfig::mobile_categories()),
            ("desktop_categories", CarouselConfig::desktop_categories()),
            ("highlight_rotation", CarouselConfig::highlight_rotation()),
        ]
        .into_iter()
        .map(|(name, cfg)| (name.to_string(), cfg))
        .collect();

        Self {
            carousels,
            search: SearchConfig::default(),
            cart: CartConfig::default(),
            sidebar: SidebarConfig::default(),
            header: HeaderConfig::default(),
            notifications: NotificationConfig::default(),
            categories: Vec::new(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file: JSON for `.json`, TOML otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WidgetError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| WidgetError::ConfigRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        config.validate()?;
        tracing::info!(path = %path.display(), carousels = config.carousels.len(), "storefront config loaded");
        Ok(config)
    }

    /// Parse and validate embedded TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, WidgetError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize in the format implied by the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WidgetError> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self).map_err(|e| WidgetError::Config(e.to_string()))?
        };
        std::fs::write(path, content).map_err(|e| WidgetError::ConfigRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn carousel(&self, name: &str) -> Option<&CarouselConfig> {
        self.carousels.get(name)
    }

    pub fn validate(&self) -> Result<(), WidgetError> {
        for (name, carousel) in &self.carousels {
            carousel.validate().map_err(|e| {
                tracing::warn!(carousel = %name, error = %e, "rejected carousel config");
                WidgetError::Config(format!("carousel `{}`: {}", name, e))
            })?;
        }
        if self.search.debounce_ms == 0 {
            tracing::warn!("rejected search config");
            return Err(WidgetError::Config(
                "search.debounce_ms must be positive".to_string(),
            ));
        }
        if !self.categories.is_empty() {
            CategoryMenu::new(self.categories.clone())?;
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}
