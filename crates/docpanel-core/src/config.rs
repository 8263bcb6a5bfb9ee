//! Theme configuration.
//!
//! Every field has a default matching the stock theme markup, so an empty JSON
//! object (or no config at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resize::WidthBounds;

pub const DEFAULT_MIN_WIDTH_PX: u32 = 180;
pub const DEFAULT_MAX_WIDTH_PX: u32 = 400;
/// 56rem at a 16px root font size.
pub const DEFAULT_RESIZE_BREAKPOINT_PX: u32 = 896;
pub const DEFAULT_RESIZE_PANEL_SELECTOR: &str = ".book-menu";
pub const DEFAULT_WIDTH_STORAGE_KEY: &str = "menu-width";
pub const DEFAULT_SCHEME_STORAGE_KEY: &str = "color-scheme";
pub const DEFAULT_SETTLE_DELAY_MS: u32 = 100;
pub const CLOSE_GLYPH: &str = "\u{2716}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse theme config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("theme config validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Panel whose width the handle controls.
    pub panel_selector: String,
    pub min_width_px: u32,
    pub max_width_px: u32,
    /// Drag-resize only initializes when the viewport is wider than this.
    pub breakpoint_px: u32,
    pub storage_key: String,
    /// Delay before the handle is re-anchored once initial layout settles.
    pub settle_delay_ms: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            panel_selector: DEFAULT_RESIZE_PANEL_SELECTOR.to_owned(),
            min_width_px: DEFAULT_MIN_WIDTH_PX,
            max_width_px: DEFAULT_MAX_WIDTH_PX,
            breakpoint_px: DEFAULT_RESIZE_BREAKPOINT_PX,
            storage_key: DEFAULT_WIDTH_STORAGE_KEY.to_owned(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl ResizeConfig {
    #[must_use]
    pub const fn bounds(&self) -> WidthBounds {
        WidthBounds::new_unchecked(self.min_width_px, self.max_width_px)
    }

    /// Whether drag-resize should initialize for a viewport of `viewport_width` px.
    #[must_use]
    pub const fn enabled_for_viewport(&self, viewport_width: u32) -> bool {
        viewport_width > self.breakpoint_px
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSchemeConfig {
    pub storage_key: String,
}

impl Default for ColorSchemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_SCHEME_STORAGE_KEY.to_owned(),
        }
    }
}

/// One coordinated panel and its trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub name: String,
    pub panel_selector: String,
    pub trigger_selector: String,
    pub idle_glyph: String,
    #[serde(default = "default_close_glyph")]
    pub close_glyph: String,
    /// Create a floating trigger when the page does not provide one.
    #[serde(default)]
    pub create_trigger: bool,
}

fn default_close_glyph() -> String {
    CLOSE_GLYPH.to_owned()
}

impl PanelConfig {
    #[must_use]
    pub fn menu() -> Self {
        Self {
            name: "menu".to_owned(),
            panel_selector: DEFAULT_RESIZE_PANEL_SELECTOR.to_owned(),
            trigger_selector: ".menu-toggle-btn".to_owned(),
            idle_glyph: "\u{2630}".to_owned(),
            close_glyph: default_close_glyph(),
            create_trigger: false,
        }
    }

    #[must_use]
    pub fn toc() -> Self {
        Self {
            name: "toc".to_owned(),
            panel_selector: ".book-toc".to_owned(),
            trigger_selector: ".toc-toggle-btn".to_owned(),
            idle_glyph: "\u{1F4D1}".to_owned(),
            close_glyph: default_close_glyph(),
            create_trigger: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub resize: ResizeConfig,
    pub color_scheme: ColorSchemeConfig,
    pub panels: Vec<PanelConfig>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            resize: ResizeConfig::default(),
            color_scheme: ColorSchemeConfig::default(),
            panels: vec![PanelConfig::menu(), PanelConfig::toc()],
        }
    }
}

impl ThemeConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let resize = &self.resize;
        if resize.min_width_px == 0 {
            return Err(ConfigError::Validation(
                "resize.min_width_px must be positive".into(),
            ));
        }
        if resize.min_width_px > resize.max_width_px {
            return Err(ConfigError::Validation(format!(
                "resize.min_width_px ({}) exceeds resize.max_width_px ({})",
                resize.min_width_px, resize.max_width_px
            )));
        }
        if resize.storage_key.is_empty() || self.color_scheme.storage_key.is_empty() {
            return Err(ConfigError::Validation("storage keys must not be empty".into()));
        }
        for (idx, panel) in self.panels.iter().enumerate() {
            if panel.name.is_empty() {
                return Err(ConfigError::Validation(format!("panels[{idx}] has no name")));
            }
            if panel.idle_glyph.is_empty() || panel.close_glyph.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "panel {:?} needs both trigger glyphs",
                    panel.name
                )));
            }
            if self.panels[..idx].iter().any(|other| other.name == panel.name) {
                return Err(ConfigError::Validation(format!(
                    "duplicate panel name {:?}",
                    panel.name
                )));
            }
        }
        Ok(())
    }
}
