//! Persisted color-scheme selection and the header dropdown that picks it.

use core::fmt;

use tracing::debug;

use crate::config::ColorSchemeConfig;
use crate::prefs::{PreferenceStore, PreferenceValue, Preferences};

/// Attribute set on the root and body elements for non-default schemes.
pub const SCHEME_ATTRIBUTE: &str = "data-color-scheme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorScheme {
    #[default]
    Default,
    Misty,
    Moss,
    Warm,
    Dusty,
    Slate,
    Desert,
    Ocean,
    Olive,
    Charcoal,
}

impl ColorScheme {
    pub const ALL: [Self; 10] = [
        Self::Default,
        Self::Misty,
        Self::Moss,
        Self::Warm,
        Self::Dusty,
        Self::Slate,
        Self::Desert,
        Self::Ocean,
        Self::Olive,
        Self::Charcoal,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Misty => "misty",
            Self::Moss => "moss",
            Self::Warm => "warm",
            Self::Dusty => "dusty",
            Self::Slate => "slate",
            Self::Desert => "desert",
            Self::Ocean => "ocean",
            Self::Olive => "olive",
            Self::Charcoal => "charcoal",
        }
    }

    /// Swatch color shown in the picker grid.
    #[must_use]
    pub const fn swatch(self) -> &'static str {
        match self {
            Self::Default => "#5b7c99",
            Self::Misty => "#6b8cae",
            Self::Moss => "#6b8e6f",
            Self::Warm => "#8d7b68",
            Self::Dusty => "#8b7e8f",
            Self::Slate => "#5f8a8b",
            Self::Desert => "#9b8b7e",
            Self::Ocean => "#4a6fa5",
            Self::Olive => "#758467",
            Self::Charcoal => "#6d7278",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scheme| scheme.id() == id)
    }

    /// Value for [`SCHEME_ATTRIBUTE`], `None` meaning "remove the attribute".
    #[must_use]
    pub const fn attribute_value(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            other => Some(other.id()),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl PreferenceValue for ColorScheme {
    fn decode(raw: &str) -> Option<Self> {
        Self::from_id(raw)
    }

    fn encode(&self) -> String {
        self.id().to_owned()
    }
}

/// A scheme the host should apply to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeApplication {
    pub scheme: ColorScheme,
}

impl SchemeApplication {
    #[must_use]
    pub const fn attribute_value(self) -> Option<&'static str> {
        self.scheme.attribute_value()
    }
}

/// Dropdown picker state plus the current selection.
#[derive(Debug, Clone)]
pub struct ColorSchemePicker {
    current: ColorScheme,
    dropdown_open: bool,
    storage_key: String,
}

impl ColorSchemePicker {
    /// Load the stored scheme (falling back to default), persist it back, and
    /// return the application the host should perform at startup.
    pub fn restore<S: PreferenceStore>(
        config: &ColorSchemeConfig,
        prefs: &mut Preferences<S>,
    ) -> (Self, SchemeApplication) {
        let current = prefs.get(&config.storage_key, ColorScheme::Default);
        prefs.set(&config.storage_key, &current);
        debug!(scheme = %current, "color scheme restored");
        let picker = Self {
            current,
            dropdown_open: false,
            storage_key: config.storage_key.clone(),
        };
        (picker, SchemeApplication { scheme: current })
    }

    #[must_use]
    pub const fn current(&self) -> ColorScheme {
        self.current
    }

    #[must_use]
    pub const fn dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    /// Toggle button click. Returns the new dropdown state.
    pub fn toggle_dropdown(&mut self) -> bool {
        self.dropdown_open = !self.dropdown_open;
        self.dropdown_open
    }

    /// Document click outside the picker. Returns whether the dropdown closed.
    pub fn outside_click(&mut self) -> bool {
        core::mem::replace(&mut self.dropdown_open, false)
    }

    /// Swatch click. Unknown ids select the default scheme.
    pub fn select<S: PreferenceStore>(
        &mut self,
        id: &str,
        prefs: &mut Preferences<S>,
    ) -> SchemeApplication {
        let scheme = ColorScheme::from_id(id).unwrap_or_else(|| {
            debug!(id, "unknown color scheme id; using default");
            ColorScheme::Default
        });
        self.current = scheme;
        self.dropdown_open = false;
        prefs.set(&self.storage_key, &scheme);
        SchemeApplication { scheme }
    }

    /// Every scheme with whether its swatch carries the active marker.
    pub fn swatches(&self) -> impl Iterator<Item = (ColorScheme, bool)> + '_ {
        ColorScheme::ALL
            .into_iter()
            .map(move |scheme| (scheme, scheme == self.current))
    }
}
