#![forbid(unsafe_code)]

//! `docpanel-core` holds the host-independent logic behind the docpanel theme's
//! auxiliary panels.
//!
//! Design goals:
//! - **Host-driven input**: the embedding environment (a browser front end or a
//!   test) pushes pointer, click, and key signals into explicit state machines.
//! - **State first, DOM second**: every machine owns its state in memory and
//!   returns a projection describing what the page should look like. Markers in
//!   the page are never read back to infer state.
//! - **Graceful degradation**: nothing here is fatal. Missing or corrupt
//!   preferences fall back to defaults and out-of-range widths are clamped.
//!
//! Components, leaf first:
//! - [`prefs`]: typed get/set over a string key/value store.
//! - [`resize`]: drag-to-resize for a fixed panel with clamped, persisted width.
//! - [`coordinator`]: N toggled panels sharing one backdrop.
//! - [`overlay`]: single dismissable modal with scroll lock.
//! - [`color_scheme`]: persisted scheme selection and its dropdown picker.

pub mod color_scheme;
pub mod config;
pub mod coordinator;
pub mod overlay;
pub mod prefs;
pub mod resize;

pub use color_scheme::{ColorScheme, ColorSchemePicker, SCHEME_ATTRIBUTE, SchemeApplication};
pub use config::{ColorSchemeConfig, ConfigError, PanelConfig, ResizeConfig, ThemeConfig};
pub use coordinator::{
    BackdropProjection, ClickTarget, CoordinatorError, CoordinatorUpdate, PanelCoordinator,
    PanelId, PanelProjection, PanelState, TriggerGlyphs,
};
pub use overlay::{
    DismissReason, DismissableOverlay, OverlayClick, OverlayEffect, OverlayState,
    SCROLL_LOCK_OVERFLOW,
};
pub use prefs::{
    MemoryPreferenceStore, PreferenceError, PreferenceStore, PreferenceValue, Preferences,
};
pub use resize::{
    DragResizer, DragSession, ResizeDispatch, ResizeEffect, ResizeIgnoredReason, ResizeOutcome,
    ResizePhase, WidthBounds,
};
