//! DOM contract shared with the theme's templates and stylesheet.

pub const BACKDROP: &str = ".sidebar-overlay";

pub const CONTACT_LINK: &str = "#contact-link";
pub const CONTACT_MODAL: &str = "#contact-modal";
pub const MODAL_CLOSE: &str = ".modal-close";

pub const PICKER_CONTAINER: &str = "#color-picker-container";
pub const HEADER_CONTROLS: &str = ".header-controls";
pub const THEME_TOGGLE: &str = "#theme-toggle";
pub const PICKER_TOGGLE: &str = "#color-scheme-toggle";
pub const PICKER_DROPDOWN: &str = "#color-scheme-dropdown";
pub const SCHEME_GRID: &str = "#scheme-grid";
pub const SCHEME_OPTION: &str = ".scheme-option";
pub const SCHEME_DATA_ATTRIBUTE: &str = "data-scheme";

/// Open/visible marker on panels, backdrop, overlay, and dropdown.
pub const SHOW_CLASS: &str = "show";
/// Marker on an open panel's trigger and on the selected swatch.
pub const ACTIVE_CLASS: &str = "active";
/// Marker on the resize handle while a drag is in progress.
pub const RESIZING_CLASS: &str = "resizing";
pub const RESIZE_HANDLE_CLASS: &str = "menu-resize-handle";

/// Class name of a simple `.class` selector, `None` for anything else.
#[must_use]
pub fn class_from_selector(selector: &str) -> Option<&str> {
    let class = selector.strip_prefix('.')?;
    let simple = !class.is_empty()
        && class
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    simple.then_some(class)
}

/// Id of a simple `#id` selector, `None` for anything else.
#[must_use]
pub fn id_from_selector(selector: &str) -> Option<&str> {
    let id = selector.strip_prefix('#')?;
    let simple = !id.is_empty()
        && id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    simple.then_some(id)
}
