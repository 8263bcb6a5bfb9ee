#![forbid(unsafe_code)]

//! Translation from core projections to DOM operations.
//!
//! Everything here is pure so the page-facing contract (which markers and
//! inline styles each transition writes) is testable off the browser. The
//! wasm glue resolves each [`DomTarget`] to an element and applies the op.

use docpanel_core::{
    ColorScheme, ColorSchemePicker, CoordinatorUpdate, OverlayEffect, PanelId,
    SCHEME_ATTRIBUTE, SCROLL_LOCK_OVERFLOW, SchemeApplication,
};

use crate::selectors::{ACTIVE_CLASS, RESIZING_CLASS, SHOW_CLASS};

/// Inline width properties pinned together so the stylesheet cannot win.
const WIDTH_PROPERTIES: [&str; 4] = ["flex-basis", "width", "min-width", "max-width"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomTarget {
    Root,
    Body,
    Panel(PanelId),
    Trigger(PanelId),
    Backdrop,
    ResizePanel,
    ResizeHandle,
    Overlay,
    SchemeDropdown,
    SchemeSwatch(ColorScheme),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomOp {
    SetClass { class: &'static str, on: bool },
    SetText(String),
    /// An empty value removes the inline property.
    SetStyle {
        property: &'static str,
        value: String,
    },
    SetAttribute {
        name: &'static str,
        value: String,
    },
    RemoveAttribute(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomPatch {
    pub target: DomTarget,
    pub op: DomOp,
}

impl DomPatch {
    const fn new(target: DomTarget, op: DomOp) -> Self {
        Self { target, op }
    }

    fn class(target: DomTarget, class: &'static str, on: bool) -> Self {
        Self::new(target, DomOp::SetClass { class, on })
    }

    fn style(target: DomTarget, property: &'static str, value: impl Into<String>) -> Self {
        Self::new(
            target,
            DomOp::SetStyle {
                property,
                value: value.into(),
            },
        )
    }
}

/// Panel markers, trigger markers and glyphs, and backdrop visibility.
#[must_use]
pub fn coordinator_patches(update: &CoordinatorUpdate) -> Vec<DomPatch> {
    projection_patches(update, true)
}

/// Initial projection at mount. Closed panels keep whatever content the page
/// gave their trigger; only open ones switch to the close glyph.
#[must_use]
pub fn mount_patches(snapshot: &CoordinatorUpdate) -> Vec<DomPatch> {
    projection_patches(snapshot, false)
}

fn projection_patches(update: &CoordinatorUpdate, idle_glyphs: bool) -> Vec<DomPatch> {
    let mut patches = Vec::with_capacity(update.panels.len() * 3 + 1);
    for panel in &update.panels {
        patches.push(DomPatch::class(DomTarget::Panel(panel.id), SHOW_CLASS, panel.open));
        patches.push(DomPatch::class(
            DomTarget::Trigger(panel.id),
            ACTIVE_CLASS,
            panel.trigger_active,
        ));
        if idle_glyphs || panel.open {
            patches.push(DomPatch::new(
                DomTarget::Trigger(panel.id),
                DomOp::SetText(panel.trigger_glyph.clone()),
            ));
        }
    }
    patches.push(DomPatch::class(
        DomTarget::Backdrop,
        SHOW_CLASS,
        update.backdrop.visible,
    ));
    patches
}

/// Fixed width for the resizable panel.
#[must_use]
pub fn width_patches(width: u32) -> Vec<DomPatch> {
    let px = format!("{width}px");
    let mut patches = vec![DomPatch::style(
        DomTarget::ResizePanel,
        "flex",
        format!("0 0 {px}"),
    )];
    patches.extend(
        WIDTH_PROPERTIES
            .iter()
            .map(|&property| DomPatch::style(DomTarget::ResizePanel, property, px.as_str())),
    );
    patches
}

/// Drag affordance: handle highlight, resize cursor, no text selection.
#[must_use]
pub fn drag_affordance_patches(active: bool) -> Vec<DomPatch> {
    let (cursor, user_select) = if active {
        ("col-resize", "none")
    } else {
        ("", "")
    };
    vec![
        DomPatch::class(DomTarget::ResizeHandle, RESIZING_CLASS, active),
        DomPatch::style(DomTarget::Body, "cursor", cursor),
        DomPatch::style(DomTarget::Body, "user-select", user_select),
    ]
}

/// Keep the handle on the panel's right edge (viewport coordinates).
#[must_use]
pub fn handle_anchor_patch(panel_right_px: f64) -> DomPatch {
    DomPatch::style(DomTarget::ResizeHandle, "left", format!("{panel_right_px}px"))
}

#[must_use]
pub fn overlay_patches(effect: &OverlayEffect) -> Vec<DomPatch> {
    match effect {
        OverlayEffect::Opened => vec![
            DomPatch::class(DomTarget::Overlay, SHOW_CLASS, true),
            DomPatch::style(DomTarget::Body, "overflow", SCROLL_LOCK_OVERFLOW),
        ],
        OverlayEffect::Closed {
            restore_overflow, ..
        } => vec![
            DomPatch::class(DomTarget::Overlay, SHOW_CLASS, false),
            DomPatch::style(DomTarget::Body, "overflow", restore_overflow.as_str()),
        ],
    }
}

/// Scheme attribute on both the root and body elements.
#[must_use]
pub fn scheme_patches(application: SchemeApplication) -> Vec<DomPatch> {
    [DomTarget::Root, DomTarget::Body]
        .into_iter()
        .map(|target| {
            let op = match application.attribute_value() {
                Some(value) => DomOp::SetAttribute {
                    name: SCHEME_ATTRIBUTE,
                    value: value.to_owned(),
                },
                None => DomOp::RemoveAttribute(SCHEME_ATTRIBUTE),
            };
            DomPatch::new(target, op)
        })
        .collect()
}

#[must_use]
pub fn dropdown_patch(open: bool) -> DomPatch {
    DomPatch::class(DomTarget::SchemeDropdown, SHOW_CLASS, open)
}

/// Active marker on exactly the selected swatch.
#[must_use]
pub fn swatch_patches(picker: &ColorSchemePicker) -> Vec<DomPatch> {
    picker
        .swatches()
        .map(|(scheme, active)| DomPatch::class(DomTarget::SchemeSwatch(scheme), ACTIVE_CLASS, active))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        DomOp, DomPatch, DomTarget, coordinator_patches, drag_affordance_patches,
        handle_anchor_patch, mount_patches, overlay_patches, scheme_patches, width_patches,
    };
    use docpanel_core::{
        ColorScheme, DismissableOverlay, PanelCoordinator, SchemeApplication, TriggerGlyphs,
    };
    use pretty_assertions::assert_eq;

    fn style(target: DomTarget, property: &'static str, value: &str) -> DomPatch {
        DomPatch {
            target,
            op: DomOp::SetStyle {
                property,
                value: value.to_owned(),
            },
        }
    }

    #[test]
    fn opening_a_panel_marks_panel_trigger_and_backdrop() {
        let mut coordinator = PanelCoordinator::new();
        let menu = coordinator
            .register("menu", TriggerGlyphs::new("\u{2630}", "\u{2716}"), false)
            .expect("register");
        let update = coordinator.toggle(menu).expect("toggle");
        assert_eq!(
            coordinator_patches(&update),
            vec![
                DomPatch {
                    target: DomTarget::Panel(menu),
                    op: DomOp::SetClass { class: "show", on: true },
                },
                DomPatch {
                    target: DomTarget::Trigger(menu),
                    op: DomOp::SetClass { class: "active", on: true },
                },
                DomPatch {
                    target: DomTarget::Trigger(menu),
                    op: DomOp::SetText("\u{2716}".into()),
                },
                DomPatch {
                    target: DomTarget::Backdrop,
                    op: DomOp::SetClass { class: "show", on: true },
                },
            ]
        );
    }

    #[test]
    fn mount_leaves_closed_triggers_untouched() {
        let mut coordinator = PanelCoordinator::new();
        let menu = coordinator
            .register("menu", TriggerGlyphs::new("\u{2630}", "\u{2716}"), false)
            .expect("register");
        let toc = coordinator
            .register("toc", TriggerGlyphs::new("\u{1F4D1}", "\u{2716}"), true)
            .expect("register");
        let patches = mount_patches(&coordinator.snapshot());

        assert!(
            !patches
                .iter()
                .any(|p| p.target == DomTarget::Trigger(menu) && matches!(p.op, DomOp::SetText(_)))
        );
        assert!(patches.contains(&DomPatch {
            target: DomTarget::Trigger(toc),
            op: DomOp::SetText("\u{2716}".into()),
        }));
        assert!(patches.contains(&DomPatch {
            target: DomTarget::Trigger(menu),
            op: DomOp::SetClass { class: "active", on: false },
        }));
    }

    #[test]
    fn closing_restores_idle_glyph_after_mount() {
        let mut coordinator = PanelCoordinator::new();
        let menu = coordinator
            .register("menu", TriggerGlyphs::new("\u{2630}", "\u{2716}"), true)
            .expect("register");
        let update = coordinator.toggle(menu).expect("toggle");
        assert!(coordinator_patches(&update).contains(&DomPatch {
            target: DomTarget::Trigger(menu),
            op: DomOp::SetText("\u{2630}".into()),
        }));
    }

    #[test]
    fn width_is_pinned_on_every_box_property() {
        assert_eq!(
            width_patches(190),
            vec![
                style(DomTarget::ResizePanel, "flex", "0 0 190px"),
                style(DomTarget::ResizePanel, "flex-basis", "190px"),
                style(DomTarget::ResizePanel, "width", "190px"),
                style(DomTarget::ResizePanel, "min-width", "190px"),
                style(DomTarget::ResizePanel, "max-width", "190px"),
            ]
        );
    }

    #[test]
    fn affordance_off_clears_inline_body_styles() {
        let patches = drag_affordance_patches(false);
        assert!(patches.contains(&style(DomTarget::Body, "cursor", "")));
        assert!(patches.contains(&style(DomTarget::Body, "user-select", "")));
    }

    #[test]
    fn handle_anchor_uses_whole_pixels_when_possible() {
        assert_eq!(
            handle_anchor_patch(240.0),
            style(DomTarget::ResizeHandle, "left", "240px")
        );
    }

    #[test]
    fn overlay_close_restores_saved_overflow() {
        let mut overlay = DismissableOverlay::new();
        let opened = overlay.open("auto").expect("opens");
        assert!(overlay_patches(&opened).contains(&style(DomTarget::Body, "overflow", "hidden")));
        let closed = overlay.key_down("Escape").expect("closes");
        assert!(overlay_patches(&closed).contains(&style(DomTarget::Body, "overflow", "auto")));
    }

    #[test]
    fn default_scheme_removes_attribute_from_root_and_body() {
        let patches = scheme_patches(SchemeApplication {
            scheme: ColorScheme::Default,
        });
        assert_eq!(
            patches,
            vec![
                DomPatch {
                    target: DomTarget::Root,
                    op: DomOp::RemoveAttribute("data-color-scheme"),
                },
                DomPatch {
                    target: DomTarget::Body,
                    op: DomOp::RemoveAttribute("data-color-scheme"),
                },
            ]
        );
    }
}
