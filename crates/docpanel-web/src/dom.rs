//! Element lookup and [`DomPatch`] application.

use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

use crate::patch::{DomOp, DomPatch, DomTarget};

pub(crate) fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub(crate) fn query_in(scope: &Element, selector: &str) -> Option<Element> {
    scope.query_selector(selector).ok().flatten()
}

pub(crate) fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    query(document, selector)?.dyn_into::<HtmlElement>().ok()
}

/// Element the event was dispatched to, if it is an element.
pub(crate) fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Inline style value, empty when unset.
pub(crate) fn inline_style(element: &HtmlElement, property: &str) -> String {
    element
        .style()
        .get_property_value(property)
        .unwrap_or_default()
}

/// Rendered width in whole pixels.
pub(crate) fn rendered_width(element: &HtmlElement) -> u32 {
    u32::try_from(element.offset_width()).unwrap_or(0)
}

pub(crate) fn apply_op(element: &Element, op: &DomOp) {
    match op {
        DomOp::SetClass { class, on } => {
            let _ = element.class_list().toggle_with_force(class, *on);
        }
        DomOp::SetText(text) => element.set_text_content(Some(text.as_str())),
        DomOp::SetStyle { property, value } => {
            let Some(html) = element.dyn_ref::<HtmlElement>() else {
                return;
            };
            let style = html.style();
            if value.is_empty() {
                let _ = style.remove_property(property);
            } else {
                let _ = style.set_property(property, value);
            }
        }
        DomOp::SetAttribute { name, value } => {
            let _ = element.set_attribute(name, value);
        }
        DomOp::RemoveAttribute(name) => {
            let _ = element.remove_attribute(name);
        }
    }
}

/// Something that owns the elements a patch may address.
pub(crate) trait PatchHost {
    fn resolve(&self, target: DomTarget) -> Option<&Element>;

    fn apply(&self, patches: &[DomPatch]) {
        for patch in patches {
            match self.resolve(patch.target) {
                Some(element) => apply_op(element, &patch.op),
                None => trace!(dom_target = ?patch.target, "patch target not mounted"),
            }
        }
    }
}
