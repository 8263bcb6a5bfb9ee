#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use docpanel_web::{ThemePanels, auto_mount, auto_unmount};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r##"
<div class="header-controls"><button id="theme-toggle">t</button></div>
<button class="menu-toggle-btn"><span class="menu-icon">m</span></button>
<nav class="book-menu"><span class="menu-blank">menu</span></nav>
<aside class="book-toc"><span class="toc-entry">toc</span></aside>
<div class="sidebar-overlay"></div>
<a id="contact-link" href="#">contact</a>
<div id="contact-modal"><div class="modal-body"><span class="modal-close">x</span></div></div>
"##;

fn document() -> Document {
    web_sys::window()
        .and_then(|window| window.document())
        .expect("browser document")
}

fn load_page(markup: &str) -> Document {
    let document = document();
    document.body().expect("body").set_inner_html(markup);
    document
}

fn find(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).expect("valid selector")
}

fn click(document: &Document, selector: &str) {
    find(document, selector)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .unwrap_or_else(|| panic!("{selector} is clickable"))
        .click();
}

fn has_class(document: &Document, selector: &str, class: &str) -> bool {
    find(document, selector).is_some_and(|el| el.class_list().contains(class))
}

fn text(document: &Document, selector: &str) -> String {
    find(document, selector)
        .and_then(|el| el.text_content())
        .unwrap_or_default()
}

#[wasm_bindgen_test]
fn toc_trigger_is_created_and_drives_shared_backdrop() {
    let document = load_page(PAGE);
    let mut panels = ThemePanels::new(None).expect("mounts");

    assert_eq!(text(&document, ".toc-toggle-btn"), "\u{1F4D1}");

    click(&document, ".toc-toggle-btn");
    assert!(has_class(&document, ".book-toc", "show"));
    assert!(has_class(&document, ".sidebar-overlay", "show"));
    assert!(has_class(&document, ".toc-toggle-btn", "active"));
    assert_eq!(text(&document, ".toc-toggle-btn"), "\u{2716}");

    click(&document, ".menu-toggle-btn");
    assert!(panels.is_panel_open("menu"));
    click(&document, ".menu-toggle-btn");
    assert!(panels.backdrop_visible(), "toc is still open");

    click(&document, ".sidebar-overlay");
    assert!(!has_class(&document, ".book-toc", "show"));
    assert!(!has_class(&document, ".sidebar-overlay", "show"));
    assert_eq!(text(&document, ".toc-toggle-btn"), "\u{1F4D1}");

    panels.destroy();
}

#[wasm_bindgen_test]
fn page_supplied_trigger_keeps_its_markup_until_clicked() {
    let document = load_page(PAGE);
    let mut panels = ThemePanels::new(None).expect("mounts");

    assert!(find(&document, ".menu-toggle-btn .menu-icon").is_some());
    click(&document, ".menu-toggle-btn");
    assert_eq!(text(&document, ".menu-toggle-btn"), "\u{2716}");

    panels.destroy();
}

#[wasm_bindgen_test]
fn panels_toggle_without_a_backdrop() {
    let document = load_page(&PAGE.replace(r#"<div class="sidebar-overlay"></div>"#, ""));
    let mut panels = ThemePanels::new(None).expect("mounts");

    click(&document, ".toc-toggle-btn");
    assert!(has_class(&document, ".book-toc", "show"));
    assert!(panels.backdrop_visible());
    assert!(find(&document, ".sidebar-overlay").is_none());

    panels.destroy();
}

#[wasm_bindgen_test]
fn resize_handle_follows_the_breakpoint() {
    let document = load_page(PAGE);
    let mut panels = ThemePanels::new(None).expect("mounts");

    let viewport = web_sys::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0) as u32;
    let wide = viewport > 896;
    assert_eq!(panels.resize_enabled(), wide);
    assert_eq!(find(&document, ".menu-resize-handle").is_some(), wide);

    panels.destroy();
    assert!(find(&document, ".menu-resize-handle").is_none());
}

#[wasm_bindgen_test]
fn click_inside_closed_menu_closes_scheme_dropdown() {
    let document = load_page(PAGE);
    let mut panels = ThemePanels::new(None).expect("mounts");

    click(&document, "#color-scheme-toggle");
    assert!(has_class(&document, "#color-scheme-dropdown", "show"));

    click(&document, ".book-menu .menu-blank");
    assert!(!has_class(&document, "#color-scheme-dropdown", "show"));

    panels.destroy();
}

#[wasm_bindgen_test]
fn click_inside_open_toc_stays_inside() {
    let document = load_page(PAGE);
    let mut panels = ThemePanels::new(None).expect("mounts");

    click(&document, ".toc-toggle-btn");
    click(&document, "#color-scheme-toggle");
    click(&document, ".book-toc .toc-entry");
    assert!(has_class(&document, "#color-scheme-dropdown", "show"));
    assert!(panels.is_panel_open("toc"));

    panels.destroy();
}

#[wasm_bindgen_test]
fn contact_overlay_locks_and_restores_scroll() {
    let document = load_page(PAGE);
    let mut panels = ThemePanels::new(None).expect("mounts");
    let body = document.body().expect("body");

    click(&document, "#contact-link");
    assert!(panels.overlay_open());
    assert!(has_class(&document, "#contact-modal", "show"));
    assert_eq!(body.style().get_property_value("overflow").ok().as_deref(), Some("hidden"));

    click(&document, ".modal-close");
    assert!(!panels.overlay_open());
    assert_eq!(body.style().get_property_value("overflow").ok().as_deref(), Some(""));

    panels.destroy();
}

#[wasm_bindgen_test]
fn destroy_detaches_listeners_and_removes_created_elements() {
    let document = load_page(PAGE);
    let mut panels = ThemePanels::new(None).expect("mounts");
    assert!(panels.listener_count() > 0);

    panels.destroy();
    assert_eq!(panels.listener_count(), 0);
    assert!(find(&document, ".toc-toggle-btn").is_none());
    assert!(find(&document, "#color-picker-container").is_none());

    click(&document, ".menu-toggle-btn");
    assert!(!has_class(&document, ".book-menu", "show"));
    assert!(find(&document, ".menu-toggle-btn .menu-icon").is_some());
}

#[wasm_bindgen_test]
fn auto_mount_runs_immediately_on_a_parsed_document() {
    let document = load_page(PAGE);
    auto_mount(None).expect("mounts");
    assert!(find(&document, ".toc-toggle-btn").is_some());

    auto_unmount();
    assert!(find(&document, ".toc-toggle-btn").is_none());
}
