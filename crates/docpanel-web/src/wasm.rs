#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the theme panels.
//!
//! Each feature owns its elements and its core state machine behind an
//! `Rc<RefCell<_>>` shared with the listeners that drive it. Listeners live in
//! one [`ListenerSet`] owned by [`ThemePanels`], so dropping or destroying the
//! handle detaches all of them.

use std::cell::RefCell;
use std::rc::Rc;

use docpanel_core::{
    ClickTarget, ColorScheme, ColorSchemeConfig, ColorSchemePicker, DismissableOverlay,
    DragResizer, OverlayClick, PanelConfig, PanelCoordinator, PanelId, Preferences, ResizeConfig,
    ResizeEffect, ThemeConfig, TriggerGlyphs,
};
use js_sys::{Object, Reflect};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, Node, Window,
};

use crate::dom::{self, PatchHost};
use crate::listeners::ListenerSet;
use crate::patch::{self, DomTarget};
use crate::selectors;
use crate::storage::LocalStorage;

type SharedPrefs = Rc<RefCell<Preferences<LocalStorage>>>;

/// Elements the mount added to the page; removed again on teardown.
type CreatedElements = Vec<Element>;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn parse_config(config_json: Option<&str>) -> Result<ThemeConfig, JsValue> {
    match config_json {
        Some(json) => {
            ThemeConfig::from_json_str(json).map_err(|err| JsValue::from_str(&err.to_string()))
        }
        None => Ok(ThemeConfig::default()),
    }
}

fn browser() -> Result<(Window, Document), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    Ok((window, document))
}

fn create_html(document: &Document, tag: &str) -> Option<HtmlElement> {
    document.create_element(tag).ok()?.dyn_into::<HtmlElement>().ok()
}

// ---------------------------------------------------------------------------
// Resize handle
// ---------------------------------------------------------------------------

struct ResizeFeature {
    resizer: DragResizer,
    menu: HtmlElement,
    handle: HtmlElement,
    body: HtmlElement,
}

impl PatchHost for ResizeFeature {
    fn resolve(&self, target: DomTarget) -> Option<&Element> {
        match target {
            DomTarget::ResizePanel => Some(&*self.menu),
            DomTarget::ResizeHandle => Some(&*self.handle),
            DomTarget::Body => Some(&*self.body),
            _ => None,
        }
    }
}

impl ResizeFeature {
    fn mount(
        window: &Window,
        document: &Document,
        config: &ResizeConfig,
        prefs: &SharedPrefs,
        created: &mut CreatedElements,
    ) -> Option<Self> {
        let Some(menu) = dom::query_html(document, &config.panel_selector) else {
            debug!(selector = %config.panel_selector, "menu resize: panel not found");
            return None;
        };
        let viewport_width = window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0);
        let resizer = DragResizer::for_viewport(config, viewport_width as u32)?;
        let body = document.body()?;
        let handle = create_html(document, "div")?;
        handle.set_class_name(selectors::RESIZE_HANDLE_CLASS);
        let _ = handle.set_attribute("title", "Drag to resize the menu");
        body.append_child(&handle).ok()?;
        created.push(handle.clone().into());

        let feature = Self {
            resizer,
            menu,
            handle,
            body,
        };
        if let Some(width) = feature.resizer.initial_width(&*prefs.borrow()) {
            feature.apply(&patch::width_patches(width));
        }
        debug!("menu resize: initialized");
        Some(feature)
    }

    fn reanchor(&self) {
        let right = self.menu.get_bounding_client_rect().right();
        self.apply(&[patch::handle_anchor_patch(right)]);
    }
}

fn wire_resize(
    listeners: &mut ListenerSet,
    window: &Window,
    document: &Document,
    feature: &Rc<RefCell<ResizeFeature>>,
    prefs: &SharedPrefs,
    settle_delay_ms: u32,
) {
    let handle_target: EventTarget = feature.borrow().handle.clone().into();
    let document_target: &EventTarget = document.as_ref();
    let window_target: &EventTarget = window.as_ref();

    let on_press = Rc::clone(feature);
    listeners.listen(&handle_target, "mousedown", move |event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let mut feature = on_press.borrow_mut();
        let width = dom::rendered_width(&feature.menu);
        let dispatch = feature.resizer.press_start(mouse.client_x(), width);
        if let Some(ResizeEffect::DragStarted { .. }) = dispatch.effect() {
            feature.apply(&patch::drag_affordance_patches(true));
            event.prevent_default();
        }
    });

    let on_move = Rc::clone(feature);
    listeners.listen(document_target, "mousemove", move |event| {
        let mut feature = on_move.borrow_mut();
        if !feature.resizer.is_dragging() {
            return;
        }
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        if let Some(ResizeEffect::Preview { width }) =
            feature.resizer.pointer_move(mouse.client_x()).effect()
        {
            feature.apply(&patch::width_patches(width));
            feature.reanchor();
        }
    });

    let on_release = Rc::clone(feature);
    let release_prefs = Rc::clone(prefs);
    listeners.listen(document_target, "mouseup", move |_event| {
        let mut feature = on_release.borrow_mut();
        if !feature.resizer.is_dragging() {
            return;
        }
        let width = dom::rendered_width(&feature.menu);
        let mut prefs = release_prefs.borrow_mut();
        let dispatch = feature.resizer.press_end(width, &mut *prefs);
        if let Some(ResizeEffect::Committed { .. }) = dispatch.effect() {
            feature.apply(&patch::drag_affordance_patches(false));
        }
    });

    for event in ["resize", "scroll"] {
        let on_layout = Rc::clone(feature);
        listeners.listen(window_target, event, move |_event| on_layout.borrow().reanchor());
    }

    let on_settle = Rc::clone(feature);
    let settle = Closure::once_into_js(move || on_settle.borrow().reanchor());
    let delay = i32::try_from(settle_delay_ms).unwrap_or(i32::MAX);
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(settle.unchecked_ref(), delay)
        .is_err()
    {
        feature.borrow().reanchor();
    }
}

// ---------------------------------------------------------------------------
// Coordinated panels + backdrop
// ---------------------------------------------------------------------------

struct MountedPanel {
    id: PanelId,
    panel: Element,
    trigger: Element,
}

struct PanelFeature {
    coordinator: PanelCoordinator,
    panels: Vec<MountedPanel>,
    backdrop: Option<Element>,
}

impl PatchHost for PanelFeature {
    fn resolve(&self, target: DomTarget) -> Option<&Element> {
        match target {
            DomTarget::Panel(id) => self.mounted(id).map(|m| &m.panel),
            DomTarget::Trigger(id) => self.mounted(id).map(|m| &m.trigger),
            DomTarget::Backdrop => self.backdrop.as_ref(),
            _ => None,
        }
    }
}

fn create_trigger(document: &Document, config: &PanelConfig) -> Option<Element> {
    let Some(class) = selectors::class_from_selector(&config.trigger_selector) else {
        debug!(
            selector = %config.trigger_selector,
            "cannot create trigger for a non-class selector"
        );
        return None;
    };
    let button = create_html(document, "button")?;
    button.set_class_name(class);
    let _ = button.set_attribute("type", "button");
    let _ = button.set_attribute("aria-label", &config.name);
    button.set_title(&format!("Show/hide {}", config.name));
    button.set_text_content(Some(&config.idle_glyph));
    document.body()?.append_child(&button).ok()?;
    Some(button.into())
}

impl PanelFeature {
    fn mount(
        document: &Document,
        configs: &[PanelConfig],
        created: &mut CreatedElements,
    ) -> Option<Self> {
        let mut coordinator = PanelCoordinator::new();
        let mut panels = Vec::with_capacity(configs.len());
        for config in configs {
            let Some(panel) = dom::query(document, &config.panel_selector) else {
                debug!(panel = %config.name, selector = %config.panel_selector, "panel not found");
                continue;
            };
            let trigger = match dom::query(document, &config.trigger_selector) {
                Some(trigger) => trigger,
                None if config.create_trigger => {
                    let Some(trigger) = create_trigger(document, config) else {
                        continue;
                    };
                    created.push(trigger.clone());
                    trigger
                }
                None => {
                    debug!(
                        panel = %config.name,
                        selector = %config.trigger_selector,
                        "trigger not found"
                    );
                    continue;
                }
            };
            let initially_open = panel.class_list().contains(selectors::SHOW_CLASS);
            let glyphs = TriggerGlyphs::from(config);
            match coordinator.register(config.name.as_str(), glyphs, initially_open) {
                Ok(id) => panels.push(MountedPanel { id, panel, trigger }),
                Err(err) => warn!(%err, "panel registration failed"),
            }
        }
        if panels.is_empty() {
            return None;
        }
        let backdrop = dom::query(document, selectors::BACKDROP);
        if backdrop.is_none() {
            debug!(selector = selectors::BACKDROP, "backdrop not found; panels toggle without it");
        }
        let feature = Self {
            coordinator,
            panels,
            backdrop,
        };
        feature.apply(&patch::mount_patches(&feature.coordinator.snapshot()));
        Some(feature)
    }

    fn mounted(&self, id: PanelId) -> Option<&MountedPanel> {
        self.panels.iter().find(|mounted| mounted.id == id)
    }

    fn route(&mut self, target: ClickTarget) {
        match self.coordinator.click(target) {
            Ok(update) if !update.is_noop() => self.apply(&patch::coordinator_patches(&update)),
            Ok(_) => {}
            Err(err) => warn!(%err, "panel click could not be routed"),
        }
    }
}

fn wire_panels(listeners: &mut ListenerSet, feature: &Rc<RefCell<PanelFeature>>) {
    let targets: Vec<(PanelId, EventTarget, EventTarget)> = feature
        .borrow()
        .panels
        .iter()
        .map(|m| (m.id, m.trigger.clone().into(), m.panel.clone().into()))
        .collect();
    for (id, trigger, panel) in targets {
        for (target, click) in [
            (trigger, ClickTarget::Trigger(id)),
            (panel, ClickTarget::Panel(id)),
        ] {
            let on_click = Rc::clone(feature);
            listeners.listen(&target, "click", move |event| {
                let mut feature = on_click.borrow_mut();
                if feature.coordinator.contains_click(click) {
                    event.stop_propagation();
                }
                feature.route(click);
            });
        }
    }

    let backdrop: Option<EventTarget> = feature.borrow().backdrop.clone().map(Into::into);
    if let Some(backdrop) = backdrop {
        let on_backdrop = Rc::clone(feature);
        listeners.listen(&backdrop, "click", move |_event| {
            on_backdrop.borrow_mut().route(ClickTarget::Backdrop);
        });
    }
}

// ---------------------------------------------------------------------------
// Contact overlay
// ---------------------------------------------------------------------------

struct OverlayFeature {
    overlay: DismissableOverlay,
    modal: Element,
    body: HtmlElement,
}

impl PatchHost for OverlayFeature {
    fn resolve(&self, target: DomTarget) -> Option<&Element> {
        match target {
            DomTarget::Overlay => Some(&self.modal),
            DomTarget::Body => Some(&*self.body),
            _ => None,
        }
    }
}

impl OverlayFeature {
    fn dispatch(&mut self, effect: Option<docpanel_core::OverlayEffect>) {
        if let Some(effect) = effect {
            self.apply(&patch::overlay_patches(&effect));
        }
    }
}

fn wire_overlay(
    listeners: &mut ListenerSet,
    document: &Document,
) -> Option<Rc<RefCell<OverlayFeature>>> {
    let link = dom::query(document, selectors::CONTACT_LINK);
    let modal = dom::query(document, selectors::CONTACT_MODAL);
    let close = dom::query(document, selectors::MODAL_CLOSE);
    let (Some(link), Some(modal), Some(close), Some(body)) = (link, modal, close, document.body())
    else {
        debug!("contact overlay: markup not found");
        return None;
    };
    let modal_target: EventTarget = modal.clone().into();
    let feature = Rc::new(RefCell::new(OverlayFeature {
        overlay: DismissableOverlay::new(),
        modal,
        body,
    }));

    let on_open = Rc::clone(&feature);
    listeners.listen(link.as_ref(), "click", move |event| {
        event.prevent_default();
        let mut feature = on_open.borrow_mut();
        let current = dom::inline_style(&feature.body, "overflow");
        let effect = feature.overlay.open(&current);
        feature.dispatch(effect);
    });

    let on_close = Rc::clone(&feature);
    listeners.listen(close.as_ref(), "click", move |_event| {
        let mut feature = on_close.borrow_mut();
        let effect = feature.overlay.click(OverlayClick::CloseButton);
        feature.dispatch(effect);
    });

    let on_dimming = Rc::clone(&feature);
    listeners.listen(&modal_target, "click", move |event| {
        let mut feature = on_dimming.borrow_mut();
        let on_dimming_area = event
            .target()
            .is_some_and(|target| Object::is(target.as_ref(), feature.modal.as_ref()));
        let click = if on_dimming_area {
            OverlayClick::Dimming
        } else {
            OverlayClick::Content
        };
        let effect = feature.overlay.click(click);
        feature.dispatch(effect);
    });

    let on_key = Rc::clone(&feature);
    listeners.listen(document.as_ref(), "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let mut feature = on_key.borrow_mut();
        let effect = feature.overlay.key_down(&key.key());
        feature.dispatch(effect);
    });

    debug!("contact overlay: initialized");
    Some(feature)
}

// ---------------------------------------------------------------------------
// Color scheme
// ---------------------------------------------------------------------------

struct PickerElements {
    container: Element,
    toggle: Element,
    dropdown: Element,
    grid: Element,
}

struct SchemeFeature {
    picker: ColorSchemePicker,
    root: Element,
    body: Element,
    dropdown: Option<Element>,
    swatches: Vec<(ColorScheme, Element)>,
}

impl PatchHost for SchemeFeature {
    fn resolve(&self, target: DomTarget) -> Option<&Element> {
        match target {
            DomTarget::Root => Some(&self.root),
            DomTarget::Body => Some(&self.body),
            DomTarget::SchemeDropdown => self.dropdown.as_ref(),
            DomTarget::SchemeSwatch(scheme) => self
                .swatches
                .iter()
                .find(|(candidate, _)| *candidate == scheme)
                .map(|(_, element)| element),
            _ => None,
        }
    }
}

fn create_picker(document: &Document) -> Option<Element> {
    let header = dom::query(document, selectors::HEADER_CONTROLS)?;
    let container = create_html(document, "div")?;
    container.set_id(selectors::id_from_selector(selectors::PICKER_CONTAINER)?);
    container.set_class_name("color-scheme-picker");

    let toggle = create_html(document, "button")?;
    toggle.set_id(selectors::id_from_selector(selectors::PICKER_TOGGLE)?);
    toggle.set_class_name("color-scheme-btn");
    toggle.set_title("Choose a color scheme");
    toggle.set_text_content(Some("\u{25D0}"));

    let dropdown = create_html(document, "div")?;
    dropdown.set_id(selectors::id_from_selector(selectors::PICKER_DROPDOWN)?);
    dropdown.set_class_name("color-scheme-dropdown");
    let heading = create_html(document, "div")?;
    heading.set_class_name("scheme-header");
    heading.set_text_content(Some("Color Scheme"));
    dropdown.append_child(&heading).ok()?;

    let grid = create_html(document, "div")?;
    grid.set_id(selectors::id_from_selector(selectors::SCHEME_GRID)?);
    grid.set_class_name("scheme-grid");

    dropdown.append_child(&grid).ok()?;
    container.append_child(&toggle).ok()?;
    container.append_child(&dropdown).ok()?;

    let theme_toggle = dom::query_in(&header, selectors::THEME_TOGGLE);
    header
        .insert_before(&container, theme_toggle.as_deref())
        .ok()?;
    Some(container.into())
}

fn picker_elements(
    document: &Document,
    created: &mut CreatedElements,
) -> Option<PickerElements> {
    let container = match dom::query(document, selectors::PICKER_CONTAINER) {
        Some(container) => container,
        None => {
            let container = create_picker(document)?;
            created.push(container.clone());
            container
        }
    };
    let toggle = dom::query_in(&container, selectors::PICKER_TOGGLE);
    let dropdown = dom::query_in(&container, selectors::PICKER_DROPDOWN);
    let grid = dom::query_in(&container, selectors::SCHEME_GRID);
    let (Some(toggle), Some(dropdown), Some(grid)) = (toggle, dropdown, grid) else {
        debug!("color scheme picker: incomplete markup");
        return None;
    };
    Some(PickerElements {
        container,
        toggle,
        dropdown,
        grid,
    })
}

fn populate_grid(document: &Document, grid: &Element) -> Vec<(ColorScheme, Element)> {
    grid.set_text_content(None);
    let mut swatches = Vec::with_capacity(ColorScheme::ALL.len());
    for scheme in ColorScheme::ALL {
        let Some(option) = create_html(document, "button") else {
            continue;
        };
        let option_class = selectors::SCHEME_OPTION.trim_start_matches('.');
        option.set_class_name(option_class);
        let _ = option.set_attribute(selectors::SCHEME_DATA_ATTRIBUTE, scheme.id());
        option.set_title(scheme.id());
        if let Some(color) = create_html(document, "span") {
            color.set_class_name("scheme-color");
            let _ = color.style().set_property("background", scheme.swatch());
            let _ = option.append_child(&color);
        }
        if grid.append_child(&option).is_ok() {
            swatches.push((scheme, option.into()));
        }
    }
    swatches
}

fn wire_scheme(
    listeners: &mut ListenerSet,
    document: &Document,
    config: &ColorSchemeConfig,
    prefs: &SharedPrefs,
    created: &mut CreatedElements,
) -> Option<Rc<RefCell<SchemeFeature>>> {
    let root = document.document_element()?;
    let body: Element = document.body()?.into();
    let (picker, applied) = ColorSchemePicker::restore(config, &mut *prefs.borrow_mut());

    let elements = picker_elements(document, created);
    let swatches = elements
        .as_ref()
        .map(|el| populate_grid(document, &el.grid))
        .unwrap_or_default();
    let feature = SchemeFeature {
        picker,
        root,
        body,
        dropdown: elements.as_ref().map(|el| el.dropdown.clone()),
        swatches,
    };
    feature.apply(&patch::scheme_patches(applied));
    feature.apply(&patch::swatch_patches(&feature.picker));
    let feature = Rc::new(RefCell::new(feature));

    let Some(elements) = elements else {
        return Some(feature);
    };

    let on_toggle = Rc::clone(&feature);
    listeners.listen(elements.toggle.as_ref(), "click", move |event| {
        event.stop_propagation();
        let mut feature = on_toggle.borrow_mut();
        let open = feature.picker.toggle_dropdown();
        feature.apply(&[patch::dropdown_patch(open)]);
    });

    let on_outside = Rc::clone(&feature);
    let container = elements.container.clone();
    listeners.listen(document.as_ref(), "click", move |event| {
        let inside = event
            .target()
            .and_then(|target| target.dyn_into::<Node>().ok())
            .is_some_and(|node| container.contains(Some(&node)));
        if inside {
            return;
        }
        let mut feature = on_outside.borrow_mut();
        if feature.picker.outside_click() {
            feature.apply(&[patch::dropdown_patch(false)]);
        }
    });

    let on_select = Rc::clone(&feature);
    let select_prefs = Rc::clone(prefs);
    listeners.listen(elements.grid.as_ref(), "click", move |event| {
        let Some(option) = dom::event_element(&event)
            .and_then(|el| el.closest(selectors::SCHEME_OPTION).ok().flatten())
        else {
            return;
        };
        let Some(id) = option.get_attribute(selectors::SCHEME_DATA_ATTRIBUTE) else {
            return;
        };
        let mut feature = on_select.borrow_mut();
        let applied = feature.picker.select(&id, &mut *select_prefs.borrow_mut());
        feature.apply(&patch::scheme_patches(applied));
        feature.apply(&patch::swatch_patches(&feature.picker));
        feature.apply(&[patch::dropdown_patch(false)]);
    });

    debug!(scheme = %feature.borrow().picker.current(), "color scheme picker: initialized");
    Some(feature)
}

// ---------------------------------------------------------------------------
// Exported handle
// ---------------------------------------------------------------------------

/// All mounted theme features for one page.
#[wasm_bindgen]
pub struct ThemePanels {
    listeners: ListenerSet,
    created: CreatedElements,
    scheme: Option<Rc<RefCell<SchemeFeature>>>,
    resize: Option<Rc<RefCell<ResizeFeature>>>,
    panels: Option<Rc<RefCell<PanelFeature>>>,
    overlay: Option<Rc<RefCell<OverlayFeature>>>,
}

impl ThemePanels {
    fn mount(window: &Window, document: &Document, config: &ThemeConfig) -> Self {
        let prefs: SharedPrefs = Rc::new(RefCell::new(Preferences::new(LocalStorage::new())));
        if !prefs.borrow().store().is_available() {
            debug!("localStorage unavailable; preferences fall back to defaults");
        }
        let mut listeners = ListenerSet::new();
        let mut created = CreatedElements::new();

        let scheme = wire_scheme(
            &mut listeners,
            document,
            &config.color_scheme,
            &prefs,
            &mut created,
        );

        let resize = ResizeFeature::mount(window, document, &config.resize, &prefs, &mut created)
            .map(|feature| Rc::new(RefCell::new(feature)));
        if let Some(feature) = &resize {
            wire_resize(
                &mut listeners,
                window,
                document,
                feature,
                &prefs,
                config.resize.settle_delay_ms,
            );
        }

        let panels = PanelFeature::mount(document, &config.panels, &mut created)
            .map(|feature| Rc::new(RefCell::new(feature)));
        if let Some(feature) = &panels {
            wire_panels(&mut listeners, feature);
        }

        let overlay = wire_overlay(&mut listeners, document);

        debug!(
            listeners = listeners.len(),
            created = created.len(),
            resize = resize.is_some(),
            panels = panels.is_some(),
            overlay = overlay.is_some(),
            "theme panels mounted"
        );
        Self {
            listeners,
            created,
            scheme,
            resize,
            panels,
            overlay,
        }
    }
}

#[wasm_bindgen]
impl ThemePanels {
    /// Mount against the current document. `config_json` overrides defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<ThemePanels, JsValue> {
        install_panic_hook();
        let config = parse_config(config_json.as_deref())?;
        let (window, document) = browser()?;
        Ok(Self::mount(&window, &document, &config))
    }

    #[wasm_bindgen(js_name = backdropVisible)]
    pub fn backdrop_visible(&self) -> bool {
        self.panels
            .as_ref()
            .is_some_and(|feature| feature.borrow().coordinator.backdrop_visible())
    }

    #[wasm_bindgen(js_name = isPanelOpen)]
    pub fn is_panel_open(&self, name: &str) -> bool {
        self.panels.as_ref().is_some_and(|feature| {
            let feature = feature.borrow();
            feature
                .coordinator
                .id_of(name)
                .and_then(|id| feature.coordinator.state(id).ok())
                .is_some_and(|state| state.is_open())
        })
    }

    #[wasm_bindgen(js_name = overlayOpen)]
    pub fn overlay_open(&self) -> bool {
        self.overlay
            .as_ref()
            .is_some_and(|feature| feature.borrow().overlay.is_open())
    }

    #[wasm_bindgen(js_name = resizeEnabled)]
    pub fn resize_enabled(&self) -> bool {
        self.resize.is_some()
    }

    #[wasm_bindgen(js_name = colorScheme)]
    pub fn color_scheme(&self) -> String {
        self.scheme
            .as_ref()
            .map_or(ColorScheme::Default, |feature| feature.borrow().picker.current())
            .id()
            .to_owned()
    }

    #[wasm_bindgen(js_name = listenerCount)]
    pub fn listener_count(&self) -> u32 {
        self.listeners.len() as u32
    }

    /// Detach every listener and remove every element the mount created
    /// (resize handle, generated triggers, color picker).
    pub fn destroy(&mut self) {
        self.listeners.clear();
        for element in self.created.drain(..) {
            element.remove();
        }
        self.resize = None;
        self.panels = None;
        self.overlay = None;
        self.scheme = None;
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<ThemePanels>> = const { RefCell::new(None) };
}

fn mount_global(window: &Window, document: &Document, config: &ThemeConfig) {
    let panels = ThemePanels::mount(window, document, config);
    MOUNTED.with(|slot| {
        if let Some(mut previous) = slot.borrow_mut().replace(panels) {
            previous.destroy();
        }
    });
}

/// Mount once the document is parsed and keep the handle for the page lifetime.
#[wasm_bindgen(js_name = autoMount)]
pub fn auto_mount(config_json: Option<String>) -> Result<(), JsValue> {
    install_panic_hook();
    let config = parse_config(config_json.as_deref())?;
    let (window, document) = browser()?;
    if document.ready_state() != "loading" {
        mount_global(&window, &document, &config);
        return Ok(());
    }
    let deferred_document = document.clone();
    let on_ready = Closure::once_into_js(move || {
        mount_global(&window, &deferred_document, &config);
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}

/// Tear down the handle created by [`auto_mount`].
#[wasm_bindgen(js_name = autoUnmount)]
pub fn auto_unmount() {
    MOUNTED.with(|slot| {
        if let Some(mut panels) = slot.borrow_mut().take() {
            panels.destroy();
        }
    });
}
