//! Browser entry point for the zone map.
//!
//! All mutable state lives in one thread-local. Input handlers mutate the
//! scene, drain its events, and only then touch the DOM.

mod canvas;
mod config;
pub mod html;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use catalog::{ClearanceStore, InMemoryClearanceStore, LocalStorageClearanceStore};
use formats::{DetailDocument, IntelSummary, ZoneDataset};
use foundation::math::Vec2;
use gloo_net::http::Request;
use scene::{ClearanceTier, SceneConfig, SceneState, UiEvent, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

pub use canvas::CanvasPainter;
pub use config::WebConfig;

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_SET: OnceLock<()> = OnceLock::new();

#[derive(Debug)]
enum ViewerClearanceStore {
    Local(LocalStorageClearanceStore),
    Memory(InMemoryClearanceStore),
}

impl ViewerClearanceStore {
    fn new(key: &str) -> Self {
        match LocalStorageClearanceStore::new(key) {
            Ok(s) => ViewerClearanceStore::Local(s),
            Err(_) => ViewerClearanceStore::Memory(InMemoryClearanceStore::new()),
        }
    }

    fn as_store(&self) -> &dyn ClearanceStore {
        match self {
            ViewerClearanceStore::Local(s) => s,
            ViewerClearanceStore::Memory(s) => s,
        }
    }

    fn as_store_mut(&mut self) -> &mut dyn ClearanceStore {
        match self {
            ViewerClearanceStore::Local(s) => s,
            ViewerClearanceStore::Memory(s) => s,
        }
    }
}

struct ViewerState {
    config: WebConfig,
    zones: ZoneDataset,
    scene: SceneState,
    store: ViewerClearanceStore,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

thread_local! {
    static STATE: RefCell<Option<ViewerState>> = const { RefCell::new(None) };
}

/// Safe TLS access helper that returns a default on teardown instead of panicking.
fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&RefCell<Option<ViewerState>>) -> R,
    R: Default,
{
    STATE.try_with(f).unwrap_or_default()
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

fn init_panic_hook() {
    PANIC_HOOK_SET.get_or_init(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = info.to_string();
            web_sys::console::error_1(&JsValue::from_str(&msg));
        }));
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    init_panic_hook();
    spawn_local(async move {
        if let Err(err) = boot(WebConfig::default()).await {
            log_error(&format!("[zones] init error: {:?}", err));
        }
    });
    Ok(())
}

/// Persists the viewer's tier and re-gates every landmark immediately.
#[wasm_bindgen]
pub fn set_clearance(tier: &str) -> Result<(), JsValue> {
    let tier = ClearanceTier::parse(tier)
        .ok_or_else(|| JsValue::from_str(&format!("unknown clearance tier: {tier}")))?;
    update_scene(|state| {
        if let Err(err) = catalog::write_clearance(state.store.as_store_mut(), tier) {
            log_error(&format!("[zones] could not persist clearance: {err}"));
        }
        state.scene.set_clearance(tier);
    });
    with_document(|document, config| update_clearance_badge(document, config, tier));
    Ok(())
}

#[wasm_bindgen]
pub fn close_zone_detail() {
    with_document(|document, config| {
        if let Some(modal) = html_element(document, &config.modal_id) {
            let _ = modal.style().set_property("display", "none");
        }
        if let Some(body) = document.body() {
            let _ = body.style().set_property("overflow", "auto");
        }
    });
}

async fn boot(config: WebConfig) -> Result<(), JsValue> {
    let zones = match load_zones(&config.dataset_url).await {
        Ok(zones) => {
            log(&format!("[zones] loaded {} zone files", zones.len()));
            zones
        }
        Err(err) => {
            log_error(&format!("[zones] error loading zone data: {:?}", err));
            ZoneDataset::default()
        }
    };

    let store = ViewerClearanceStore::new(&config.storage_key);
    let clearance = catalog::read_clearance(store.as_store());
    let scene = SceneState::new(SceneConfig::default(), zones.to_landmarks(), clearance);

    let document = document()?;
    update_clearance_badge(&document, &config, clearance);
    let (canvas, ctx) = attach_canvas(&document, &config.canvas_id)?;

    STATE.with(|state| {
        *state.borrow_mut() = Some(ViewerState {
            config,
            zones,
            scene,
            store,
            canvas: canvas.clone(),
            ctx,
        });
    });

    resize_canvas()?;
    register_listeners(&canvas)?;
    start_animation_loop()
}

async fn load_zones(url: &str) -> Result<ZoneDataset, JsValue> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "failed to load {url}: HTTP {}",
            resp.status()
        )));
    }
    let text = resp
        .text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    ZoneDataset::from_json_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn attach_canvas(
    document: &Document,
    canvas_id: &str,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("missing {canvas_id}")))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((canvas, ctx))
}

/// Matches the backing store to the CSS size times the device pixel ratio,
/// and keeps drawing in CSS pixels.
fn resize_canvas() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let dpr = match window.device_pixel_ratio() {
        r if r.is_finite() && r > 0.0 => r,
        _ => 1.0,
    };
    let resized = with_state(|state| {
        let mut guard = state.borrow_mut();
        let s = guard.as_mut()?;
        let rect = s.canvas.get_bounding_client_rect();
        s.canvas.set_width((rect.width() * dpr).round().max(0.0) as u32);
        s.canvas.set_height((rect.height() * dpr).round().max(0.0) as u32);
        let transform = s.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        s.scene.resize(Viewport::new(rect.width(), rect.height()));
        Some(transform)
    });
    resized.unwrap_or(Ok(()))
}

fn pointer_in_canvas(canvas: &HtmlCanvasElement, event: &web_sys::MouseEvent) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        f64::from(event.client_x()) - rect.left(),
        f64::from(event.client_y()) - rect.top(),
    )
}

fn register_listeners(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let resize_cb = Closure::wrap(Box::new(move || {
        if let Err(err) = resize_canvas() {
            log_error(&format!("[zones] resize failed: {:?}", err));
        }
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;
    resize_cb.forget();

    let mousemove_cb = {
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
            let pointer = pointer_in_canvas(&canvas, &e);
            update_scene(|state| {
                state.scene.pointer_moved(pointer);
            });
        }) as Box<dyn FnMut(web_sys::MouseEvent)>)
    };
    canvas.add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())?;
    mousemove_cb.forget();

    let mouseleave_cb = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
        update_scene(|state| {
            state.scene.pointer_left();
        });
    }) as Box<dyn FnMut(web_sys::MouseEvent)>);
    canvas
        .add_event_listener_with_callback("mouseleave", mouseleave_cb.as_ref().unchecked_ref())?;
    mouseleave_cb.forget();

    let click_cb = {
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
            let pointer = pointer_in_canvas(&canvas, &e);
            update_scene(|state| {
                state.scene.clicked(pointer);
            });
        }) as Box<dyn FnMut(web_sys::MouseEvent)>)
    };
    canvas.add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())?;
    click_cb.forget();

    let keydown_cb = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
        if e.key() == "Escape" {
            close_zone_detail();
        }
    }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);
    window.add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())?;
    keydown_cb.forget();

    Ok(())
}

/// One `requestAnimationFrame` callback that re-arms itself.
fn start_animation_loop() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let cell_loop = cell.clone();
    let window_loop = window.clone();

    *cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        render_frame();
        if let Some(cb) = cell_loop.borrow().as_ref() {
            let _ = window_loop.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = cell.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}

fn render_frame() {
    update_scene(|state| {
        let mut painter = CanvasPainter::new(&state.ctx);
        state.scene.render(&mut painter);
        state.scene.tick();
    });
}

/// Runs `f` against the live state, then applies whatever UI events it
/// raised.
fn update_scene<F>(f: F)
where
    F: FnOnce(&mut ViewerState),
{
    let events = with_state(|state| {
        let mut guard = state.borrow_mut();
        let Some(s) = guard.as_mut() else {
            return Vec::new();
        };
        f(s);
        s.scene.drain_events()
    });
    for event in events {
        apply_event(event.payload);
    }
}

fn with_document<F>(f: F)
where
    F: FnOnce(&Document, &WebConfig),
{
    let Ok(document) = document() else {
        return;
    };
    with_state(|state| {
        let guard = state.borrow();
        if let Some(s) = guard.as_ref() {
            f(&document, &s.config);
        }
    });
}

fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn apply_event(event: UiEvent) {
    let Ok(document) = document() else {
        return;
    };
    with_state(|state| {
        let guard = state.borrow();
        let Some(s) = guard.as_ref() else {
            return;
        };
        match event {
            UiEvent::HoverChanged { id } => show_intel(&document, s, id.as_deref()),
            UiEvent::OpenDetail { id } => {
                if let Some(zone) = s.zones.get(&id) {
                    show_modal(&document, &s.config, &DetailDocument::for_zone(zone));
                }
            }
            UiEvent::AccessDenied { name, required } => {
                show_modal(
                    &document,
                    &s.config,
                    &DetailDocument::access_denied(&name, &required),
                );
            }
        }
    });
}

fn show_intel(document: &Document, s: &ViewerState, id: Option<&str>) {
    let Some(panel) = document.get_element_by_id(&s.config.intel_panel_id) else {
        return;
    };
    let zone = id.and_then(|id| s.zones.get(id));
    let landmark = id.and_then(|id| s.scene.landmarks().find(id));

    match (zone, landmark) {
        (Some(zone), Some(landmark)) => {
            let _ = s.canvas.style().set_property("cursor", "pointer");
            let intel = IntelSummary::for_zone(zone, landmark.accessible);
            panel.set_inner_html(&html::intel_panel_html(&intel));
            let _ = panel.class_list().add_1("active");
        }
        _ => {
            let _ = s.canvas.style().set_property("cursor", "");
            let _ = panel.class_list().remove_1("active");
        }
    }
}

fn show_modal(document: &Document, config: &WebConfig, doc: &DetailDocument) {
    let (Some(modal), Some(content)) = (
        html_element(document, &config.modal_id),
        document.get_element_by_id(&config.modal_content_id),
    ) else {
        return;
    };
    content.set_inner_html(&html::detail_html(doc));
    let _ = modal.style().set_property("display", "flex");
    if let Some(body) = document.body() {
        let _ = body.style().set_property("overflow", "hidden");
    }
}

fn update_clearance_badge(document: &Document, config: &WebConfig, tier: ClearanceTier) {
    if let Some(badge) = document.get_element_by_id(&config.badge_id) {
        badge.set_text_content(Some(tier.label()));
        let classes = badge.class_list();
        let _ = if tier == ClearanceTier::Vibraline {
            classes.add_1("vibraline-tier")
        } else {
            classes.remove_1("vibraline-tier")
        };
    }
    if let Some(display) = document.get_element_by_id(&config.clearance_display_id) {
        display.set_text_content(Some(tier.label()));
    }
}
