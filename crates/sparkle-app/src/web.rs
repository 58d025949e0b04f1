//! WebAssembly entry point: DOM listeners, 2D canvas painting and the
//! sparkle interval timer.

use crate::AppError;
use crate::settings::apply_params;
use kurbo::{Point, Size, Vec2};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sparkle_core::canvas::Canvas;
use sparkle_core::config::CanvasConfig;
use sparkle_core::input::{EventResponse, InputEvent};
use sparkle_render::{Canvas2dSurface, RenderContext, paint};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent,
    WheelEvent,
};

/// Id of the canvas element the app draws into.
const CANVAS_ID: &str = "sparkle-canvas";
const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;

/// Everything the listeners share. Only ever touched from the browser's
/// single event-loop thread.
struct WebApp {
    canvas: Canvas,
    surface: Canvas2dSurface,
    element: HtmlCanvasElement,
    /// Random source for sparkle scatter.
    rng: SmallRng,
}

impl WebApp {
    fn redraw(&mut self) {
        let size = Size::new(f64::from(self.element.width()), f64::from(self.element.height()));
        let ctx = RenderContext::new(&self.canvas, size);
        if let Err(e) = paint(&mut self.surface, &ctx, &mut self.rng) {
            log::warn!("Frame dropped: {}", e);
        }
    }

    fn handle(&mut self, event: InputEvent) -> EventResponse {
        let response = self.canvas.handle_event(event);
        if response.redraw {
            self.redraw();
        }
        response
    }

    /// Translate client coordinates into surface-local ones.
    fn local_point(&self, event: &MouseEvent) -> Point {
        let rect = self.element.get_bounding_client_rect();
        Point::new(
            f64::from(event.client_x()) - rect.left(),
            f64::from(event.client_y()) - rect.top(),
        )
    }
}

/// Read config overrides from the page URL (query string, then hash).
fn load_config(window: &web_sys::Window) -> Result<CanvasConfig, AppError> {
    let mut config = CanvasConfig::default();
    let location = window.location();
    if let Ok(search) = location.search() {
        apply_params(&mut config, &search)?;
    }
    if let Ok(hash) = location.hash() {
        apply_params(&mut config, &hash)?;
    }
    Ok(config)
}

/// Find the app canvas or create one under `<body>`.
fn find_or_create_canvas(document: &Document) -> Result<HtmlCanvasElement, AppError> {
    if let Some(element) = document.get_element_by_id(CANVAS_ID) {
        return element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::Web(format!("#{} is not a canvas", CANVAS_ID)));
    }

    let canvas = document
        .create_element("canvas")
        .map_err(js_error)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| AppError::Web("created element is not a canvas".to_string()))?;
    canvas.set_id(CANVAS_ID);
    canvas.set_width(DEFAULT_WIDTH);
    canvas.set_height(DEFAULT_HEIGHT);
    let body = document
        .body()
        .ok_or_else(|| AppError::Web("document has no body".to_string()))?;
    body.append_child(&canvas).map_err(js_error)?;
    Ok(canvas)
}

fn js_error(e: JsValue) -> AppError {
    AppError::Web(format!("{:?}", e))
}

/// Register `handler` for `kind` events on `target` for the page lifetime.
fn listen<E, F>(
    target: &EventTarget,
    kind: &str,
    passive: bool,
    handler: F,
) -> Result<(), AppError>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

fn start() -> Result<(), AppError> {
    let window = web_sys::window().ok_or_else(|| AppError::Web("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| AppError::Web("no document".to_string()))?;

    let config = load_config(&window).unwrap_or_else(|e| {
        log::error!("Ignoring URL config: {}; using defaults", e);
        CanvasConfig::default()
    });
    log::info!("Config: {:?}", config);
    crate::ShortcutRegistry::log_all(&config);

    let element = find_or_create_canvas(&document)?;
    let surface = Canvas2dSurface::from_canvas(&element)?;
    let seed = crate::seed_from_clock();
    let interval_ms = config.redraw_interval_ms;

    let app = Rc::new(RefCell::new(WebApp {
        canvas: Canvas::seeded(config, seed),
        surface,
        element: element.clone(),
        rng: SmallRng::seed_from_u64(seed.rotate_left(32)),
    }));

    let target: &EventTarget = element.as_ref();

    let state = app.clone();
    listen(target, "click", true, move |e: MouseEvent| {
        let mut app = state.borrow_mut();
        let position = app.local_point(&e);
        app.handle(InputEvent::Click { position });
    })?;

    let state = app.clone();
    listen(target, "mousedown", true, move |e: MouseEvent| {
        let mut app = state.borrow_mut();
        let position = app.local_point(&e);
        app.handle(InputEvent::Press { position });
    })?;

    let state = app.clone();
    listen(target, "mousemove", true, move |e: MouseEvent| {
        let mut app = state.borrow_mut();
        let position = app.local_point(&e);
        app.handle(InputEvent::Move { position });
    })?;

    let state = app.clone();
    listen(target, "mouseup", true, move |_: MouseEvent| {
        state.borrow_mut().handle(InputEvent::Release);
    })?;

    // Not passive: scrolling over a selected circle must not scroll the page.
    let state = app.clone();
    listen(target, "wheel", false, move |e: WheelEvent| {
        let response = state.borrow_mut().handle(InputEvent::Scroll {
            delta: Vec2::new(e.delta_x(), e.delta_y()),
        });
        if response.prevent_default {
            e.prevent_default();
        }
    })?;

    let state = app.clone();
    listen(document.as_ref(), "keydown", true, move |e: KeyboardEvent| {
        state.borrow_mut().handle(InputEvent::Key(e.key()));
    })?;

    let state = app.clone();
    let tick = Closure::<dyn FnMut()>::new(move || state.borrow_mut().redraw());
    window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            i32::try_from(interval_ms).unwrap_or(i32::MAX),
        )
        .map_err(js_error)?;
    tick.forget();

    app.borrow_mut().redraw();
    log::info!("Sparkle started on #{}", CANVAS_ID);
    Ok(())
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to initialize logger: {}", e).into());
    }

    log::info!("Starting Sparkle (WASM)");
    if let Err(e) = start() {
        log::error!("Failed to start Sparkle: {}", e);
    }
}
