// Re-export all public modules so they can be used from main.rs
pub mod assets;
pub mod config;
pub mod error;
pub mod logging;
pub mod ui;
pub mod utils;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use error::{Result, ShadowsError};

#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

#[cfg(target_arch = "wasm32")]
use config::{AppConfig, DisplayConfig};
#[cfg(target_arch = "wasm32")]
use controller::input::{wasm as web_input, InputEvent, InputState};
#[cfg(target_arch = "wasm32")]
use controller::{FrameLoopContext, SystemClock};
#[cfg(target_arch = "wasm32")]
use view::GpuContext;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() -> std::result::Result<(), JsValue> {
    logging::init();
    run().await.map_err(|e| {
        tracing::error!("startup failed: {e}");
        js_error(e)
    })
}

#[cfg(target_arch = "wasm32")]
async fn run() -> Result<()> {
    let config = AppConfig::load()?;
    let (window, canvas) = init_canvas(&config.display)?;
    setup_app(window, canvas, &config).await
}

/// Main application setup for WASM
#[cfg(target_arch = "wasm32")]
async fn setup_app(window: Window, canvas: HtmlCanvasElement, config: &AppConfig) -> Result<()> {
    let (width, height, pixel_ratio) = fit_canvas(&window, &canvas, &config.display);
    let gpu = GpuContext::new(&canvas, width, height).await?;
    let mut ctx = FrameLoopContext::new(gpu, config, SystemClock::new(), pixel_ratio);

    // egui has no platform integration here, so DOM events reach it through the queue
    ctx.input.borrow_mut().forward_to_egui = true;
    setup_input_listeners(&window, &canvas, ctx.input.clone())?;

    // Continuous redraw using requestAnimationFrame
    let display = config.display.clone();
    let loop_window = window.clone();
    AnimationFrameLoop::new(window, move || {
        let (w, h, ratio) = fit_canvas(&loop_window, &canvas, &display);
        ctx.resize(w, h, ratio);

        let mut raw_input = egui::RawInput::default();
        raw_input.time = Some(ctx.updater.last_elapsed());
        raw_input.events = ctx.input.borrow_mut().take_egui_events();
        // no clipboard or cursor handling on the web
        let _ = ctx.frame(raw_input);
    })
    .start()
}

/// Size the drawing buffer to the window at `min(devicePixelRatio, max)`.
/// Returns the physical size and the ratio used.
#[cfg(target_arch = "wasm32")]
fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement, display: &DisplayConfig) -> (u32, u32, f32) {
    let css_width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(display.width as f64);
    let css_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(display.height as f64);
    let ratio = display.pixel_ratio(window.device_pixel_ratio());

    let width = ((css_width * ratio).round() as u32).max(1);
    let height = ((css_height * ratio).round() as u32).max(1);
    if canvas.width() != width || canvas.height() != height {
        canvas.set_width(width);
        canvas.set_height(height);
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{css_width}px"));
        let _ = style.set_property("height", &format!("{css_height}px"));
    }
    (width, height, ratio as f32)
}

/// Setup mouse listeners feeding the shared input state
#[cfg(target_arch = "wasm32")]
fn setup_input_listeners(
    window: &Window,
    canvas: &HtmlCanvasElement,
    input_state: Rc<RefCell<InputState>>,
) -> Result<()> {
    {
        let input_state = input_state.clone();
        listen_mouse(canvas, "mousemove", move |e| {
            input_state.borrow_mut().process_event(&web_input::mouse_move_to_input(&e));
        })?;
    }
    {
        let input_state = input_state.clone();
        listen_mouse(canvas, "mousedown", move |e| {
            input_state.borrow_mut().process_event(&web_input::mouse_button_to_input(&e, true));
        })?;
    }
    {
        // released anywhere, so a drag that leaves the canvas still ends
        let input_state = input_state.clone();
        listen_mouse(window, "mouseup", move |e| {
            input_state.borrow_mut().process_event(&web_input::mouse_button_to_input(&e, false));
        })?;
    }
    listen_mouse(canvas, "contextmenu", |e| e.prevent_default())?;

    // Wheel zoom
    {
        let input_state = input_state.clone();
        let wheel = Closure::wrap(Box::new(move |e: WheelEvent| {
            e.prevent_default();
            input_state.borrow_mut().process_event(&web_input::wheel_to_input(&e));
        }) as Box<dyn FnMut(WheelEvent)>);
        canvas
            .add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        wheel.forget();
    }

    // Focus lost
    {
        let blur = Closure::wrap(Box::new(move |_e: Event| {
            input_state.borrow_mut().process_event(&InputEvent::FocusLost);
        }) as Box<dyn FnMut(Event)>);
        window
            .add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        blur.forget();
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn listen_mouse(target: &EventTarget, name: &str, f: impl FnMut(MouseEvent) + 'static) -> Result<()> {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(MouseEvent)>);
    target
        .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
        .map_err(dom_error)?;
    // listeners live as long as the page
    closure.forget();
    Ok(())
}

/// Use the configured canvas, or append a new one to `<body>`
#[cfg(target_arch = "wasm32")]
fn init_canvas(display: &DisplayConfig) -> Result<(Window, HtmlCanvasElement)> {
    let window = web_sys::window().ok_or_else(|| ShadowsError::Dom("no global `window`".into()))?;
    let document = window
        .document()
        .ok_or_else(|| ShadowsError::Dom("no document on window".into()))?;

    let canvas = match &display.canvas_id {
        Some(id) => document
            .get_element_by_id(id)
            .ok_or_else(|| ShadowsError::Dom(format!("no element with id `{id}`")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ShadowsError::Dom(format!("`{id}` is not a canvas")))?,
        None => {
            let body = document
                .body()
                .ok_or_else(|| ShadowsError::Dom("no body on document".into()))?;
            let canvas = document
                .create_element("canvas")
                .map_err(dom_error)?
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| ShadowsError::Dom("failed to create canvas".into()))?;
            canvas.set_width(display.width);
            canvas.set_height(display.height);
            body.append_child(&canvas).map_err(dom_error)?;
            canvas
        }
    };
    tracing::info!("rendering into canvas {}x{}", canvas.width(), canvas.height());
    Ok((window, canvas))
}

#[cfg(target_arch = "wasm32")]
fn dom_error(value: JsValue) -> ShadowsError {
    ShadowsError::Dom(format!("{value:?}"))
}

#[cfg(target_arch = "wasm32")]
fn js_error(e: ShadowsError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Calls `step` once per display refresh, forever
#[cfg(target_arch = "wasm32")]
struct AnimationFrameLoop {
    window: Window,
    step: Box<dyn FnMut()>,
}

#[cfg(target_arch = "wasm32")]
impl AnimationFrameLoop {
    fn new(window: Window, step: impl FnMut() + 'static) -> Self {
        Self { window, step: Box::new(step) }
    }

    fn start(self) -> Result<()> {
        let Self { window, mut step } = self;

        // The closure holds an Rc to itself so it can reschedule; the cycle keeps it alive
        let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
        let callback_clone = callback.clone();
        let loop_window = window.clone();

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            step();

            // Recursively schedule next frame
            if let Some(cb) = callback_clone.borrow().as_ref() {
                if let Err(e) = loop_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    tracing::error!("requestAnimationFrame failed, animation stopped: {e:?}");
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = callback.borrow().as_ref() {
            window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(dom_error)?;
        }
        Ok(())
    }
}
