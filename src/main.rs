use std::process::ExitCode;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

// Import from the library crate
use shadows::{config::AppConfig, logging, view::GpuContext, Result, ShadowsError};
use shadows::controller::{FrameLoopContext, InputEvent, MouseButton, SystemClock};

// Browsers report roughly this many pixels per wheel notch
const PIXELS_PER_LINE: f32 = 100.0;

struct Running {
    window: Arc<Window>,
    egui_state: egui_winit::State,
    ctx: FrameLoopContext<SystemClock>,
}

impl Running {
    fn new(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self> {
        let attributes = Window::default_attributes()
            .with_title(config.display.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(config.display.width, config.display.height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let size = window.inner_size();
        let scale = window.scale_factor() as f32;
        let gpu = pollster::block_on(GpuContext::new_native(window.clone(), size.width, size.height))?;
        let ctx = FrameLoopContext::new(gpu, config, SystemClock::new(), scale);

        let egui_state = egui_winit::State::new(
            ctx.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(scale),
            None,
            None,
        );

        Ok(Self { window, egui_state, ctx })
    }

    /// Translate events egui did not consume; positions in logical points
    fn to_input(&self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let p = position.to_logical::<f32>(self.window.scale_factor());
                Some(InputEvent::PointerMove { x: p.x, y: p.y })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    winit::event::MouseButton::Middle => MouseButton::Middle,
                    _ => return None,
                };
                let (x, y) = self.ctx.input.borrow().pointer_pos.unwrap_or((0.0, 0.0));
                Some(InputEvent::PointerButton { button, pressed: *state == ElementState::Pressed, x, y })
            }
            // winit counts scrolling up as positive, the web as negative
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                Some(InputEvent::Wheel { delta_y })
            }
            WindowEvent::Focused(false) | WindowEvent::CursorLeft { .. } => Some(InputEvent::FocusLost),
            _ => None,
        }
    }
}

#[derive(Default)]
struct App {
    config: AppConfig,
    running: Option<Running>,
    error: Option<ShadowsError>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match Running::new(event_loop, &self.config) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(app) = self.running.as_mut() else {
            return;
        };

        // First let egui process the event
        let consumed = app.egui_state.on_window_event(app.window.as_ref(), &event).consumed;

        match &event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                app.ctx.resize(size.width, size.height, app.window.scale_factor() as f32);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let size = app.window.inner_size();
                app.ctx.resize(size.width, size.height, *scale_factor as f32);
            }
            WindowEvent::RedrawRequested => {
                let raw_input = app.egui_state.take_egui_input(app.window.as_ref());
                let platform_output = app.ctx.frame(raw_input);
                app.egui_state.handle_platform_output(app.window.as_ref(), platform_output);
            }
            _ if !consumed => {
                if let Some(input) = app.to_input(&event) {
                    app.ctx.input.borrow_mut().process_event(&input);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &self.running {
            app.window.request_redraw();
        }
    }
}

fn run() -> Result<()> {
    let config = AppConfig::load()?;
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App { config, ..Default::default() };
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
