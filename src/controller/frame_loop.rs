use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use crate::assets;
use crate::config::{AppConfig, CameraConfig};
use crate::controller::animation::{Clock, FrameUpdater};
use crate::controller::input::InputState;
use crate::controller::orbit_controls::OrbitControls;
use crate::model::{Camera, Scene};
use crate::ui::{self, FpsCounter, FrameStats};
use crate::view::{GpuContext, SceneRenderer};

/// Everything one frame touches, shared by the web and native loops
pub struct FrameLoopContext<C: Clock> {
    pub scene: Scene,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub updater: FrameUpdater<C>,
    pub renderer: SceneRenderer,
    pub egui_ctx: egui::Context,
    pub input: Rc<RefCell<InputState>>,
    pub fps: FpsCounter,
    /// Physical pixels per UI point
    pub pixels_per_point: f32,
}

/// Perspective camera placed and aimed as configured
pub fn camera_from_config(config: &CameraConfig, width: u32, height: u32) -> Camera {
    let mut camera = Camera::new(config.fov_deg, width, height, config.near, config.far);
    camera.eye = Vec3::from(config.position);
    camera.set_look_at(Vec3::from(config.target));
    camera
}

impl<C: Clock> FrameLoopContext<C> {
    pub fn new(gpu: GpuContext, config: &AppConfig, clock: C, pixels_per_point: f32) -> Self {
        let scene = Scene::from_config(&config.scene);
        let camera = camera_from_config(&config.scene.camera, gpu.config.width, gpu.config.height);
        let controls = OrbitControls::new(camera.target, &config.scene.orbit);
        let alpha_map = assets::load_alpha_map(config.alpha_map.as_deref());
        let renderer = SceneRenderer::new(gpu, &scene, config, &alpha_map);

        tracing::info!(
            "scene ready: {}x{} @ {:.2} ppp",
            renderer.width,
            renderer.height,
            pixels_per_point
        );

        Self {
            scene,
            camera,
            controls,
            updater: FrameUpdater::new(clock),
            renderer,
            egui_ctx: egui::Context::default(),
            input: Rc::new(RefCell::new(InputState::new())),
            fps: FpsCounter::new(),
            pixels_per_point,
        }
    }

    /// Orbit controls, debug panel, then the animation step and draw.
    /// Returns egui's platform output for the caller to apply.
    pub fn frame(&mut self, mut raw_input: egui::RawInput) -> egui::PlatformOutput {
        let (dx, dy) = {
            let mut input = self.input.borrow_mut();
            self.controls.dolly(input.consume_wheel());
            input.consume_drag()
        };
        let viewport_height = self.renderer.height as f32 / self.pixels_per_point;
        self.controls.rotate(dx, dy, viewport_height);
        self.controls.update(&mut self.camera);

        let stats = FrameStats {
            fps: self.fps.fps(),
            elapsed: self.updater.last_elapsed(),
            frames: self.updater.frames(),
        };
        raw_input.screen_rect = Some(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(
                self.renderer.width as f32 / self.pixels_per_point,
                self.renderer.height as f32 / self.pixels_per_point,
            ),
        ));
        self.egui_ctx.set_pixels_per_point(self.pixels_per_point);
        let scene = &mut self.scene;
        let full_output = self
            .egui_ctx
            .run(raw_input, |ctx| ui::draw_debug_panel(ctx, scene, &stats));
        self.input.borrow_mut().ui_captures_pointer =
            self.egui_ctx.wants_pointer_input() || self.egui_ctx.is_pointer_over_area();

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        self.renderer
            .set_ui(primitives, full_output.textures_delta, full_output.pixels_per_point);

        self.updater.tick(&mut self.scene, &self.camera, &mut self.renderer);
        self.fps.record(self.updater.last_elapsed());

        full_output.platform_output
    }

    /// New drawable size in physical pixels
    pub fn resize(&mut self, width: u32, height: u32, pixels_per_point: f32) {
        self.pixels_per_point = pixels_per_point;
        if width == 0 || height == 0 {
            return;
        }
        self.camera.set_aspect(width, height);
        self.renderer.resize(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_stock_camera_looks_at_origin() {
        let camera = camera_from_config(&CameraConfig::default(), 800, 600);
        assert_eq!(camera.eye, Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert_abs_diff_eq!(camera.fov_y, 75f32.to_radians(), epsilon = 1e-6);
        assert_abs_diff_eq!(camera.aspect, 800.0 / 600.0, epsilon = 1e-6);
        assert_eq!((camera.z_near, camera.z_far), (0.1, 100.0));
    }
}
