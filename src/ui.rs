use egui::{Context, RichText, Slider};

use crate::model::{Scene, ShadowCamera};

/// Numbers shown in the read-only part of the panel
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    pub fps: f32,
    pub elapsed: f64,
    pub frames: u64,
}

/// Frames per second, averaged over windows of at least one second
#[derive(Debug, Default)]
pub struct FpsCounter {
    fps: f32,
    frames: u32,
    window_start: Option<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a frame drawn at `now` seconds
    pub fn record(&mut self, now: f64) {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;
        let span = now - start;
        if span >= 1.0 {
            self.fps = (self.frames as f64 / span) as f32;
            self.frames = 0;
            self.window_start = Some(now);
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Build the debug panel. Slider edits go straight into `scene`.
pub fn draw_debug_panel(ctx: &Context, scene: &mut Scene, stats: &FrameStats) {
    egui::Window::new("Debug")
        .default_pos([8.0, 8.0])
        .default_width(220.0)
        .show(ctx, |ui| {
            draw_controls(ui, scene);
            ui.separator();
            draw_readout(ui, scene, stats);
        });
}

fn slider(ui: &mut egui::Ui, value: &mut f32, range: std::ops::RangeInclusive<f32>, label: &str) -> bool {
    ui.add(Slider::new(value, range).step_by(0.001).text(label)).changed()
}

fn draw_controls(ui: &mut egui::Ui, scene: &mut Scene) {
    let lights = &mut scene.lights;
    slider(ui, &mut lights.ambient.intensity, 0.0..=1.0, "ambient");
    slider(ui, &mut lights.directional.intensity, 0.0..=1.0, "directional");
    slider(ui, &mut lights.directional.position.x, -5.0..=5.0, "dir x");
    slider(ui, &mut lights.directional.position.y, -5.0..=5.0, "dir y");
    slider(ui, &mut lights.directional.position.z, -5.0..=5.0, "dir z");

    let floor = &mut scene.floor.material;
    slider(ui, &mut floor.metalness, 0.0..=1.0, "metalness");
    slider(ui, &mut floor.roughness, 0.0..=1.0, "roughness");

    ui.horizontal(|ui| {
        let mut rgb = scene.body.material.color.to_array();
        if ui.color_edit_button_rgb(&mut rgb).changed() {
            scene.body.material.color = rgb.into();
        }
        ui.label("sphere color");
    });
}

fn draw_readout(ui: &mut egui::Ui, scene: &Scene, stats: &FrameStats) {
    let p = scene.body.position;
    ui.label(RichText::new(format!("FPS: {:.0}", stats.fps)).small());
    ui.label(RichText::new(format!("Elapsed: {:.2}s  frame {}", stats.elapsed, stats.frames)).small());
    ui.label(RichText::new(format!("Sphere: x: {:.2} y: {:.2} z: {:.2}", p.x, p.y, p.z)).small());
    ui.label(RichText::new(format!("Shadow opacity: {:.3}", scene.decal.opacity())).small());
    ui.label(RichText::new(format!("Rotation: {:.0} rad", scene.body.rotation_x)).small());
    ui.label(
        RichText::new(format!(
            "Shadow maps: {}",
            if scene.shadow_map_enabled { "on" } else { "off (faked)" }
        ))
        .small(),
    );

    ui.collapsing("Shadow cameras", |ui| {
        let lights = &scene.lights;
        for (name, shadow) in [
            ("directional", &lights.directional.shadow),
            ("spot", &lights.spot.shadow),
            ("point", &lights.point.shadow),
        ] {
            let kind = match shadow.camera {
                ShadowCamera::Orthographic { .. } => "ortho",
                ShadowCamera::Perspective { .. } => "persp",
                ShadowCamera::Cube { .. } => "cube",
            };
            let proj = shadow.camera.projection();
            ui.label(
                RichText::new(format!(
                    "{name}: {kind} {:.1}..{:.1}  {}x{}  sx {:.2} sy {:.2}",
                    shadow.camera.near(),
                    shadow.camera.far(),
                    shadow.map_width,
                    shadow.map_height,
                    proj.x_axis.x,
                    proj.y_axis.y,
                ))
                .small(),
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_counter_waits_for_a_full_second() {
        let mut fps = FpsCounter::new();
        for i in 0..30 {
            fps.record(i as f64 / 60.0);
        }
        assert_eq!(fps.fps(), 0.0);
        for i in 30..=60 {
            fps.record(i as f64 / 60.0);
        }
        // 61 frames over exactly one second
        assert!((fps.fps() - 61.0).abs() < 1e-3);
    }

    #[test]
    fn test_panel_builds_without_touching_scene() {
        let ctx = Context::default();
        let mut scene = Scene::default();
        let before = (scene.lights.ambient.intensity, scene.floor.material, scene.body.material);
        let stats = FrameStats { fps: 60.0, elapsed: 1.0, frames: 60 };
        let _ = ctx.run(egui::RawInput::default(), |ctx| draw_debug_panel(ctx, &mut scene, &stats));
        assert_eq!(before, (scene.lights.ambient.intensity, scene.floor.material, scene.body.material));
    }
}
