use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::config::OrbitConfig;
use crate::model::Camera;

const EPS: f32 = 1e-6;

/// Orbit around a target: drag rotates, wheel dollies
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    // pending (theta, phi) change, decays each update when damping
    spherical_delta: (f32, f32),
    scale: f32,
}

impl OrbitControls {
    pub fn new(target: Vec3, config: &OrbitConfig) -> Self {
        Self {
            target,
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            spherical_delta: (0.0, 0.0),
            scale: 1.0,
        }
    }

    /// Pointer drag of `(dx, dy)` over a viewport `viewport_height` tall, in the same units
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.spherical_delta.0 -= TAU * dx / viewport_height * self.rotate_speed;
        self.spherical_delta.1 -= TAU * dy / viewport_height * self.rotate_speed;
    }

    /// Wheel step; negative moves closer
    pub fn dolly(&mut self, delta_y: f32) {
        let zoom = 0.95f32.powf(self.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= zoom;
        } else if delta_y > 0.0 {
            self.scale /= zoom;
        }
    }

    /// Apply pending input to the camera. Returns whether it moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let offset = camera.eye - self.target;
        let radius = offset.length().max(EPS);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let factor = if self.enable_damping { self.damping_factor } else { 1.0 };
        theta += self.spherical_delta.0 * factor;
        phi += self.spherical_delta.1 * factor;
        phi = phi.clamp(EPS, PI - EPS);

        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let new_eye = self.target
            + Vec3::new(radius * sin_phi * theta.sin(), radius * phi.cos(), radius * sin_phi * theta.cos());

        if self.enable_damping {
            self.spherical_delta.0 *= 1.0 - self.damping_factor;
            self.spherical_delta.1 *= 1.0 - self.damping_factor;
        } else {
            self.spherical_delta = (0.0, 0.0);
        }
        self.scale = 1.0;

        let moved = new_eye.distance_squared(camera.eye) > EPS;
        camera.eye = new_eye;
        camera.set_look_at(self.target);
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn setup() -> (OrbitControls, Camera) {
        let mut camera = Camera::new(75.0, 800, 600, 0.1, 100.0);
        camera.eye = Vec3::new(1.0, 1.0, 2.0);
        camera.set_look_at(Vec3::ZERO);
        (OrbitControls::new(Vec3::ZERO, &OrbitConfig::default()), camera)
    }

    fn azimuth(eye: Vec3) -> f32 {
        eye.x.atan2(eye.z)
    }

    #[test]
    fn test_update_without_input_keeps_camera() {
        let (mut controls, mut camera) = setup();
        let before = camera.eye;
        assert!(!controls.update(&mut camera));
        assert!(camera.eye.abs_diff_eq(before, 1e-5));
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn test_damped_drag_converges_to_full_rotation() {
        let (mut controls, mut camera) = setup();
        let start = azimuth(camera.eye);
        let radius = camera.eye.length();

        // a drag of h/(2π) pixels asks for exactly -1 rad of azimuth
        let h = 600.0;
        controls.rotate(h / TAU, 0.0, h);
        let first_moved = controls.update(&mut camera);
        assert!(first_moved);
        // only a fraction applies on the first frame
        assert_abs_diff_eq!(azimuth(camera.eye), start - 0.05, epsilon = 1e-4);

        for _ in 0..1000 {
            controls.update(&mut camera);
        }
        assert_abs_diff_eq!(azimuth(camera.eye), start - 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(camera.eye.length(), radius, epsilon = 1e-4);
    }

    #[test]
    fn test_undamped_drag_applies_at_once() {
        let (mut controls, mut camera) = setup();
        controls.enable_damping = false;
        let start = azimuth(camera.eye);
        controls.rotate(-300.0 / TAU, 0.0, 300.0);
        controls.update(&mut camera);
        assert_abs_diff_eq!(azimuth(camera.eye), start + 1.0, epsilon = 1e-4);
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_polar_angle_never_flips_over_the_pole() {
        let (mut controls, mut camera) = setup();
        controls.enable_damping = false;
        controls.rotate(0.0, 10_000.0, 600.0);
        controls.update(&mut camera);
        assert!(camera.eye.y > 0.0);
        let horizontal = Vec3::new(camera.eye.x, 0.0, camera.eye.z).length();
        assert!(horizontal > 0.0 && horizontal < 1e-2);
    }

    #[test]
    fn test_dolly_respects_distance_limits() {
        let (mut controls, mut camera) = setup();
        controls.max_distance = 4.0;
        for _ in 0..200 {
            controls.dolly(1.0);
            controls.update(&mut camera);
        }
        assert_abs_diff_eq!(camera.eye.length(), 4.0, epsilon = 1e-4);

        for _ in 0..500 {
            controls.dolly(-1.0);
            controls.update(&mut camera);
        }
        assert_abs_diff_eq!(camera.eye.length(), 0.1, epsilon = 1e-4);
    }

    #[test]
    fn test_single_wheel_step_scales_distance() {
        let (mut controls, mut camera) = setup();
        let radius = camera.eye.length();
        controls.dolly(-120.0);
        controls.update(&mut camera);
        assert_abs_diff_eq!(camera.eye.length(), radius * 0.95, epsilon = 1e-5);
    }
}
