use glam::{Mat4, Vec3};

pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    /// Perspective camera with a vertical field of view in degrees
    pub fn new(fov_y_deg: f32, width: u32, height: u32, z_near: f32, z_far: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: fov_y_deg.to_radians(),
            aspect: aspect_ratio(width, height),
            z_near,
            z_far,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) { self.aspect = aspect_ratio(width, height); }

    pub fn set_look_at(&mut self, target: Vec3) { self.target = target; }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

// A zero-height surface happens while a window is minimized
fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
