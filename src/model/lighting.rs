use glam::{Mat4, Vec3};

/// Shadow map resolution, kept for every light even though shadow maps are off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSettings {
    pub cast_shadow: bool,
    pub map_width: u32,
    pub map_height: u32,
    pub camera: ShadowCamera,
}

/// Frustum used when a light renders its shadow map
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadowCamera {
    Orthographic { left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32 },
    Perspective { fov_y_deg: f32, near: f32, far: f32 },
    /// Point lights render six 90° faces
    Cube { near: f32, far: f32 },
}

impl ShadowCamera {
    pub fn near(&self) -> f32 {
        match *self {
            ShadowCamera::Orthographic { near, .. }
            | ShadowCamera::Perspective { near, .. }
            | ShadowCamera::Cube { near, .. } => near,
        }
    }

    pub fn far(&self) -> f32 {
        match *self {
            ShadowCamera::Orthographic { far, .. }
            | ShadowCamera::Perspective { far, .. }
            | ShadowCamera::Cube { far, .. } => far,
        }
    }

    /// Projection matrix of the shadow frustum (square shadow maps)
    pub fn projection(&self) -> Mat4 {
        match *self {
            ShadowCamera::Orthographic { left, right, top, bottom, near, far } => {
                Mat4::orthographic_rh(left, right, bottom, top, near, far)
            }
            ShadowCamera::Perspective { fov_y_deg, near, far } => {
                Mat4::perspective_rh(fov_y_deg.to_radians(), 1.0, near, far)
            }
            ShadowCamera::Cube { near, far } => {
                Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, near, far)
            }
        }
    }
}

pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub shadow: ShadowSettings,
}

impl DirectionalLight {
    /// Unit vector pointing from the lit surface towards the light
    pub fn direction(&self) -> Vec3 {
        (self.position - self.target).normalize_or_zero()
    }
}

pub struct SpotLight {
    pub color: Vec3,
    pub intensity: f32,
    /// 0 means no range cutoff
    pub distance: f32,
    /// Half-angle of the cone in radians
    pub angle: f32,
    pub penumbra: f32,
    pub decay: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub shadow: ShadowSettings,
}

impl SpotLight {
    /// Unit vector along the cone axis, from the light towards its target
    pub fn axis(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn cone_cos(&self) -> f32 {
        self.angle.cos()
    }

    pub fn penumbra_cos(&self) -> f32 {
        (self.angle * (1.0 - self.penumbra)).cos()
    }
}

pub struct PointLight {
    pub color: Vec3,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
    pub position: Vec3,
    pub shadow: ShadowSettings,
}

/// All lights of the scene. The renderer supports exactly this set.
pub struct Lights {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub spot: SpotLight,
    pub point: PointLight,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    fn spot(penumbra: f32) -> SpotLight {
        SpotLight {
            color: Vec3::ONE,
            intensity: 2.0,
            distance: 6.0,
            angle: PI * 0.15,
            penumbra,
            decay: 2.0,
            position: Vec3::new(2.8, 3.0, 3.0),
            target: Vec3::ZERO,
            shadow: ShadowSettings {
                cast_shadow: false,
                map_width: 1024,
                map_height: 1024,
                camera: ShadowCamera::Perspective { fov_y_deg: 30.0, near: 1.0, far: 6.0 },
            },
        }
    }

    #[test]
    fn test_soft_penumbra_narrows_inner_cone() {
        let hard = spot(0.0);
        assert_eq!(hard.cone_cos(), hard.penumbra_cos());
        let soft = spot(0.5);
        assert!(soft.penumbra_cos() > soft.cone_cos());
        assert_abs_diff_eq!(soft.penumbra_cos(), (PI * 0.075).cos(), epsilon = 1e-6);
    }

    #[test]
    fn test_spot_axis_points_at_target() {
        let light = spot(0.0);
        let axis = light.axis();
        assert_abs_diff_eq!(axis.length(), 1.0, epsilon = 1e-6);
        assert!(axis.x < 0.0 && axis.y < 0.0 && axis.z < 0.0);
    }

    #[test]
    fn test_shadow_camera_projection_maps_near_plane() {
        let cam = ShadowCamera::Orthographic { left: -2.0, right: 2.0, top: 2.0, bottom: -2.0, near: 1.0, far: 6.0 };
        let near_point = cam.projection().project_point3(Vec3::new(2.0, 2.0, -1.0));
        assert_abs_diff_eq!(near_point.x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(near_point.y, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(near_point.z, 0.0, epsilon = 1e-5);
        assert_eq!(cam.near(), 1.0);
        assert_eq!(cam.far(), 6.0);

        let cube = ShadowCamera::Cube { near: 0.1, far: 5.0 };
        let far_point = cube.projection().project_point3(Vec3::new(0.0, 0.0, -5.0));
        assert_abs_diff_eq!(far_point.z, 1.0, epsilon = 1e-4);
    }
}
