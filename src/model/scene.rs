use glam::{Mat4, Quat, Vec3};

use crate::config::SceneConfig;
use crate::model::lighting::{
    AmbientLight, DirectionalLight, Lights, PointLight, ShadowCamera, ShadowSettings, SpotLight,
};
use crate::model::material::{BasicMaterial, StandardMaterial};

/// The sphere. Its position is rewritten every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingBody {
    pub position: Vec3,
    /// Accumulated spin about the local X axis in radians. Never wrapped.
    pub rotation_x: f64,
    pub radius: f32,
    pub material: StandardMaterial,
}

impl MovingBody {
    pub fn model_matrix(&self) -> Mat4 {
        // Reduce only for the matrix so the accumulator keeps its exact value
        let angle = self.rotation_x.rem_euclid(std::f64::consts::TAU) as f32;
        Mat4::from_rotation_translation(Quat::from_rotation_x(angle), self.position)
    }
}

/// Flat quad lying on the floor under the sphere
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowDecal {
    pub position: Vec3,
    pub size: f32,
    pub material: BasicMaterial,
}

impl ShadowDecal {
    pub fn opacity(&self) -> f32 {
        self.material.opacity
    }

    pub fn model_matrix(&self) -> Mat4 {
        flat_on_ground(self.position, self.size)
    }
}

/// The receiving plane
#[derive(Debug, Clone, PartialEq)]
pub struct Floor {
    pub position: Vec3,
    pub size: f32,
    pub material: StandardMaterial,
}

impl Floor {
    pub fn model_matrix(&self) -> Mat4 {
        flat_on_ground(self.position, self.size)
    }
}

// Planes are built in XY facing +Z; rotating -90° about X lays them on XZ facing +Y
fn flat_on_ground(position: Vec3, size: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::new(size, size, 1.0),
        Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
        position,
    )
}

pub struct Scene {
    pub lights: Lights,
    pub floor: Floor,
    pub body: MovingBody,
    pub decal: ShadowDecal,
    pub shadow_map_enabled: bool,
}

impl Scene {
    pub fn from_config(config: &SceneConfig) -> Self {
        let lights = Lights {
            ambient: AmbientLight {
                color: config.ambient.color.0,
                intensity: config.ambient.intensity,
            },
            directional: DirectionalLight {
                color: config.directional.color.0,
                intensity: config.directional.intensity,
                position: Vec3::from(config.directional.position),
                target: Vec3::ZERO,
                shadow: ShadowSettings {
                    cast_shadow: false,
                    map_width: 1024,
                    map_height: 1024,
                    camera: ShadowCamera::Orthographic {
                        left: -2.0,
                        right: 2.0,
                        top: 2.0,
                        bottom: -2.0,
                        near: 1.0,
                        far: 6.0,
                    },
                },
            },
            spot: SpotLight {
                color: config.spot.color.0,
                intensity: config.spot.intensity,
                distance: config.spot.distance,
                angle: config.spot.angle,
                penumbra: config.spot.penumbra,
                decay: config.spot.decay,
                position: Vec3::from(config.spot.position),
                target: Vec3::from(config.spot.target),
                shadow: ShadowSettings {
                    cast_shadow: false,
                    map_width: 1024,
                    map_height: 1024,
                    camera: ShadowCamera::Perspective { fov_y_deg: 30.0, near: 1.0, far: 6.0 },
                },
            },
            point: PointLight {
                color: config.point.color.0,
                intensity: config.point.intensity,
                distance: config.point.distance,
                decay: config.point.decay,
                position: Vec3::from(config.point.position),
                shadow: ShadowSettings {
                    cast_shadow: false,
                    map_width: 1024,
                    map_height: 1024,
                    camera: ShadowCamera::Cube { near: 0.1, far: 5.0 },
                },
            },
        };

        let floor = Floor {
            position: Vec3::new(0.0, config.floor.height, 0.0),
            size: config.floor.size,
            material: StandardMaterial {
                color: config.floor.color.0,
                metalness: config.floor.metalness,
                roughness: config.floor.roughness,
            },
        };

        let body = MovingBody {
            position: Vec3::ZERO,
            rotation_x: 0.0,
            radius: config.sphere.radius,
            material: StandardMaterial {
                color: config.sphere.color.0,
                metalness: config.sphere.metalness,
                roughness: config.sphere.roughness,
            },
        };

        let decal = ShadowDecal {
            position: Vec3::new(0.0, floor.position.y + config.decal.lift, 0.0),
            size: config.decal.size,
            material: BasicMaterial {
                color: config.decal.color.0,
                transparent: true,
                opacity: 1.0,
                use_alpha_map: true,
            },
        };

        Self {
            lights,
            floor,
            body,
            decal,
            shadow_map_enabled: config.shadow_map_enabled,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_stock_scene_layout() {
        let scene = Scene::default();
        assert_eq!(scene.floor.position.y, -0.5);
        assert_abs_diff_eq!(scene.decal.position.y, -0.49, epsilon = 1e-6);
        assert_eq!(scene.decal.size, 1.5);
        assert_eq!(scene.decal.opacity(), 1.0);
        assert_eq!(scene.body.radius, 0.5);
        assert_eq!(scene.body.rotation_x, 0.0);
        assert!(!scene.shadow_map_enabled);
        assert!(!scene.lights.directional.shadow.cast_shadow);
        assert_eq!(scene.lights.spot.shadow.map_width, 1024);
    }

    #[test]
    fn test_ground_planes_face_up() {
        let scene = Scene::default();
        let normal = scene.floor.model_matrix().transform_vector3(Vec3::Z).normalize();
        assert_abs_diff_eq!(normal.y, 1.0, epsilon = 1e-6);

        // unit quad corner lands on the floor's edge
        let corner = scene.floor.model_matrix().transform_point3(Vec3::new(0.5, 0.5, 0.0));
        assert_abs_diff_eq!(corner.x, 2.5, epsilon = 1e-5);
        assert_abs_diff_eq!(corner.y, -0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(corner.z, -2.5, epsilon = 1e-5);
    }

    #[test]
    fn test_body_matrix_uses_reduced_angle() {
        let mut body = Scene::default().body;
        body.position = Vec3::new(1.0, 2.0, 3.0);
        body.rotation_x = 3.0 * 1000.0;
        let expected = Mat4::from_rotation_translation(
            Quat::from_rotation_x((3000.0f64 % std::f64::consts::TAU) as f32),
            body.position,
        );
        assert!(body.model_matrix().abs_diff_eq(expected, 1e-5));
        assert_eq!(body.rotation_x, 3000.0);
    }
}
