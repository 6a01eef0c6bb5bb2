use glam::Vec3;

/// Lit metallic/roughness material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardMaterial {
    pub color: Vec3,
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            metalness: 0.0,
            roughness: 1.0,
        }
    }
}

/// Unlit material. `opacity` is passed to the shader as is, never clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicMaterial {
    pub color: Vec3,
    pub transparent: bool,
    pub opacity: f32,
    /// Whether the alpha channel is modulated by the shadow alpha map
    pub use_alpha_map: bool,
}

impl BasicMaterial {
    pub fn effective_opacity(&self) -> f32 {
        if self.transparent { self.opacity } else { 1.0 }
    }
}
