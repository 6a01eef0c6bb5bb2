//! Startup configuration.
//!
//! Every field has a default matching the stock demo, so an empty TOML file
//! (or no file at all) reproduces it exactly.

use std::fmt;
use std::path::PathBuf;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShadowsError};

/// Linear RGB color written as `#rrggbb` or a basic color name
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub Vec3);

impl Color {
    pub const WHITE: Color = Color(Vec3::ONE);
    pub const BLACK: Color = Color(Vec3::ZERO);

    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            let value = u32::from_str_radix(hex, 16).ok()?;
            let channel = |shift: u32| ((value >> shift) & 0xff) as f32 / 255.0;
            return Some(Color(Vec3::new(channel(16), channel(8), channel(0))));
        }
        match s.to_ascii_lowercase().as_str() {
            "white" => Some(Color::WHITE),
            "black" => Some(Color::BLACK),
            "red" => Some(Color(Vec3::X)),
            "green" => Some(Color(Vec3::new(0.0, 128.0 / 255.0, 0.0))),
            "blue" => Some(Color(Vec3::Z)),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = self.0.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
        [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        Color::parse(&s).ok_or_else(|| format!("unrecognized color `{s}`"))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scene: SceneConfig,
    pub display: DisplayConfig,
    /// Grayscale image used as the decal's alpha map; procedural when unset
    pub alpha_map: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let s = &self.scene;
        if s.sphere.radius <= 0.0 {
            return Err(ShadowsError::Config("sphere.radius must be positive".into()));
        }
        if s.sphere.width_segments < 3 || s.sphere.height_segments < 2 {
            return Err(ShadowsError::Config(
                "sphere needs at least 3 width and 2 height segments".into(),
            ));
        }
        if s.camera.near <= 0.0 || s.camera.far <= s.camera.near {
            return Err(ShadowsError::Config("camera planes must satisfy 0 < near < far".into()));
        }
        if s.shadow_map_enabled {
            return Err(ShadowsError::Config(
                "scene.shadow_map_enabled: there is no shadow map pass, the shadow is a decal".into(),
            ));
        }
        if self.display.max_pixel_ratio <= 0.0 {
            return Err(ShadowsError::Config("display.max_pixel_ratio must be positive".into()));
        }
        Ok(())
    }

    /// Load from `SHADOWS_CONFIG`, else `shadows.toml` in the working
    /// directory, else defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os("SHADOWS_CONFIG") {
            Some(p) => PathBuf::from(p),
            None => {
                let local = PathBuf::from("shadows.toml");
                if !local.exists() {
                    tracing::info!("no shadows.toml found, using default configuration");
                    return Ok(Self::default());
                }
                local
            }
        };
        tracing::info!("loading configuration from {}", path.display());
        let text = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&text)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self> {
        Ok(Self::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub max_pixel_ratio: f64,
    pub clear_color: Color,
    /// Existing canvas to render into; a new one is appended to `<body>` otherwise
    pub canvas_id: Option<String>,
    pub title: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            max_pixel_ratio: 2.0,
            clear_color: Color::BLACK,
            canvas_id: None,
            title: "Shadows".to_string(),
        }
    }
}

impl DisplayConfig {
    pub fn pixel_ratio(&self, device_pixel_ratio: f64) -> f64 {
        device_pixel_ratio.min(self.max_pixel_ratio)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub ambient: AmbientConfig,
    pub directional: DirectionalConfig,
    pub spot: SpotConfig,
    pub point: PointConfig,
    pub floor: FloorConfig,
    pub sphere: SphereConfig,
    pub decal: DecalConfig,
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub shadow_map_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    pub color: Color,
    pub intensity: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self { color: Color::WHITE, intensity: 0.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalConfig {
    pub color: Color,
    pub intensity: f32,
    pub position: [f32; 3],
}

impl Default for DirectionalConfig {
    fn default() -> Self {
        Self { color: Color::WHITE, intensity: 0.4, position: [2.0, 2.0, -1.0] }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotConfig {
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    /// Cone half-angle in radians
    pub angle: f32,
    pub penumbra: f32,
    pub decay: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for SpotConfig {
    fn default() -> Self {
        Self {
            color: Color(Vec3::new(189.0, 166.0, 231.0) / 255.0),
            intensity: 2.0,
            distance: 6.0,
            angle: std::f32::consts::PI * 0.15,
            penumbra: 0.0,
            decay: 2.0,
            position: [2.8, 3.0, 3.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointConfig {
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
    pub position: [f32; 3],
}

impl Default for PointConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 0.3,
            distance: 0.0,
            decay: 2.0,
            position: [-1.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub size: f32,
    pub height: f32,
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self { size: 5.0, height: -0.5, color: Color::WHITE, metalness: 0.0, roughness: 0.7 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            width_segments: 32,
            height_segments: 32,
            color: Color(Vec3::new(189.0, 166.0, 231.0) / 255.0),
            metalness: 0.2,
            roughness: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecalConfig {
    pub size: f32,
    /// Height above the floor, enough to win the depth test
    pub lift: f32,
    pub color: Color,
}

impl Default for DecalConfig {
    fn default() -> Self {
        Self { size: 1.5, lift: 0.01, color: Color::BLACK }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 100.0,
            position: [1.0, 1.0, 2.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.1,
            max_distance: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_hex_and_named_colors() {
        let lilac = Color::parse("#bda6e7").unwrap();
        assert_abs_diff_eq!(lilac.0.x, 189.0 / 255.0, epsilon = 1e-6);
        assert_abs_diff_eq!(lilac.0.y, 166.0 / 255.0, epsilon = 1e-6);
        assert_abs_diff_eq!(lilac.0.z, 231.0 / 255.0, epsilon = 1e-6);
        assert_eq!(lilac.to_hex(), "#bda6e7");

        assert_eq!(Color::parse("White"), Some(Color::WHITE));
        assert_eq!(Color::parse("black"), Some(Color::BLACK));
        assert_eq!(Color::parse("#fff"), None);
        assert_eq!(Color::parse("#gggggg"), None);
        assert_eq!(Color::parse("#+fffff"), None);
        assert_eq!(Color::parse("#-00000"), None);
        assert_eq!(Color::parse("mauve"), None);
    }

    #[test]
    fn test_empty_toml_gives_stock_scene() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.scene.ambient.intensity, 0.5);
        assert_eq!(config.scene.directional.position, [2.0, 2.0, -1.0]);
        assert_eq!(config.scene.camera.fov_deg, 75.0);
        assert!(!config.scene.shadow_map_enabled);
    }

    #[test]
    fn test_partial_toml_overrides_only_given_fields() {
        let text = r##"
            alpha_map = "textures/simpleShadow.jpg"

            [scene.sphere]
            color = "#ff0000"
            roughness = 0.9

            [display]
            max_pixel_ratio = 1.5
        "##;
        let config = AppConfig::from_toml_str(text).unwrap();
        assert_eq!(config.scene.sphere.color, Color(Vec3::X));
        assert_eq!(config.scene.sphere.roughness, 0.9);
        assert_eq!(config.scene.sphere.radius, 0.5);
        assert_eq!(config.display.max_pixel_ratio, 1.5);
        assert_eq!(config.alpha_map, Some(PathBuf::from("textures/simpleShadow.jpg")));
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let bad_color = "[scene.ambient]\ncolor = \"chartreuse-ish\"\n";
        assert!(matches!(AppConfig::from_toml_str(bad_color), Err(ShadowsError::Config(_))));

        let bad_camera = "[scene.camera]\nnear = 5.0\nfar = 1.0\n";
        assert!(matches!(AppConfig::from_toml_str(bad_camera), Err(ShadowsError::Config(_))));

        let shadow_maps = "[scene]\nshadow_map_enabled = true\n";
        assert!(matches!(AppConfig::from_toml_str(shadow_maps), Err(ShadowsError::Config(_))));
    }

    #[test]
    fn test_pixel_ratio_is_capped() {
        let display = DisplayConfig::default();
        assert_eq!(display.pixel_ratio(3.0), 2.0);
        assert_eq!(display.pixel_ratio(1.25), 1.25);
    }
}
