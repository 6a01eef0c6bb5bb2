// VIEW: GPU setup and drawing
pub mod gpu_init;
pub mod render;

pub use gpu_init::GpuContext;
pub use render::{CameraUniform, LightingUniform, ObjectUniform, SceneRenderer};
