// MODEL: Scene state and data
pub mod camera;
pub mod lighting;
pub mod material;
pub mod scene;

pub use camera::Camera;
pub use lighting::{Lights, ShadowCamera};
pub use material::{BasicMaterial, StandardMaterial};
pub use scene::{Floor, MovingBody, Scene, ShadowDecal};
