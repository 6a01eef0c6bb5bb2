// CONTROLLER: Input, animation and the update loop
pub mod animation;
pub mod frame_loop;
pub mod input;
pub mod orbit_controls;

pub use animation::{animate, Clock, FrameUpdater, ManualClock, RenderTarget, SystemClock};
pub use frame_loop::FrameLoopContext;
pub use input::{InputEvent, InputState, MouseButton};
pub use orbit_controls::OrbitControls;
