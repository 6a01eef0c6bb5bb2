//! Per-frame motion of the sphere and its faked shadow.
//!
//! [`animate`] is the whole simulation: a pure function of elapsed time,
//! except for the spin accumulator which grows by [`SPIN_PER_FRAME`] on every
//! call. [`FrameUpdater`] ties it to a [`Clock`] and a [`RenderTarget`]; the
//! platform loop (requestAnimationFrame or winit redraws) only decides *when*
//! to call [`FrameUpdater::tick`].

use crate::model::{Camera, MovingBody, Scene, ShadowDecal};

/// Angular speed of the orbit around the Y axis (rad/s)
pub const ORBIT_SPEED: f64 = 0.5;
/// Radius of the orbit in scene units
pub const ORBIT_RADIUS: f64 = 1.6;
/// Angular frequency of the bounce (rad/s)
pub const BOUNCE_SPEED: f64 = 3.0;
/// Peak height of the bounce
pub const BOUNCE_HEIGHT: f64 = 1.3;
/// Decal opacity when the sphere touches y = 0
pub const SHADOW_STRENGTH: f64 = 0.9;
/// Added to the X rotation every frame, independent of frame time
pub const SPIN_PER_FRAME: f64 = 3.0;

/// Seconds since the first sample, never decreasing
pub trait Clock {
    fn elapsed(&mut self) -> f64;
}

/// Receives the scene once it has been updated for the frame
pub trait RenderTarget {
    fn render(&mut self, scene: &Scene, camera: &Camera);
}

/// Sphere position and decal opacity for elapsed time `t`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BouncePose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub shadow_opacity: f64,
}

impl BouncePose {
    pub fn at(t: f64) -> Self {
        let x = (t * ORBIT_SPEED).sin() * ORBIT_RADIUS;
        let z = (t * ORBIT_SPEED).cos() * ORBIT_RADIUS;
        let y = ((t * BOUNCE_SPEED).cos() * BOUNCE_HEIGHT).abs();
        // Not clamped: near the top of the bounce this goes slightly negative
        let shadow_opacity = (1.0 - y) * SHADOW_STRENGTH;
        Self { x, y, z, shadow_opacity }
    }
}

/// Move the sphere and its decal to their pose at `elapsed` seconds and spin
/// the sphere by one frame's worth.
pub fn animate(elapsed: f64, body: &mut MovingBody, decal: &mut ShadowDecal) {
    let pose = BouncePose::at(elapsed);

    body.position.x = pose.x as f32;
    body.position.y = pose.y as f32;
    body.position.z = pose.z as f32;

    decal.position.x = body.position.x;
    decal.position.z = body.position.z;

    body.rotation_x += SPIN_PER_FRAME;

    decal.material.opacity = pose.shadow_opacity as f32;
}

/// Drives [`animate`] from a clock and hands every frame to a renderer
pub struct FrameUpdater<C: Clock> {
    clock: C,
    frames: u64,
    last_elapsed: f64,
}

impl<C: Clock> FrameUpdater<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, frames: 0, last_elapsed: 0.0 }
    }

    /// Sample the clock and update the scene; returns the elapsed time used
    pub fn advance(&mut self, scene: &mut Scene) -> f64 {
        let elapsed = self.clock.elapsed();
        animate(elapsed, &mut scene.body, &mut scene.decal);
        self.frames += 1;
        self.last_elapsed = elapsed;
        tracing::trace!(
            frame = self.frames,
            elapsed,
            y = scene.body.position.y,
            opacity = scene.decal.material.opacity,
            "animated"
        );
        elapsed
    }

    /// One frame: update the scene, then render it
    pub fn tick<R: RenderTarget + ?Sized>(&mut self, scene: &mut Scene, camera: &Camera, target: &mut R) {
        self.advance(scene);
        target.render(scene, camera);
    }

    /// Run `steps` frames back to back, without waiting for a display refresh
    pub fn run<R: RenderTarget + ?Sized>(
        &mut self,
        steps: usize,
        scene: &mut Scene,
        camera: &Camera,
        target: &mut R,
    ) {
        for _ in 0..steps {
            self.tick(scene, camera, target);
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_elapsed(&self) -> f64 {
        self.last_elapsed
    }
}

/// Wall clock that starts on its first sample
pub struct SystemClock {
    origin: Option<f64>,
    last: f64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: None, last: 0.0 }
    }

    #[cfg(target_arch = "wasm32")]
    fn now_secs() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now() / 1000.0)
            .unwrap_or(0.0)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_secs() -> f64 {
        use once_cell::sync::Lazy;
        static START: Lazy<std::time::Instant> = Lazy::new(std::time::Instant::now);
        START.elapsed().as_secs_f64()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&mut self) -> f64 {
        let now = Self::now_secs();
        let origin = *self.origin.get_or_insert(now);
        // Guard against platform timers stepping backwards
        self.last = (now - origin).max(self.last);
        self.last
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    pub now: f64,
}

impl ManualClock {
    pub fn at(now: f64) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, dt: f64) {
        self.now += dt;
    }
}

impl Clock for ManualClock {
    fn elapsed(&mut self) -> f64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    /// Records what each render call saw
    #[derive(Default)]
    struct RecordingTarget {
        frames: Vec<(glam::Vec3, glam::Vec3, f32, f64)>,
    }

    impl RenderTarget for RecordingTarget {
        fn render(&mut self, scene: &Scene, _camera: &Camera) {
            self.frames.push((
                scene.body.position,
                scene.decal.position,
                scene.decal.material.opacity,
                scene.body.rotation_x,
            ));
        }
    }

    /// Clock that replays a fixed list of samples
    struct ScriptedClock(std::vec::IntoIter<f64>);

    impl Clock for ScriptedClock {
        fn elapsed(&mut self) -> f64 {
            self.0.next().unwrap_or(0.0)
        }
    }

    fn camera() -> Camera {
        Camera::new(75.0, 800, 600, 0.1, 100.0)
    }

    #[test]
    fn test_pose_at_start() {
        let mut scene = Scene::default();
        animate(0.0, &mut scene.body, &mut scene.decal);
        assert_abs_diff_eq!(scene.body.position.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(scene.body.position.y, 1.3, epsilon = 1e-6);
        assert_abs_diff_eq!(scene.body.position.z, 1.6, epsilon = 1e-6);
        assert_abs_diff_eq!(scene.decal.opacity(), -0.27, epsilon = 1e-6);
    }

    #[test]
    fn test_pose_at_pi() {
        let pose = BouncePose::at(PI);
        assert_abs_diff_eq!(pose.x, 1.6, epsilon = 1e-9);
        assert_abs_diff_eq!(pose.z, 0.0, epsilon = 1e-9);
        // cos(3π) = -1, so the sphere is at the top of its bounce
        assert_abs_diff_eq!(pose.y, 1.3, epsilon = 1e-9);
        assert_abs_diff_eq!(pose.shadow_opacity, -0.27, epsilon = 1e-9);
    }

    #[test]
    fn test_pose_matches_closed_form_over_time() {
        let mut scene = Scene::default();
        for i in 0..2000 {
            let t = i as f64 * 0.0173;
            animate(t, &mut scene.body, &mut scene.decal);

            let p = scene.body.position;
            assert_abs_diff_eq!(p.x as f64, (0.5 * t).sin() * 1.6, epsilon = 1e-6);
            assert_abs_diff_eq!(p.z as f64, (0.5 * t).cos() * 1.6, epsilon = 1e-6);
            assert_abs_diff_eq!(p.y as f64, ((3.0 * t).cos() * 1.3).abs(), epsilon = 1e-6);
            assert!(p.y >= 0.0 && p.y <= 1.3 + 1e-6);

            // decal mirrors the sphere exactly, height stays on the floor
            assert_eq!(scene.decal.position.x, p.x);
            assert_eq!(scene.decal.position.z, p.z);
            assert_abs_diff_eq!(scene.decal.position.y, -0.49, epsilon = 1e-6);

            let opacity = scene.decal.opacity();
            assert_abs_diff_eq!(opacity, (1.0 - p.y) * 0.9, epsilon = 1e-6);
            assert!((-0.27 - 1e-6..=0.9 + 1e-6).contains(&opacity));
        }
    }

    #[test]
    fn test_opacity_is_not_clamped() {
        let mut scene = Scene::default();
        animate(0.0, &mut scene.body, &mut scene.decal);
        assert!(scene.decal.opacity() < 0.0);

        // at y = 0 the decal is at full strength
        let t = PI / 6.0;
        animate(t, &mut scene.body, &mut scene.decal);
        assert_abs_diff_eq!(scene.decal.opacity(), 0.9, epsilon = 1e-6);
    }

    #[test]
    fn test_same_time_twice_only_spins() {
        let mut scene = Scene::default();
        animate(4.2, &mut scene.body, &mut scene.decal);
        let body_pos = scene.body.position;
        let decal = scene.decal.clone();
        let spin = scene.body.rotation_x;

        animate(4.2, &mut scene.body, &mut scene.decal);
        assert_eq!(scene.body.position, body_pos);
        assert_eq!(scene.decal, decal);
        assert_eq!(scene.body.rotation_x, spin + 3.0);
    }

    #[test]
    fn test_spin_counts_calls_not_time() {
        let samples = vec![0.0, 0.0, 10.0, 10.0, 10.5, 1000.0, 1000.0];
        let n = samples.len();
        let mut updater = FrameUpdater::new(ScriptedClock(samples.into_iter()));
        let mut scene = Scene::default();
        let mut target = RecordingTarget::default();

        updater.run(n, &mut scene, &camera(), &mut target);

        assert_eq!(updater.frames(), n as u64);
        assert_eq!(target.frames.len(), n);
        for (i, (_, _, _, spin)) in target.frames.iter().enumerate() {
            assert_eq!(*spin, 3.0 * (i as f64 + 1.0));
        }
        assert_eq!(updater.last_elapsed(), 1000.0);
    }

    #[test]
    fn test_render_sees_updated_scene() {
        let mut updater = FrameUpdater::new(ManualClock::at(2.0));
        let mut scene = Scene::default();
        let mut target = RecordingTarget::default();

        updater.tick(&mut scene, &camera(), &mut target);

        let (body, decal, opacity, _) = target.frames[0];
        let pose = BouncePose::at(2.0);
        assert_abs_diff_eq!(body.x as f64, pose.x, epsilon = 1e-6);
        assert_eq!(decal.x, body.x);
        assert_eq!(decal.z, body.z);
        assert_abs_diff_eq!(opacity as f64, pose.shadow_opacity, epsilon = 1e-6);
    }

    #[test]
    fn test_manual_clock_drives_updater() {
        let mut updater = FrameUpdater::new(ManualClock::default());
        let mut scene = Scene::default();
        let mut target = RecordingTarget::default();

        for _ in 0..60 {
            updater.tick(&mut scene, &camera(), &mut target);
            updater.clock.advance(1.0 / 60.0);
        }
        assert_abs_diff_eq!(updater.last_elapsed(), 59.0 / 60.0, epsilon = 1e-9);
        assert_eq!(scene.body.rotation_x, 180.0);
    }

    #[test]
    fn test_system_clock_starts_at_zero_and_never_decreases() {
        let mut clock = SystemClock::new();
        let first = clock.elapsed();
        assert_eq!(first, 0.0);
        let mut last = first;
        for _ in 0..100 {
            let t = clock.elapsed();
            assert!(t >= last);
            last = t;
        }
    }
}
