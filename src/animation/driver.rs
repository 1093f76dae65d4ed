use crate::animation::state::{AnimationParams, AnimationState};
use crate::input::PointerSignal;
use crate::rig::WolfRig;
use crate::scene::Scene;

/// Advances the head-look animation and writes it into the rig.
///
/// Per tick:
/// 1. idle bob of the root from elapsed time
/// 2. target rotation from the pointer signal
/// 3. smoothing of the head pivot toward the target
/// 4. neck yaw derived from the smoothed head yaw
#[derive(Debug, Clone, Default)]
pub struct AnimationDriver {
    pub params: AnimationParams,
    state: AnimationState,
}

impl AnimationDriver {
    #[must_use]
    pub fn new(params: AnimationParams) -> Self {
        Self {
            params,
            state: AnimationState::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Neck yaw for the current head yaw.
    #[inline]
    #[must_use]
    pub fn neck_yaw(&self) -> f32 {
        self.state.yaw * self.params.neck_follow
    }

    /// Advances the state by one tick. `elapsed` and `dt` are in seconds.
    pub fn tick(&mut self, signal: PointerSignal, elapsed: f32, dt: f32) -> &AnimationState {
        let s = &mut self.state;

        s.idle_offset = self.params.idle_offset(elapsed);

        s.target_yaw = signal.x * self.params.yaw_scale;
        s.target_pitch = signal.y * self.params.pitch_scale;

        let alpha = self.params.smoothing.factor(dt);
        s.yaw += (s.target_yaw - s.yaw) * alpha;
        s.pitch += (s.target_pitch - s.pitch) * alpha;

        &self.state
    }

    /// Writes the current state into the rig's nodes.
    ///
    /// Only the root height, the head pivot rotation and the neck rotation
    /// are touched. Missing nodes are skipped.
    pub fn apply(&self, scene: &mut Scene, rig: &WolfRig) {
        if let Some(root) = scene.get_node_mut(rig.root) {
            root.transform.position.y = self.state.idle_offset;
        }
        if let Some(pivot) = scene.get_node_mut(rig.head_pivot) {
            pivot.transform.set_rotation_euler(self.state.pitch, self.state.yaw, 0.0);
        }
        let neck_yaw = self.neck_yaw();
        if let Some(neck) = scene.get_node_mut(rig.neck) {
            neck.transform.set_rotation_euler(0.0, neck_yaw, 0.0);
        }
    }

    /// [`tick`](Self::tick) followed by [`apply`](Self::apply).
    pub fn update(&mut self, signal: PointerSignal, elapsed: f32, dt: f32, scene: &mut Scene, rig: &WolfRig) {
        self.tick(signal, elapsed, dt);
        self.apply(scene, rig);
    }
}
