use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

const MIN_POLAR: f32 = 1e-3;

/// Camera position plus the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl CameraPose {
    pub const fn new(position: [f32; 3], target: [f32; 3]) -> Self {
        Self { position, target }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lens {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_degrees: 40.0,
            near: 0.1,
            far: 200.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitControls {
    pub enabled: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fraction of the pending rotation applied per frame.
    pub damping: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: true,
            min_distance: 2.0,
            max_distance: 5.0,
            damping: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    Power3InOut,
    SineInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power3InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: CameraPose,
    to: CameraPose,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl Transition {
    fn sample(&self) -> (Vec3, Vec3) {
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        let k = self.easing.apply(t);
        let position = Vec3::from(self.from.position).lerp(Vec3::from(self.to.position), k);
        let target = Vec3::from(self.from.target).lerp(Vec3::from(self.to.target), k);
        (position, target)
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Perspective camera that orbits its target and glides between poses.
#[derive(Debug, Clone)]
pub struct CameraRig {
    position: Vec3,
    target: Vec3,
    lens: Lens,
    pub orbit: OrbitControls,
    transition: Option<Transition>,
    pending_yaw: f32,
    pending_pitch: f32,
}

impl CameraRig {
    pub fn new(pose: CameraPose, lens: Lens, orbit: OrbitControls) -> Self {
        Self {
            position: Vec3::from(pose.position),
            target: Vec3::from(pose.target),
            lens,
            orbit,
            transition: None,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
        }
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position.to_array(), self.target.to_array())
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Starts gliding toward `pose`, replacing any transition in flight.
    /// Already resting at `pose` means no transition, so orbit input keeps flowing.
    pub fn transition_to(&mut self, pose: CameraPose, duration: f32, easing: Easing) {
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        if self.pose() == pose {
            self.transition = None;
            return;
        }
        self.transition = Some(Transition {
            from: self.pose(),
            to: pose,
            elapsed: 0.0,
            duration: duration.max(0.0),
            easing,
        });
    }

    pub fn set_orbit_enabled(&mut self, enabled: bool) {
        self.orbit.enabled = enabled;
        if !enabled {
            self.pending_yaw = 0.0;
            self.pending_pitch = 0.0;
        }
    }

    /// Queues a rotation around the target, in radians. Ignored while orbit is disabled.
    pub fn orbit_by(&mut self, yaw_delta: f32, pitch_delta: f32) {
        if !self.orbit.enabled || self.transition.is_some() {
            return;
        }
        self.pending_yaw += yaw_delta;
        self.pending_pitch += pitch_delta;
    }

    /// Scales the distance to the target; factors below one move closer.
    pub fn zoom_by(&mut self, factor: f32) {
        if !self.orbit.enabled || self.transition.is_some() || !factor.is_finite() || factor <= 0.0
        {
            return;
        }
        let offset = self.position - self.target;
        let distance = (offset.length() * factor)
            .clamp(self.orbit.min_distance, self.orbit.max_distance);
        self.position = self.target + offset.normalize_or_zero() * distance;
    }

    /// Advances the transition or the damped orbit. Returns true if the camera moved.
    pub fn update(&mut self, dt: f32) -> bool {
        if let Some(transition) = self.transition.as_mut() {
            transition.elapsed += dt.max(0.0);
            if transition.finished() {
                self.position = Vec3::from(transition.to.position);
                self.target = Vec3::from(transition.to.target);
                self.transition = None;
            } else {
                let (position, target) = transition.sample();
                self.position = position;
                self.target = target;
            }
            return true;
        }

        if !self.orbit.enabled || (self.pending_yaw == 0.0 && self.pending_pitch == 0.0) {
            return false;
        }

        let damping = self.orbit.damping.clamp(0.0, 1.0);
        let (step_yaw, step_pitch) = if damping > 0.0 {
            (self.pending_yaw * damping, self.pending_pitch * damping)
        } else {
            (self.pending_yaw, self.pending_pitch)
        };
        self.pending_yaw -= step_yaw;
        self.pending_pitch -= step_pitch;
        if self.pending_yaw.abs() < 1e-5 && self.pending_pitch.abs() < 1e-5 {
            self.pending_yaw = 0.0;
            self.pending_pitch = 0.0;
        }
        self.rotate(step_yaw, step_pitch);
        true
    }

    fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let azimuth = offset.x.atan2(offset.z) + yaw_delta;
        let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos() + pitch_delta)
            .clamp(MIN_POLAR, std::f32::consts::PI - MIN_POLAR);
        let radius = radius.clamp(self.orbit.min_distance, self.orbit.max_distance);
        self.position = self.target
            + Vec3::new(
                radius * polar.sin() * azimuth.sin(),
                radius * polar.cos(),
                radius * polar.sin() * azimuth.cos(),
            );
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        Mat4::perspective_rh_gl(
            self.lens.fov_degrees.to_radians(),
            aspect,
            self.lens.near,
            self.lens.far,
        )
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view_matrix()
    }
}
