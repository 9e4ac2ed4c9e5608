use bevy::math::EulerRot;
use bevy::prelude::*;

use crate::math::{Float, Quaternion, Vector2, Vector3};
use crate::util::{angle_between, look_rotation, rotation_between, slerp_direction};
use crate::TumbleConfigError;

/// How the camera is placed relative to the actor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum TumbleCameraMode {
    /// Orbit the actor at `distance`, raised by `height` along the up direction, always looking at
    /// the actor.
    Orbit { distance: Float, height: Float },
    /// Free look around the actor, with the view's up locked to the (smoothed) gravity.
    GravityLocked { distance: Float },
}

impl Default for TumbleCameraMode {
    fn default() -> Self {
        Self::Orbit {
            distance: 5.0,
            height: 2.0,
        }
    }
}

/// Whether an occlusion-avoidance camera feature may currently run.
///
/// The rig turns this off while the camera is reorienting to a new gravity (and for a short while
/// after a respawn), since pulling the camera out of walls while it swings around makes it pop.
/// Whatever de-occlusion system the game uses should check this flag.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TumbleOcclusionAvoidance {
    pub enabled: bool,
}

impl Default for TumbleOcclusionAvoidance {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// The result of a [`TumbleCameraRig::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TumbleCameraPose {
    pub translation: Vector3,
    pub rotation: Quaternion,
    /// The smoothed up direction the camera is aligned to.
    pub up: Vector3,
    pub occlusion_avoidance: bool,
}

/// A third person camera that follows an actor and aligns itself with the actor's gravity.
///
/// Put this on the camera entity. Feed mouse/stick look input with [`feed_look`](Self::feed_look).
///
/// Gravity changes are not applied to the camera instantly - the rig keeps its own smoothed
/// gravity direction which chases the actor's gravity at
/// [`gravity_smoothing_rate`](Self::gravity_smoothing_rate). The actor's movement frame is taken
/// from this smoothed direction too, so the controls rotate together with the view.
#[derive(Component, Debug, Clone)]
#[require(Transform, TumbleOcclusionAvoidance)]
pub struct TumbleCameraRig {
    /// The actor entity to follow.
    pub target: Entity,
    pub mode: TumbleCameraMode,
    /// Look input is multiplied by this.
    pub sensitivity: Float,
    /// Minimum and maximum pitch, in radians.
    pub pitch_limits: (Float, Float),
    /// Fraction of the remaining angle (per second) the smoothed gravity closes every update.
    pub gravity_smoothing_rate: Float,
    /// Below this angle (in radians) the smoothed gravity snaps to the actual gravity.
    pub convergence_angle: Float,
    /// How long, in seconds, occlusion avoidance stays suspended after the actor respawns.
    pub respawn_settle_delay: Float,

    smoothed_gravity: Option<Vector3>,
    yaw: Float,
    pitch: Float,
    look_input: Vector2,
    occlusion_suppression_timer: Float,
    seen_transfers: Option<u64>,
}

impl TumbleCameraRig {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            mode: Default::default(),
            sensitivity: 1.0,
            pitch_limits: (
                -std::f64::consts::FRAC_PI_2 as Float,
                std::f64::consts::FRAC_PI_2 as Float,
            ),
            gravity_smoothing_rate: 5.0,
            convergence_angle: 1.0e-3,
            respawn_settle_delay: 1.0,
            smoothed_gravity: None,
            yaw: 0.0,
            pitch: 0.0,
            look_input: Vector2::ZERO,
            occlusion_suppression_timer: 0.0,
            seen_transfers: None,
        }
    }

    pub fn with_mode(self, mode: TumbleCameraMode) -> Self {
        Self { mode, ..self }
    }

    pub fn validate(&self) -> Result<(), TumbleConfigError> {
        let (min, max) = self.pitch_limits;
        if !(min.is_finite() && max.is_finite()) || max < min {
            return Err(TumbleConfigError::InvertedPitchRange { min, max });
        }
        for (field, value) in [
            ("sensitivity", self.sensitivity),
            ("gravity_smoothing_rate", self.gravity_smoothing_rate),
            ("convergence_angle", self.convergence_angle),
            ("respawn_settle_delay", self.respawn_settle_delay),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TumbleConfigError::InvalidMagnitude { field, value });
            }
        }
        Ok(())
    }

    /// Accumulate look input (`x` turns, `y` pitches). Consumed on the next update.
    pub fn feed_look(&mut self, delta: Vector2) {
        if delta.is_finite() {
            self.look_input += delta;
        }
    }

    pub fn smoothed_gravity(&self) -> Option<Vector3> {
        self.smoothed_gravity
    }

    pub fn yaw(&self) -> Float {
        self.yaw
    }

    pub fn pitch(&self) -> Float {
        self.pitch
    }

    pub fn occlusion_suppression_timer(&self) -> Float {
        self.occlusion_suppression_timer
    }

    /// Whether the smoothed gravity has caught up with `target_gravity`.
    pub fn has_converged(&self, target_gravity: Vector3) -> bool {
        self.smoothed_gravity.is_some_and(|smoothed| {
            angle_between(smoothed, target_gravity) <= self.convergence_angle
        })
    }

    /// Advance the rig by one presentation tick.
    ///
    /// `respawn_count` is the actor's
    /// [`TumbleCheckpointTracker::transfers`](crate::TumbleCheckpointTracker::transfers) - a change
    /// in it suspends occlusion avoidance for [`respawn_settle_delay`](Self::respawn_settle_delay).
    pub fn update(
        &mut self,
        frame_duration: Float,
        target_gravity: Vector3,
        respawn_count: u64,
        target_position: Vector3,
    ) -> TumbleCameraPose {
        if self.seen_transfers.is_some_and(|seen| seen != respawn_count) {
            self.occlusion_suppression_timer = self.respawn_settle_delay;
        }
        self.seen_transfers = Some(respawn_count);

        let look = std::mem::take(&mut self.look_input) * self.sensitivity;
        self.yaw -= look.x;
        self.pitch += look.y;
        let (min_pitch, max_pitch) = self.pitch_limits;
        // NaN limits leave the pitch unclamped.
        if !(min_pitch.is_nan() || max_pitch.is_nan()) {
            self.pitch = self.pitch.clamp(min_pitch, max_pitch.max(min_pitch));
        }

        let target_gravity = target_gravity.try_normalize().unwrap_or(Vector3::NEG_Y);
        let previous = self.smoothed_gravity.unwrap_or(target_gravity);
        let mut smoothed = slerp_direction(
            previous,
            target_gravity,
            frame_duration * self.gravity_smoothing_rate,
        );
        let converged = angle_between(smoothed, target_gravity) <= self.convergence_angle;
        if converged {
            smoothed = target_gravity;
        }
        self.smoothed_gravity = Some(smoothed);

        self.occlusion_suppression_timer =
            (self.occlusion_suppression_timer - frame_duration).max(0.0);

        let up = -smoothed;
        let gravity_alignment = rotation_between(Vector3::Y, up);
        let look_rotation_local =
            Quaternion::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
        let orbit_rotation = gravity_alignment * look_rotation_local;

        let (translation, rotation) = match self.mode {
            TumbleCameraMode::Orbit { distance, height } => {
                let translation =
                    target_position + orbit_rotation * Vector3::new(0.0, height, distance);
                let rotation = look_rotation(target_position - translation, up);
                (translation, rotation)
            }
            TumbleCameraMode::GravityLocked { distance } => {
                let translation = target_position + orbit_rotation * Vector3::new(0.0, 0.0, distance);
                (translation, orbit_rotation)
            }
        };

        TumbleCameraPose {
            translation,
            rotation,
            up,
            occlusion_avoidance: converged && self.occlusion_suppression_timer <= 0.0,
        }
    }
}
