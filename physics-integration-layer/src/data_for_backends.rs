use crate::math::{Float, Quaternion, Vector3};
use bevy::prelude::*;

/// Allows disabling bevy-tumble for a specific entity.
///
/// This can be used to let some other system temporarily take control over the actor (e.g. a
/// cutscene).
///
/// This component is not mandatory - if omitted, bevy-tumble will just assume it is enabled for
/// that entity.
#[derive(Component, Default, Debug, PartialEq, Eq, Clone, Copy)]
pub enum TumbleToggle {
    /// Do not update the sensors, and do not apply forces from the motor.
    ///
    /// The controller will not run either, and the actor keeps its jump charges, timers and
    /// gravity from before `TumbleToggle::Disabled` was set.
    Disabled,
    /// Update the sensors, but do not apply forces from the motor.
    SenseOnly,
    #[default]
    /// The backend behaves normally - it updates the sensors and applies forces from the motor.
    Enabled,
}

/// Newtonian state of the rigid body.
///
/// The physics backend is responsible for updating this component from the physics engine during
/// [`TumblePipelineSystems::Sensors`](crate::TumblePipelineSystems::Sensors).
///
/// Checkpoint transfers rewrite `translation` and `velocity` in place so that the rest of the
/// motion tick already works with the transferred state.
#[derive(Component, Debug, Clone)]
pub struct TumbleRigidBodyTracker {
    pub translation: Vector3,
    pub rotation: Quaternion,
    pub velocity: Vector3,
    /// Angular velocity as the rotation axis multiplied by the rotation speed in radians per
    /// second.
    pub angvel: Vector3,
}

impl Default for TumbleRigidBodyTracker {
    fn default() -> Self {
        Self {
            translation: Vector3::ZERO,
            rotation: Quaternion::IDENTITY,
            velocity: Vector3::ZERO,
            angvel: Vector3::ZERO,
        }
    }
}

/// Raycast "ground probe" along the current gravity.
///
/// Only consulted when the actor is configured to detect ground by raycasting. bevy-tumble keeps
/// [`cast_direction`](Self::cast_direction) aligned with the actor's gravity and sets
/// [`cast_range`](Self::cast_range); the backend casts from
/// [`cast_origin`](Self::cast_origin) and fills [`output`](Self::output) during
/// [`TumblePipelineSystems::Sensors`](crate::TumblePipelineSystems::Sensors).
#[derive(Component, Debug)]
pub struct TumbleProximitySensor {
    /// The cast origin in the entity's coord system.
    pub cast_origin: Vector3,
    /// The direction in world coord system (unmodified by the entity's transform).
    pub cast_direction: Vector3,
    pub cast_range: Float,
    pub output: Option<TumbleProximitySensorOutput>,
}

impl Default for TumbleProximitySensor {
    fn default() -> Self {
        Self {
            cast_origin: Vector3::ZERO,
            cast_direction: Vector3::NEG_Y,
            cast_range: 0.0,
            output: None,
        }
    }
}

/// Information from [`TumbleProximitySensor`] that have detected another collider.
#[derive(Debug, Clone)]
pub struct TumbleProximitySensorOutput {
    /// The entity of the collider detected by the ray.
    pub entity: Entity,
    /// The distance to the collider from [`cast_origin`](TumbleProximitySensor::cast_origin) along
    /// the [`cast_direction`](TumbleProximitySensor::cast_direction).
    pub proximity: Float,
    /// The normal from the detected collider's surface where the ray hits.
    pub normal: Vector3,
}

/// Represents a change to velocity (linear or angular)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TumbleVelChange {
    /// The part of the velocity change that gets multiplied by the frame duration.
    ///
    /// Continuous forces (gravity, rolling torque, air control) go here.
    pub acceleration: Vector3,
    /// The part of the velocity change that gets added to the velocity as-is.
    ///
    /// Instantaneous impulses (jump, dash, slam) go here.
    pub boost: Vector3,
}

impl TumbleVelChange {
    pub const ZERO: Self = Self {
        acceleration: Vector3::ZERO,
        boost: Vector3::ZERO,
    };

    /// The velocity this change adds over a frame of the given duration.
    pub fn calc_velocity_change(&self, frame_duration: Float) -> Vector3 {
        self.acceleration * frame_duration + self.boost
    }
}

impl Default for TumbleVelChange {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Discontinuous relocation of the rigid body.
///
/// The backend must apply it before [`TumbleMotor::lin`] and [`TumbleMotor::ang`], and overwrite
/// (not add to) the body's position and linear velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TumbleTeleport {
    pub translation: Vector3,
    pub velocity: Vector3,
}

/// Instructions on how to move the rigid body.
///
/// The physics backend is responsible for reading this component during
/// [`TumblePipelineSystems::Motors`](crate::TumblePipelineSystems::Motors) and applying it to the
/// rigid body.
///
/// These numbers ignore mass and are applied directly to the velocity. The backend should also
/// `take()` the [`teleport`](Self::teleport) so that it only happens once.
#[derive(Component, Default, Debug)]
pub struct TumbleMotor {
    /// How much velocity to add to the rigid body in the current frame.
    pub lin: TumbleVelChange,

    /// How much angular velocity to add to the rigid body in the current frame, given as the
    /// rotation axis multiplied by the rotation speed in radians per second.
    pub ang: TumbleVelChange,

    pub teleport: Option<TumbleTeleport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TumbleContactPhase {
    Enter,
    Stay,
    Exit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TumbleContactKind {
    /// A solid collision. The normals point from the other collider toward the actor.
    Collision {
        normals: Vec<Vector3>,
        relative_velocity: Vector3,
    },
    /// The actor is inside a sensor (trigger) volume.
    Overlap,
}

/// A single contact reported by the physics backend.
#[derive(Debug, Clone, PartialEq)]
pub struct TumbleContact {
    pub other: Entity,
    pub phase: TumbleContactPhase,
    pub kind: TumbleContactKind,
}

/// Contacts of the actor, reported by the physics backend and consumed by bevy-tumble once per
/// motion tick.
///
/// Backends push into this during
/// [`TumblePipelineSystems::Sensors`](crate::TumblePipelineSystems::Sensors). Exit contacts must
/// be reported even if the other entity was despawned in the meantime - bevy-tumble will still try
/// to resolve them, and ignore them if it can't.
#[derive(Component, Default, Debug)]
pub struct TumbleContactQueue(Vec<TumbleContact>);

impl TumbleContactQueue {
    pub fn push(&mut self, contact: TumbleContact) {
        self.0.push(contact);
    }

    pub fn collision(
        &mut self,
        other: Entity,
        phase: TumbleContactPhase,
        normals: Vec<Vector3>,
        relative_velocity: Vector3,
    ) {
        self.push(TumbleContact {
            other,
            phase,
            kind: TumbleContactKind::Collision {
                normals,
                relative_velocity,
            },
        });
    }

    pub fn overlap(&mut self, other: Entity, phase: TumbleContactPhase) {
        self.push(TumbleContact {
            other,
            phase,
            kind: TumbleContactKind::Overlap,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = TumbleContact> + '_ {
        self.0.drain(..)
    }
}
