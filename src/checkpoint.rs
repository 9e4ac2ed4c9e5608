use bevy::prelude::*;

use crate::math::Vector3;
use crate::util::rotation_between;
use crate::TumbleGravity;

/// A checkpoint volume. When the actor enters it, it becomes the place the actor respawns at.
///
/// Put this on a sensor collider. The respawn point is the entity's global translation plus
/// [`offset`](Self::offset), and on respawn the actor's gravity is set to
/// [`gravity`](Self::gravity).
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TumbleCheckpoint {
    pub offset: Vector3,
    pub gravity: TumbleGravity,
}

/// A reset volume (e.g. a kill plane). Entering it sends the actor back to its last checkpoint.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TumbleResetVolume;

/// The state of a [`TumbleCheckpoint`] at the moment the actor entered it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TumbleCheckpointSnapshot {
    /// Where the checkpoint entity was.
    pub anchor: Vector3,
    pub offset: Vector3,
    pub gravity: TumbleGravity,
}

impl TumbleCheckpointSnapshot {
    pub fn new(anchor: Vector3, checkpoint: &TumbleCheckpoint) -> Self {
        Self {
            anchor,
            offset: checkpoint.offset,
            gravity: checkpoint.gravity,
        }
    }

    pub fn respawn_point(&self) -> Vector3 {
        self.anchor + self.offset
    }
}

/// Thrown by [`TumbleCheckpointTracker::transfer`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TumbleTransferError {
    #[error("the actor reached a reset volume before entering any checkpoint")]
    NoCheckpoint,
}

/// The new state of an actor after being sent back to a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TumbleTransferOutcome {
    pub translation: Vector3,
    pub velocity: Vector3,
    pub gravity: TumbleGravity,
}

/// Remap a velocity across a gravity discontinuity.
///
/// The velocity is rotated by the rotation that takes `old_gravity` to `new_gravity`, and then
/// everything except the component along the new gravity axis is discarded. The actor keeps its
/// falling speed (reoriented), but loses all lateral momentum.
pub fn transfer_velocity(
    velocity: Vector3,
    old_gravity: Vector3,
    new_gravity: Vector3,
) -> Vector3 {
    let Some(new_axis) = new_gravity.try_normalize() else {
        return Vector3::ZERO;
    };
    let rotated = rotation_between(old_gravity, new_axis) * velocity;
    new_axis * rotated.dot(new_axis)
}

/// Remembers the last checkpoint the actor entered.
#[derive(Component, Debug, Default, Clone)]
pub struct TumbleCheckpointTracker {
    current: Option<TumbleCheckpointSnapshot>,
    transfers: u64,
}

impl TumbleCheckpointTracker {
    pub fn current(&self) -> Option<&TumbleCheckpointSnapshot> {
        self.current.as_ref()
    }

    /// How many times the actor was sent back to a checkpoint.
    ///
    /// Camera rigs watch this to detect respawns.
    pub fn transfers(&self) -> u64 {
        self.transfers
    }

    /// Record a checkpoint, replacing the previous one. Does not move the actor.
    pub fn record(&mut self, snapshot: TumbleCheckpointSnapshot) {
        self.current = Some(snapshot);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Compute the state of an actor sent back to the current checkpoint.
    ///
    /// Fails if no checkpoint was recorded yet - in which case nothing is changed.
    pub fn transfer(
        &mut self,
        velocity: Vector3,
        gravity: &TumbleGravity,
    ) -> Result<TumbleTransferOutcome, TumbleTransferError> {
        let checkpoint = self.current.ok_or(TumbleTransferError::NoCheckpoint)?;
        self.transfers += 1;
        Ok(TumbleTransferOutcome {
            translation: checkpoint.respawn_point(),
            velocity: transfer_velocity(
                velocity,
                gravity.direction(),
                checkpoint.gravity.direction(),
            ),
            gravity: checkpoint.gravity,
        })
    }
}
