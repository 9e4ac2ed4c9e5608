use bevy::prelude::*;

use crate::math::{Float, Vector3};
use crate::util::project_on_plane_normalized;

/// Movement frame of an actor, derived from its gravity.
///
/// `up` is always the opposite of the gravity direction. `forward` and `right` come from a
/// reference frame (normally the camera) flattened onto the plane perpendicular to gravity, so that
/// "forward" on the stick means "away from the camera, along the ground" no matter which way is
/// down.
///
/// Recompute it every tick - gravity may be rotating smoothly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TumbleOrientationBasis {
    pub up: Vector3,
    pub forward: Vector3,
    pub right: Vector3,
}

impl TumbleOrientationBasis {
    /// Derive the basis using the default reference frame (Bevy's `-Z` forward, `+X` right).
    pub fn from_gravity(gravity_direction: Vector3) -> Self {
        Self::from_gravity_and_reference(gravity_direction, Vector3::NEG_Z, Vector3::X)
    }

    /// Derive the basis from a gravity direction and a reference frame.
    ///
    /// When a reference axis is parallel to gravity it cannot be flattened; the other reference
    /// axis is used to reconstruct it, and if both are degenerate a fixed default axis is used.
    pub fn from_gravity_and_reference(
        gravity_direction: Vector3,
        reference_forward: Vector3,
        reference_right: Vector3,
    ) -> Self {
        let up = (-gravity_direction).try_normalize().unwrap_or(Vector3::Y);

        let forward_fallback = up.cross(reference_right);
        let forward = project_on_plane_normalized(
            reference_forward,
            up,
            if forward_fallback.length_squared() > 0.0 {
                forward_fallback
            } else {
                Vector3::NEG_Z
            },
        );

        // Keep right perpendicular to forward even if the reference frame is skewed.
        let right = project_on_plane_normalized(reference_right, up, forward.cross(up));
        let right = right
            .reject_from_normalized(forward)
            .try_normalize()
            .unwrap_or_else(|| forward.cross(up).normalize());

        Self { up, forward, right }
    }

    /// Convert stick axes to a direction on the ground plane. Zero when there is no input.
    pub fn planar_direction(&self, horizontal: Float, vertical: Float) -> Vector3 {
        (self.forward * vertical + self.right * horizontal).normalize_or_zero()
    }
}

/// Where the actor's camera is looking, written by the camera rig for the motion tick.
///
/// If the actor has no camera rig, this stays at its default and the movement frame falls back to
/// the world axes.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TumbleView {
    /// The camera's full forward vector (including pitch).
    pub forward: Vector3,
    /// The camera's full right vector.
    pub right: Vector3,
    /// The smoothed up direction the camera is currently aligned to, if the camera has been
    /// updated at least once.
    pub smoothed_up: Option<Vector3>,
}

impl Default for TumbleView {
    fn default() -> Self {
        Self {
            forward: Vector3::NEG_Z,
            right: Vector3::X,
            smoothed_up: None,
        }
    }
}

impl TumbleView {
    /// The movement frame for an actor whose (raw) gravity is `gravity_direction`.
    pub fn basis(&self, gravity_direction: Vector3) -> TumbleOrientationBasis {
        let gravity_direction = self.smoothed_up.map_or(gravity_direction, |up| -up);
        TumbleOrientationBasis::from_gravity_and_reference(
            gravity_direction,
            self.forward,
            self.right,
        )
    }
}
