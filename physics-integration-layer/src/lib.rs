//! # Physics integration layer for bevy-tumble
//!
//! bevy-tumble only decides _what_ should happen to the actor. Moving the actual rigid body is the
//! job of a physics backend, which talks to bevy-tumble through the components defined here:
//!
//! * During [`TumblePipelineSystems::Sensors`] the backend fills
//!   [`TumbleRigidBodyTracker`](data_for_backends::TumbleRigidBodyTracker),
//!   [`TumbleProximitySensor`](data_for_backends::TumbleProximitySensor) and pushes the
//!   collisions and trigger overlaps of the actor into
//!   [`TumbleContactQueue`](data_for_backends::TumbleContactQueue).
//! * During [`TumblePipelineSystems::Motors`] the backend applies
//!   [`TumbleMotor`](data_for_backends::TumbleMotor) to the rigid body.
use bevy::prelude::*;

pub mod data_for_backends;
pub mod math;

/// Umbrella system set for [`TumblePipelineSystems`].
///
/// The physics backends' plugins are responsible for preventing this entire system set from
/// running when the physics backend itself is paused.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct TumbleSystems;

/// The various stages of the motion tick.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub enum TumblePipelineSystems {
    /// Data is read from the physics backend.
    Sensors,
    /// Contacts and overlaps are turned into gravity, grounding and checkpoint changes.
    Events,
    /// bevy-tumble decides how the actor should be manipulated.
    Logic,
    /// Forces are applied in the physics backend.
    Motors,
}
