//! # bevy-tumble
//!
//! A rolling-ball character controller for Bevy, where gravity is not a constant but something the
//! level changes - uniform gravity zones, planets pulling toward their center, checkpoints that
//! reorient the world on respawn.
//!
//! bevy-tumble does not move the ball itself. A physics backend reads the rigid body into
//! [`TumbleRigidBodyTracker`], reports the ball's contacts into [`TumbleContactQueue`], and applies
//! the [`TumbleMotor`] bevy-tumble computes. See the
//! [`bevy_tumble_physics_integration_layer`] crate for the details of that contract.
//!
//! ## Quick start
//!
//! * Add [`TumbleControllerPlugin`] to the app, with the schedule the physics backend runs in.
//! * Spawn the ball with a [`TumbleController`] (all the other components it needs are added
//!   automatically) and, optionally, a [`TumbleControllerConfig`].
//! * Spawn a camera with a [`TumbleCameraRig`] targeting the ball.
//! * Put [`TumbleGravitySource`], [`TumbleCheckpoint`], [`TumbleResetVolume`] and
//!   [`TumbleSurface`] on the level's colliders.
//! * Every tick, in [`TumbleUserControlsSystems`], feed the input into the controller:
//!
//! ```no_run
//! # use bevy::prelude::*;
//! # use bevy_tumble::prelude::*;
//! # use bevy_tumble::math::*;
//! fn player_controls(
//!     keyboard: Res<ButtonInput<KeyCode>>,
//!     mut query: Query<&mut TumbleController>,
//! ) {
//!     let Ok(mut controller) = query.single_mut() else {
//!         return;
//!     };
//!     let mut direction = Vector2::ZERO;
//!     if keyboard.pressed(KeyCode::KeyW) {
//!         direction.y += 1.0;
//!     }
//!     if keyboard.pressed(KeyCode::KeyS) {
//!         direction.y -= 1.0;
//!     }
//!     if keyboard.pressed(KeyCode::KeyA) {
//!         direction.x -= 1.0;
//!     }
//!     if keyboard.pressed(KeyCode::KeyD) {
//!         direction.x += 1.0;
//!     }
//!     controller.roll(direction.x, direction.y);
//!     if keyboard.just_pressed(KeyCode::Space) {
//!         controller.jump();
//!     }
//!     if keyboard.just_pressed(KeyCode::ShiftLeft) {
//!         controller.dash();
//!     }
//!     if keyboard.just_pressed(KeyCode::ControlLeft) {
//!         controller.slam();
//!     }
//! }
//! ```
//!
//! ## Pausing
//!
//! Insert a [`TumbleSession`] resource to pause the simulation or end the level. While it is not
//! running, neither the motion tick nor the camera rigs update.
mod basis;
mod camera;
mod checkpoint;
mod config;
mod controller;
mod events;
mod gravity;
mod grounding;
mod motion;
mod session;
mod surface;
pub mod util;

pub use basis::*;
pub use camera::*;
pub use checkpoint::*;
pub use config::*;
pub use controller::*;
pub use events::*;
pub use gravity::*;
pub use grounding::*;
pub use motion::*;
pub use session::*;
pub use surface::*;

pub use bevy_tumble_physics_integration_layer;
pub use bevy_tumble_physics_integration_layer::data_for_backends::*;
pub use bevy_tumble_physics_integration_layer::math;
pub use bevy_tumble_physics_integration_layer::{TumblePipelineSystems, TumbleSystems};

pub mod prelude {
    pub use crate::{
        TumbleCameraMode, TumbleCameraRig, TumbleCheckpoint, TumbleController,
        TumbleControllerConfig, TumbleControllerPlugin, TumbleDashStyle, TumbleGravity,
        TumbleGravitySource, TumbleGroundingStrategy, TumbleJumpStyle, TumbleOcclusionAvoidance,
        TumblePipelineSystems, TumbleResetVolume, TumbleSession, TumbleSurface,
        TumbleSurfaceCategories, TumbleSystems, TumbleToggle, TumbleUserControlsSystems,
    };
}
