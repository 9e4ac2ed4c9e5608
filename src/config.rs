use bevy::prelude::*;

use crate::math::Float;
use crate::TumbleSurfaceRules;

/// How jumps are limited.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum TumbleJumpStyle {
    /// A number of jumps, usable anywhere (including mid-air), replenished on landing.
    Charges {
        max_jumps: u32,
        /// Minimal time, in seconds, between two jumps.
        trigger_delay: Float,
    },
    /// A single jump from the ground, still allowed for a short time after rolling off a ledge.
    CoyoteTime {
        /// Duration, in seconds, after leaving the ground during which the jump is still allowed.
        coyote_time: Float,
    },
}

impl TumbleJumpStyle {
    pub fn max_jumps(&self) -> u32 {
        match self {
            TumbleJumpStyle::Charges { max_jumps, .. } => *max_jumps,
            TumbleJumpStyle::CoyoteTime { .. } => 1,
        }
    }
}

/// How dashes are limited.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum TumbleDashStyle {
    Disabled,
    /// A single dash that becomes available again after a cooldown, even in the air.
    Cooldown { cooldown: Float },
    /// A number of dashes. While on the ground, a spent dash is regenerated every `regen_time`
    /// seconds.
    Charges { max_dashes: u32, regen_time: Float },
}

impl TumbleDashStyle {
    pub fn max_dashes(&self) -> u32 {
        match self {
            TumbleDashStyle::Disabled => 0,
            TumbleDashStyle::Cooldown { .. } => 1,
            TumbleDashStyle::Charges { max_dashes, .. } => *max_dashes,
        }
    }
}

/// How the actor decides it is standing on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum TumbleGroundingStrategy {
    /// Grounded for `window` seconds after every contact with a ground surface.
    ///
    /// Robust against contacts that flicker for a tick or two, which rolling bodies do a lot.
    ContactWindow { window: Float },
    /// Grounded while at least one contact with a ground surface is open.
    ContactCount,
    /// Grounded while a ray cast along gravity hits something within `distance`.
    Raycast { distance: Float },
}

/// Thrown by [`TumbleControllerConfig::validate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TumbleConfigError {
    #[error("`{field}` must be finite and non-negative, got {value}")]
    InvalidMagnitude { field: &'static str, value: Float },
    #[error("`{0}` must be at least 1")]
    ZeroCharges(&'static str),
    #[error("pitch range {min}..{max} is inverted")]
    InvertedPitchRange { min: Float, max: Float },
}

/// Tuning and capabilities of a [`TumbleController`](crate::TumbleController).
///
/// The defaults reproduce a rolling ball with double jump, a dash on a one second cooldown and a
/// ground slam.
#[derive(Component, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TumbleControllerConfig {
    /// Angular acceleration around the rolling axis at full stick input.
    pub move_torque: Float,
    /// Linear acceleration toward the stick direction while grounded.
    pub move_force: Float,
    /// Linear acceleration toward the stick direction while airborne.
    pub air_move_force: Float,
    /// The rolling torque will not spin the actor faster than this (radians per second).
    pub max_angular_velocity: Float,

    /// Upward velocity change of a jump.
    pub jump_force: Float,
    /// After a jump, the charges are not replenished for this duration (in seconds), even on
    /// ground. Prevents the jump from being refunded on the tick it takes off.
    pub jump_reset_cooldown: Float,
    pub jump_style: TumbleJumpStyle,

    /// Velocity change of a dash.
    pub dash_force: Float,
    /// Stick deflection (per axis) below which a dash goes straight where the camera looks.
    pub dash_input_threshold: Float,
    pub dash_style: TumbleDashStyle,

    /// Downward velocity change of a slam. Zero disables slamming.
    pub slam_force: Float,
    /// Fraction of the velocity along the ground plane removed by a slam.
    pub slam_lateral_damping: Float,

    pub grounding: TumbleGroundingStrategy,
    pub surfaces: TumbleSurfaceRules,
}

impl Default for TumbleControllerConfig {
    fn default() -> Self {
        Self {
            move_torque: 10.0,
            move_force: 10.0,
            air_move_force: 10.0,
            max_angular_velocity: 10.0,
            jump_force: 7.0,
            jump_reset_cooldown: 0.5,
            jump_style: TumbleJumpStyle::Charges {
                max_jumps: 2,
                trigger_delay: 0.5,
            },
            dash_force: 20.0,
            dash_input_threshold: 0.1,
            dash_style: TumbleDashStyle::Cooldown { cooldown: 1.0 },
            slam_force: 20.0,
            slam_lateral_damping: 0.5,
            grounding: TumbleGroundingStrategy::ContactWindow { window: 0.1 },
            surfaces: Default::default(),
        }
    }
}

impl TumbleControllerConfig {
    pub fn validate(&self) -> Result<(), TumbleConfigError> {
        fn magnitude(field: &'static str, value: Float) -> Result<(), TumbleConfigError> {
            if value.is_finite() && 0.0 <= value {
                Ok(())
            } else {
                Err(TumbleConfigError::InvalidMagnitude { field, value })
            }
        }

        magnitude("move_torque", self.move_torque)?;
        magnitude("move_force", self.move_force)?;
        magnitude("air_move_force", self.air_move_force)?;
        magnitude("max_angular_velocity", self.max_angular_velocity)?;
        magnitude("jump_force", self.jump_force)?;
        magnitude("jump_reset_cooldown", self.jump_reset_cooldown)?;
        magnitude("dash_force", self.dash_force)?;
        magnitude("dash_input_threshold", self.dash_input_threshold)?;
        magnitude("slam_force", self.slam_force)?;
        magnitude("slam_lateral_damping", self.slam_lateral_damping)?;

        match self.jump_style {
            TumbleJumpStyle::Charges {
                max_jumps,
                trigger_delay,
            } => {
                if max_jumps == 0 {
                    return Err(TumbleConfigError::ZeroCharges("max_jumps"));
                }
                magnitude("trigger_delay", trigger_delay)?;
            }
            TumbleJumpStyle::CoyoteTime { coyote_time } => {
                magnitude("coyote_time", coyote_time)?;
            }
        }

        match self.dash_style {
            TumbleDashStyle::Disabled => {}
            TumbleDashStyle::Cooldown { cooldown } => magnitude("cooldown", cooldown)?,
            TumbleDashStyle::Charges {
                max_dashes,
                regen_time,
            } => {
                if max_dashes == 0 {
                    return Err(TumbleConfigError::ZeroCharges("max_dashes"));
                }
                magnitude("regen_time", regen_time)?;
            }
        }

        match self.grounding {
            TumbleGroundingStrategy::ContactWindow { window } => magnitude("window", window)?,
            TumbleGroundingStrategy::ContactCount => {}
            TumbleGroundingStrategy::Raycast { distance } => magnitude("distance", distance)?,
        }

        Ok(())
    }
}
