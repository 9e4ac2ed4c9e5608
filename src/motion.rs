use crate::math::{Float, Vector3};
use crate::{
    TumbleControllerConfig, TumbleDashStyle, TumbleGravity, TumbleGroundingUpdate,
    TumbleJumpStyle, TumbleMotor, TumbleOrientationBasis, TumbleRigidBodyTracker, TumbleView,
};

/// Player input for a single motion tick.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TumbleMotionInput {
    /// Stick X, in `[-1, 1]`.
    pub horizontal: Float,
    /// Stick Y, in `[-1, 1]`.
    pub vertical: Float,
    /// The jump button was pressed this tick.
    pub jump: bool,
    /// The dash button was pressed this tick.
    pub dash: bool,
    /// The slam button is held.
    pub slam: bool,
}

/// Everything [`TumbleMotionState::step`] needs to know about the world.
pub struct TumbleMotionContext<'a> {
    pub frame_duration: Float,
    pub tracker: &'a TumbleRigidBodyTracker,
    pub gravity: &'a TumbleGravity,
    /// Movement frame, derived from the smoothed gravity and the camera.
    pub basis: TumbleOrientationBasis,
    /// Used for the dash direction, which keeps the camera pitch.
    pub view: &'a TumbleView,
    pub grounded: bool,
    pub grounding_update: TumbleGroundingUpdate,
    /// A surface that vetoes jump replenishment is being touched.
    pub regen_blocked: bool,
}

/// Which actions [`TumbleMotionState::step`] performed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TumbleActionsPerformed {
    pub jump: bool,
    pub dash: bool,
    pub slam: bool,
}

/// Charges and cooldowns of an actor.
///
/// Actions requested outside their window (no charges left, on cooldown, slamming on the ground)
/// are silently ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct TumbleMotionState {
    jump_charges_left: u32,
    dash_charges_left: u32,
    can_slam: bool,
    jump_reset_timer: Float,
    jump_trigger_timer: Float,
    dash_cooldown_timer: Float,
    dash_regen_elapsed: Float,
    coyote_timer: Float,
}

impl Default for TumbleMotionState {
    fn default() -> Self {
        Self::new(&TumbleControllerConfig::default())
    }
}

impl TumbleMotionState {
    /// A fresh state, with all the charges full.
    pub fn new(config: &TumbleControllerConfig) -> Self {
        Self {
            jump_charges_left: config.jump_style.max_jumps(),
            dash_charges_left: config.dash_style.max_dashes(),
            can_slam: true,
            jump_reset_timer: 0.0,
            jump_trigger_timer: 0.0,
            dash_cooldown_timer: 0.0,
            dash_regen_elapsed: 0.0,
            coyote_timer: 0.0,
        }
    }

    pub fn jump_charges_left(&self) -> u32 {
        self.jump_charges_left
    }

    pub fn dash_charges_left(&self) -> u32 {
        self.dash_charges_left
    }

    pub fn can_slam(&self) -> bool {
        self.can_slam
    }

    pub fn jump_reset_timer(&self) -> Float {
        self.jump_reset_timer
    }

    pub fn jump_trigger_timer(&self) -> Float {
        self.jump_trigger_timer
    }

    pub fn dash_cooldown_timer(&self) -> Float {
        self.dash_cooldown_timer
    }

    /// Run one motion tick, writing the forces into `motor`.
    ///
    /// `motor` is overwritten, except for its `teleport`.
    pub fn step(
        &mut self,
        config: &TumbleControllerConfig,
        input: &TumbleMotionInput,
        ctx: TumbleMotionContext,
        motor: &mut TumbleMotor,
    ) -> TumbleActionsPerformed {
        let dt = ctx.frame_duration;
        let mut performed = TumbleActionsPerformed::default();

        for timer in [
            &mut self.jump_reset_timer,
            &mut self.jump_trigger_timer,
            &mut self.dash_cooldown_timer,
        ] {
            *timer = (*timer - dt).max(0.0);
        }

        self.update_jump_charges(config, &ctx);
        self.regenerate_dashes(config, &ctx);
        if ctx.grounded {
            self.can_slam = true;
        }

        motor.lin = Default::default();
        motor.ang = Default::default();

        motor.lin.acceleration += ctx.gravity.acceleration();

        let horizontal = clamp_axis(input.horizontal);
        let vertical = clamp_axis(input.vertical);

        // Rolling: spinning around `right` moves the ball along `forward`.
        let roll_axis = (ctx.basis.right * vertical - ctx.basis.forward * horizontal)
            .normalize_or_zero();
        motor.ang.acceleration = roll_axis * config.move_torque;
        self.limit_angular_velocity(config, &ctx, motor);

        let planar_direction = ctx.basis.planar_direction(horizontal, vertical);
        motor.lin.acceleration += planar_direction
            * if ctx.grounded {
                config.move_force
            } else {
                config.air_move_force
            };

        if input.jump && 0 < self.jump_charges_left && self.jump_trigger_timer <= 0.0 {
            let up = ctx.gravity.up();
            let upward_speed = (ctx.tracker.velocity + motor.lin.boost).dot(up);
            if upward_speed < 0.0 {
                // Falling speed would eat the jump.
                motor.lin.boost -= up * upward_speed;
            }
            motor.lin.boost += up * config.jump_force;
            self.jump_charges_left -= 1;
            self.jump_reset_timer = config.jump_reset_cooldown;
            self.jump_trigger_timer = match config.jump_style {
                TumbleJumpStyle::Charges { trigger_delay, .. } => trigger_delay,
                TumbleJumpStyle::CoyoteTime { .. } => 0.0,
            };
            self.coyote_timer = 0.0;
            self.can_slam = true;
            performed.jump = true;
        }

        if input.dash && self.dash_available(config) {
            if let Some(direction) = dash_direction(config, ctx.view, horizontal, vertical) {
                motor.lin.boost += direction * config.dash_force;
                match config.dash_style {
                    TumbleDashStyle::Disabled => {}
                    TumbleDashStyle::Cooldown { cooldown } => {
                        self.dash_cooldown_timer = cooldown;
                    }
                    TumbleDashStyle::Charges { .. } => {
                        self.dash_charges_left -= 1;
                    }
                }
                performed.dash = true;
            }
        }

        if input.slam && !ctx.grounded && self.can_slam && 0.0 < config.slam_force {
            let down = ctx.gravity.direction();
            let lateral_velocity = (ctx.tracker.velocity + motor.lin.boost).reject_from(down);
            motor.lin.boost -= lateral_velocity * config.slam_lateral_damping;
            motor.lin.boost += down * config.slam_force;
            self.can_slam = false;
            performed.slam = true;
        }

        performed
    }

    fn update_jump_charges(&mut self, config: &TumbleControllerConfig, ctx: &TumbleMotionContext) {
        let max_jumps = config.jump_style.max_jumps();
        self.jump_charges_left = self.jump_charges_left.min(max_jumps);

        if ctx.grounded && self.jump_reset_timer <= 0.0 && !ctx.regen_blocked {
            self.jump_charges_left = max_jumps;
        }

        if let TumbleJumpStyle::CoyoteTime { coyote_time } = config.jump_style {
            if ctx.grounding_update == TumbleGroundingUpdate::LeftGround {
                self.coyote_timer = coyote_time;
            } else if !ctx.grounded {
                self.coyote_timer = (self.coyote_timer - ctx.frame_duration).max(0.0);
            }
            if !ctx.grounded && self.coyote_timer <= 0.0 {
                self.jump_charges_left = 0;
            }
        }
    }

    fn regenerate_dashes(&mut self, config: &TumbleControllerConfig, ctx: &TumbleMotionContext) {
        let TumbleDashStyle::Charges {
            max_dashes,
            regen_time,
        } = config.dash_style
        else {
            return;
        };
        self.dash_charges_left = self.dash_charges_left.min(max_dashes);
        if !ctx.grounded || max_dashes <= self.dash_charges_left {
            self.dash_regen_elapsed = 0.0;
            return;
        }
        if regen_time <= 0.0 {
            self.dash_charges_left = max_dashes;
            self.dash_regen_elapsed = 0.0;
            return;
        }
        self.dash_regen_elapsed += ctx.frame_duration;
        while regen_time <= self.dash_regen_elapsed && self.dash_charges_left < max_dashes {
            self.dash_charges_left += 1;
            self.dash_regen_elapsed -= regen_time;
        }
        if max_dashes <= self.dash_charges_left {
            self.dash_regen_elapsed = 0.0;
        }
    }

    fn dash_available(&self, config: &TumbleControllerConfig) -> bool {
        match config.dash_style {
            TumbleDashStyle::Disabled => false,
            TumbleDashStyle::Cooldown { .. } => self.dash_cooldown_timer <= 0.0,
            TumbleDashStyle::Charges { .. } => 0 < self.dash_charges_left,
        }
    }

    fn limit_angular_velocity(
        &self,
        config: &TumbleControllerConfig,
        ctx: &TumbleMotionContext,
        motor: &mut TumbleMotor,
    ) {
        if ctx.frame_duration <= 0.0 {
            return;
        }
        let predicted = ctx.tracker.angvel + motor.ang.acceleration * ctx.frame_duration;
        if config.max_angular_velocity < predicted.length() {
            let limited = predicted.clamp_length_max(config.max_angular_velocity);
            motor.ang.acceleration = (limited - ctx.tracker.angvel) / ctx.frame_duration;
        }
    }
}

fn clamp_axis(value: Float) -> Float {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// The dash follows the stick relative to the camera - including the camera's pitch - or goes
/// straight where the camera looks when the stick is (nearly) centered.
fn dash_direction(
    config: &TumbleControllerConfig,
    view: &TumbleView,
    horizontal: Float,
    vertical: Float,
) -> Option<Vector3> {
    let threshold = config.dash_input_threshold;
    let direction = if threshold < horizontal.abs() || threshold < vertical.abs() {
        view.forward * vertical + view.right * horizontal
    } else {
        view.forward
    };
    direction.try_normalize()
}
