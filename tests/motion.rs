mod common;

use bevy_tumble::math::*;
use bevy_tumble::*;
use common::{assert_near, assert_vec_near};

struct Actor {
    config: TumbleControllerConfig,
    state: TumbleMotionState,
    tracker: TumbleRigidBodyTracker,
    gravity: TumbleGravity,
    view: TumbleView,
    motor: TumbleMotor,
    regen_blocked: bool,
}

impl Actor {
    fn new(config: TumbleControllerConfig) -> Self {
        Self {
            state: TumbleMotionState::new(&config),
            config,
            tracker: Default::default(),
            gravity: Default::default(),
            view: Default::default(),
            motor: Default::default(),
            regen_blocked: false,
        }
    }

    fn tick_with_update(
        &mut self,
        frame_duration: Float,
        grounded: bool,
        grounding_update: TumbleGroundingUpdate,
        input: TumbleMotionInput,
    ) -> TumbleActionsPerformed {
        self.state.step(
            &self.config,
            &input,
            TumbleMotionContext {
                frame_duration,
                tracker: &self.tracker,
                gravity: &self.gravity,
                basis: self.view.basis(self.gravity.direction()),
                view: &self.view,
                grounded,
                grounding_update,
                regen_blocked: self.regen_blocked,
            },
            &mut self.motor,
        )
    }

    fn tick(
        &mut self,
        frame_duration: Float,
        grounded: bool,
        input: TumbleMotionInput,
    ) -> TumbleActionsPerformed {
        self.tick_with_update(frame_duration, grounded, TumbleGroundingUpdate::NoChange, input)
    }
}

fn idle() -> TumbleMotionInput {
    TumbleMotionInput::default()
}

fn jump() -> TumbleMotionInput {
    TumbleMotionInput {
        jump: true,
        ..Default::default()
    }
}

fn dash() -> TumbleMotionInput {
    TumbleMotionInput {
        dash: true,
        ..Default::default()
    }
}

fn slam() -> TumbleMotionInput {
    TumbleMotionInput {
        slam: true,
        ..Default::default()
    }
}

#[test]
fn double_jump_spends_both_charges() {
    let mut actor = Actor::new(Default::default());
    assert_eq!(actor.state.jump_charges_left(), 2);

    assert!(actor.tick(0.02, false, jump()).jump);
    assert_eq!(actor.state.jump_charges_left(), 1);
    assert_vec_near(actor.motor.lin.boost, Vector3::Y * 7.0);

    // Still within the trigger delay.
    assert!(!actor.tick(0.1, false, jump()).jump);
    assert_eq!(actor.state.jump_charges_left(), 1);

    assert!(actor.tick(0.5, false, jump()).jump);
    assert_eq!(actor.state.jump_charges_left(), 0);

    assert!(!actor.tick(0.5, false, jump()).jump);
    assert_eq!(actor.state.jump_charges_left(), 0);
    assert_eq!(actor.motor.lin.boost, Vector3::ZERO);
}

#[test]
fn jump_cancels_falling_speed_only() {
    let mut actor = Actor::new(Default::default());
    actor.tracker.velocity = Vector3::new(2.0, -10.0, 0.0);
    assert!(actor.tick(0.02, false, jump()).jump);
    assert_vec_near(actor.tracker.velocity + actor.motor.lin.boost, Vector3::new(2.0, 7.0, 0.0));

    let mut actor = Actor::new(Default::default());
    actor.tracker.velocity = Vector3::new(0.0, 3.0, 0.0);
    assert!(actor.tick(0.02, false, jump()).jump);
    assert_vec_near(actor.motor.lin.boost, Vector3::Y * 7.0);
}

#[test]
fn jump_follows_gravity() {
    let mut actor = Actor::new(Default::default());
    actor.gravity = TumbleGravity::new(Vector3::X, 9.81).unwrap();
    actor.tracker.velocity = Vector3::new(4.0, 0.0, 0.0);
    assert!(actor.tick(0.02, false, jump()).jump);
    assert_vec_near(actor.tracker.velocity + actor.motor.lin.boost, Vector3::NEG_X * 7.0);
}

#[test]
fn charges_refill_only_after_the_reset_cooldown() {
    let mut actor = Actor::new(Default::default());
    actor.tick(0.02, false, jump());
    actor.tick(0.5, false, jump());
    assert_eq!(actor.state.jump_charges_left(), 0);
    assert!(0.0 < actor.state.jump_reset_timer());

    actor.tick(0.1, true, idle());
    assert_eq!(actor.state.jump_charges_left(), 0);

    actor.tick(0.5, true, idle());
    assert_eq!(actor.state.jump_reset_timer(), 0.0);
    assert_eq!(actor.state.jump_charges_left(), 2);
}

#[test]
fn charges_do_not_refill_on_regen_blocking_surfaces() {
    let mut actor = Actor::new(Default::default());
    actor.tick(0.02, false, jump());
    actor.tick(0.6, false, idle());
    assert_eq!(actor.state.jump_charges_left(), 1);

    actor.regen_blocked = true;
    actor.tick(0.02, true, idle());
    assert_eq!(actor.state.jump_charges_left(), 1);

    actor.regen_blocked = false;
    actor.tick(0.02, true, idle());
    assert_eq!(actor.state.jump_charges_left(), 2);
}

#[test]
fn charges_do_not_refill_in_the_air() {
    let mut actor = Actor::new(Default::default());
    actor.tick(0.02, false, jump());
    for _ in 0..100 {
        actor.tick(0.02, false, idle());
    }
    assert_eq!(actor.state.jump_charges_left(), 1);
}

#[test]
fn coyote_time_allows_a_late_jump() {
    let config = TumbleControllerConfig {
        jump_style: TumbleJumpStyle::CoyoteTime { coyote_time: 0.2 },
        ..Default::default()
    };

    let mut actor = Actor::new(config.clone());
    actor.tick(0.02, true, idle());
    actor.tick_with_update(0.1, false, TumbleGroundingUpdate::LeftGround, idle());
    assert_eq!(actor.state.jump_charges_left(), 1);
    assert!(actor.tick(0.1, false, jump()).jump);
    assert_eq!(actor.state.jump_charges_left(), 0);

    let mut actor = Actor::new(config);
    actor.tick(0.02, true, idle());
    actor.tick_with_update(0.1, false, TumbleGroundingUpdate::LeftGround, idle());
    actor.tick(0.15, false, idle());
    actor.tick(0.1, false, idle());
    assert_eq!(actor.state.jump_charges_left(), 0);
    assert!(!actor.tick(0.02, false, jump()).jump);
}

#[test]
fn cooldown_dash() {
    let mut actor = Actor::new(Default::default());
    assert!(actor.tick(0.02, false, dash()).dash);
    assert_vec_near(actor.motor.lin.boost, Vector3::NEG_Z * 20.0);

    assert!(!actor.tick(0.5, false, dash()).dash);
    assert!(!actor.tick(0.4, false, dash()).dash);
    assert!(actor.tick(0.2, false, dash()).dash);
}

#[test]
fn dash_follows_the_stick_relative_to_the_camera() {
    let mut actor = Actor::new(Default::default());
    let performed = actor.tick(
        0.02,
        true,
        TumbleMotionInput {
            horizontal: 1.0,
            dash: true,
            ..Default::default()
        },
    );
    assert!(performed.dash);
    assert_vec_near(actor.motor.lin.boost, Vector3::X * 20.0);

    // Pitched camera - the dash keeps the pitch.
    let mut actor = Actor::new(Default::default());
    let forward = Vector3::new(0.0, -1.0, -1.0).normalize();
    actor.view.forward = forward;
    assert!(actor.tick(0.02, true, dash()).dash);
    assert_vec_near(actor.motor.lin.boost, forward * 20.0);
}

#[test]
fn dash_regenerates_while_grounded() {
    let mut actor = Actor::new(TumbleControllerConfig {
        dash_style: TumbleDashStyle::Charges {
            max_dashes: 2,
            regen_time: 1.0,
        },
        ..Default::default()
    });
    assert!(actor.tick(0.02, false, dash()).dash);
    assert!(actor.tick(0.02, false, dash()).dash);
    assert!(!actor.tick(0.02, false, dash()).dash);
    assert_eq!(actor.state.dash_charges_left(), 0);

    for _ in 0..10 {
        actor.tick(0.25, false, idle());
    }
    assert_eq!(actor.state.dash_charges_left(), 0);

    for _ in 0..3 {
        actor.tick(0.25, true, idle());
    }
    assert_eq!(actor.state.dash_charges_left(), 0);
    actor.tick(0.25, true, idle());
    assert_eq!(actor.state.dash_charges_left(), 1);

    // Leaving the ground resets the progress toward the next charge.
    actor.tick(0.25, true, idle());
    actor.tick(0.25, false, idle());
    for _ in 0..3 {
        actor.tick(0.25, true, idle());
    }
    assert_eq!(actor.state.dash_charges_left(), 1);
    actor.tick(0.25, true, idle());
    assert_eq!(actor.state.dash_charges_left(), 2);

    for _ in 0..10 {
        actor.tick(0.25, true, idle());
    }
    assert_eq!(actor.state.dash_charges_left(), 2);
}

#[test]
fn disabled_dash_never_fires() {
    let mut actor = Actor::new(TumbleControllerConfig {
        dash_style: TumbleDashStyle::Disabled,
        ..Default::default()
    });
    assert!(!actor.tick(0.02, true, dash()).dash);
    assert_eq!(actor.motor.lin.boost, Vector3::ZERO);
}

#[test]
fn slam_once_per_landing() {
    let mut actor = Actor::new(Default::default());
    actor.tracker.velocity = Vector3::new(4.0, 1.0, 0.0);

    assert!(!actor.tick(0.02, true, slam()).slam);

    assert!(actor.tick(0.02, false, slam()).slam);
    assert_vec_near(actor.motor.lin.boost, Vector3::new(-2.0, -20.0, 0.0));
    assert!(!actor.state.can_slam());

    assert!(!actor.tick(0.02, false, slam()).slam);

    actor.tick(0.02, true, idle());
    assert!(actor.state.can_slam());
    assert!(actor.tick(0.02, false, slam()).slam);
}

#[test]
fn jump_reenables_slam() {
    let mut actor = Actor::new(Default::default());
    assert!(actor.tick(0.02, false, slam()).slam);
    assert!(actor.tick(0.02, false, jump()).jump);
    assert!(actor.tick(0.02, false, slam()).slam);
}

#[test]
fn gravity_is_always_applied() {
    for grounded in [false, true] {
        let mut actor = Actor::new(Default::default());
        actor.gravity = TumbleGravity::new(Vector3::X, 5.0).unwrap();
        actor.tick(0.02, grounded, idle());
        assert_vec_near(actor.motor.lin.acceleration, Vector3::X * 5.0);
        assert_eq!(actor.motor.ang.acceleration, Vector3::ZERO);
    }
}

#[test]
fn rolling_forward_spins_around_right() {
    let mut actor = Actor::new(Default::default());
    actor.tick(
        0.02,
        true,
        TumbleMotionInput {
            vertical: 1.0,
            ..Default::default()
        },
    );
    assert_vec_near(actor.motor.ang.acceleration, Vector3::X * 10.0);
    assert_vec_near(
        actor.motor.lin.acceleration,
        Vector3::NEG_Y * 9.81 + Vector3::NEG_Z * 10.0,
    );
}

#[test]
fn rolling_uses_air_force_in_the_air() {
    let mut actor = Actor::new(TumbleControllerConfig {
        air_move_force: 3.0,
        ..Default::default()
    });
    actor.gravity = TumbleGravity::new(Vector3::NEG_Y, 0.0).unwrap();
    actor.tick(
        0.02,
        false,
        TumbleMotionInput {
            horizontal: 1.0,
            ..Default::default()
        },
    );
    assert_vec_near(actor.motor.lin.acceleration, Vector3::X * 3.0);
}

#[test]
fn angular_velocity_is_capped() {
    let mut actor = Actor::new(Default::default());
    actor.tracker.angvel = Vector3::X * 10.0;
    actor.tick(
        0.02,
        true,
        TumbleMotionInput {
            vertical: 1.0,
            ..Default::default()
        },
    );
    let predicted = actor.tracker.angvel + actor.motor.ang.calc_velocity_change(0.02);
    assert_near(predicted.length(), 10.0);
}

#[test]
fn garbage_input_is_ignored() {
    let mut actor = Actor::new(Default::default());
    actor.tick(
        0.02,
        true,
        TumbleMotionInput {
            horizontal: Float::NAN,
            vertical: Float::INFINITY,
            ..Default::default()
        },
    );
    assert!(actor.motor.lin.acceleration.is_finite());
    assert!(actor.motor.ang.acceleration.is_finite());
}
