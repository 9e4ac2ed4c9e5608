mod common;

use bevy::prelude::*;
use bevy_tumble::math::*;
use bevy_tumble::util::angle_between;
use bevy_tumble::*;
use common::{assert_near, assert_vec_near};

const FRAME: Float = 1.0 / 60.0;

fn rig() -> TumbleCameraRig {
    TumbleCameraRig::new(Entity::PLACEHOLDER)
}

#[test]
fn first_update_snaps_to_gravity() {
    let mut rig = rig();
    let pose = rig.update(FRAME, Vector3::X, 0, Vector3::ZERO);
    assert_vec_near(pose.up, Vector3::NEG_X);
    assert!(rig.has_converged(Vector3::X));
    assert!(pose.occlusion_avoidance);
}

#[test]
fn smoothing_converges_monotonically() {
    let mut rig = rig();
    rig.update(FRAME, Vector3::NEG_Y, 0, Vector3::ZERO);

    let target = Vector3::new(1.0, 0.0, 1.0).normalize();
    let mut previous_angle = angle_between(Vector3::NEG_Y, target);
    let mut converged_after = None;
    for frame in 0..600 {
        let pose = rig.update(FRAME, target, 0, Vector3::ZERO);
        let angle = angle_between(-pose.up, target);
        assert!(
            angle <= previous_angle + 1e-6,
            "angle grew from {previous_angle} to {angle} on frame {frame}"
        );
        previous_angle = angle;
        if pose.occlusion_avoidance {
            converged_after = Some(frame);
            break;
        }
        assert!(!rig.has_converged(target));
    }
    let converged_after = converged_after.expect("camera never converged");
    assert!(0 < converged_after);
    assert_vec_near(rig.smoothed_gravity().unwrap(), target);
}

#[test]
fn gravity_flip_does_not_produce_nan() {
    let mut rig = rig();
    rig.update(FRAME, Vector3::NEG_Y, 0, Vector3::ZERO);
    let pose = rig.update(FRAME, Vector3::Y, 0, Vector3::ZERO);
    assert!(pose.up.is_finite());
    assert!(pose.translation.is_finite());
    assert!(!pose.occlusion_avoidance);
}

#[test]
fn respawn_suspends_occlusion_avoidance() {
    let mut rig = rig();
    assert!(rig.update(FRAME, Vector3::NEG_Y, 0, Vector3::ZERO).occlusion_avoidance);

    assert!(!rig.update(0.25, Vector3::NEG_Y, 1, Vector3::ZERO).occlusion_avoidance);
    assert!(!rig.update(0.25, Vector3::NEG_Y, 1, Vector3::ZERO).occlusion_avoidance);
    assert!(!rig.update(0.25, Vector3::NEG_Y, 1, Vector3::ZERO).occlusion_avoidance);
    assert!(rig.update(0.5, Vector3::NEG_Y, 1, Vector3::ZERO).occlusion_avoidance);
}

#[test]
fn orbit_looks_at_the_target() {
    let mut rig = rig();
    let target = Vector3::new(1.0, 2.0, 3.0);
    let pose = rig.update(FRAME, Vector3::NEG_Y, 0, target);
    assert_vec_near(pose.translation, target + Vector3::new(0.0, 2.0, 5.0));
    let looking = pose.rotation * Vector3::NEG_Z;
    assert_vec_near(looking, (target - pose.translation).normalize());
    assert!(0.0 < (pose.rotation * Vector3::Y).dot(pose.up));
}

#[test]
fn orbit_follows_gravity() {
    let mut rig = rig();
    let pose = rig.update(FRAME, Vector3::X, 0, Vector3::ZERO);
    // Raised along the new up.
    assert_near(pose.translation.dot(Vector3::NEG_X), 2.0);
}

#[test]
fn gravity_locked_camera_turns_with_look_input() {
    let mut rig = rig().with_mode(TumbleCameraMode::GravityLocked { distance: 4.0 });
    let pose = rig.update(FRAME, Vector3::NEG_Y, 0, Vector3::ZERO);
    assert_vec_near(pose.translation, Vector3::new(0.0, 0.0, 4.0));
    assert_vec_near(pose.rotation * Vector3::NEG_Z, Vector3::NEG_Z);

    rig.feed_look(Vector2::new(std::f64::consts::FRAC_PI_2 as Float, 0.0));
    let pose = rig.update(FRAME, Vector3::NEG_Y, 0, Vector3::ZERO);
    assert_vec_near(pose.rotation * Vector3::NEG_Z, Vector3::X);
    assert_vec_near(pose.rotation * Vector3::Y, Vector3::Y);
}

#[test]
fn pitch_is_clamped() {
    let mut rig = rig();
    rig.pitch_limits = (-0.5, 0.5);
    rig.feed_look(Vector2::new(0.0, 10.0));
    rig.update(FRAME, Vector3::NEG_Y, 0, Vector3::ZERO);
    assert_near(rig.pitch(), 0.5);
    rig.feed_look(Vector2::new(0.0, -30.0));
    rig.update(FRAME, Vector3::NEG_Y, 0, Vector3::ZERO);
    assert_near(rig.pitch(), -0.5);

    rig.feed_look(Vector2::new(Float::NAN, 0.0));
    rig.update(FRAME, Vector3::NEG_Y, 0, Vector3::ZERO);
    assert!(rig.yaw().is_finite());
}

#[test]
fn nan_pitch_limits_do_not_panic() {
    let mut rig = rig();
    rig.pitch_limits = (Float::NAN, 1.0);
    rig.feed_look(Vector2::new(0.0, 0.1));
    let pose = rig.update(FRAME, Vector3::NEG_Y, 0, Vector3::ZERO);
    assert!(rig.pitch().is_finite());
    assert!(pose.rotation.is_finite());
    assert!(rig.validate().is_err());
}

#[test]
fn rig_validation() {
    let mut rig = rig();
    assert!(rig.validate().is_ok());
    rig.pitch_limits = (1.0, -1.0);
    assert_eq!(
        rig.validate(),
        Err(TumbleConfigError::InvertedPitchRange {
            min: 1.0,
            max: -1.0
        })
    );
}
