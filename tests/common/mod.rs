#![allow(dead_code)]

use bevy_tumble::math::*;

pub const EPSILON: Float = 1e-4;

#[track_caller]
pub fn assert_near(actual: Float, expected: Float) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

#[track_caller]
pub fn assert_vec_near(actual: Vector3, expected: Vector3) {
    assert!(
        (actual - expected).length() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

#[track_caller]
pub fn assert_unit(vector: Vector3) {
    assert_near(vector.length(), 1.0);
}
