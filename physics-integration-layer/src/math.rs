//! Precision-switchable math aliases.
//!
//! Everything bevy-tumble computes goes through these aliases, so that enabling the `f64` feature
//! moves the whole policy to double precision. Bevy's own transforms are always `f32` - use
//! [`AdjustPrecision`] when reading them and [`AsF32`] when writing back.

#[cfg(feature = "f64")]
use bevy::math::{DMat3, DQuat, DVec2, DVec3};
use bevy::math::{Mat3, Quat, Vec2, Vec3};

#[cfg(feature = "f64")]
pub type Float = f64;
#[cfg(not(feature = "f64"))]
pub type Float = f32;

#[cfg(feature = "f64")]
pub type Vector3 = DVec3;
#[cfg(not(feature = "f64"))]
pub type Vector3 = Vec3;

#[cfg(feature = "f64")]
pub type Vector2 = DVec2;
#[cfg(not(feature = "f64"))]
pub type Vector2 = Vec2;

#[cfg(feature = "f64")]
pub type Quaternion = DQuat;
#[cfg(not(feature = "f64"))]
pub type Quaternion = Quat;

#[cfg(feature = "f64")]
pub type Matrix3 = DMat3;
#[cfg(not(feature = "f64"))]
pub type Matrix3 = Mat3;

/// Convert an `f32` math construct (usually coming from Bevy) to the compiled precision.
pub trait AdjustPrecision {
    type Adjusted;
    fn adjust_precision(&self) -> Self::Adjusted;
}

/// Convert a math construct of the compiled precision back to `f32`.
pub trait AsF32 {
    type F32;
    fn f32(&self) -> Self::F32;
}

macro_rules! impl_precision {
    ($f32_type:ty, $target:ty, $to_f64:ident, $to_f32:ident) => {
        impl AdjustPrecision for $f32_type {
            type Adjusted = $target;

            #[cfg(feature = "f64")]
            fn adjust_precision(&self) -> Self::Adjusted {
                self.$to_f64()
            }

            #[cfg(not(feature = "f64"))]
            fn adjust_precision(&self) -> Self::Adjusted {
                *self
            }
        }

        #[cfg(feature = "f64")]
        impl AsF32 for $target {
            type F32 = $f32_type;

            fn f32(&self) -> Self::F32 {
                self.$to_f32()
            }
        }

        #[cfg(not(feature = "f64"))]
        impl AsF32 for $f32_type {
            type F32 = $f32_type;

            fn f32(&self) -> Self::F32 {
                *self
            }
        }
    };
}

impl_precision!(Vec3, Vector3, as_dvec3, as_vec3);
impl_precision!(Vec2, Vector2, as_dvec2, as_vec2);
impl_precision!(Quat, Quaternion, as_dquat, as_quat);

impl AdjustPrecision for f32 {
    type Adjusted = Float;

    fn adjust_precision(&self) -> Self::Adjusted {
        Float::from(*self)
    }
}

impl AsF32 for Float {
    type F32 = f32;

    #[allow(clippy::unnecessary_cast)]
    fn f32(&self) -> Self::F32 {
        *self as f32
    }
}
