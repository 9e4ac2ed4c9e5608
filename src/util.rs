//! Vector helpers shared by the motion and camera code.
//!
//! All of these are total: degenerate input produces a well defined fallback instead of NaN.
use crate::math::{Float, Matrix3, Quaternion, Vector3};

/// Below this length a vector is considered degenerate.
pub const DEGENERATE_LENGTH: Float = 1e-6;

/// Project `vector` on the plane perpendicular to `normal` and normalize the result.
///
/// If the projection vanishes (`vector` is parallel to `normal`, or either is zero), returns
/// `fallback` projected the same way - and if even that vanishes, an arbitrary unit vector
/// perpendicular to `normal`.
pub fn project_on_plane_normalized(vector: Vector3, normal: Vector3, fallback: Vector3) -> Vector3 {
    let Some(normal) = normal.try_normalize() else {
        return vector.try_normalize().unwrap_or(fallback);
    };
    for candidate in [vector, fallback] {
        let projected = candidate.reject_from_normalized(normal);
        if DEGENERATE_LENGTH < projected.length() {
            return projected.normalize();
        }
    }
    normal.any_orthonormal_vector()
}

/// The shortest rotation that takes the direction of `from` to the direction of `to`.
///
/// Unlike [`Quaternion::from_rotation_arc`], the inputs do not need to be normalized. If either
/// of them is zero, the identity rotation is returned.
pub fn rotation_between(from: Vector3, to: Vector3) -> Quaternion {
    match (from.try_normalize(), to.try_normalize()) {
        (Some(from), Some(to)) => Quaternion::from_rotation_arc(from, to),
        _ => Quaternion::IDENTITY,
    }
}

/// Spherically interpolate between two directions.
///
/// `t` is clamped to `[0, 1]`. The result is a unit vector unless both inputs are zero.
pub fn slerp_direction(from: Vector3, to: Vector3, t: Float) -> Vector3 {
    let Some(from) = from.try_normalize() else {
        return to.normalize_or_zero();
    };
    let Some(to) = to.try_normalize() else {
        return from;
    };
    let t = t.clamp(0.0, 1.0);
    if t == 1.0 {
        return to;
    }
    let arc = Quaternion::from_rotation_arc(from, to);
    (Quaternion::IDENTITY.slerp(arc, t) * from).normalize()
}

/// Angle in radians between two directions. Zero if either is degenerate.
pub fn angle_between(a: Vector3, b: Vector3) -> Float {
    if a.length() < DEGENERATE_LENGTH || b.length() < DEGENERATE_LENGTH {
        return 0.0;
    }
    a.angle_between(b)
}

/// A rotation whose negative Z axis points along `forward` and whose Y axis is as close as
/// possible to `up`.
///
/// This is the Bevy-convention counterpart of a "look rotation". If `forward` is parallel to `up`
/// an arbitrary perpendicular is picked as the right axis.
pub fn look_rotation(forward: Vector3, up: Vector3) -> Quaternion {
    let up = up.try_normalize().unwrap_or(Vector3::Y);
    let forward = project_on_plane_normalized(forward, Vector3::ZERO, Vector3::NEG_Z);
    let right = forward
        .cross(up)
        .try_normalize()
        .unwrap_or_else(|| forward.any_orthonormal_vector());
    let up = right.cross(forward);
    Quaternion::from_mat3(&Matrix3::from_cols(right, up, -forward)).normalize()
}
