use bevy::math::Vec2;

pub type Real = f32;

pub type Vector = Vec2;

#[inline(always)]
pub fn zero_vector() -> Vector {
    Vec2::ZERO
}

#[inline(always)]
pub fn repeat_vector(value: Real) -> Vector {
    Vec2::splat(value)
}

/// Shortest distance from `point` to the line segment `a`..`b`.
///
/// Measured to the clamped projection, not the infinite line, so the cut
/// query cannot hit a constraint "beyond" one of its endpoints. A
/// zero-length segment collapses to the distance to `a`.
#[inline]
pub fn distance_to_segment(point: Vector, a: Vector, b: Vector) -> Real {
    point.distance(closest_point_on_segment(point, a, b))
}

/// Point on the segment `a`..`b` nearest to `point`.
///
/// Parametrizes the segment as `t` in [0, 1] with `t = 0` at `a`. The
/// sentinel start value keeps a degenerate (zero-length) segment on the
/// `a` branch instead of dividing by zero.
#[inline]
pub fn closest_point_on_segment(point: Vector, a: Vector, b: Vector) -> Vector {
    let ab = b - a;
    let length_squared = ab.length_squared();

    let mut t = -1.0;
    if length_squared != 0.0 {
        t = (point - a).dot(ab) / length_squared;
    }

    if t < 0.0 {
        a
    } else if t > 1.0 {
        b
    } else {
        a + ab * t
    }
}
