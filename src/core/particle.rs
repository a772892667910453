//! Point masses for the cloth simulation
//!
//! Particles carry Verlet state: the current position, the position one
//! step ago, and a force accumulator for the running step. Velocity is
//! never stored; it is implied by the position delta.

use bevy::math::Rect;

use crate::math::{Real, Vector, zero_vector};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector,
    /// Position one integration step ago. The implicit velocity is
    /// `position - previous_position`.
    pub previous_position: Vector,
    /// Accumulated force-equivalent for the current step; drained by
    /// `integrate`.
    pub acceleration: Vector,
    /// Fixed particles anchor the cloth and never move.
    pub fixed: bool,
}

impl Particle {
    /// Create a free particle at rest (zero implicit velocity).
    pub fn new(position: Vector) -> Self {
        Self {
            position,
            previous_position: position,
            acceleration: zero_vector(),
            fixed: false,
        }
    }

    /// Create an anchor particle. Anchors absorb no forces and no
    /// constraint corrections.
    pub fn fixed(position: Vector) -> Self {
        Self {
            fixed: true,
            ..Self::new(position)
        }
    }

    /// Accumulate a force for the current step. Multiple calls compose;
    /// the accumulator drains on `integrate`, so forces must be
    /// reapplied every step.
    #[inline(always)]
    pub fn apply_force(&mut self, force: Vector) {
        self.acceleration += force;
    }

    /// One Störmer–Verlet step. Velocity is inferred from the position
    /// delta, so corrections applied to `position` between steps feed
    /// straight into the next velocity estimate.
    pub fn integrate(&mut self, dt: Real) {
        if self.fixed {
            return;
        }
        let velocity = self.position - self.previous_position;
        self.previous_position = self.position;
        self.position += velocity + self.acceleration * (dt * dt);
        self.acceleration = zero_vector();
    }

    /// Clip the position into `bounds`, axis by axis. The previous
    /// position is left alone: the clamp eats the implicit velocity on
    /// the clamped axis while keeping tangential motion.
    #[inline]
    pub fn clamp_to_bounds(&mut self, bounds: Rect) {
        self.position = self.position.clamp(bounds.min, bounds.max);
    }

    /// Implicit velocity, in distance-per-step units.
    #[inline(always)]
    pub fn velocity(&self) -> Vector {
        self.position - self.previous_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn integration_accumulates_velocity_under_constant_force() {
        let mut p = Particle::new(Vector::ZERO);
        let dt = 1.0 / 30.0;
        for _ in 0..30 {
            p.apply_force(Vector::new(0.0, 10.0));
            p.integrate(dt);
        }
        // Verlet free fall over one second lands near the analytic
        // 0.5 * a * t^2, slightly above it because the first step
        // already carries a full dt^2 kick.
        assert_relative_eq!(p.position.y, 0.5 * 10.0, epsilon = 0.5);
        assert_eq!(p.position.x, 0.0);
    }

    #[test]
    fn fixed_particle_ignores_forces() {
        let mut p = Particle::fixed(Vector::new(5.0, 5.0));
        p.apply_force(Vector::new(1000.0, 1000.0));
        p.integrate(1.0 / 30.0);
        assert_eq!(p.position, Vector::new(5.0, 5.0));
        assert_eq!(p.velocity(), Vector::ZERO);
    }

    #[test]
    fn acceleration_resets_after_integration() {
        let mut p = Particle::new(Vector::ZERO);
        p.apply_force(Vector::new(3.0, 4.0));
        p.integrate(0.1);
        assert_eq!(p.acceleration, Vector::ZERO);
    }

    #[test]
    fn clamp_clips_position_but_not_previous_position() {
        let mut p = Particle::new(Vector::new(10.0, 10.0));
        p.position.x = -5.0;
        p.clamp_to_bounds(Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(p.position, Vector::new(0.0, 10.0));
        assert_eq!(p.previous_position, Vector::new(10.0, 10.0));
    }
}
