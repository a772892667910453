//! Distance constraints and the cloth's constraint set
//!
//! Constraints reference particles by index into the mesh's particle
//! buffer, so they survive any reallocation of that buffer. Cut
//! constraints are deactivated in place and keep their slot forever,
//! which keeps every index handed out by a query stable.

use indexmap::IndexMap;

use crate::core::particle::Particle;
use crate::math::{self, Real, Vector};

/// Unordered particle index pair, normalized so `(a, b) == (b, a)`.
///
/// Used as the constraint set's map key: one edge per pair of particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticlePair(usize, usize);

impl ParticlePair {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }
}

/// A distance relation between two particles.
#[derive(Clone, Copy, Debug)]
pub struct Constraint {
    pub a: usize,
    pub b: usize,
    /// Target separation, fixed at creation. Always positive for a grid
    /// built with positive spacing.
    pub rest_length: Real,
    /// Cleared once by a cut; never set again.
    pub active: bool,
}

impl Constraint {
    pub fn new(a: usize, b: usize, rest_length: Real) -> Self {
        Self {
            a,
            b,
            rest_length,
            active: true,
        }
    }

    /// Build a constraint whose rest length is the particles' current
    /// separation.
    pub fn from_particles(a: usize, b: usize, particles: &[Particle]) -> Self {
        let rest_length = particles[a].position.distance(particles[b].position);
        Self::new(a, b, rest_length)
    }

    /// One Gauss–Seidel half-step: split the length error across both
    /// free endpoints. A single call only partially corrects the
    /// constraint; rigidity emerges from repeated sweeps over frames.
    ///
    /// Fixed endpoints absorb no correction, so an edge between two
    /// anchors is rigid by construction. A zero-length edge has no
    /// defined direction and is skipped.
    pub fn satisfy(&self, particles: &mut [Particle]) {
        if !self.active {
            return;
        }

        let delta = particles[self.b].position - particles[self.a].position;
        let current_length = delta.length();
        if current_length == 0.0 {
            return;
        }

        let difference = (current_length - self.rest_length) / current_length;
        let correction = delta * (0.5 * difference);

        if !particles[self.a].fixed {
            particles[self.a].position += correction;
        }
        if !particles[self.b].fixed {
            particles[self.b].position -= correction;
        }
    }

    /// Permanently exclude this constraint from relaxation, queries and
    /// rendering. Idempotent.
    #[inline(always)]
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    #[inline(always)]
    pub fn current_length(&self, particles: &[Particle]) -> Real {
        particles[self.a].position.distance(particles[self.b].position)
    }
}

/// Insertion-ordered collection of constraints, keyed by particle pair.
///
/// The map key makes a duplicate edge between the same two particles
/// unrepresentable, and iteration order stays build order, which the
/// Gauss–Seidel sweep requires to be stable.
#[derive(Default)]
pub struct ConstraintSet {
    constraints: IndexMap<ParticlePair, Constraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self {
            constraints: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            constraints: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a constraint, keyed by its normalized particle pair.
    /// Returns false (leaving the set unchanged) when an edge between
    /// the same two particles already exists.
    pub fn push(&mut self, constraint: Constraint) -> bool {
        let pair = ParticlePair::new(constraint.a, constraint.b);
        if self.constraints.contains_key(&pair) {
            return false;
        }
        self.constraints.insert(pair, constraint);
        true
    }

    /// Apply every active constraint exactly once, in insertion order.
    /// One sweep per tick is the solver's contract; convergence comes
    /// from repetition across frames, not iteration within one.
    pub fn relax_all(&self, particles: &mut [Particle]) {
        for constraint in self.constraints.values() {
            constraint.satisfy(particles);
        }
    }

    /// Index of the active constraint nearest to `point`, measured to
    /// the line segment between its endpoints.
    ///
    /// Only a distance strictly below `max_radius` counts as a hit, and
    /// strict comparison keeps the first of any tied minima. A miss
    /// returns `None`; it is a normal result, not an error.
    pub fn find_nearest(
        &self,
        particles: &[Particle],
        point: Vector,
        max_radius: Real,
    ) -> Option<usize> {
        let mut nearest = None;
        let mut best = Real::MAX;

        for (index, constraint) in self.constraints.values().enumerate() {
            if !constraint.active {
                continue;
            }
            let distance = math::distance_to_segment(
                point,
                particles[constraint.a].position,
                particles[constraint.b].position,
            );
            if distance < max_radius && distance < best {
                best = distance;
                nearest = Some(index);
            }
        }

        nearest
    }

    /// Deactivate the constraint at `index`. Out-of-range indices are
    /// ignored.
    pub fn deactivate(&mut self, index: usize) {
        if let Some((_, constraint)) = self.constraints.get_index_mut(index) {
            constraint.deactivate();
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Constraint> {
        self.constraints.get_index(index).map(|(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.values()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.constraints.values().filter(|c| c.active).count()
    }
}
