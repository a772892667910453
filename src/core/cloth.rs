//! Cloth mesh construction
//!
//! Builds the row-major particle grid and the structural constraints
//! connecting it, in one pass.

use bevy::math::Rect;

use crate::config::constants::{CLOTH_COLS, CLOTH_ROWS, CLOTH_SPACING};
use crate::core::constraint::{Constraint, ConstraintSet};
use crate::core::particle::Particle;
use crate::math::{Real, Vector, repeat_vector};

/// Geometry of a cloth grid.
#[derive(Clone, Copy, Debug)]
pub struct ClothConfig {
    /// Particles per row
    pub cols: usize,
    /// Particles per column
    pub rows: usize,
    /// Separation between neighboring particles, per axis
    pub spacing: Vector,
    /// Position of the top-left particle
    pub origin: Vector,
    /// Fix every particle in row 0 so the cloth hangs from its top edge
    pub fix_top_row: bool,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            cols: CLOTH_COLS,
            rows: CLOTH_ROWS,
            spacing: CLOTH_SPACING,
            origin: Vector::ZERO,
            fix_top_row: true,
        }
    }
}

impl ClothConfig {
    /// Move the origin so the grid's footprint (`cols * spacing` per
    /// axis) is centered inside `bounds`.
    pub fn centered_in(mut self, bounds: Rect) -> Self {
        let footprint = Vector::new(
            self.cols as Real * self.spacing.x,
            self.rows as Real * self.spacing.y,
        );
        self.origin = bounds.min + (bounds.size() - footprint) / 2.0;
        self
    }
}

/// A cloth: contiguous row-major particle buffer plus the constraint
/// set connecting it. Particle (col, row) lives at index
/// `row * cols + col`.
///
/// The mesh owns all particle storage for the lifetime of the
/// simulation; constraints reach into it by index only.
pub struct ClothMesh {
    particles: Vec<Particle>,
    constraints: ConstraintSet,
    cols: usize,
    rows: usize,
}

impl ClothMesh {
    /// Build the grid in one pass: particles at
    /// `origin + (col * spacing.x, row * spacing.y)`, and for each one a
    /// constraint to its right neighbor and to the neighbor below, rest
    /// lengths taken from the initial separation.
    ///
    /// Degenerate configs are clamped rather than rejected: at least one
    /// particle per axis, strictly positive spacing.
    pub fn new(config: &ClothConfig) -> Self {
        let cols = config.cols.max(1);
        let rows = config.rows.max(1);
        let spacing = config.spacing.max(repeat_vector(Real::EPSILON));

        let mut particles = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                let position = config.origin
                    + Vector::new(col as Real * spacing.x, row as Real * spacing.y);
                particles.push(if config.fix_top_row && row == 0 {
                    Particle::fixed(position)
                } else {
                    Particle::new(position)
                });
            }
        }

        // Right + below neighbors: (cols-1)*rows horizontal plus
        // cols*(rows-1) vertical constraints, in row-major build order.
        let mut constraints = ConstraintSet::with_capacity((cols - 1) * rows + cols * (rows - 1));
        for row in 0..rows {
            for col in 0..cols {
                let here = row * cols + col;
                if col + 1 < cols {
                    constraints.push(Constraint::from_particles(here, here + 1, &particles));
                }
                if row + 1 < rows {
                    constraints.push(Constraint::from_particles(here, here + cols, &particles));
                }
            }
        }

        Self {
            particles,
            constraints,
            cols,
            rows,
        }
    }

    #[inline(always)]
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    pub fn particle_at(&self, col: usize, row: usize) -> &Particle {
        &self.particles[self.index(col, row)]
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn constraints_mut(&mut self) -> &mut ConstraintSet {
        &mut self.constraints
    }

    /// Split borrow for the relaxation sweep: mutable particles
    /// alongside the constraint set.
    pub fn split_mut(&mut self) -> (&mut [Particle], &ConstraintSet) {
        (&mut self.particles, &self.constraints)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
