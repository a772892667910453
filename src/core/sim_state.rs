use bevy::math::Rect;
use bevy::prelude::*;

use crate::config::SolverParams;
use crate::config::constants::{GRAVITY, SIM_HEIGHT, SIM_WIDTH};
use crate::core::cloth::{ClothConfig, ClothMesh};
use crate::core::constraint::ConstraintSet;
use crate::core::particle::Particle;
use crate::math::{Real, Vector};

/// Aggregate simulation state for the cloth solver.
///
/// Owns the particle storage outright; constraints reach into it by
/// index only and can never outlive it. All mutation funnels through
/// `tick` or the granular stage methods the schedule systems call.
#[derive(Resource)]
pub struct ClothState {
    mesh: ClothMesh,
    params: SolverParams,
    gravity: Vector,
    bounds: Rect,
}

impl ClothState {
    pub fn new(config: &ClothConfig, params: SolverParams, gravity: Vector, bounds: Rect) -> Self {
        Self {
            mesh: ClothMesh::new(config),
            params,
            gravity,
            bounds,
        }
    }

    pub fn mesh(&self) -> &ClothMesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut ClothMesh {
        &mut self.mesh
    }

    pub fn particles(&self) -> &[Particle] {
        self.mesh.particles()
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        self.mesh.particles_mut()
    }

    pub fn constraints(&self) -> &ConstraintSet {
        self.mesh.constraints()
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SolverParams {
        &mut self.params
    }

    pub fn gravity(&self) -> Vector {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vector) {
        self.gravity = gravity;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn particle_count(&self) -> usize {
        self.mesh.particle_count()
    }

    pub fn constraint_count(&self) -> usize {
        self.mesh.constraint_count()
    }

    pub fn active_constraint_count(&self) -> usize {
        self.mesh.constraints().active_count()
    }

    /// Stage 1: apply gravity, integrate and clamp every particle,
    /// before any constraint work. `dt` is scaled by the configured
    /// time scale first.
    pub fn integrate_particles(&mut self, dt: Real) {
        let gravity = self.gravity;
        let bounds = self.bounds;
        let dt = dt * self.params.time_scale;

        for particle in self.mesh.particles_mut() {
            particle.apply_force(gravity);
            particle.integrate(dt);
            particle.clamp_to_bounds(bounds);
        }
    }

    /// Stage 2: exactly one Gauss–Seidel sweep over the constraint set.
    pub fn relax_constraints(&mut self) {
        let (particles, constraints) = self.mesh.split_mut();
        constraints.relax_all(particles);
    }

    /// Stage 3: cut the active constraint nearest to `point`, if one
    /// lies within the configured cut radius. Returns the cut
    /// constraint's index; a miss is a normal `None`, not an error.
    pub fn cut_at(&mut self, point: Vector) -> Option<usize> {
        let index = self.mesh.constraints().find_nearest(
            self.mesh.particles(),
            point,
            self.params.cut_radius,
        )?;
        self.mesh.constraints_mut().deactivate(index);
        Some(index)
    }

    /// One whole simulation tick: integrate all particles, run one
    /// relaxation sweep, then apply the optional cut.
    ///
    /// The stage order is a fixed contract. Interleaving integration
    /// with relaxation would let the sweep read half-stepped neighbor
    /// positions.
    pub fn tick(&mut self, dt: Real, cut: Option<Vector>) -> Option<usize> {
        self.integrate_particles(dt);
        self.relax_constraints();
        cut.and_then(|point| self.cut_at(point))
    }

    /// Radial push with quadratic falloff, for pointer interaction.
    /// Displaces positions directly; the next Verlet step turns the
    /// displacement into velocity.
    pub fn apply_impulse(&mut self, center: Vector, radius: Real, strength: Real, dt: Real) {
        for particle in self.mesh.particles_mut() {
            if particle.fixed {
                continue;
            }
            let offset = particle.position - center;
            let distance = offset.length();
            if distance < radius {
                let direction = if distance > 1.0e-4 {
                    offset / distance
                } else {
                    Vector::Y
                };
                let falloff = (1.0 - distance / radius).powi(2);
                particle.position += direction * strength * falloff * dt;
            }
        }
    }

    /// Accumulate an external force (wind and the like) on every
    /// particle for the next integration step.
    pub fn apply_force_to_all(&mut self, force: Vector) {
        for particle in self.mesh.particles_mut() {
            particle.apply_force(force);
        }
    }
}

impl Default for ClothState {
    /// The demo cloth: default grid centered in the default simulation
    /// bounds, hanging under the default gravity.
    fn default() -> Self {
        let bounds = Rect::new(0.0, 0.0, SIM_WIDTH, SIM_HEIGHT);
        let config = ClothConfig::default().centered_in(bounds);
        Self::new(&config, SolverParams::default(), GRAVITY, bounds)
    }
}
