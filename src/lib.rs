use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod math;
pub mod solver;

// Public re-exports for clean API
pub use crate::config::SolverParams;
pub use crate::config::constants::GRAVITY;
pub use crate::core::{ClothConfig, ClothMesh, ClothState, Constraint, ConstraintSet, Particle};
pub use crate::solver::CutRequests;

use crate::solver::{apply_pending_cuts, integrate_particles, relax_constraints};

/// Steps the cloth once per fixed tick: integrate every particle, then
/// run a single relaxation sweep, then apply any queued cuts.
pub struct ClothPlugin;

impl Plugin for ClothPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClothState::default())
            .init_resource::<CutRequests>()
            .add_systems(
                FixedUpdate,
                (integrate_particles, relax_constraints, apply_pending_cuts).chain(),
            );
    }
}
