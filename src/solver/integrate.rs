use bevy::prelude::*;

use crate::core::ClothState;

/// Integration stage (applies gravity, steps the Verlet state, clamps to
/// bounds). Runs over all particles before any constraint work.
pub fn integrate_particles(time: Res<Time>, mut state: ResMut<ClothState>) {
    let dt = time.delta_secs();
    state.integrate_particles(dt);
}
