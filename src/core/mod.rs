pub mod cloth;
pub mod constraint;
pub mod particle;
pub mod sim_state;

pub use cloth::{ClothConfig, ClothMesh};
pub use constraint::{Constraint, ConstraintSet, ParticlePair};
pub use particle::Particle;
pub use sim_state::ClothState;
