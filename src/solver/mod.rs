pub mod cut;
pub mod integrate;
pub mod relax;

pub use cut::*;
pub use integrate::*;
pub use relax::*;
