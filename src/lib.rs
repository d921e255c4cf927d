pub mod constants;
pub mod controls;
pub mod frame;
pub mod particles;
pub mod state;
pub mod visuals;

pub use constants::*;
pub use frame::*;
pub use particles::*;
pub use state::*;
pub use visuals::*;
