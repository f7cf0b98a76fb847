pub mod audio;
pub mod chemistry;
pub mod constants;
pub mod controller;
pub mod error;
pub mod hud;
pub mod input;
pub mod lifecycle;
pub mod mapping;
pub mod particles;
pub mod scene;
pub mod session;
pub mod territory;
pub mod variant;

pub use audio::*;
pub use chemistry::*;
pub use constants::*;
pub use controller::*;
pub use error::*;
pub use input::*;
pub use lifecycle::*;
pub use particles::*;
pub use session::*;
pub use territory::*;
pub use variant::*;
