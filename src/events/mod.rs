pub mod controls;
pub mod keyboard;

pub use controls::*;
pub use keyboard::*;
