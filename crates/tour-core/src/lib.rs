pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod graph;
pub mod overlay;
pub mod prefetch;
pub mod transition;
pub mod viewport;

pub use config::*;
pub use constants::*;
pub use engine::*;
pub use error::*;
pub use graph::*;
pub use overlay::*;
pub use prefetch::*;
pub use transition::*;
pub use viewport::*;
