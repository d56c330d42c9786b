pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod math;
pub mod render;
pub mod reveal;
pub mod scene;
pub mod snapshot;

pub use config::SceneConfig;
pub use error::{Result, SceneError};
pub use scene::{SceneComposer, UpdateOutcome};
