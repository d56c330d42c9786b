pub mod arena;
pub mod composer;
pub mod environment;
pub mod generators;
pub mod hero;
pub mod motion;
pub mod mount;
pub mod primitive;
pub mod transform;

pub use arena::{PrimitiveArena, PrimitiveRecord};
pub use composer::{PrimitiveSnapshot, SceneComposer, SceneSnapshot, UpdateOutcome};
pub use environment::{CameraRig, Environment, Fog, Light, Vignette};
pub use motion::{Drift, Float, Motion, Orbit};
pub use mount::MountedScene;
pub use primitive::{DashPattern, Group, Material, Primitive, PrimitiveId, Shape};
pub use transform::Transform;
