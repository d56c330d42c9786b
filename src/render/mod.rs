pub mod camera;
pub mod canvas;
pub mod gpu_context;
pub mod projector;
pub mod surface;

pub use camera::{Camera, ScreenPoint};
pub use canvas::{Canvas, DrawOp, Rgba};
pub use gpu_context::GpuContext;
pub use projector::Projector;
pub use surface::SurfacePresenter;
