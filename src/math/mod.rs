mod color;
mod rng;
mod wave;

pub use color::{hsv_to_rgb, palette, Color};
pub use rng::{random_in_cube, random_uniform, scene_rng};
pub use wave::Wave;
