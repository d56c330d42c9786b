pub mod clock;
pub mod frame;
pub mod frame_loop;
pub mod timer;
pub mod viewport;

pub use clock::AnimationClock;
pub use frame::Frame;
pub use frame_loop::{FrameCallback, FrameLoop, SubscriptionId};
pub use timer::{FpsCounter, Throttled};
pub use viewport::{Viewport, MAX_DPR, MIN_DPR};
