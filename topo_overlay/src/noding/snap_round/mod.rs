//! Snap rounding noder and its hot pixel machinery.
mod hot_pixel;
mod hot_pixel_index;
mod intersection_adder;
mod noder;

pub use hot_pixel::HotPixel;
pub use hot_pixel_index::{FrozenHotPixelIndex, HotPixelIndex};
pub use intersection_adder::SnapRoundingIntersectionAdder;
pub use noder::SnapRoundingNoder;
