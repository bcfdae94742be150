pub mod rgb;
pub mod traits;

pub use self::rgb::{RgbImage, RgbView, CHANNELS};
pub use self::traits::{ImageView, ImageViewMut, Rows};
