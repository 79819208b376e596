pub mod canvas;
pub mod io;
pub mod pdf;
pub mod rgb;
pub mod traits;

pub use self::rgb::{PixelBuffer, RgbView, CHANNELS, WHITE};
pub use self::traits::{ImageView, Rows};
