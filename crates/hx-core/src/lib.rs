//! Foundational primitives for hexagonal pixel conversion.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! This allows borrowed views over padded buffers and subviews.
//!
//! ## Pixels
//! Color images store one [`Rgba8`] (`[u8; 4]`, R, G, B, A) per element.
//! Tightly packed byte buffers of length `width * height * 4` convert to and
//! from RGBA views without copying.
//!
//! ## Borders
//! Sampling outside the image uses clamp-to-edge: out-of-range coordinates
//! snap to the nearest edge pixel and never wrap.

mod border;
mod error;
mod image;
mod source;

pub use border::clamp_index;
pub use error::{Error, ErrorKind};
pub use image::{Image, ImageView, ImageViewMut, Rgba8};
pub use source::PixelSource;
