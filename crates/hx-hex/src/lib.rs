//! Staggered-row ("hexagonal") resampling of RGBA images.
//!
//! Target size policy:
//! - Output size is `(floor(W * 0.85), floor(H * 0.9))` with the default
//!   [`HexConfig`].
//! - A source that would shrink to zero width or height is rejected with
//!   `Error::DegenerateOutput` instead of producing an empty image.
//!
//! Representational meaning:
//! - Target pixel `(x, y)` samples the source around
//!   `(round((x + s) * W / Wh), round(y * H / Hh))`, where `s` is `0.5` on odd
//!   rows and `0` on even rows.
//! - The color is a fixed-weight 3x3 average: `0.5` for the center and
//!   `0.0625` for each neighbor, with clamp-to-edge addressing.
//! - Alpha is always 255. The output is still a rectangular row-major grid;
//!   only the sampling centers of odd rows are shifted.
//!
//! Every target pixel depends only on its own coordinates and the read-only
//! source, so rows can be filled in any order or in parallel.

mod convert;
mod dims;
mod grid;
mod sample;

pub use convert::{
    ConversionReport, ConvertOptions, Execution, HexImage, ProgressFn, compression_ratio, hexify,
    hexify_into, hexify_rgba, hexify_with, write_row,
};
pub use dims::{HexConfig, hex_dims};
pub use grid::HexGrid;
pub use sample::{CENTER_WEIGHT, NEIGHBOR_WEIGHT, sample_weighted3x3};
