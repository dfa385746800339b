use hx_core::Error;

use crate::dims::{HexConfig, hex_dims};

/// Source/target geometry of one conversion and the output-to-source mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGrid {
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
    scale_x: f64,
    scale_y: f64,
    stagger: f64,
}

impl HexGrid {
    pub fn new(src_w: usize, src_h: usize, cfg: &HexConfig) -> Result<Self, Error> {
        let (dst_w, dst_h) = hex_dims(src_w, src_h, cfg)?;
        Ok(Self {
            src_w,
            src_h,
            dst_w,
            dst_h,
            scale_x: src_w as f64 / dst_w as f64,
            scale_y: src_h as f64 / dst_h as f64,
            stagger: cfg.stagger,
        })
    }

    pub fn src_dims(&self) -> (usize, usize) {
        (self.src_w, self.src_h)
    }

    pub fn dst_dims(&self) -> (usize, usize) {
        (self.dst_w, self.dst_h)
    }

    /// Source pixels per target pixel along x.
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    /// Source pixels per target pixel along y.
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    /// Horizontal shift of row `hex_y` in target cells: zero on even rows.
    #[inline]
    pub fn row_offset(&self, hex_y: usize) -> f64 {
        if !hex_y.is_multiple_of(2) { self.stagger } else { 0.0 }
    }

    #[inline]
    pub fn center_x(&self, hex_x: usize, hex_y: usize) -> isize {
        ((hex_x as f64 + self.row_offset(hex_y)) * self.scale_x).round() as isize
    }

    #[inline]
    pub fn center_y(&self, hex_y: usize) -> isize {
        (hex_y as f64 * self.scale_y).round() as isize
    }

    /// Source-space sampling center of target pixel `(hex_x, hex_y)`.
    ///
    /// Rounds half away from zero. The result is not clamped and may lie one
    /// pixel past the right or bottom edge.
    #[inline]
    pub fn center(&self, hex_x: usize, hex_y: usize) -> (isize, isize) {
        (self.center_x(hex_x, hex_y), self.center_y(hex_y))
    }
}
