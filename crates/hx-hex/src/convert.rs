use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use hx_core::{Error, Image, ImageView, ImageViewMut, PixelSource, Rgba8};

use crate::dims::HexConfig;
use crate::grid::HexGrid;
use crate::sample::sample_weighted3x3;

/// How output rows are scheduled. Both produce byte-identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    Sequential,
    /// Rows spread over the rayon global pool. Runs sequentially when the
    /// `parallel` feature is disabled.
    #[default]
    ParallelRows,
}

/// Per-row progress callback receiving the completed fraction in `[0, 1]`.
pub type ProgressFn<'a> = &'a (dyn Fn(f32) + Sync);

#[derive(Clone, Copy, Default)]
pub struct ConvertOptions<'a> {
    pub config: HexConfig,
    pub execution: Execution,
    /// Called once per finished row. Under `ParallelRows` calls may arrive
    /// from several threads and slightly out of order.
    pub progress: Option<ProgressFn<'a>>,
    /// Checked before each row; once set the conversion fails with
    /// `Error::Cancelled`.
    pub cancel: Option<&'a AtomicBool>,
}

impl core::fmt::Debug for ConvertOptions<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConvertOptions")
            .field("config", &self.config)
            .field("execution", &self.execution)
            .field("progress", &self.progress.is_some())
            .field("cancel", &self.cancel.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionReport {
    pub src_width: usize,
    pub src_height: usize,
    pub width: usize,
    pub height: usize,
    pub elapsed: Duration,
}

impl ConversionReport {
    /// Fraction of pixels removed: `1 - (w * h) / (src_w * src_h)`.
    pub fn compression_ratio(&self) -> f64 {
        compression_ratio((self.src_width, self.src_height), (self.width, self.height))
    }
}

pub fn compression_ratio(src: (usize, usize), dst: (usize, usize)) -> f64 {
    let src_px = src.0 as f64 * src.1 as f64;
    if src_px == 0.0 {
        return 0.0;
    }
    1.0 - (dst.0 as f64 * dst.1 as f64) / src_px
}

#[derive(Debug, Clone, PartialEq)]
pub struct HexImage {
    pub image: Image<Rgba8>,
    pub report: ConversionReport,
}

/// Converts with default scale factors and row-parallel execution.
pub fn hexify<S: PixelSource + Sync + ?Sized>(src: &S) -> Result<Image<Rgba8>, Error> {
    hexify_with(src, &ConvertOptions::default()).map(|out| out.image)
}

pub fn hexify_with<S: PixelSource + Sync + ?Sized>(
    src: &S,
    opts: &ConvertOptions<'_>,
) -> Result<HexImage, Error> {
    let start = Instant::now();
    let grid = HexGrid::new(src.width(), src.height(), &opts.config)?;
    let (width, height) = grid.dst_dims();

    let mut image = Image::new_fill(width, height, [0u8, 0, 0, 255])?;
    fill_rows(src, &grid, &mut image.as_view_mut(), opts)?;

    let report = finish_report(&grid, start);
    Ok(HexImage { image, report })
}

/// Converts into a caller-owned sink that must already have the target size.
///
/// On error the sink may hold a partially written image and should be
/// discarded.
pub fn hexify_into<S: PixelSource + Sync + ?Sized>(
    src: &S,
    dst: &mut ImageViewMut<'_, Rgba8>,
    opts: &ConvertOptions<'_>,
) -> Result<ConversionReport, Error> {
    let start = Instant::now();
    let grid = HexGrid::new(src.width(), src.height(), &opts.config)?;

    let expected = grid.dst_dims();
    let actual = (dst.width(), dst.height());
    if expected != actual {
        return Err(Error::DimensionMismatch { expected, actual });
    }

    fill_rows(src, &grid, dst, opts)?;
    Ok(finish_report(&grid, start))
}

/// Converts a tightly packed `src_w * src_h * 4` RGBA byte buffer.
pub fn hexify_rgba(
    bytes: &[u8],
    src_w: usize,
    src_h: usize,
    opts: &ConvertOptions<'_>,
) -> Result<HexImage, Error> {
    let view = ImageView::from_rgba_bytes(src_w, src_h, bytes)?;
    hexify_with(&view, opts)
}

/// Fills one output row: samples every cell of row `hex_y` and forces alpha
/// to 255. `row` must be exactly one target row wide.
pub fn write_row<S: PixelSource + ?Sized>(src: &S, grid: &HexGrid, hex_y: usize, row: &mut [Rgba8]) {
    debug_assert_eq!(row.len(), grid.dst_dims().0);

    let cy = grid.center_y(hex_y);
    for (hex_x, out) in row.iter_mut().enumerate() {
        let [r, g, b] = sample_weighted3x3(src, grid.center_x(hex_x, hex_y), cy);
        *out = [r, g, b, 255];
    }
}

fn finish_report(grid: &HexGrid, start: Instant) -> ConversionReport {
    let (src_width, src_height) = grid.src_dims();
    let (width, height) = grid.dst_dims();
    let report = ConversionReport {
        src_width,
        src_height,
        width,
        height,
        elapsed: start.elapsed(),
    };
    log::debug!(
        "hexify {}x{} -> {}x{} in {:?} (ratio {:.3})",
        src_width,
        src_height,
        width,
        height,
        report.elapsed,
        report.compression_ratio()
    );
    report
}

fn fill_rows<S: PixelSource + Sync + ?Sized>(
    src: &S,
    grid: &HexGrid,
    dst: &mut ImageViewMut<'_, Rgba8>,
    opts: &ConvertOptions<'_>,
) -> Result<(), Error> {
    let width = dst.width();
    let height = dst.height();
    let (rows, stride) = dst.strided_rows_mut();

    match opts.execution {
        Execution::Sequential => fill_rows_sequential(src, grid, rows, stride, width, height, opts),
        Execution::ParallelRows => fill_rows_parallel(src, grid, rows, stride, width, height, opts),
    }
}

fn fill_rows_sequential<S: PixelSource + ?Sized>(
    src: &S,
    grid: &HexGrid,
    rows: &mut [Rgba8],
    stride: usize,
    width: usize,
    height: usize,
    opts: &ConvertOptions<'_>,
) -> Result<(), Error> {
    for (hex_y, chunk) in rows.chunks_mut(stride).enumerate() {
        if is_cancelled(opts.cancel) {
            return Err(Error::Cancelled);
        }
        write_row(src, grid, hex_y, &mut chunk[..width]);
        report_progress(opts.progress, hex_y + 1, height);
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn fill_rows_parallel<S: PixelSource + Sync + ?Sized>(
    src: &S,
    grid: &HexGrid,
    rows: &mut [Rgba8],
    stride: usize,
    width: usize,
    height: usize,
    opts: &ConvertOptions<'_>,
) -> Result<(), Error> {
    use rayon::prelude::*;
    use std::sync::atomic::AtomicUsize;

    let done = AtomicUsize::new(0);
    rows.par_chunks_mut(stride)
        .enumerate()
        .try_for_each(|(hex_y, chunk)| {
            if is_cancelled(opts.cancel) {
                return Err(Error::Cancelled);
            }
            write_row(src, grid, hex_y, &mut chunk[..width]);
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            report_progress(opts.progress, finished, height);
            Ok(())
        })
}

#[cfg(not(feature = "parallel"))]
fn fill_rows_parallel<S: PixelSource + Sync + ?Sized>(
    src: &S,
    grid: &HexGrid,
    rows: &mut [Rgba8],
    stride: usize,
    width: usize,
    height: usize,
    opts: &ConvertOptions<'_>,
) -> Result<(), Error> {
    log::debug!("`parallel` feature disabled, converting rows sequentially");
    fill_rows_sequential(src, grid, rows, stride, width, height, opts)
}

#[inline]
fn is_cancelled(flag: Option<&AtomicBool>) -> bool {
    flag.is_some_and(|f| f.load(Ordering::Relaxed))
}

#[inline]
fn report_progress(progress: Option<ProgressFn<'_>>, finished: usize, total: usize) {
    if let Some(cb) = progress {
        cb(finished as f32 / total.max(1) as f32);
    }
}
