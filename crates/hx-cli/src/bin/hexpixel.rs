use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use hexpixel::{
    ConversionReport, ConvertOptions, Execution, HexConfig, HexImage, Image, ImageView, Rgba8,
    compression_ratio, hex_dims, hexify_with,
};
use image::{Rgba, RgbaImage};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "hexpixel")]
#[command(about = "Convert images into staggered-row hexagonal pixel grids")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an image and write the result as PNG.
    #[command(name = "convert")]
    Convert(ConvertArgs),
    /// Render the converted image with odd rows visibly offset.
    #[command(name = "preview")]
    Preview(PreviewArgs),
    /// Print source/target geometry without converting.
    #[command(name = "info")]
    Info(InfoArgs),
}

#[derive(Args, Debug, Clone)]
struct GridArgs {
    /// Target width as a fraction of source width.
    #[arg(long, default_value_t = 0.85)]
    scale_x: f64,
    /// Target height as a fraction of source height.
    #[arg(long, default_value_t = 0.9)]
    scale_y: f64,
    /// Horizontal shift of odd rows, in target cells.
    #[arg(long, default_value_t = 0.5)]
    stagger: f64,
}

impl GridArgs {
    fn config(&self) -> HexConfig {
        HexConfig {
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            stagger: self.stagger,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct ConvertArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    /// Output PNG (default: <input stem>_hex.png next to the input).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also write a JSON conversion report here.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Fill rows on the calling thread only.
    #[arg(long, default_value_t = false)]
    sequential: bool,
    #[command(flatten)]
    grid: GridArgs,
}

#[derive(Args, Debug, Clone)]
struct PreviewArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, required = true)]
    out: PathBuf,
    /// Edge length of one rendered cell, in output pixels.
    #[arg(long, default_value_t = 8)]
    cell: u32,
    #[command(flatten)]
    grid: GridArgs,
}

#[derive(Args, Debug, Clone)]
struct InfoArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[command(flatten)]
    grid: GridArgs,
}

#[derive(Debug, Clone, Serialize)]
struct GridDto {
    scale_x: f64,
    scale_y: f64,
    stagger: f64,
}

#[derive(Debug, Clone, Serialize)]
struct ReportDto {
    input: String,
    output: String,
    execution: &'static str,
    src_width: usize,
    src_height: usize,
    width: usize,
    height: usize,
    elapsed_ms: f64,
    compression_ratio: f64,
    grid: GridDto,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Convert(args) => run_convert(args),
        Command::Preview(args) => run_preview(args),
        Command::Info(args) => run_info(args),
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let rgba = load_input_rgba(&args.input)?;
    let src = rgba_view(&rgba, &args.input)?;
    let execution = if args.sequential {
        Execution::Sequential
    } else {
        Execution::ParallelRows
    };

    let out = convert_logged(&src, args.grid.config(), execution)?;
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    save_rgba_image(&out_path, out.image)?;

    log::info!(
        "wrote {} ({}x{}, {:.1}% fewer pixels, {:.2} ms)",
        out_path.display(),
        out.report.width,
        out.report.height,
        out.report.compression_ratio() * 100.0,
        out.report.elapsed.as_secs_f64() * 1e3
    );

    if let Some(report_path) = &args.report {
        let dto = report_dto(&args, &out_path, execution, &out.report);
        write_json(report_path, &dto)?;
    }

    Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<()> {
    if args.cell == 0 {
        bail!("--cell must be at least 1.");
    }

    let rgba = load_input_rgba(&args.input)?;
    let src = rgba_view(&rgba, &args.input)?;
    let out = convert_logged(&src, args.grid.config(), Execution::ParallelRows)?;
    let canvas = render_staggered(&out.image, args.cell)?;
    canvas
        .save(&args.out)
        .with_context(|| format!("saving preview {}", args.out.display()))?;

    log::info!(
        "wrote preview {} ({}x{})",
        args.out.display(),
        canvas.width(),
        canvas.height()
    );
    Ok(())
}

fn run_info(args: InfoArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    let (w, h) = image::image_dimensions(&args.input)
        .with_context(|| format!("reading dimensions of {}", args.input.display()))?;

    for line in info_lines(w as usize, h as usize, &args.grid.config())? {
        println!("{line}");
    }
    Ok(())
}

fn info_lines(w: usize, h: usize, config: &HexConfig) -> Result<Vec<String>> {
    let (hw, hh) = hex_dims(w, h, config)
        .with_context(|| format!("computing hex dimensions for {w}x{h}"))?;

    Ok(vec![
        format!("source: {w}x{h}"),
        format!("hex:    {hw}x{hh}"),
        format!(
            "pixels: {} -> {} ({:.1}% fewer)",
            w * h,
            hw * hh,
            compression_ratio((w, h), (hw, hh)) * 100.0
        ),
    ])
}

fn convert_logged(
    src: &ImageView<'_, Rgba8>,
    config: HexConfig,
    execution: Execution,
) -> Result<HexImage> {
    let last_decile = AtomicUsize::new(0);
    let progress = |fraction: f32| {
        let decile = (fraction * 10.0).floor() as usize;
        if last_decile.fetch_max(decile, Ordering::Relaxed) < decile {
            log::debug!("converted {}%", decile * 10);
        }
    };

    let opts = ConvertOptions {
        config,
        execution,
        progress: Some(&progress),
        ..ConvertOptions::default()
    };
    hexify_with(src, &opts)
        .with_context(|| format!("converting {}x{} image", src.width(), src.height()))
}

fn report_dto(
    args: &ConvertArgs,
    out_path: &Path,
    execution: Execution,
    report: &ConversionReport,
) -> ReportDto {
    ReportDto {
        input: args.input.display().to_string(),
        output: out_path.display().to_string(),
        execution: match execution {
            Execution::Sequential => "sequential",
            Execution::ParallelRows => "parallel_rows",
        },
        src_width: report.src_width,
        src_height: report.src_height,
        width: report.width,
        height: report.height,
        elapsed_ms: report.elapsed.as_secs_f64() * 1e3,
        compression_ratio: report.compression_ratio(),
        grid: GridDto {
            scale_x: args.grid.scale_x,
            scale_y: args.grid.scale_y,
            stagger: args.grid.stagger,
        },
    }
}

/// Draws every hex pixel as a `cell x cell` square, shifting odd rows right
/// by half a cell. Uncovered canvas stays transparent.
fn render_staggered(img: &Image<Rgba8>, cell: u32) -> Result<RgbaImage> {
    let half = cell / 2;
    let canvas_w = u32::try_from(img.width())
        .ok()
        .and_then(|w| w.checked_mul(cell))
        .and_then(|w| w.checked_add(half))
        .context("preview width overflows u32")?;
    let canvas_h = u32::try_from(img.height())
        .ok()
        .and_then(|h| h.checked_mul(cell))
        .context("preview height overflows u32")?;

    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, Rgba([0, 0, 0, 0]));
    let view = img.as_view();
    for y in 0..img.height() {
        let offset = if y.is_multiple_of(2) { 0 } else { half };
        let top = y as u32 * cell;
        for (x, &px) in view.row(y).iter().enumerate() {
            let left = x as u32 * cell + offset;
            for dy in 0..cell {
                for dx in 0..cell {
                    canvas.put_pixel(left + dx, top + dy, Rgba(px));
                }
            }
        }
    }

    Ok(canvas)
}

fn load_input_rgba(path: &Path) -> Result<RgbaImage> {
    ensure_file_exists(path, "input")?;
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    Ok(dyn_img.into_rgba8())
}

/// Borrows the decoded pixels as the converter's source; no copy.
fn rgba_view<'a>(rgba: &'a RgbaImage, path: &Path) -> Result<ImageView<'a, Rgba8>> {
    let (w, h) = rgba.dimensions();
    ImageView::from_rgba_bytes(w as usize, h as usize, rgba.as_raw())
        .with_context(|| format!("viewing rgba pixels of {}", path.display()))
}

fn save_rgba_image(path: &Path, img: Image<Rgba8>) -> Result<()> {
    let (w, h) = (img.width() as u32, img.height() as u32);
    let rgba = RgbaImage::from_raw(w, h, img.into_rgba_bytes())
        .context("constructing RgbaImage from raw bytes")?;
    rgba.save(path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let dir = input.parent().unwrap_or(Path::new("."));
    dir.join(format!("{stem}_hex.png"))
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
