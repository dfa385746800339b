//! Example: convert every image in a directory.
//!
//! Each decodable file in the input directory is converted with the default
//! hex geometry and written as `<stem>_hex.png` into the output directory.
//! Files that fail to decode, or that are too small to convert, are reported
//! and skipped. A JSON summary with per-image timing is written at the end.
//!
//! Run from the workspace root:
//!   cargo run -p hexpixel --example batch -- --help
//!   cargo run -p hexpixel --example batch -- --input data --out data/hex

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use hexpixel::{ConvertOptions, ErrorKind, ImageView, hexify_with};
use image::{ImageReader, RgbaImage};
use serde::Serialize;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Convert a directory of images into hex pixel grids")]
struct Args {
    /// Directory to read images from
    #[arg(long, default_value = "data")]
    input: PathBuf,

    /// Directory to write converted PNGs and summary.json into
    #[arg(long, default_value = "data/hex")]
    out: PathBuf,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ImageResult {
    file: String,
    src_width: usize,
    src_height: usize,
    width: usize,
    height: usize,
    /// Wall-clock time of the conversion alone, in milliseconds.
    elapsed_ms: f64,
    compression_ratio: f64,
}

#[derive(Serialize)]
struct Summary {
    converted: Vec<ImageResult>,
    skipped: Vec<String>,
    total_ms: f64,
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.input.is_dir() {
        bail!("input is not a directory: {}", args.input.display());
    }
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let mut entries: Vec<PathBuf> = std::fs::read_dir(&args.input)
        .with_context(|| format!("listing {}", args.input.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    let mut summary = Summary {
        converted: Vec::new(),
        skipped: Vec::new(),
        total_ms: 0.0,
    };
    let total_start = Instant::now();

    for path in &entries {
        let Some(rgba) = decode_rgba(path) else {
            println!("  skip {} (not an image)", path.display());
            summary.skipped.push(path.display().to_string());
            continue;
        };
        let (w, h) = rgba.dimensions();
        let src = ImageView::from_rgba_bytes(w as usize, h as usize, rgba.as_raw())
            .with_context(|| format!("wrapping {}", path.display()))?;

        let out = match hexify_with(&src, &ConvertOptions::default()) {
            Ok(out) => out,
            Err(e) if e.kind() == ErrorKind::DegenerateOutput => {
                println!("  skip {} ({e})", path.display());
                summary.skipped.push(path.display().to_string());
                continue;
            }
            Err(e) => return Err(e).with_context(|| format!("converting {}", path.display())),
        };

        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        let out_path = args.out.join(format!("{stem}_hex.png"));
        let (hw, hh) = (out.image.width() as u32, out.image.height() as u32);
        RgbaImage::from_raw(hw, hh, out.image.into_rgba_bytes())
            .context("building RgbaImage")?
            .save(&out_path)
            .with_context(|| format!("saving {}", out_path.display()))?;

        let elapsed_ms = out.report.elapsed.as_secs_f64() * 1e3;
        println!(
            "  {}: {w}x{h} -> {hw}x{hh}  ({elapsed_ms:.2} ms)",
            path.display()
        );

        summary.converted.push(ImageResult {
            file: path.display().to_string(),
            src_width: out.report.src_width,
            src_height: out.report.src_height,
            width: out.report.width,
            height: out.report.height,
            elapsed_ms,
            compression_ratio: out.report.compression_ratio(),
        });
    }

    summary.total_ms = total_start.elapsed().as_secs_f64() * 1e3;
    println!(
        "converted {} image(s), skipped {}, total {:.2} ms",
        summary.converted.len(),
        summary.skipped.len(),
        summary.total_ms
    );

    let summary_path = args.out.join("summary.json");
    let file = std::fs::File::create(&summary_path)
        .with_context(|| format!("creating {}", summary_path.display()))?;
    serde_json::to_writer_pretty(file, &summary)
        .with_context(|| format!("writing JSON to {}", summary_path.display()))?;

    println!("summary written to {}", summary_path.display());
    Ok(())
}

fn decode_rgba(path: &Path) -> Option<RgbaImage> {
    let reader = ImageReader::open(path).ok()?.with_guessed_format().ok()?;
    reader.decode().ok().map(|img| img.into_rgba8())
}
