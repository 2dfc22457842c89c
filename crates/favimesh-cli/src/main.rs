//! favimesh - Turn small images into palette-quantized rectangle meshes
//!
//! A command-line tool that decodes an image, shrinks and quantizes it, and
//! writes the greedy rectangle mesh as JSON or renders it back to a PNG.

use clap::{Args, Parser, Subcommand};
use favimesh::{process_image, rasterize, Palette, PixelBuffer, ProcessOptions, ProcessedImage, Theme, THEMES};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "favimesh")]
#[command(version)]
#[command(about = "Turn small images into palette-quantized rectangle meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mesh an image and write the result as JSON
    Mesh {
        /// Input image file (PNG, JPEG, GIF, WebP, ICO)
        input: PathBuf,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        palette: PaletteArgs,

        #[command(flatten)]
        process: ProcessArgs,
    },

    /// Mesh an image and render the mesh to a PNG
    Preview {
        /// Input image file (PNG, JPEG, GIF, WebP, ICO)
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        palette: PaletteArgs,

        #[command(flatten)]
        process: ProcessArgs,
    },

    /// List the built-in themes
    Themes,
}

#[derive(Args)]
#[group(multiple = false)]
struct PaletteArgs {
    /// Built-in theme name (see `favimesh themes`)
    #[arg(short, long)]
    theme: Option<String>,

    /// Comma-separated hex colors, e.g. "#0d2b45,#ffecd6"
    #[arg(short, long)]
    palette: Option<String>,

    /// Derive a palette with this many colors (2-256) from the image
    #[arg(short, long)]
    extract: Option<u16>,
}

#[derive(Args)]
struct ProcessArgs {
    /// Width the image is shrunk to before meshing
    #[arg(short, long, default_value = "64")]
    width: usize,

    /// Multiplier applied to every mesh coordinate
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,
}

impl PaletteArgs {
    fn resolve(&self, image: &PixelBuffer) -> Result<Palette, Box<dyn std::error::Error>> {
        let palette = match (&self.theme, &self.palette, self.extract) {
            (Some(name), _, _) => Theme::lookup(name)?.palette(),
            (_, Some(list), _) => list.parse::<Palette>()?,
            (_, _, Some(colors)) => Palette::extract(image, colors)?,
            _ => Theme::default().palette(),
        };
        Ok(palette)
    }
}

impl ProcessArgs {
    fn options(&self) -> ProcessOptions {
        ProcessOptions {
            target_width: self.width,
            scale: self.scale as usize,
        }
    }
}

fn load_image(path: &Path) -> Result<PixelBuffer, Box<dyn std::error::Error>> {
    let img = image::open(path).map_err(|e| format!("Failed to open '{}': {}", path.display(), e))?;
    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();
    Ok(PixelBuffer::new(rgba_img.into_raw(), width as usize, height as usize)?)
}

fn run_pipeline(
    input: &Path,
    palette: &PaletteArgs,
    process: &ProcessArgs,
) -> Result<ProcessedImage, Box<dyn std::error::Error>> {
    let image = load_image(input)?;
    let palette = palette.resolve(&image)?;
    let opts = process.options();

    log::info!(
        "Meshing '{}' ({}x{}) to width {} with {} colors, scale={}",
        input.display(),
        image.width(),
        image.height(),
        opts.target_width,
        palette.len(),
        opts.scale
    );

    let processed = process_image(&image, &palette, &opts)
        .map_err(|e| format!("Could not process '{}': {}", input.display(), e))?;
    log::info!(
        "Produced {} rects at {}x{}",
        processed.mesh.len(),
        processed.width,
        processed.height
    );
    Ok(processed)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mesh {
            input,
            output,
            pretty,
            palette,
            process,
        } => {
            let processed = run_pipeline(&input, &palette, &process)?;
            let json = if pretty {
                serde_json::to_string_pretty(&processed)?
            } else {
                serde_json::to_string(&processed)?
            };

            match output {
                Some(path) => {
                    fs::write(&path, &json)?;
                    log::info!("Written {} bytes to '{}'", json.len(), path.display());
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(json.as_bytes())?;
                    stdout.write_all(b"\n")?;
                }
            }
        }

        Commands::Preview {
            input,
            output,
            palette,
            process,
        } => {
            let processed = run_pipeline(&input, &palette, &process)?;
            let scale = process.scale as usize;
            let canvas = rasterize(&processed.mesh, processed.width * scale, processed.height * scale)?;
            let (pixels, width, height) = canvas.into_raw();

            let img = image::RgbaImage::from_raw(width as u32, height as u32, pixels)
                .ok_or("Failed to create image from mesh")?;
            img.save(&output)?;

            log::info!("Rendered {}x{} preview -> '{}'", width, height, output.display());
        }

        Commands::Themes => {
            let mut stdout = io::stdout().lock();
            for theme in &THEMES {
                writeln!(stdout, "{:<8} {}", theme.name, theme.palette())?;
            }
        }
    }

    Ok(())
}
