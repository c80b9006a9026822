mod acquire;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use ascii_painter::{AsciiOptions, ContrastPivot, DensityRamp, GlyphRenderer};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};

use acquire::ImageSource;
use config::Config;

const DEFAULT_WIDTH: u32 = 70;

const AFTER_HELP: &str = "\
Tips:
  Widths of 60-80 columns fit chat code blocks; paste the output inside ``` fences.
  Color output is meant for terminals; --auto-copy always copies plain text.
  Chat file URLs usually require authentication; download the image instead.
  --clip needs Windows or WSL with PowerShell and an image on the clipboard.

Examples:
  ascii-painter image.jpg 70
  ascii-painter -w https://picsum.photos/400/300 60
  ascii-painter --clip 80 --trim
  ascii-painter image.jpg 70 -a --trim
  ascii-painter image.jpg 80 --trim --color";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert images to compact ASCII art for chat code blocks and terminals",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Image file path, or an image URL with --web
    source: Option<String>,
    /// Target width in characters
    #[arg(value_name = "WIDTH")]
    width: Option<u32>,
    /// Target width in characters
    #[arg(long = "width", id = "width_flag", value_name = "COLUMNS", conflicts_with = "width")]
    width_flag: Option<u32>,
    /// Download SOURCE from a URL instead of reading a file
    #[arg(short = 'w', long, conflicts_with = "clip")]
    web: bool,
    /// Read the image from the system clipboard (Windows/WSL)
    #[arg(short = 'v', long)]
    clip: bool,
    /// Copy the plain-text result to the clipboard
    #[arg(short = 'a', long)]
    auto_copy: bool,
    /// Wrap glyphs in 24-bit color escapes
    #[arg(short = 'c', long)]
    color: bool,
    /// Remove background-only rows and columns
    #[arg(short = 't', long)]
    trim: bool,
    /// Write the result to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Ramp preset (slack, standard, detailed, blocks) or a literal darkest-to-lightest string
    #[arg(long)]
    ramp: Option<String>,
    /// Contrast multiplier (1.0 leaves contrast unchanged)
    #[arg(long)]
    contrast: Option<f32>,
    /// Pivot for the contrast multiplier
    #[arg(long, value_enum)]
    pivot: Option<PivotChoice>,
    /// Brightness offset added after resizing (-255..255)
    #[arg(long, allow_negative_numbers = true)]
    brightness: Option<i32>,
    /// Glyph aspect correction applied to the row count
    #[arg(long)]
    aspect: Option<f32>,
    /// Gamma applied before glyph selection
    #[arg(long)]
    gamma: Option<f32>,
    /// Map bright pixels to dense glyphs (for dark backgrounds)
    #[arg(long)]
    invert: bool,
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Log progress to stderr
    #[arg(long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PivotChoice {
    MidGray,
    Mean,
}

/// Everything needed for one run once flags and the config file are merged.
#[derive(Debug)]
struct Settings {
    source: ImageSource,
    width: u32,
    color: bool,
    trim: bool,
    auto_copy: bool,
    output: Option<PathBuf>,
    options: AsciiOptions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let settings = cli.into_settings(config)?;
    run(settings)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(settings: Settings) -> Result<()> {
    let renderer = GlyphRenderer::new(settings.options).context("invalid render settings")?;

    let image = acquire::load(&settings.source)
        .with_context(|| format!("failed to load image from {}", settings.source))?;
    info!("loaded {}x{} image from {}", image.width(), image.height(), settings.source);

    let mut grid = renderer
        .render(&image, settings.width, settings.color)
        .with_context(|| format!("failed to render {}", settings.source))?;

    if settings.trim {
        let trimmer = renderer.trimmer();
        debug!("background glyphs: {:?}", trimmer.background_glyphs());
        let (rows, columns) = (grid.height(), grid.width());
        grid = trimmer.trim(&grid);
        debug!("trimmed {rows}x{columns} grid to {}x{}", grid.height(), grid.width());
        if grid.is_empty() {
            warn!("image contains only background glyphs; nothing left after trimming");
        }
    }

    match &settings.output {
        Some(path) => output::save(path, &grid, settings.color)?,
        None => output::print(&grid, settings.color)?,
    }

    if settings.auto_copy {
        output::copy_to_clipboard(&grid)?;
    }

    Ok(())
}

impl Cli {
    fn into_settings(self, config: Config) -> Result<Settings> {
        let mut positional = self.source.clone();
        let mut width = self.width;

        // With --clip there is no source, so a lone positional is the width.
        if self.clip && width.is_none() {
            if let Some(value) = positional.take() {
                width = Some(
                    value.parse().with_context(|| format!("invalid width {value:?}"))?,
                );
            }
        }

        let source = if self.clip {
            if let Some(extra) = positional {
                bail!("unexpected argument {extra:?}: --clip takes no image source");
            }
            ImageSource::Clipboard
        } else {
            let Some(value) = positional else {
                if self.web {
                    bail!("an image URL is required with --web");
                }
                bail!("an image file is required (or use --clip / --web)");
            };
            if self.web {
                ImageSource::Web(value)
            } else {
                ImageSource::File(PathBuf::from(value))
            }
        };

        let width = self.width_flag.or(width).or(config.width).unwrap_or(DEFAULT_WIDTH);
        let options = self.options(config.render)?;

        Ok(Settings {
            source,
            width,
            color: self.color || config.color,
            trim: self.trim || config.trim,
            auto_copy: self.auto_copy || config.auto_copy,
            output: self.output,
            options,
        })
    }

    /// Layers explicitly given flags over `base`.
    fn options(&self, base: AsciiOptions) -> Result<AsciiOptions> {
        let mut options = base;
        if let Some(ramp) = &self.ramp {
            options.ramp = DensityRamp::parse(ramp).context("invalid --ramp")?;
        }
        if let Some(contrast) = self.contrast {
            options.contrast = contrast;
        }
        if let Some(pivot) = self.pivot {
            options.contrast_pivot = pivot.into();
        }
        if let Some(brightness) = self.brightness {
            options.brightness_offset = brightness;
        }
        if let Some(aspect) = self.aspect {
            options.aspect_correction = aspect;
        }
        if let Some(gamma) = self.gamma {
            options.gamma = gamma;
        }
        options.invert |= self.invert;
        Ok(options)
    }
}

impl From<PivotChoice> for ContrastPivot {
    fn from(choice: PivotChoice) -> Self {
        match choice {
            PivotChoice::MidGray => ContrastPivot::MidGray,
            PivotChoice::Mean => ContrastPivot::Mean,
        }
    }
}
