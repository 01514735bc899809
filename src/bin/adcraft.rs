use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use adcraft::{
    BrandComplianceValidator, BrandPalette, ComplianceConfig, ComposerConfig, CreativeComposer,
    FontSet, ParleyFace, RasterImage, Rgb, TextPosition,
};

#[derive(Parser, Debug)]
#[command(name = "adcraft", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every aspect-ratio creative for one product photo.
    Compose(ComposeArgs),
    /// Score a rendered creative for brand compliance.
    Validate(ValidateArgs),
    /// Describe hex colors: name, luminance and contrast against black/white.
    Color(ColorArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Source product photo.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Campaign message drawn on every creative.
    #[arg(long)]
    message: String,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// TrueType/OpenType font file.
    #[arg(long)]
    font: PathBuf,

    /// Brand color as hex; repeat for a palette.
    #[arg(long = "brand-color")]
    brand_colors: Vec<String>,

    /// Language tag; output goes to `<out>/<lang>/`.
    #[arg(long)]
    lang: Option<String>,

    /// Fixed text position (e.g. `bottom-left`, `top`, `center`).
    #[arg(long)]
    position: Option<String>,

    /// Composer configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Final creative to check.
    #[arg(long = "final")]
    final_path: PathBuf,

    /// Pre-overlay raster used for the color check.
    #[arg(long = "pre")]
    pre_path: Option<PathBuf>,

    /// Brand color as hex; repeat for a palette.
    #[arg(long = "brand-color")]
    brand_colors: Vec<String>,

    /// Compliance configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ColorArgs {
    /// Hex colors such as `#FF6B35`.
    #[arg(required = true)]
    hex: Vec<String>,
}

#[derive(serde::Serialize)]
struct ColorInfo {
    hex: String,
    name: String,
    luminance: f64,
    hsl: (f64, f64, f64),
    contrast_on_black: f64,
    contrast_on_white: f64,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Color(args) => cmd_color(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(p) => ComposerConfig::from_path(p)
            .with_context(|| format!("load composer config '{}'", p.display()))?,
        None => ComposerConfig::default(),
    };
    let position = args
        .position
        .as_deref()
        .map(|p| TextPosition::parse(p).with_context(|| format!("unknown position '{p}'")))
        .transpose()?;

    let face = ParleyFace::from_path(&args.font)
        .with_context(|| format!("load font '{}'", args.font.display()))?;
    let palette = BrandPalette::from_hex(&args.brand_colors);
    let composer = CreativeComposer::new(config)?.with_position_hint(position);
    let source = RasterImage::open(&args.in_path)
        .with_context(|| format!("open source image '{}'", args.in_path.display()))?;

    let report = match args.lang {
        Some(lang) => {
            let fonts = FontSet::new(Arc::new(face));
            let mut reports = composer.create_localized_variations(
                &source,
                &[(lang, args.message)],
                &args.out,
                &palette,
                &fonts,
            )?;
            reports.pop().context("no report for language")?
        }
        None => composer.create_variations(&source, &args.message, &args.out, &palette, &face)?,
    };

    print_json(&report)?;
    if !report.is_complete() {
        anyhow::bail!("{} variant(s) failed", report.failures());
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(p) => ComplianceConfig::from_path(p)
            .with_context(|| format!("load compliance config '{}'", p.display()))?,
        None => ComplianceConfig::default(),
    };
    let validator = BrandComplianceValidator::new(BrandPalette::from_hex(&args.brand_colors), config);
    let report = validator
        .validate_files(&args.final_path, args.pre_path.as_deref())
        .with_context(|| format!("validate '{}'", args.final_path.display()))?;
    print_json(&report)
}

fn cmd_color(args: ColorArgs) -> anyhow::Result<()> {
    let mut infos = Vec::with_capacity(args.hex.len());
    for hex in &args.hex {
        let rgb = adcraft::hex_to_rgb(hex).with_context(|| format!("parse color '{hex}'"))?;
        infos.push(describe(rgb));
    }
    print_json(&infos)
}

fn describe(rgb: Rgb) -> ColorInfo {
    ColorInfo {
        hex: rgb.to_hex(),
        name: adcraft::color_name(rgb),
        luminance: adcraft::relative_luminance(rgb),
        hsl: adcraft::rgb_to_hsl(rgb),
        contrast_on_black: adcraft::contrast_ratio(rgb, Rgb::BLACK),
        contrast_on_white: adcraft::contrast_ratio(rgb, Rgb::WHITE),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{out}");
    Ok(())
}

