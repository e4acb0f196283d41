use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use spritegen::{
    AnimationFrame, AnimationKind, DirSink, DirTemplateSource, ExportFormat, ExportMode,
    RasterSurface, SpritesheetExportConfig, Template, export_frames, render_overlay,
    render_underlay,
};

#[derive(Parser, Debug)]
#[command(name = "spritegen", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tile existing frame images into a spritesheet.
    Sheet(SheetArgs),
    /// Pose a sprite with a template (optionally plus procedural motion) and export it.
    Animate(AnimateArgs),
    /// Render a template's guide (underlay and overlay) to a PNG.
    Guide(GuideArgs),
    /// List the templates available under a root directory.
    Templates(TemplatesArgs),
}

/// Export settings; flags override values read from `--config`.
#[derive(Args, Debug, Default)]
struct ExportArgs {
    /// Export config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    columns: Option<u32>,

    #[arg(long)]
    frame_width: Option<u32>,

    #[arg(long)]
    frame_height: Option<u32>,

    #[arg(long)]
    padding: Option<u32>,

    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Write one file per frame instead of a sheet.
    #[arg(long)]
    individual: bool,

    /// Skip the `spritesheet.tres` metadata file.
    #[arg(long)]
    no_metadata: bool,

    /// Playback speed recorded in the metadata.
    #[arg(long)]
    fps: Option<u32>,

    #[arg(long)]
    animation_name: Option<String>,
}

#[derive(Parser, Debug)]
struct SheetArgs {
    /// Frame images, in playback order.
    #[arg(long, num_args = 1.., required = true)]
    frames: Vec<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    export: ExportArgs,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Template JSON.
    #[arg(long)]
    template: PathBuf,

    /// Sprite image used for every template part.
    #[arg(long)]
    sprite: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Template frames as-is, or a procedural cycle built from the first one.
    #[arg(long, value_enum, default_value_t = KindChoice::Template)]
    kind: KindChoice,

    /// Frame count for procedural cycles (defaults per kind).
    #[arg(long)]
    frame_count: Option<usize>,

    #[command(flatten)]
    export: ExportArgs,
}

#[derive(Parser, Debug)]
struct GuideArgs {
    /// Template JSON.
    #[arg(long)]
    template: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Parser, Debug)]
struct TemplatesArgs {
    /// Directory containing `templates/<name>.json`.
    #[arg(long)]
    root: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KindChoice {
    Template,
    Walk,
    Run,
    Idle,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Sheet(args) => cmd_sheet(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Guide(args) => cmd_guide(args),
        Command::Templates(args) => cmd_templates(args),
    }
}

fn export_config(args: &ExportArgs) -> anyhow::Result<SpritesheetExportConfig> {
    let mut cfg = match &args.config {
        Some(path) => SpritesheetExportConfig::from_path(path)?,
        None => SpritesheetExportConfig::default(),
    };
    if let Some(v) = args.columns {
        cfg.columns = v;
    }
    if let Some(v) = args.frame_width {
        cfg.frame_width = v;
    }
    if let Some(v) = args.frame_height {
        cfg.frame_height = v;
    }
    if let Some(v) = args.padding {
        cfg.padding = v;
    }
    if let Some(v) = args.format {
        cfg.format = match v {
            FormatChoice::Png => ExportFormat::Png,
            FormatChoice::Jpeg => ExportFormat::Jpeg,
        };
    }
    if args.individual {
        cfg.mode = ExportMode::IndividualFrames;
    }
    if args.no_metadata {
        cfg.include_metadata = false;
    }
    if let Some(v) = args.fps {
        cfg.fps = v;
    }
    if let Some(v) = &args.animation_name {
        cfg.animation_name = v.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}

fn read_bytes(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read '{}'", path.display()))
}

fn write_export(
    frames: &[AnimationFrame],
    args: &ExportArgs,
    out: &Path,
) -> anyhow::Result<()> {
    let cfg = export_config(args)?;
    let mut sink = DirSink::new(out);
    let summary = export_frames(frames, &cfg, &mut sink)?;
    for name in &summary.files {
        eprintln!("wrote {}", out.join(name).display());
    }
    Ok(())
}

fn cmd_sheet(args: SheetArgs) -> anyhow::Result<()> {
    let frames = args
        .frames
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let img = RasterSurface::decode(&read_bytes(path)?)
                .with_context(|| format!("decode frame '{}'", path.display()))?;
            Ok(AnimationFrame::flattened(
                (i + 1).to_string(),
                spritegen::DEFAULT_FRAME_DURATION_MS,
                img,
            ))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    tracing::debug!(frames = frames.len(), "loaded frame images");
    write_export(&frames, &args.export, &args.out)
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let template = Template::from_path(&args.template)?;
    let sprite: Arc<[u8]> = Arc::from(read_bytes(&args.sprite)?);
    // Fail early on a sprite the export stage could not decode.
    RasterSurface::decode(&sprite)
        .with_context(|| format!("decode sprite '{}'", args.sprite.display()))?;

    let parts = spritegen::capture_sprite_parts(&template, sprite)?;
    let posed = spritegen::generate_animation_frames(&template, &parts);

    let frames = match args.kind {
        KindChoice::Template => posed,
        kind => {
            let kind = match kind {
                KindChoice::Walk => AnimationKind::Walk,
                KindChoice::Run => AnimationKind::Run,
                _ => AnimationKind::Idle,
            };
            let base = posed
                .first()
                .context("template produced no frames")?;
            let count = args.frame_count.unwrap_or(kind.default_frame_count());
            if count == 0 {
                anyhow::bail!("--frame-count must be >= 1");
            }
            match kind {
                AnimationKind::Walk => spritegen::walk_cycle(base, count),
                AnimationKind::Run => spritegen::run_cycle(base, count),
                _ => spritegen::idle_cycle(base, count),
            }
        }
    };
    tracing::info!(template = %template.name, frames = frames.len(), "generated animation");
    write_export(&frames, &args.export, &args.out)
}

fn cmd_guide(args: GuideArgs) -> anyhow::Result<()> {
    let canvas = spritegen::CanvasSize::new(args.width, args.height)?;
    let template = Template::from_path(&args.template)?;
    let mut surface = RasterSurface::new(canvas.width, canvas.height);
    surface.fill(spritegen::Rgba8::WHITE);
    render_underlay(&mut surface, &template);
    render_overlay(&mut surface, &template);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let png = surface.encode(ExportFormat::Png)?;
    std::fs::write(&args.out, png).with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_templates(args: TemplatesArgs) -> anyhow::Result<()> {
    let source = DirTemplateSource::new(&args.root);
    for name in source.list()? {
        println!("{name}");
    }
    Ok(())
}
