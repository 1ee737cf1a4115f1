use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hiscore", version, about = "Looping arcade-style high-score display")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scroll every line of the text file past in one continuous marquee.
    Ticker(RunArgs),
    /// Reveal all title/score pairs in a perspective scanline scroll.
    Scanline(RunArgs),
    /// Show one pair at a time: build up, hold, then throw the score away.
    Phases(RunArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Use the whole terminal instead of the configured geometry.
    #[arg(short = 'f', long = "full-screen")]
    full_screen: bool,

    /// Request a hardware surface (accepted, has no effect).
    #[arg(long)]
    hw_surface: bool,

    /// Spin instead of sleeping between frames.
    #[arg(long)]
    use_busy_loop: bool,

    /// Canvas size as WIDTHxHEIGHT.
    #[arg(short = 'g', long, value_parser = parse_geometry)]
    geometry: Option<hiscore::Canvas>,

    /// Baseline(s) of the first and second line.
    #[arg(short = 'y', long = "y-pos", num_args = 1..=2, allow_negative_numbers = true)]
    y_pos: Vec<i64>,

    /// Target frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Print the measured frame rate a few times per second.
    #[arg(long)]
    show_fps: bool,

    /// Pixels (or frames) advanced per tick.
    #[arg(short = 's', long)]
    speed: Option<u32>,

    /// Font size of the first line in pixels.
    #[arg(long)]
    font_size: Option<u32>,

    /// Size of the second line relative to the first.
    #[arg(long)]
    font_size_factor: Option<f64>,

    /// Title/score text file.
    #[arg(short = 't', long)]
    text_file: Option<PathBuf>,

    /// TrueType font (defaults to the font next to the executable).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Start at a random pair.
    #[arg(long)]
    random_start: bool,

    /// Frame every cycle starts at.
    #[arg(long)]
    debug_start_frame: Option<u64>,

    /// Frame that ends every cycle.
    #[arg(long)]
    debug_end_frame: Option<u64>,

    /// Where frames go.
    #[arg(long, value_enum, default_value_t = OutputChoice::Terminal)]
    output: OutputChoice,

    /// Directory for `--output png`.
    #[arg(long, default_value = "frames")]
    out_dir: PathBuf,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputChoice {
    Terminal,
    Png,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let (variant, args) = match cli.cmd {
        Command::Ticker(args) => (hiscore::Variant::Ticker, args),
        Command::Scanline(args) => (hiscore::Variant::Scanline, args),
        Command::Phases(args) => (hiscore::Variant::Phases, args),
    };
    cmd_run(variant, args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_geometry(s: &str) -> Result<hiscore::Canvas, String> {
    hiscore::Canvas::parse_geometry(s).map_err(|e| e.to_string())
}

fn run_config(variant: hiscore::Variant, args: &RunArgs) -> anyhow::Result<hiscore::RunConfig> {
    let mut config = hiscore::RunConfig::new(variant);
    if let Some(canvas) = args.geometry {
        config.canvas = canvas;
    }
    config.y_positions = args.y_pos.clone();
    config.fps = args.fps.unwrap_or(config.fps);
    config.show_fps = args.show_fps;
    if args.use_busy_loop {
        config.pacing = hiscore::PacingMode::BusyLoop;
    }
    config.speed = args.speed.unwrap_or(config.speed);
    config.font_size = args.font_size.unwrap_or(config.font_size);
    config.font_size_factor = args.font_size_factor.unwrap_or(config.font_size_factor);
    if let Some(path) = &args.text_file {
        config.text_file = path.clone();
    }
    config.font_file = match &args.font {
        Some(path) => path.clone(),
        None => default_font_path()?,
    };
    config.random_start = args.random_start;
    config.debug = hiscore::DebugFrames {
        start: args.debug_start_frame,
        end: args.debug_end_frame,
    };
    config.fullscreen = args.full_screen;
    config.hw_surface = args.hw_surface;
    config.max_frames = args.frames;

    config.validate()?;
    Ok(config)
}

fn default_font_path() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe().context("locate executable")?;
    let beside_exe = exe
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(hiscore::DEFAULT_FONT_FILE);
    if beside_exe.is_file() {
        Ok(beside_exe)
    } else {
        Ok(PathBuf::from(hiscore::DEFAULT_FONT_FILE))
    }
}

fn cmd_run(variant: hiscore::Variant, args: RunArgs) -> anyhow::Result<()> {
    let mut config = run_config(variant, &args)?;
    if config.hw_surface {
        tracing::warn!("--hw-surface has no effect on terminal or png output");
    }

    match args.output {
        OutputChoice::Terminal => {
            if config.fullscreen {
                let (cols, rows) = crossterm::terminal::size().context("query terminal size")?;
                config.canvas = hiscore::Canvas::new(u32::from(cols), u32::from(rows) * 2)?;
            }
            let prepared = prepare(&config)?;
            let display = hiscore::TerminalDisplay::open(config.colors.debug)?;
            play(&config, prepared, display)?;
        }
        OutputChoice::Png => {
            if config.fullscreen {
                tracing::warn!("--full-screen is ignored for png output");
            }
            let prepared = prepare(&config)?;
            let display = hiscore::PngSequenceDisplay::create(&args.out_dir)?;
            let stats = play(&config, prepared, display)?;
            eprintln!("wrote {} frames to {}", stats.frames, args.out_dir.display());
        }
    }
    Ok(())
}

struct Prepared {
    glyphs: hiscore::ParleyGlyphRenderer,
    source: hiscore::TextSource,
    timeline: Box<dyn hiscore::Timeline>,
}

/// Load everything that can fail before the display takes over the terminal.
fn prepare(config: &hiscore::RunConfig) -> anyhow::Result<Prepared> {
    let glyphs = hiscore::ParleyGlyphRenderer::from_file(&config.font_file)
        .with_context(|| format!("load font '{}'", config.font_file.display()))?;
    let source = hiscore::TextSource::new(&config.text_file);
    let timeline = config.build_timeline()?;
    tracing::debug!(
        variant = ?config.variant,
        canvas = %config.canvas,
        font = glyphs.family_name(),
        "prepared"
    );
    Ok(Prepared {
        glyphs,
        source,
        timeline,
    })
}

fn play<D: hiscore::Display>(
    config: &hiscore::RunConfig,
    mut prepared: Prepared,
    display: D,
) -> anyhow::Result<hiscore::LoopStats> {
    let mut frame_loop = hiscore::FrameLoop::new(
        display,
        config.canvas,
        config.colors.background,
        config.loop_options(),
    )?;
    let stats = frame_loop.run(
        prepared.timeline.as_mut(),
        &mut prepared.source,
        &mut prepared.glyphs,
    )?;
    Ok(stats)
}
