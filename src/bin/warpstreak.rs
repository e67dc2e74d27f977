use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::Level;

use warpstreak::{
    Canvas, Fps, PhaseScheduler, PngDirSink, RasterRenderer, RasterSettings, RecordingRenderer,
    SeededSource, WarpConfig,
};

#[derive(Parser, Debug)]
#[command(name = "warpstreak", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the scheduler headless and print statistics as JSON.
    Simulate(SimulateArgs),
    /// Capture the effect as a PNG frame sequence.
    Frames(FramesArgs),
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Optional config JSON; omitted fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed. Omit for a non-deterministic run.
    #[arg(long)]
    seed: Option<u64>,

    /// Soft cap on live streaks during the steady phase.
    #[arg(long)]
    max_live: Option<usize>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Simulated span in milliseconds.
    #[arg(long, default_value_t = 1000)]
    millis: u64,

    /// Drive the scheduler against the wall clock instead of virtual time.
    #[arg(long)]
    realtime: bool,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output directory for PNG frames.
    #[arg(long)]
    out: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Captured span in seconds.
    #[arg(long, default_value_t = 2.0)]
    seconds: f64,

    /// Frame width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 360)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(common: &CommonArgs) -> anyhow::Result<WarpConfig> {
    let mut cfg = match &common.config {
        Some(path) => WarpConfig::from_json_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => WarpConfig::default(),
    };
    if common.max_live.is_some() {
        cfg.steady.max_live = common.max_live;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn make_rng(seed: Option<u64>) -> SeededSource {
    seed.map(SeededSource::new)
        .unwrap_or_else(SeededSource::from_entropy)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    let renderer =
        RecordingRenderer::with_root(cfg.root_selector.clone(), None).without_event_log();
    let mut scheduler = PhaseScheduler::new(cfg, renderer, make_rng(args.common.seed))?;

    let span = Duration::from_millis(args.millis);
    if args.realtime {
        warpstreak::run_realtime(&mut scheduler, span)?;
    } else {
        scheduler.start()?;
        scheduler.advance_to(span)?;
    }

    let report = serde_json::json!({
        "elapsed_ms": scheduler.now().as_millis() as u64,
        "live": scheduler.live_count(),
        "attached": scheduler.renderer().attached_count(),
        "stats": scheduler.stats(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    let fps = Fps::new(args.fps, 1)?;
    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        anyhow::bail!("--seconds must be a positive number");
    }

    let settings = RasterSettings {
        canvas: Canvas::new(args.width, args.height)?,
        root_selector: cfg.root_selector.clone(),
        ..RasterSettings::default()
    };
    let renderer = RasterRenderer::new(settings)?;
    let mut scheduler = PhaseScheduler::new(cfg, renderer, make_rng(args.common.seed))?;

    let mut sink = PngDirSink::new(args.out.clone());
    let frames = fps.frames_for_secs(args.seconds);
    warpstreak::capture_frames(&mut scheduler, fps, frames, &mut sink)
        .with_context(|| format!("capture frames into '{}'", args.out.display()))?;

    eprintln!("wrote {} frames to {}", sink.written(), args.out.display());
    Ok(())
}
