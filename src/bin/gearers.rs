use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "gearers", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available compositions.
    List(ListArgs),
    /// Render a single frame.
    Frame(FrameArgs),
    /// Render a range of frames into a directory.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Directory holding `<id>.json` scene config overrides.
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Composition id.
    #[arg(long)]
    id: String,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output file path.
    #[arg(long)]
    out: PathBuf,

    /// Output format; inferred from the `--out` extension when omitted.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Directory holding `<id>.json` scene config overrides.
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Composition id.
    #[arg(long)]
    id: String,

    /// Output directory; files are named `frame_00000.<ext>`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
    format: OutputFormat,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive); defaults to the composition length.
    #[arg(long)]
    end: Option<u64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Directory holding `<id>.json` scene config overrides.
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Svg,
    Png,
}

impl OutputFormat {
    fn ext(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }

    fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("svg") => Self::Svg,
            _ => Self::Png,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("GEARERS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_registry(config_dir: Option<&Path>) -> anyhow::Result<gearers::Registry> {
    let reg = match config_dir {
        Some(dir) => gearers::Registry::with_configs(dir)
            .with_context(|| format!("load scene configs from '{}'", dir.display()))?,
        None => gearers::Registry::builtin()?,
    };
    Ok(reg)
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let reg = load_registry(args.config_dir.as_deref())?;
    for meta in reg.list() {
        println!(
            "{}\t{} frames\t{} fps\t{}x{}",
            meta.id,
            meta.duration_in_frames,
            meta.fps.as_f64(),
            meta.canvas.width,
            meta.canvas.height
        );
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let reg = load_registry(args.config_dir.as_deref())?;
    let tree = reg
        .render(&args.id, gearers::FrameIndex(args.frame))
        .with_context(|| format!("render '{}' frame {}", args.id, args.frame))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_path(&args.out));
    write_output(&tree, format, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let reg = load_registry(args.config_dir.as_deref())?;
    let scene = reg.get(&args.id)?;
    let full = scene.meta().range();
    let end = args.end.map_or(full.end, gearers::FrameIndex);
    let range = gearers::FrameRange::new(gearers::FrameIndex(args.start), end)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let threading = gearers::RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    gearers::render_range_with(scene, range, &threading, |tree| {
        let path = args
            .out_dir
            .join(format!("frame_{:05}.{}", tree.frame.0, args.format.ext()));
        write_output(&tree, args.format, &path).map_err(gearers::GearersError::from)
    })
    .with_context(|| format!("render '{}' frames {}..{}", args.id, args.start, end.0))?;

    eprintln!(
        "wrote {} frames to {}",
        range.len_frames(),
        args.out_dir.display()
    );
    Ok(())
}

fn write_output(
    tree: &gearers::VisualTree,
    format: OutputFormat,
    path: &Path,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(f), tree)
                .with_context(|| format!("write json '{}'", path.display()))?;
        }
        OutputFormat::Svg => {
            std::fs::write(path, gearers::to_svg(tree))
                .with_context(|| format!("write svg '{}'", path.display()))?;
        }
        OutputFormat::Png => {
            let frame = gearers::rasterize(tree)?;
            gearers::write_png(&frame, path)?;
        }
    }
    Ok(())
}
