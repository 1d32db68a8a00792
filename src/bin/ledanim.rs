use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ledanim", version)]
struct Cli {
    /// Raise log verbosity (`RUST_LOG` takes precedence).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dimensions of an image.
    Info(InfoArgs),
    /// Change the canvas size without rescaling content.
    Resize(SizeArgs),
    /// Rescale content with nearest-neighbor sampling.
    Scale(SizeArgs),
    /// Reduce every pixel to one of two colors.
    Binarize(BinarizeArgs),
    /// Scale to the LED grid and binarize to the display colors.
    Conform(ConvertArgs),
    /// Build an animation from images and export it for the display.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SizeArgs {
    #[command(flatten)]
    io: ConvertArgs,

    #[arg(long)]
    width: u32,

    #[arg(long)]
    height: u32,
}

#[derive(Parser, Debug)]
struct BinarizeArgs {
    #[command(flatten)]
    io: ConvertArgs,

    /// First target color (RRGGBB or RRGGBBAA); wins ties.
    #[arg(long, default_value = "000000")]
    color_a: ledanim::Pixel,

    /// Second target color (RRGGBB or RRGGBBAA).
    #[arg(long, default_value = "ffffff")]
    color_b: ledanim::Pixel,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Input frames, in playback order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output header or JSON path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 15)]
    fps: u32,

    /// How frames are inserted into the animation.
    #[arg(long, value_enum, default_value_t = PolicyChoice::Conformed)]
    policy: PolicyChoice,

    #[arg(long, value_enum, default_value_t = FormatChoice::Header)]
    format: FormatChoice,

    /// C array name used in header output.
    #[arg(long, default_value = "animation")]
    name: String,

    /// Replace the output file if it exists.
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Also write each display-ready frame as a PNG into this directory.
    #[arg(long)]
    preview_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyChoice {
    Conformed,
    Normalized,
    Unchanged,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Header,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Resize(args) => cmd_transform(args.io, |img| img.resize(args.width, args.height)),
        Command::Scale(args) => cmd_transform(args.io, |img| img.scale(args.width, args.height)),
        Command::Binarize(args) => cmd_transform(args.io, |img| {
            img.binarize(args.color_a, args.color_b);
            Ok(())
        }),
        Command::Conform(args) => cmd_transform(args, |img| {
            let f = ledanim::DisplayFormat::UNO_R4;
            img.scale(f.width, f.height)?;
            img.binarize(ledanim::ON_COLOR, ledanim::OFF_COLOR);
            Ok(())
        }),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = if verbose > 0 { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let img = ledanim::load_image(&args.in_path)?;
    println!(
        "{}: {}x{}",
        args.in_path.display(),
        img.width(),
        img.height()
    );
    Ok(())
}

fn cmd_transform(
    args: ConvertArgs,
    op: impl FnOnce(&mut ledanim::RasterImage) -> ledanim::LedResult<()>,
) -> anyhow::Result<()> {
    let mut img = ledanim::load_image(&args.in_path)?;
    op(&mut img).with_context(|| format!("transform '{}'", args.in_path.display()))?;
    ledanim::save_png(&img, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let fps = ledanim::Fps::new(args.fps)?;
    let mut anim = ledanim::Animation::new(fps);

    for path in &args.inputs {
        let frame = ledanim::load_image(path)?;
        let added = match args.policy {
            PolicyChoice::Conformed => anim.add_conformed_to_display(frame),
            PolicyChoice::Normalized => anim.add_normalized(frame),
            PolicyChoice::Unchanged => {
                anim.add_unchanged(frame);
                Ok(())
            }
        };
        added.with_context(|| format!("add frame '{}'", path.display()))?;
    }

    let opts = ledanim::ExportOpts {
        out_path: args.out.clone(),
        overwrite: args.overwrite,
        kind: match args.format {
            FormatChoice::Header => ledanim::ExportKind::Header,
            FormatChoice::Json => ledanim::ExportKind::Json,
        },
        name: args.name,
    };
    opts.validate()?;

    let encoded = ledanim::EncodedAnimation::from_animation(&mut anim)?;

    if let Some(dir) = &args.preview_dir {
        for (i, frame) in anim.frames().iter().enumerate() {
            let path = dir.join(format!("frame_{i:04}.png"));
            ledanim::save_png(frame, &path)
                .with_context(|| format!("write preview '{}'", path.display()))?;
        }
    }

    ledanim::write_export(&encoded, &opts)?;

    eprintln!(
        "wrote {} ({} frames, {} bytes packed)",
        args.out.display(),
        encoded.frames.len(),
        encoded.size_bytes()
    );
    Ok(())
}
