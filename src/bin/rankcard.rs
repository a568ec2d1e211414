use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;

use rankcard::{
    AutoImageSource, CardOptions, CardRenderer, Canvas, EngineConfig, FontSet, Profile,
    derive_tier, resolve_theme,
};

#[derive(Parser, Debug)]
#[command(name = "rankcard", version)]
struct Cli {
    /// Log more (`-v` debug, `-vv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one profile as a PNG card.
    Render(RenderArgs),
    /// Render every profile of a JSON array, in parallel.
    Batch(BatchArgs),
    /// Print the tier, label and category for a score.
    Tier(TierArgs),
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// Directory with Roboto-Regular.ttf and Roboto-Bold.ttf (overrides RANKCARD_FONT_DIR).
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Avatar fetch timeout in milliseconds (overrides RANKCARD_FETCH_TIMEOUT_MS).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_ms: Option<u64>,

    /// Grain seed (overrides RANKCARD_GRAIN_SEED).
    #[arg(long, conflicts_with = "no_grain")]
    grain_seed: Option<u64>,

    /// Disable the background grain.
    #[arg(long)]
    no_grain: bool,

    /// Output width in pixels.
    #[arg(long, default_value_t = 1220)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 640)]
    height: u32,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Profile JSON; when absent the profile is built from --handle/--score/--avatar.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Handle drawn on the card.
    #[arg(long, conflicts_with = "in_path")]
    handle: Option<String>,

    /// Score.
    #[arg(long, conflicts_with = "in_path", allow_negative_numbers = true)]
    score: Option<i64>,

    /// Avatar path or URL.
    #[arg(long, conflicts_with = "in_path")]
    avatar: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// JSON array of profiles.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory receiving one PNG per profile.
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Args, Debug)]
struct TierArgs {
    /// Score to classify.
    #[arg(allow_negative_numbers = true)]
    score: i64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Tier(args) => cmd_tier(args),
    }
}

struct Engine {
    renderer: CardRenderer,
    source: AutoImageSource,
}

fn make_engine(args: &EngineArgs) -> anyhow::Result<Engine> {
    let mut cfg = EngineConfig::from_env();
    if let Some(dir) = &args.font_dir {
        cfg.font_dir = Some(dir.clone());
    }
    if let Some(ms) = args.timeout_ms {
        cfg.fetch_timeout = std::time::Duration::from_millis(ms);
    }
    if args.no_grain {
        cfg.grain_seed = None;
    } else if let Some(seed) = args.grain_seed {
        cfg.grain_seed = Some(seed);
    }

    let fonts: FontSet = cfg.load_fonts().context("load fonts")?;
    let options = CardOptions {
        canvas: Canvas::new(args.width, args.height),
        ..cfg.card_options()
    };
    let renderer = CardRenderer::new(fonts, options)?;
    Ok(Engine {
        renderer,
        source: cfg.image_source(),
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let profile = match &args.in_path {
        Some(path) => read_json::<Profile>(path)?,
        None => {
            let mut p = Profile::new(
                args.handle.clone().unwrap_or_default(),
                args.score.unwrap_or(0),
            );
            if let Some(avatar) = &args.avatar {
                p = p.with_avatar(avatar.clone());
            }
            p
        }
    };

    let engine = make_engine(&args.engine)?;
    let result = engine.renderer.render_from_source(&profile, &engine.source)?;
    write_png(&args.out, &result.png)?;
    eprintln!(
        "wrote {} ({} {}, fingerprint {})",
        args.out.display(),
        result.tier.label(),
        profile.display_handle(),
        result.fingerprint
    );
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let profiles: Vec<Profile> = read_json(&args.in_path)?;
    let engine = make_engine(&args.engine)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let failures: Vec<String> = profiles
        .par_iter()
        .enumerate()
        .filter_map(|(i, profile)| {
            let out = args.out_dir.join(output_name(i, profile));
            let res = engine
                .renderer
                .render_from_source(profile, &engine.source)
                .map_err(anyhow::Error::from)
                .and_then(|r| write_png(&out, &r.png));
            match res {
                Ok(()) => {
                    tracing::info!(path = %out.display(), "wrote card");
                    None
                }
                Err(e) => Some(format!("#{i} {}: {e:#}", profile.display_handle())),
            }
        })
        .collect();

    eprintln!(
        "rendered {}/{} cards into {}",
        profiles.len() - failures.len(),
        profiles.len(),
        args.out_dir.display()
    );
    if !failures.is_empty() {
        for f in &failures {
            eprintln!("  failed {f}");
        }
        anyhow::bail!("{} card(s) failed", failures.len());
    }
    Ok(())
}

fn cmd_tier(args: TierArgs) -> anyhow::Result<()> {
    let tier = derive_tier(args.score);
    let theme = resolve_theme(tier);
    println!("{} {} {}", tier.letter(), tier.label(), theme.category);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse JSON '{}'", path.display()))
}

fn write_png(path: &Path, png: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))
}

/// `0003-neo.png`: index keeps names unique, the handle keeps them readable.
fn output_name(index: usize, profile: &Profile) -> String {
    let slug: String = profile
        .display_handle()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(48)
        .collect();
    format!("{index:04}-{slug}.png")
}
