use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use coatline_core::animation::{TestClock, set_clock};
use coatline_core::{Key, KeyEvent, Listeners, ScrollLock, Size};
use coatline_gallery::{Catalog, Filter, Gallery};
use coatline_site::{CookieConsent, FileStorage, MemoryStorage, Page, SiteConfig};
use web_time::Instant;

#[derive(Parser, Debug)]
#[command(name = "coatline", version, about = "Headless preview of the Coatline site logic")]
struct Cli {
    /// Site config JSON. `COATLINE_*` variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one JSON page frame per scroll position.
    Trace(TraceArgs),
    /// Drive the gallery lightbox with a key sequence.
    Gallery(GalleryArgs),
}

#[derive(Parser, Debug)]
struct TraceArgs {
    /// Scroll distance between frames, in px.
    #[arg(default_value_t = 100.0)]
    step: f32,

    /// Last scroll position, in px. Defaults to the bottom of the page.
    max: Option<f32>,

    #[arg(long, default_value_t = 1440.0)]
    width: f32,

    #[arg(long, default_value_t = 900.0)]
    height: f32,

    /// Simulated time between frames.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Force the reduced-motion preference on.
    #[arg(long, default_value_t = false)]
    reduced_motion: bool,
}

#[derive(Parser, Debug)]
struct GalleryArgs {
    /// Show only this category.
    #[arg(long)]
    category: Option<String>,

    /// Tile to open (index into the filtered grid).
    #[arg(long, default_value_t = 0)]
    open: usize,

    /// DOM key names pressed while open, comma separated.
    #[arg(long, value_delimiter = ',', default_value = "ArrowRight,ArrowLeft,Escape")]
    keys: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    match cli.cmd {
        Command::Trace(args) => cmd_trace(config, args),
        Command::Gallery(args) => cmd_gallery(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SiteConfig> {
    let base = match path {
        Some(p) => SiteConfig::from_path(p).with_context(|| format!("load '{}'", p.display()))?,
        None => SiteConfig::default(),
    };
    base.with_overrides(|k| std::env::var(k).ok())
        .context("apply COATLINE_* overrides")
}

fn consent_notice(config: &SiteConfig) -> bool {
    match &config.consent_path {
        Some(path) => CookieConsent::load(FileStorage::new(path)).should_show_notice(),
        None => CookieConsent::load(MemoryStorage::new()).should_show_notice(),
    }
}

fn cmd_trace(mut config: SiteConfig, args: TraceArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.step.is_finite() && args.step > 0.0,
        "step must be a positive number of pixels, got {}",
        args.step
    );
    config.reduced_motion |= args.reduced_motion;
    log::info!("cookie notice shown: {}", consent_notice(&config));

    // Frames are spaced by simulated time so springs trace the same way on
    // every run.
    let t0 = Instant::now();
    set_clock(Box::new(TestClock { t: t0 }));

    let viewport = Size {
        width: args.width,
        height: args.height,
    };
    let page = Page::home(config, viewport).context("mount home page")?;
    let max = args.max.unwrap_or_else(|| page.scroll_height()).max(0.0);

    let mut n: u32 = 0;
    loop {
        let scroll = args.step * n as f32;
        if scroll > max {
            break;
        }
        set_clock(Box::new(TestClock {
            t: t0 + Duration::from_millis(args.frame_ms) * n,
        }));
        if let Some(frame) = page.tick(scroll) {
            println!("{}", serde_json::to_string(&frame)?);
        }
        n += 1;
    }
    page.unmount();
    Ok(())
}

fn cmd_gallery(args: GalleryArgs) -> anyhow::Result<()> {
    let lock = ScrollLock::new();
    let keys: Listeners<KeyEvent> = Listeners::new();
    let gallery = Gallery::new(Catalog::bundled()?, lock.clone(), keys.clone());

    if let Some(c) = args.category {
        gallery.set_filter(Filter::Category(c));
    }
    gallery
        .open(args.open)
        .with_context(|| format!("open tile {}", args.open))?;

    let report = |key: &str| {
        let lb = gallery.lightbox();
        let line = serde_json::json!({
            "key": key,
            "index": lb.index(),
            "src": lb.current().map(|i| i.src),
            "of": lb.len(),
            "scroll_locked": lock.is_locked(),
        });
        println!("{line}");
    };

    report("open");
    for k in &args.keys {
        keys.emit(&KeyEvent::new(Key::from_dom(k.trim())));
        report(k);
    }
    Ok(())
}
