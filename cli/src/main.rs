mod scenario;

use std::path::PathBuf;

use chrono::{Duration, Local, NaiveDateTime};
use clap::Parser;
use lingering_core::{ConfigStore, FileConfigStore, MemoryConfigStore, TooltipEngine};
use lingering_overlay::{PixmapSurface, TooltipOverlay};
use tracing_subscriber::EnvFilter;

use crate::scenario::{Action, Scenario};

#[derive(Parser)]
#[command(version, about = "Replay scripted clicks and hotkeys against the tooltip engine")]
struct Cli {
    /// Scenario file (TOML)
    scenario: PathBuf,

    /// Settings file; created with defaults if missing
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Milliseconds between rendered frames
    #[arg(long, default_value_t = 16)]
    frame_ms: i64,

    /// Keep rendering this long after the last event
    #[arg(long, default_value_t = 2000)]
    tail_ms: i64,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If LINGERING_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("LINGERING_LOG_PATH")
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    // Fallback to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), String> {
    init_logging();
    let cli = Cli::parse();

    let scenario = Scenario::load(&cli.scenario)?;
    let store: Box<dyn ConfigStore> = match &cli.config {
        Some(path) => Box::new(FileConfigStore::new(path)),
        None => Box::new(MemoryConfigStore::default()),
    };
    let mut engine = TooltipEngine::from_store(store).map_err(|e| e.to_string())?;
    let mut surface = PixmapSurface::new(scenario.canvas.width, scenario.canvas.height)
        .ok_or("canvas must be at least 1x1")?;

    tracing::info!(
        events = scenario.events.len(),
        path = ?cli.scenario,
        "Replaying scenario"
    );
    replay(&scenario, &mut engine, &mut surface, cli.frame_ms.max(1), cli.tail_ms)
}

fn replay(
    scenario: &Scenario,
    engine: &mut TooltipEngine,
    surface: &mut PixmapSurface,
    frame_ms: i64,
    tail_ms: i64,
) -> Result<(), String> {
    let base = Local::now().naive_local();
    let at = |ms: i64| base + Duration::milliseconds(ms);
    let end = scenario.end_ms() + tail_ms.max(0);

    let mut overlay = TooltipOverlay::new();
    let mut pending = scenario.events.iter().peekable();
    let mut last_output = String::new();
    let mut t = 0;

    while t <= end {
        while let Some(event) = pending.next_if(|e| e.at_ms <= t) {
            apply(engine, surface, event.action()?, at(event.at_ms));
        }

        surface.begin_frame();
        overlay.render(engine, surface, at(t));

        let output = frame_output(surface);
        if output != last_output {
            if output.is_empty() {
                println!("{t:>6}ms  (nothing visible)");
            } else {
                for line in output.lines() {
                    println!("{t:>6}ms  {line}");
                }
            }
            last_output = output;
        }
        t += frame_ms;
    }

    Ok(())
}

fn apply(engine: &mut TooltipEngine, surface: &mut PixmapSurface, action: Action, now: NaiveDateTime) {
    match action {
        Action::Mouse(point) => {
            surface.set_cursor(point, true);
            engine.on_mouse_pressed(point);
        }
        Action::Click { option, target } => {
            if engine.on_menu_option_clicked(&option, &target, now) {
                println!("        click consumed: {option} {target}");
            }
        }
        Action::KeyDown(key) => {
            if engine.on_key_pressed(key, now) {
                tracing::debug!(?key, "Key event consumed");
            }
        }
        Action::KeyUp(key) => engine.on_key_released(key, now),
        Action::Tick => engine.on_tick(now),
    }
}

/// One line per visible box, rounded so tiny opacity steps don't spam output.
fn frame_output(surface: &PixmapSurface) -> String {
    surface
        .draws()
        .iter()
        .filter(|d| d.alpha > 0.0)
        .map(|d| {
            format!(
                "{:.1}  ({:>4},{:>4})  {}",
                d.alpha, d.position.x, d.position.y, d.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
