use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use gridsnap::actor;
use gridsnap::actor::dispatcher::Dispatcher;
use gridsnap::common::config::Config;
use gridsnap::common::log;
use gridsnap::layout_engine::NamedLayout;
use gridsnap::sys::event::{HotkeyRegistry, HotkeyService, InputEvent};
use gridsnap::sys::geometry::{Point, Rect};
use gridsnap::sys::headless::{HeadlessDesktop, WindowSpec};
use gridsnap::sys::hotkey::Hotkey;
use gridsnap::sys::screen::{Screen, ScreenCache, ScreenId};
use gridsnap::sys::window::Window;
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::debug;

#[derive(Parser)]
#[command(name = "gridsnap")]
#[command(about = "Keyboard-driven window placement on a grid of screen regions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a configuration file and report every problem found
    Validate {
        /// Defaults to ~/.gridsnap.toml, or the built-in configuration if
        /// that does not exist.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print where each named layout puts a window
    Layouts {
        /// Usable area as WxH or WxH+X+Y.
        #[arg(long, default_value = "1920x1080", value_parser = parse_screen)]
        screen: Rect,
        #[arg(long)]
        json: bool,
    },
    /// Replay hotkeys against an in-memory desktop and print the window after
    /// each one
    Simulate {
        #[arg(long)]
        config: Option<PathBuf>,
        /// A display as WxH or WxH+X+Y. Repeat for more displays; the first is
        /// primary.
        #[arg(long = "screen", value_parser = parse_screen)]
        screens: Vec<Rect>,
        /// Starting window bounds as X,Y,W,H.
        #[arg(long, value_parser = parse_rect)]
        window: Rect,
        /// Cursor position as X,Y. Defaults to the window's center.
        #[arg(long, value_parser = parse_point)]
        cursor: Option<Point>,
        /// Hotkeys to press, e.g. "Meta + Alt + Numpad4".
        #[arg(required = true)]
        keys: Vec<Hotkey>,
    },
}

fn main() {
    let cli = Cli::parse();
    log::init_logging();
    install_panic_hook();

    let result = match cli.command {
        Commands::Validate { config } => validate(config.as_deref()),
        Commands::Layouts { screen, json } => layouts(screen, json),
        Commands::Simulate { config, screens, window, cursor, keys } => {
            simulate(config.as_deref(), screens, window, cursor, &keys)
        }
    };
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::read(path),
        None => Config::load(),
    }
}

fn validate(path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(path)?;
    let issues = config.validate();
    if issues.is_empty() {
        println!("configuration ok: {} bindings", config.keys.len());
        return Ok(());
    }
    for issue in &issues {
        println!("{issue}");
    }
    bail!("{} problem(s) found", issues.len())
}

#[derive(Serialize)]
struct LayoutTarget {
    name: NamedLayout,
    bounds: Option<Rect>,
}

fn layouts(area: Rect, json: bool) -> anyhow::Result<()> {
    let screens = vec![display(0, area)];
    let desktop = HeadlessDesktop::new(screens.clone());
    let probe = desktop.open(WindowSpec::new("probe", area));
    let targets: Vec<LayoutTarget> = NamedLayout::iter()
        .map(|name| LayoutTarget {
            name,
            bounds: name.layout().calc_bounds(&screens, &probe, &screens[0]),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
        return Ok(());
    }
    for target in targets {
        let name = target.name.to_string();
        match target.bounds {
            Some(bounds) => println!("{name:<26} {bounds}"),
            None => println!("{name:<26} (no bounds)"),
        }
    }
    Ok(())
}

fn simulate(
    path: Option<&Path>,
    screens: Vec<Rect>,
    window: Rect,
    cursor: Option<Point>,
    keys: &[Hotkey],
) -> anyhow::Result<()> {
    let config = load_config(path)?;
    let issues = config.validate();
    if !issues.is_empty() {
        bail!("invalid configuration:\n{}", issues.join("\n"));
    }

    let screens = if screens.is_empty() {
        vec![Rect::new(0, 0, 1920, 1080)]
    } else {
        screens
    };
    let desktop = HeadlessDesktop::new(
        screens.into_iter().enumerate().map(|(i, bounds)| display(i, bounds)).collect(),
    );
    let (events_tx, mut events_rx) = actor::channel();
    let registry = Arc::new(HotkeyRegistry::new(events_tx.clone()));
    let service: Arc<dyn HotkeyService> = registry.clone();

    let mut dispatcher = Dispatcher::new(desktop.clone(), ScreenCache::new(desktop.clone()));
    if let Some(mods) = config.settings.scroll_cycle_modifiers {
        dispatcher = dispatcher.with_scroll_cycling(mods);
    }
    for (hotkey, action) in config.bindings()? {
        dispatcher.bind(&service, hotkey, action).with_context(|| format!("binding {hotkey}"))?;
    }

    let w = desktop.open(WindowSpec::new("window", window));
    desktop.set_cursor(cursor.unwrap_or(window.center()));
    println!("{:<24} {} {:?} cursor {}", "start", w.bounds()?, w.show_state()?, desktop.cursor());

    for &hotkey in keys {
        if !registry.press(hotkey) {
            println!("{:<24} not bound", hotkey.to_string());
            continue;
        }
        let handled = dispatcher.drain(&mut events_rx);
        debug!(%hotkey, handled, "replayed");
        println!(
            "{:<24} {} {:?} cursor {}",
            hotkey.to_string(),
            w.bounds()?,
            w.show_state()?,
            desktop.cursor()
        );
    }
    events_tx.send(InputEvent::Shutdown);
    dispatcher.run(events_rx);
    debug!(released = registry.is_empty(), "dispatcher stopped");
    Ok(())
}

/// A display whose usable area is its whole area.
fn display(index: usize, bounds: Rect) -> Screen {
    Screen {
        id: ScreenId::new(format!("DISPLAY{}", index + 1)),
        bounds,
        usable_bounds: bounds,
        primary: index == 0,
    }
}

fn parse_screen(s: &str) -> anyhow::Result<Rect> {
    let (size, offset) = match s.split_once('+') {
        Some((size, offset)) => (size, Some(offset)),
        None => (s, None),
    };
    let Some((w, h)) = size.split_once('x') else {
        bail!("expected WxH[+X+Y], got {s}");
    };
    let (x, y) = match offset {
        Some(offset) => {
            let Some((x, y)) = offset.split_once('+') else {
                bail!("expected WxH+X+Y, got {s}");
            };
            (x.trim().parse()?, y.trim().parse()?)
        }
        None => (0, 0),
    };
    Ok(Rect::new(x, y, w.trim().parse()?, h.trim().parse()?))
}

fn parse_rect(s: &str) -> anyhow::Result<Rect> {
    let parts = s.split(',').map(|p| p.trim().parse::<i32>()).collect::<Result<Vec<_>, _>>()?;
    let [x, y, w, h] = parts[..] else {
        bail!("expected X,Y,W,H, got {s}");
    };
    Ok(Rect::new(x, y, w, h))
}

fn parse_point(s: &str) -> anyhow::Result<Point> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("expected X,Y, got {s}");
    };
    Ok(Point::new(x.trim().parse()?, y.trim().parse()?))
}

#[cfg(panic = "unwind")]
fn install_panic_hook() {
    // Abort on panic instead of unwinding into half-applied window state.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        original_hook(info);
        std::process::abort();
    }));
}

#[cfg(not(panic = "unwind"))]
fn install_panic_hook() {}
