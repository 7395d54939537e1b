//! Terminal raycaster runner (default binary).
//!
//! The simulation is turn-based: the loop blocks on input, and each accepted
//! key is one action and at most one tick. Every frame is composed into a
//! reused framebuffer and flushed as a diff.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use glyphcast::config::load_or_default;
use glyphcast::core::GameState;
use glyphcast::input::{handle_key_event, should_quit};
use glyphcast::logging;
use glyphcast::term::{
    draw_hud, draw_map_view, Compositor, FrameBuffer, TerminalRenderer, Viewport,
};

/// Explore procedurally generated levels in a first-person terminal view.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level seed. Defaults to the current time.
    #[arg(long, value_name = "SEED")]
    seed: Option<u32>,
    /// Level to start on.
    #[arg(
        long,
        value_name = "INDEX",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    level: u32,
    /// Path to a JSON config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Viewport width in columns. Defaults to the terminal width.
    #[arg(long, value_name = "COLUMNS")]
    width: Option<u16>,
    /// Viewport height in rows. Defaults to the terminal height.
    #[arg(long, value_name = "ROWS")]
    height: Option<u16>,
}

impl Args {
    fn viewport(&self) -> Viewport {
        let (tw, th) = crossterm::terminal::size().unwrap_or((80, 24));
        Viewport::new(self.width.unwrap_or(tw), self.height.unwrap_or(th))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let config = load_or_default(args.config.as_deref());
    let seed = args.seed.unwrap_or_else(clock_seed);
    info!("starting seed={} level={}", seed, args.level);

    let mut game = GameState::with_config(seed, config, args.level);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &args);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(
        "exit: level={} score={} ticks={}",
        game.level().index,
        game.player().score,
        game.ticks()
    );
    result
}

fn run(term: &mut TerminalRenderer, game: &mut GameState, args: &Args) -> Result<()> {
    let mut compositor = Compositor::new(&game.config().graphics);
    let mut fb = FrameBuffer::default();

    loop {
        let viewport = args.viewport();
        if game.show_map() {
            fb.resize(viewport.width, viewport.height);
            draw_map_view(&mut fb, game);
        } else {
            compositor.render_into(&game.scene(), viewport, &mut fb);
            draw_hud(&mut fb, game);
        }
        term.present(&mut fb)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    game.apply_action(action);
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() ^ u64::from(d.subsec_nanos())) as u32)
        .unwrap_or(1)
}
