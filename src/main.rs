mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use side_scroller::audio::{AudioSink, LogAudio};
use side_scroller::config::GameConfig;
use side_scroller::input::HeldKeys;
use side_scroller::session::Session;

#[derive(Parser, Debug)]
#[command(about = "Side-scrolling platformer for the terminal", version)]
struct Args {
    /// TOML file overriding the default tunables.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write logs to this file. Without it only warnings reach stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Without a log file the only sink is stderr, which would draw over the
/// alternate screen. Mutes logging in that case; returns the level to put
/// back once the terminal is restored.
fn mute_stderr_logging(log_file: Option<&Path>) -> LevelFilter {
    let previous = log::max_level();
    if log_file.is_none() {
        log::set_max_level(LevelFilter::Off);
    }
    previous
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits. One iteration is one tick: drain input,
/// update, play cues, render, then sleep out the rest of the frame. A slow
/// frame just delays the next one; there is no catch-up.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
    rng: &mut StdRng,
    audio: &mut impl AudioSink,
) -> Result<()> {
    let frame_budget = session.config().frame_duration();
    let mut held = HeldKeys::new();
    let mut runs_seen = session.runs();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                if let Some(cmd) = held.observe(&key, frame) {
                    session.handle(cmd, rng);
                }
            }
        }

        // A new run starts with the player standing still, so forget what
        // was held before and let still-held keys re-emit their `Move`.
        if session.runs() != runs_seen {
            runs_seen = session.runs();
            held = HeldKeys::new();
        }
        for cmd in held.poll(frame) {
            session.handle(cmd, rng);
        }

        if session.quit_requested() {
            return Ok(());
        }

        session.update(rng);
        for cue in session.drain_cues() {
            audio.play(cue);
        }

        let (cols, rows) = terminal::size()?;
        display::render(out, session, cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let config = GameConfig::load(args.config.as_deref())?;
    let mut rng = match args.seed {
        Some(seed) => {
            log::info!("using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    let stderr_level = mute_stderr_logging(args.log_file.as_deref());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back to hold windows.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    log::info!("keyboard enhancement: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                log::warn!("input thread stopped: {}", e);
                break;
            }
        }
    });

    let mut session = Session::new(config);
    let mut audio = LogAudio::default();
    let result = game_loop(&mut out, &rx, &mut session, &mut rng, &mut audio);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    log::set_max_level(stderr_level);

    log::info!("exiting after {} runs", session.runs());
    result
}
