mod audio;
mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use invaders::entities::{GameState, InputFlags, Schedule};
use invaders::input::{key_down, key_up, Key};
use invaders::render::RenderSync;
use invaders::{init_state, tick, GameConfig};

use crate::audio::TerminalAudio;
use crate::display::{NodeHandle, TerminalScene};

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so the window is refreshed before expiry.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

#[derive(Parser, Debug)]
#[command(name = "invaders")]
#[command(about = "Terminal arcade shooter: clear the enemy grid before it hits you")]
struct Cli {
    /// JSON file overriding any subset of the game tuning
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the enemy cooldown RNG (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,
    /// Log destination; the terminal itself is in raw mode
    #[arg(long, default_value = "invaders.log")]
    log_file: PathBuf,
    /// Ring the terminal bell for sound effects
    #[arg(long)]
    bell: bool,
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        error!(%info, ?backtrace, "panic");
    }));
    Ok(())
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Char(' ') => Key::Fire,
        _ => Key::Other,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Synthetic release for every key whose last press or repeat is older than
/// `HOLD_WINDOW`.
fn release_stale_keys(held: &mut HashMap<Key, Instant>, input: &mut InputFlags, now: Instant) {
    held.retain(|&key, last| {
        let live = now.duration_since(*last) <= HOLD_WINDOW;
        if !live {
            key_up(input, key);
        }
        live
    });
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the user quits.  The simulation stops ticking once `tick`
/// answers `Schedule::Halt`; the final frame stays on screen.
///
/// Input model: held keys map to `InputFlags` through `key_down`/`key_up`.
/// Keyboard-enhancement terminals (kitty protocol) report real releases, so
/// `release_events` leaves held keys alone until `KeyEventKind::Release`.
/// Classic terminals only repeat presses; there a key whose last press or
/// repeat is older than `HOLD_WINDOW` gets a synthetic release.
#[allow(clippy::too_many_arguments)]
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    scene: &mut TerminalScene,
    sync: &mut RenderSync<NodeHandle>,
    audio: &mut TerminalAudio,
    fps: u32,
    release_events: bool,
) -> std::io::Result<()> {
    let frame_len = Duration::from_secs_f64(1.0 / fps as f64);
    let started = Instant::now();
    let mut held: HashMap<Key, Instant> = HashMap::new();
    let mut halted = false;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if kind == KeyEventKind::Press && is_quit(code, modifiers) {
                return Ok(());
            }
            let key = map_key(code);
            if key == Key::Other {
                continue;
            }
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    held.insert(key, frame_start);
                    key_down(&mut state.input, key);
                }
                KeyEventKind::Release => {
                    held.remove(&key);
                    key_up(&mut state.input, key);
                }
            }
        }

        if !release_events {
            release_stale_keys(&mut held, &mut state.input, frame_start);
        }

        if !halted {
            let frame = tick(state, started.elapsed().as_secs_f64());
            sync.apply(state, &frame.events, scene, audio);
            if frame.schedule == Schedule::Halt {
                info!(frame = state.frame, "frame loop halted");
                halted = true;
            }
        }

        scene.present(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, fps = cli.fps, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    // The query reads the terminal's reply, so it runs before the input thread.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    info!(keyboard_enhanced, "terminal ready");

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
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, config, seed, &cli, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!(error = %e, "exited with error");
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    seed: u64,
    cli: &Cli,
    release_events: bool,
) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = TerminalScene::new(config.arena_width, config.arena_height);
    let mut sync = RenderSync::new();
    let mut audio = TerminalAudio::new(cli.bell);

    let (mut state, events) = init_state(config, &mut rng);
    sync.apply(&state, &events, &mut scene, &mut audio);

    game_loop(
        out,
        &mut state,
        rx,
        &mut scene,
        &mut sync,
        &mut audio,
        cli.fps,
        release_events,
    )
    .context("terminal I/O failed")?;

    info!(
        frame = state.frame,
        status = ?state.status,
        enemies_left = state.enemies.len(),
        "quit"
    );
    Ok(())
}
