mod audio;
mod display;
mod input;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use plane_shooter::{HighScores, SimulationState};

use crate::audio::TerminalBell;
use crate::input::{KeyAction, KeyTracker};

#[derive(Parser, Debug)]
#[command(name = "plane_shooter", about = "Auto-firing terminal arcade shooter")]
struct Cli {
    /// RNG seed; defaults to the current time
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per tick
    #[arg(long, default_value_t = 33)]
    tick_ms: u64,

    /// Leaderboard file (default: ~/.plane_shooter_scores.json)
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Write logs here; the terminal is busy with the game
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,
}

enum Outcome {
    Quit,
    Restart,
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn unix_now() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drive one game to completion, then wait on the game-over screen.
///
/// Input is drained without blocking every frame; only the latest direction
/// key reaches the simulation. Real-time pacing happens here, never in the core.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut SimulationState,
    rx: &mpsc::Receiver<Event>,
    scores: &mut HighScores,
    score_path: &Path,
    cli: &Cli,
) -> Result<Outcome> {
    let frame_time = Duration::from_millis(cli.tick_ms.max(1));
    let mut keys = KeyTracker::new();
    let mut bell = TerminalBell::new(cli.mute);
    let best = scores.top_score().unwrap_or(0);
    let mut new_record = false;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                match keys.handle(&key, frame) {
                    KeyAction::Quit => return Ok(Outcome::Quit),
                    KeyAction::Restart if state.is_game_over() => return Ok(Outcome::Restart),
                    _ => {}
                }
            }
        }

        let was_over = state.is_game_over();
        let input = keys.take_tick_input(frame);
        let snap = state.advance(&input, &mut bell);

        if state.is_game_over() && !was_over {
            let final_score = snap.player.score;
            let timestamp = unix_now().as_secs();
            new_record = scores.submit(final_score, snap.frame, timestamp);
            if let Err(e) = scores.save(score_path) {
                log::warn!("could not save high scores: {e}");
            }
            log::info!("final score {final_score}, new record: {new_record}");
        }

        display::render(out, &snap, best, new_record)?;
        bell.flush(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events let Shift be tracked as a held modifier.
    // Terminals without the kitty protocol fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the game loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &cli);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, cli: &Cli) -> Result<()> {
    let score_path = cli
        .score_file
        .clone()
        .unwrap_or_else(plane_shooter::highscore::default_path);
    let mut scores = HighScores::load(&score_path).unwrap_or_else(|e| {
        log::warn!("ignoring unreadable high scores: {e}");
        HighScores::new()
    });

    let mut seed = cli
        .seed
        .unwrap_or_else(|| unix_now().as_nanos() as u64);

    loop {
        let mut state = SimulationState::new(seed);
        match game_loop(out, &mut state, rx, &mut scores, &score_path, cli)? {
            Outcome::Quit => break,
            Outcome::Restart => seed = seed.wrapping_add(1),
        }
    }
    Ok(())
}
