//! Blockfall runner (default binary).
//!
//! - `play`: reads keys from the terminal and drives the real-time engine,
//!   printing a one-line status whenever the state changes
//! - `simulate`: folds a deterministic schedule headlessly and writes one JSON
//!   snapshot per step to stdout

mod cli;

use std::io::{self, BufWriter, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{cursor, queue, style, terminal};
use log::{info, warn};
use tokio::sync::{mpsc, watch};

use blockfall::core::{BoardSnapshot, State};
use blockfall::engine::{
    run_game, snapshot_channel, Autopilot, EngineConfig, Schedule, Simulation,
};
use blockfall::input::{map_key, should_quit};
use blockfall::types::Key;

use cli::{parse_args, Command, SimulateArgs};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = EngineConfig::from_env().context("reading BLOCKFALL_* configuration")?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match parse_args(&args, config)? {
        Command::Play(config) => play(config),
        Command::Simulate(args) => simulate(args),
    }
}

fn simulate(args: SimulateArgs) -> Result<()> {
    let mut schedule = Schedule::new(&args.config);
    if let Some(seed) = args.autoplay {
        schedule = schedule.with_autopilot(Autopilot::new(seed));
    }
    let sim = Simulation::new(schedule);

    info!(
        "simulating {} ticks with seeds ({}, {})",
        args.ticks, args.config.seed_a, args.config.seed_b
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (step, snapshot) in sim.take(args.ticks as usize) {
        let line = serde_json::json!({ "step": step, "snapshot": snapshot });
        serde_json::to_writer(&mut out, &line)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn play(config: EngineConfig) -> Result<()> {
    terminal::enable_raw_mode().context("enabling raw mode")?;
    let result = run_play(config);

    // Always try to restore terminal state.
    let _ = terminal::disable_raw_mode();
    println!();
    result
}

fn run_play(config: EngineConfig) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    let (key_tx, key_rx) = mpsc::channel::<Key>(32);
    let (snap_tx, snap_rx) = snapshot_channel();

    let reader = thread::spawn(move || read_keys(key_tx));

    let final_state = rt.block_on(async move {
        let status = tokio::spawn(print_status(snap_rx));
        let state = run_game(config, key_rx, snap_tx).await;
        if let Err(e) = status.await {
            warn!("status task failed: {e}");
        }
        state
    });

    match reader.join() {
        Ok(result) => result?,
        Err(_) => warn!("key reader thread panicked"),
    }

    info!(
        "final score {} (best {})",
        final_state.stats.score,
        final_state.stats.high_score.max(final_state.stats.score)
    );
    Ok(())
}

/// Forward terminal key presses until a quit key or the engine goes away.
fn read_keys(keys: mpsc::Sender<Key>) -> Result<()> {
    loop {
        if !event::poll(Duration::from_millis(100))? {
            if keys.is_closed() {
                return Ok(());
            }
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if should_quit(key) {
            return Ok(());
        }
        if let Some(game_key) = map_key(key) {
            if keys.blocking_send(game_key).is_err() {
                return Ok(());
            }
        }
    }
}

/// Presentation consumer: one status line per published state.
async fn print_status(mut snapshots: watch::Receiver<State>) {
    while snapshots.changed().await.is_ok() {
        let snap = BoardSnapshot::from(&*snapshots.borrow_and_update());
        if let Err(e) = write_status(&snap) {
            warn!("status line failed: {e}");
            return;
        }
    }
}

fn write_status(snap: &BoardSnapshot) -> io::Result<()> {
    let phase = if snap.game_end {
        "GAME OVER"
    } else if snap.level_up {
        "LEVEL UP"
    } else {
        "playing"
    };
    let falling = snap
        .current
        .map(|s| format!("{} @ ({}, {})", s.kind.name(), s.x, s.y))
        .unwrap_or_else(|| "-".to_string());

    let mut stdout = io::stdout();
    queue!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(format!(
            "level {} | score {} | best {} | {} | falling {} | next {} | cells {}",
            snap.stats.level,
            snap.stats.score,
            snap.stats.high_score,
            phase,
            falling,
            snap.next.kind.name(),
            snap.filled_cells(),
        ))
    )?;
    stdout.flush()
}
