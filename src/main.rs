//! Terminal runner (default binary).
//!
//! Polls keys with crossterm, feeds them to the engine one action per frame,
//! applies gravity every `gravity_frames` frames and renders through the
//! framebuffer-based renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use srs_tetris::config::{clock_seed, parse_args, Command, RunConfig, USAGE};
use srs_tetris::core::{GameSnapshot, GameState};
use srs_tetris::input::{handle_key_event, should_quit};
use srs_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args, clock_seed())? {
        Command::Help => {
            print!("{}", USAGE);
            return Ok(());
        }
        Command::Run(config) => config,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    let last = result?;

    if last.game_over {
        println!("Game Over");
    }
    println!("score: {}", last.score);
    println!("seed: {}", last.seed);
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &RunConfig) -> Result<GameSnapshot> {
    let mut game_state = GameState::new(config.seed);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(config.frame_ms as u64);
    let mut gravity_countdown = config.gravity_frames;

    loop {
        // Render.
        game_state.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if !snap.playable() {
            return Ok(snap);
        }

        // Input with timeout until the end of the frame.
        let frame_start = Instant::now();
        let mut running = true;
        if event::poll(frame)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        game_state.snapshot_into(&mut snap);
                        return Ok(snap);
                    }
                    if let Some(action) = handle_key_event(key) {
                        running = game_state.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        gravity_countdown = gravity_countdown.saturating_sub(1);
        if gravity_countdown == 0 {
            gravity_countdown = config.gravity_frames.max(1);
            if running {
                game_state.tick();
            }
        }

        if let Some(rest) = frame.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}
