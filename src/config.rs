//! Command-line configuration for the terminal front-end.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::types::{FRAME_MS, GRAVITY_FRAMES};

pub const USAGE: &str = "\
usage: srs-tetris [--seed <u32>] [--gravity-frames <n>]

  --seed <u32>            piece sequence seed (default: current unix time)
  --gravity-frames <n>    frames between gravity ticks, n >= 1 (default: 60)
  -h, --help              show this message

keys: a/d or arrows slide, s soft drop, w or space hard drop,
      q/z rotate counter-clockwise, e/x/up rotate clockwise,
      r restart, esc quits
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: u32,
    pub gravity_frames: u32,
    pub frame_ms: u32,
}

impl RunConfig {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            gravity_frames: GRAVITY_FRAMES,
            frame_ms: FRAME_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run(RunConfig),
    Help,
}

/// Seed derived from the wall clock (seconds since the Unix epoch, truncated).
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(1)
}

/// Parse arguments (without the program name).
///
/// `default_seed` is used when `--seed` is absent.
pub fn parse_args(args: &[String], default_seed: u32) -> Result<Command> {
    let mut config = RunConfig::new(default_seed);
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--gravity-frames" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --gravity-frames"))?;
                config.gravity_frames = match v.parse::<u32>() {
                    Ok(n) if n >= 1 => n,
                    _ => return Err(anyhow!("invalid --gravity-frames value: {}", v)),
                };
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Command::Run(config))
}
