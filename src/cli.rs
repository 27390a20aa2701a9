//! Command line parsing for the `blockfall` binary.
//!
//! ```text
//! blockfall [play]
//! blockfall simulate [--ticks N] [--seed-a N] [--seed-b N] [--autoplay [SEED]]
//! ```
//!
//! Flags override the `BLOCKFALL_*` environment configuration.

use anyhow::{anyhow, bail, Context, Result};

use blockfall::engine::EngineConfig;

pub const DEFAULT_SIM_TICKS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulateArgs {
    pub config: EngineConfig,
    pub ticks: u64,
    pub autoplay: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(EngineConfig),
    Simulate(SimulateArgs),
}

pub fn parse_args(args: &[String], config: EngineConfig) -> Result<Command> {
    let Some(first) = args.first() else {
        return Ok(Command::Play(config));
    };

    match first.as_str() {
        "play" => {
            if let Some(extra) = args.get(1) {
                bail!("unexpected argument to play: {extra}");
            }
            Ok(Command::Play(config))
        }
        "simulate" => parse_simulate(&args[1..], config).map(Command::Simulate),
        other => Err(anyhow!("unknown command: {other} (expected play or simulate)")),
    }
}

fn parse_simulate(args: &[String], mut config: EngineConfig) -> Result<SimulateArgs> {
    let mut ticks = DEFAULT_SIM_TICKS;
    let mut autoplay = None;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => {
                i += 1;
                ticks = parse_value(args, i, "--ticks")?;
            }
            "--seed-a" => {
                i += 1;
                config.seed_a = parse_value(args, i, "--seed-a")?;
            }
            "--seed-b" => {
                i += 1;
                config.seed_b = parse_value(args, i, "--seed-b")?;
            }
            "--autoplay" => {
                // Optional seed; defaults to the first stream's seed.
                match args.get(i + 1).and_then(|s| s.parse::<u32>().ok()) {
                    Some(seed) => {
                        autoplay = Some(seed);
                        i += 1;
                    }
                    None => autoplay = Some(config.seed_a),
                }
            }
            other => bail!("unknown simulate flag: {other}"),
        }
        i += 1;
    }

    Ok(SimulateArgs {
        config,
        ticks,
        autoplay,
    })
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args
        .get(i)
        .ok_or_else(|| anyhow!("missing value for {flag}"))?;
    raw.parse()
        .with_context(|| format!("invalid value for {flag}: {raw:?}"))
}
