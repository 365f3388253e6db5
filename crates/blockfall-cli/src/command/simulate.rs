//! Headless command script runner.
//!
//! A script is plain text with one step per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! left
//! rotate
//! tick 1500
//! drop
//! ```
//!
//! Command lines use the tags accepted by [`Command`]'s `FromStr`. A
//! `tick <millis>` line feeds a clock reading (milliseconds since start) to
//! the gravity timer.

use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{Command, Effect, GameSeed, GameSession, GameSnapshot, ParseCommandError};
use rand::Rng as _;
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Script file to run, or `-` for stdin
    script: PathBuf,
    /// Seed for the piece sequence, as 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<GameSeed>,
    /// Output file path (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        script,
        seed,
        output,
    } = arg;

    let text = util::read_text_input(script)?;
    let steps = parse_script(&text)?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());

    eprintln!("Running {} steps with seed {seed}...", steps.len());
    let result = simulate(seed, &steps);
    if result.final_state.game_over {
        eprintln!("Game over after {} steps", result.steps.len());
    }

    let mut output = Output::from_output_path(output.as_deref())?;
    output.write_json(&result)?;
    eprintln!("Wrote result to {}", output.display_path());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Input {
    Command(Command),
    Tick(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    line_number: usize,
    input: Input,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
enum ScriptLineError {
    #[display("{_0}")]
    Command(ParseCommandError),
    #[display("invalid tick value {value:?}: expected milliseconds")]
    Tick {
        value: String,
        source: std::num::ParseIntError,
    },
}

fn parse_line(line: &str) -> Result<Option<Input>, ScriptLineError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if let Some(value) = line.strip_prefix("tick") {
        // `tick` must be a whole word; `ticker` falls through to the command parser
        if value.is_empty() || value.starts_with(char::is_whitespace) {
            let value = value.trim();
            let millis = value.parse().map_err(|source| ScriptLineError::Tick {
                value: value.to_owned(),
                source,
            })?;
            return Ok(Some(Input::Tick(millis)));
        }
    }
    let command = line.parse().map_err(ScriptLineError::Command)?;
    Ok(Some(Input::Command(command)))
}

fn parse_script(text: &str) -> anyhow::Result<Vec<Step>> {
    let mut steps = vec![];
    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let input = parse_line(line)
            .with_context(|| format!("Invalid script line {line_number}: {:?}", line.trim()))?;
        if let Some(input) = input {
            steps.push(Step { line_number, input });
        }
    }
    Ok(steps)
}

#[derive(Debug, Serialize)]
struct SimulationResult {
    seed: GameSeed,
    steps: Vec<StepRecord>,
    final_state: GameSnapshot,
}

#[derive(Debug, Serialize)]
struct StepRecord {
    line: usize,
    input: Input,
    effects: Vec<Effect>,
}

fn simulate(seed: GameSeed, steps: &[Step]) -> SimulationResult {
    let mut session = GameSession::with_seed(seed);
    let records = steps
        .iter()
        .map(|step| {
            let effects = match step.input {
                Input::Command(command) => session.process_command(command),
                Input::Tick(now_millis) => session.process_gravity_tick(now_millis),
            };
            StepRecord {
                line: step.line_number,
                input: step.input,
                effects: effects.to_vec(),
            }
        })
        .collect();
    SimulationResult {
        seed,
        steps: records,
        final_state: session.snapshot(),
    }
}
