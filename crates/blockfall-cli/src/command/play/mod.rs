use std::path::PathBuf;

use blockfall_engine::GameSeed;
use rand::Rng as _;
use ratatui_runtime::Runtime;

use self::app::PlayApp;
use crate::cue::{CuePlayer, Silent, TerminalBell};

mod app;
mod keymap;
mod record;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence, as 32 hex digits (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<GameSeed>,
    /// Frames per second for input polling, gravity ticks and redraws
    #[clap(long, default_value_t = 60.0)]
    fps: f64,
    /// Ring the terminal bell on line clears and game over
    #[clap(long)]
    pub(crate) bell: bool,
    /// Save the final game state to a file when the game ends
    #[clap(long)]
    save_snapshot: bool,
    /// Directory to save snapshot files
    #[clap(long, default_value = "./data/snapshots/")]
    snapshot_dir: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            fps: 60.0,
            bell: false,
            save_snapshot: false,
            snapshot_dir: PathBuf::from("./data/snapshots/"),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        fps,
        bell,
        save_snapshot,
        snapshot_dir,
    } = arg;

    anyhow::ensure!(*fps > 0.0, "--fps must be positive, got {fps}");

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let player: Box<dyn CuePlayer> = if *bell {
        Box::new(TerminalBell::stdout())
    } else {
        Box::new(Silent)
    };

    let mut app = PlayApp::new(seed, *fps, player);
    Runtime::new().run(&mut app)?;

    if *save_snapshot {
        let path = record::save_snapshot(snapshot_dir, seed, app.snapshot())?;
        eprintln!("Saved snapshot to {}", path.display());
    }

    Ok(())
}
