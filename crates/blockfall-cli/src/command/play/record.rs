use std::{
    fs::{self, File},
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use blockfall_engine::{GameSeed, GameSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Final state of a played game, as written by `--save-snapshot`.
#[derive(Debug, Serialize)]
struct RecordedSnapshot {
    recorded_at: DateTime<Utc>,
    seed: GameSeed,
    snapshot: GameSnapshot,
}

/// Writes the snapshot to `blockfall_{YYYYMMDD_HHMMSS}.json` under `dir`,
/// creating the directory if needed. Returns the file path.
pub fn save_snapshot(dir: &Path, seed: GameSeed, snapshot: GameSnapshot) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let recorded_at = Utc::now();
    let path = dir.join(file_name(recorded_at));
    let data = RecordedSnapshot {
        recorded_at,
        seed,
        snapshot,
    };

    let file = File::create(&path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &data)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {}", path.display()))?;

    Ok(path)
}

fn file_name(recorded_at: DateTime<Utc>) -> String {
    format!("blockfall_{}.json", recorded_at.format("%Y%m%d_%H%M%S"))
}
