//! One JSON file per saved (al_iter, epoch):
//! `<dir>/<run_id>/al_<al_iter>_epoch_<epoch>.json`.
//!
//! Files are written to a `.tmp` sibling and renamed into place, so a crash
//! mid-write never leaves a truncated checkpoint under the final name.

use std::fs;
use std::path::{Path, PathBuf};

use medal_core::config::CheckpointConfig;
use medal_core::constants::CHECKPOINT_EXTENSION;
use medal_core::errors::{CheckpointError, MedalResult};
use medal_core::models::Checkpoint;
use medal_core::traits::ICheckpointStore;

/// `al_<al_iter>_epoch_<epoch>.json`
pub fn checkpoint_file_name(al_iter: u32, epoch: u32) -> String {
    format!("al_{al_iter}_epoch_{epoch}.{CHECKPOINT_EXTENSION}")
}

/// Inverse of [`checkpoint_file_name`]. `None` for anything else in the directory.
pub fn parse_checkpoint_file_name(name: &str) -> Option<(u32, u32)> {
    let stem = name
        .strip_prefix("al_")?
        .strip_suffix(CHECKPOINT_EXTENSION)?
        .strip_suffix('.')?;
    let (al_iter, epoch) = stem.split_once("_epoch_")?;
    Some((al_iter.parse().ok()?, epoch.parse().ok()?))
}

#[derive(Debug, Clone)]
pub struct JsonCheckpointStore {
    root: PathBuf,
}

impl JsonCheckpointStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &CheckpointConfig) -> Self {
        Self::new(&config.dir)
    }

    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root.join(run_id)
    }

    pub fn path_for(&self, run_id: &str, al_iter: u32, epoch: u32) -> PathBuf {
        self.run_dir(run_id)
            .join(checkpoint_file_name(al_iter, epoch))
    }

    /// Every checkpoint on disk for `run_id`, as `(al_iter, epoch, path)`,
    /// sorted oldest first.
    pub fn list(&self, run_id: &str) -> MedalResult<Vec<(u32, u32, PathBuf)>> {
        let dir = self.run_dir(run_id);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&dir).map_err(|e| io_error(&dir, e))?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error(&dir, e))?;
            let name = entry.file_name();
            let Some((al_iter, epoch)) = name.to_str().and_then(parse_checkpoint_file_name)
            else {
                continue;
            };
            found.push((al_iter, epoch, entry.path()));
        }
        found.sort_by_key(|&(al_iter, epoch, _)| (al_iter, epoch));
        Ok(found)
    }

    fn read(&self, path: &Path) -> MedalResult<Checkpoint> {
        let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            CheckpointError::Corrupt {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl ICheckpointStore for JsonCheckpointStore {
    fn save(&self, checkpoint: &Checkpoint) -> MedalResult<()> {
        let dir = self.run_dir(&checkpoint.run_id);
        fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;

        let path = self.path_for(
            &checkpoint.run_id,
            checkpoint.record.al_iter,
            checkpoint.record.epoch,
        );
        let tmp = path.with_extension(format!("{CHECKPOINT_EXTENSION}.tmp"));
        let bytes = serde_json::to_vec_pretty(checkpoint)?;
        fs::write(&tmp, bytes).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_error(&path, e))?;

        tracing::debug!(path = %path.display(), "checkpoint written");
        Ok(())
    }

    fn load_latest(&self, run_id: &str) -> MedalResult<Option<Checkpoint>> {
        let Some((al_iter, epoch, path)) = self.list(run_id)?.pop() else {
            return Ok(None);
        };
        let checkpoint = self.read(&path)?;
        if checkpoint.run_id != run_id {
            return Err(CheckpointError::RunMismatch {
                expected: run_id.to_string(),
                found: checkpoint.run_id,
            }
            .into());
        }
        tracing::info!(run_id, al_iter, epoch, path = %path.display(), "loaded checkpoint");
        Ok(Some(checkpoint))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> CheckpointError {
    CheckpointError::Io {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_round_trip() {
        assert_eq!(checkpoint_file_name(3, 12), "al_3_epoch_12.json");
        assert_eq!(parse_checkpoint_file_name("al_3_epoch_12.json"), Some((3, 12)));
    }

    #[test]
    fn foreign_files_are_ignored() {
        for name in [
            "al_3_epoch_12.json.tmp",
            "al_x_epoch_1.json",
            "al_1_epoch_.json",
            "notes.txt",
            "al_1_epoch_2json",
        ] {
            assert_eq!(parse_checkpoint_file_name(name), None, "{name}");
        }
    }
}
