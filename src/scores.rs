use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ScoreError;
use crate::paths;

const MAGIC: &[u8; 4] = b"AIHS";
// 4 magic + 4 score bytes
const FILE_SIZE: usize = 8;

pub const SCORE_FILE: &str = "alien_invasion.score";

pub fn scores_path() -> PathBuf {
    paths::beside_executable(SCORE_FILE)
}

pub fn load(path: &Path) -> Result<u32, ScoreError> {
    let data = fs::read(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ScoreError::NotFound { path: path.to_path_buf() }
        } else {
            ScoreError::Io { path: path.to_path_buf(), source }
        }
    })?;
    if data.len() < FILE_SIZE {
        return Err(ScoreError::Truncated { path: path.to_path_buf(), len: data.len() });
    }
    if &data[0..4] != MAGIC {
        return Err(ScoreError::BadMagic { path: path.to_path_buf() });
    }
    let bytes: [u8; 4] = [data[4], data[5], data[6], data[7]];
    Ok(u32::from_le_bytes(bytes))
}

/// Load the high score, treating any failure as "no previous high score".
pub fn load_or_default(path: &Path) -> u32 {
    match load(path) {
        Ok(score) => {
            info!("Loaded high score {} from {}", score, path.display());
            score
        }
        Err(ScoreError::NotFound { .. }) => {
            debug!("No high score file at {}", path.display());
            0
        }
        Err(e) => {
            warn!("{}. Starting from zero.", e);
            0
        }
    }
}

pub fn save(path: &Path, high_score: u32) -> Result<(), ScoreError> {
    let mut buf = Vec::with_capacity(FILE_SIZE);
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&high_score.to_le_bytes());
    fs::write(path, &buf).map_err(|source| ScoreError::Io { path: path.to_path_buf(), source })
}
