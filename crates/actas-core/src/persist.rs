//! Decodes acta payloads and writes the image files.

use base64::{engine::general_purpose, Engine as _};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::roster::MesaId;

/// Error writing one acta image to disk.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("write: {0}")]
    Io(#[from] io::Error),
}

/// Decodes the base64 payload and writes `<mesa>.jpg` under `output_dir`,
/// returning the path written. Writes the final name directly; the file's
/// existence is what marks the mesa as downloaded on later runs. A repeat
/// write to the same name just overwrites with identical content.
pub fn persist_acta(
    output_dir: &Path,
    mesa: MesaId,
    base64_data: &str,
) -> Result<PathBuf, PersistError> {
    let image = general_purpose::STANDARD.decode(base64_data)?;
    let path = output_dir.join(format!("{mesa}.jpg"));
    fs::write(&path, &image)?;
    Ok(path)
}
