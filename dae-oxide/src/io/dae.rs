use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::core::scene::SceneModel;
use crate::decode::{self, config};

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("Invalid options: {0}")]
    Config(#[from] config::Err),
    #[error("Failed to decode {path}: {source}")]
    Decode { path: PathBuf, source: decode::Err },
    #[error("Failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}

/// Reads a .dae file and decodes it with the given options.
/// The options are resolved before the file is touched.
pub fn load_dae<P: AsRef<Path> + Debug>(path: P, opts: &config::Options) -> Result<SceneModel, Err> {
    let cfg = opts.resolve()?;
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|source| Err::Io { path: path.to_path_buf(), source })?;
    tracing::debug!("loaded {} bytes from {:?}", text.len(), path);
    decode::decode(&text, &cfg)
        .map_err(|source| Err::Decode { path: path.to_path_buf(), source })
}
