use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MangaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("Config error: {0}")]
    Config(String),
}
