use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocseekError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("search term is empty")]
    EmptyQuery,

    #[error("a search session is already running")]
    SearchRunning,

    #[error("failed to open '{path}' with the default handler: {reason}")]
    OpenHandler { path: PathBuf, reason: String },

    #[error("An unexpected error occurred: {0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DocseekError>;
