use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to install log subscriber: {0}")]
    Logging(String),

    #[error("could not load asset {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[cfg(feature = "audio")]
    #[error("audio output unavailable: {0}")]
    AudioStream(#[from] rodio::StreamError),

    #[cfg(feature = "audio")]
    #[error("audio sink failed: {0}")]
    AudioPlay(#[from] rodio::PlayError),

    #[cfg(feature = "audio")]
    #[error("could not decode audio: {0}")]
    AudioDecode(#[from] rodio::decoder::DecoderError),
}
