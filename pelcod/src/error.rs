use std::io::Error as IoError;
use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] IoError),

    #[error(transparent)]
    Protocol(#[from] crate::protocol::Error),

    #[cfg(feature = "serial")]
    #[error(transparent)]
    Serial(#[from] serialport::Error),

    #[error("channel unavailable, likely not connected")]
    ChannelUnavailable,

    #[error("capability not provided: no transport attached")]
    TransportUnavailable,

    #[error("transport does not support this operation")]
    Unsupported,

    #[error("internal error")]
    Internal,
}
