use thiserror::Error;

/// Error types.
#[derive(Debug, Error)]
pub enum Error {
    #[cfg(test)]
    #[error(transparent)]
    FromHexError(#[from] hex::FromHexError),

    #[error("invalid length")]
    InvalidLength,

    #[error("invalid sync byte: {0:#04x}")]
    InvalidSync(u8),

    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("data parse error: {0}")]
    BinRwError(#[from] binrw::Error),
}
