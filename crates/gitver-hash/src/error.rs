/// Errors produced when parsing or constructing object ids.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("invalid hex character at position {position}: '{character}'")]
    InvalidHex { position: usize, character: char },

    #[error("invalid hex length: expected 40 or 64, got {actual}")]
    InvalidHexLength { actual: usize },

    #[error("invalid hash length: expected 20 or 32 bytes, got {actual}")]
    InvalidHashLength { actual: usize },
}
