use thiserror::Error;

/// Error kinds surfaced by the public decode/encode entry points. Per-record
/// decode failures inside `NdefMessage::decode` do not propagate as this
/// error — they fall back to a generic record (see `message.rs`). This type
/// is reserved for operations that have no such fallback: explicit
/// constructors, `SmartPosterFields::decompose`, and header/media-type
/// validation called directly by a caller.
#[derive(Error, Debug)]
pub enum NdefError {
    #[error("malformed record header")]
    MalformedHeader,
    #[error("chunked records are not supported")]
    UnsupportedChunked,
    #[error("invalid URI record")]
    InvalidUri,
    #[error("invalid Text record")]
    InvalidText,
    #[error("invalid Smart Poster record")]
    InvalidSmartPoster,
    #[error("invalid media type")]
    InvalidMediaType,
    #[error("encoded field exceeds the wire format's length limit")]
    EncodeOverflow,
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
