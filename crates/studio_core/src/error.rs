use shared::domain::DesignId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("no example prompt at position {index} ({available} available)")]
    UnknownExample { index: usize, available: usize },
    #[error("design {0} is not in this session's gallery")]
    UnknownDesign(DesignId),
}

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("invalid image reference: {0}")]
    InvalidReference(#[from] url::ParseError),
    #[error("unsupported image reference scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("malformed data url: {0}")]
    MalformedDataUrl(&'static str),
    #[error("failed to decode inline image: {0}")]
    InlineDecode(#[from] base64::DecodeError),
    #[error("failed to download image: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),
}
