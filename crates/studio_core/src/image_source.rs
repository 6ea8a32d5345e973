use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use url::Url;

use crate::error::ImageLoadError;

/// Resolves an image reference returned by the design service into bytes.
///
/// Supports `http(s)` locators, inline `data:` URLs (generation gateways
/// commonly return base64 payloads) and local `file:` URLs.
#[derive(Clone, Default)]
pub struct ImageLoader {
    http: Client,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&self, reference: &str) -> Result<Vec<u8>, ImageLoadError> {
        let reference = reference.trim();
        if reference.starts_with("data:") {
            return decode_data_url(reference);
        }

        let url = Url::parse(reference)?;
        match url.scheme() {
            "http" | "https" => {
                let bytes = self
                    .http
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .bytes()
                    .await?;
                Ok(bytes.to_vec())
            }
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| ImageLoadError::UnsupportedScheme("file".to_string()))?;
                Ok(tokio::fs::read(path).await?)
            }
            other => Err(ImageLoadError::UnsupportedScheme(other.to_string())),
        }
    }
}

pub fn decode_data_url(reference: &str) -> Result<Vec<u8>, ImageLoadError> {
    let rest = reference
        .strip_prefix("data:")
        .ok_or(ImageLoadError::MalformedDataUrl("missing data: prefix"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or(ImageLoadError::MalformedDataUrl("missing ',' separator"))?;
    if !meta.ends_with(";base64") {
        return Err(ImageLoadError::MalformedDataUrl(
            "only base64 payloads are supported",
        ));
    }

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}
