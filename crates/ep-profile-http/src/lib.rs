use async_trait::async_trait;
use ep_api_types::{AssetRecord, TextRecords};
use ep_profile_source::{
    FetchError, MediaError, MediaProbe, MediaSize, ProfileSource, nfts_path, parse_envelope,
    text_records_path,
};
use image::ImageReader;
use std::io::Cursor;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Profile API over HTTP.
///
/// Reads `PROFILE_API_URL` from environment at construction time
/// (default: `http://localhost:3000`).
pub struct HttpProfileSource {
    endpoint: String,
    http: reqwest::Client,
}

impl Default for HttpProfileSource {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HttpProfileSource {
    pub fn new(endpoint: Option<String>) -> Self {
        let endpoint = endpoint
            .filter(|endpoint| !endpoint.is_empty())
            .or_else(|| std::env::var("PROFILE_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_envelope<T: serde::de::DeserializeOwned + Default>(
        &self,
        what: &'static str,
        path: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}{path}", self.endpoint);
        debug!(%url, "profile api request");

        let response = self.http.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, %status, "profile api error");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(transport)?;
        parse_envelope(what, &body)
    }
}

fn transport(err: reqwest::Error) -> FetchError {
    FetchError::Transport(err.to_string())
}

#[async_trait(?Send)]
impl ProfileSource for HttpProfileSource {
    async fn text_records(&self, domain: &str) -> Result<TextRecords, FetchError> {
        self.get_envelope("text records", &text_records_path(domain)).await
    }

    async fn assets(&self, wallet_address: &str) -> Result<Vec<AssetRecord>, FetchError> {
        self.get_envelope("NFTs", &nfts_path(wallet_address)).await
    }
}

/// Downloads an image and reads its intrinsic size from the header.
/// Formats without a raster header (SVG) report [`MediaError::Decode`].
#[derive(Clone, Default)]
pub struct HttpMediaProbe {
    http: reqwest::Client,
}

impl HttpMediaProbe {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl MediaProbe for HttpMediaProbe {
    async fn decode_image(&self, url: &str) -> Result<MediaSize, MediaError> {
        let decode_err = |reason: String| MediaError::Decode {
            url: url.to_owned(),
            reason,
        };

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| decode_err(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(decode_err(format!("HTTP {status}")));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| decode_err(err.to_string()))?;

        image_size(&bytes).map_err(decode_err)
    }
}

/// Width and height from an encoded image's header.
pub fn image_size(bytes: &[u8]) -> Result<MediaSize, String> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| err.to_string())?;
    if reader.format().is_none() {
        return Err("unrecognized image format".to_owned());
    }
    let (width, height) = reader.into_dimensions().map_err(|err| err.to_string())?;
    Ok(MediaSize::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent GIF
    const GIF_1X1: &[u8] = &[
        0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
        0x00, 0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00,
        0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
    ];

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let source = HttpProfileSource::new(Some("https://api.example/".to_owned()));
        assert_eq!(source.endpoint(), "https://api.example");
    }

    #[test]
    fn reads_size_from_gif_header() {
        assert_eq!(image_size(GIF_1X1), Ok(MediaSize::new(1, 1)));
    }

    #[test]
    fn markup_is_not_an_image() {
        assert!(image_size(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>").is_err());
    }

    #[tokio::test]
    async fn unreachable_api_is_a_transport_error() {
        let source = HttpProfileSource::new(Some("http://127.0.0.1:9".to_owned()));
        let err = source.text_records("alice.eth").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
