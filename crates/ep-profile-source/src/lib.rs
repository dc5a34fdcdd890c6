use async_trait::async_trait;
use ep_api_types::{ApiEnvelope, AssetRecord, TextRecords};
use serde::de::DeserializeOwned;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("no {0} found")]
    Unsuccessful(&'static str),
    #[error("malformed {what} response: {reason}")]
    Malformed { what: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to decode {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("{0} has no intrinsic size")]
    NoSize(String),
}

/// Intrinsic pixel size of a decoded image or video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaSize {
    pub width: u32,
    pub height: u32,
}

impl MediaSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// height / width, `None` for degenerate sizes.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(f64::from(self.height) / f64::from(self.width))
    }
}

/// Remote text records and asset collections.
#[async_trait(?Send)]
pub trait ProfileSource {
    async fn text_records(&self, domain: &str) -> Result<TextRecords, FetchError>;
    async fn assets(&self, wallet_address: &str) -> Result<Vec<AssetRecord>, FetchError>;
}

/// Image decoding. Browsers decode in place; native callers probe over HTTP.
#[async_trait(?Send)]
pub trait MediaProbe {
    async fn decode_image(&self, url: &str) -> Result<MediaSize, MediaError>;
}

#[async_trait(?Send)]
impl<T: ProfileSource + ?Sized> ProfileSource for Rc<T> {
    async fn text_records(&self, domain: &str) -> Result<TextRecords, FetchError> {
        (**self).text_records(domain).await
    }

    async fn assets(&self, wallet_address: &str) -> Result<Vec<AssetRecord>, FetchError> {
        (**self).assets(wallet_address).await
    }
}

#[async_trait(?Send)]
impl<T: MediaProbe + ?Sized> MediaProbe for Rc<T> {
    async fn decode_image(&self, url: &str) -> Result<MediaSize, MediaError> {
        (**self).decode_image(url).await
    }
}

pub fn text_records_path(domain: &str) -> String {
    format!("/text-records/{domain}")
}

pub fn nfts_path(wallet_address: &str) -> String {
    format!("/nfts/{wallet_address}")
}

/// Parse a `{success, data}` body, turning `success: false` into
/// [`FetchError::Unsuccessful`]. A successful body without `data` yields the
/// empty payload.
pub fn parse_envelope<T: DeserializeOwned + Default>(what: &'static str, body: &str) -> Result<T, FetchError> {
    let envelope: ApiEnvelope<T> = serde_json::from_str(body).map_err(|err| FetchError::Malformed {
        what,
        reason: err.to_string(),
    })?;
    envelope.into_data().ok_or(FetchError::Unsuccessful(what))
}
