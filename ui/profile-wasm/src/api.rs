//! Profile API client over `fetch`.

use crate::dom;
use async_trait::async_trait;
use ep_profile_core::source::{
    FetchError, MediaError, MediaProbe, MediaSize, ProfileSource, nfts_path, parse_envelope,
    text_records_path,
};
use ep_profile_core::types::{AssetRecord, TextRecords};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlImageElement, Request, RequestInit, RequestMode, Response};

fn js_err(err: JsValue) -> FetchError {
    FetchError::Transport(format!("{err:?}"))
}

/// Text records and NFTs from the page's API. An empty base means same origin.
pub struct BrowserSource {
    base_url: String,
}

impl BrowserSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: DeserializeOwned + Default>(&self, what: &'static str, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);
        let request = Request::new_with_str_and_init(&url, &opts).map_err(js_err)?;

        let window = dom::window().map_err(js_err)?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| FetchError::Transport("response is not a Response".to_string()))?;

        let text = JsFuture::from(resp.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        let body = text.as_string().unwrap_or_default();

        if !resp.ok() {
            return Err(FetchError::Status {
                status: resp.status(),
                body,
            });
        }
        parse_envelope(what, &body)
    }
}

#[async_trait(?Send)]
impl ProfileSource for BrowserSource {
    async fn text_records(&self, domain: &str) -> Result<TextRecords, FetchError> {
        self.get("text records", &text_records_path(domain)).await
    }

    async fn assets(&self, wallet_address: &str) -> Result<Vec<AssetRecord>, FetchError> {
        self.get("NFTs", &nfts_path(wallet_address)).await
    }
}

/// Decodes images with the browser's own `HTMLImageElement.decode()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageProbe;

#[async_trait(?Send)]
impl MediaProbe for ImageProbe {
    async fn decode_image(&self, url: &str) -> Result<MediaSize, MediaError> {
        let decode_err = |err: JsValue| MediaError::Decode {
            url: url.to_owned(),
            reason: format!("{err:?}"),
        };

        let img = HtmlImageElement::new().map_err(decode_err)?;
        img.set_src(url);
        JsFuture::from(img.decode()).await.map_err(decode_err)?;

        if img.natural_height() == 0 {
            return Err(MediaError::NoSize(url.to_owned()));
        }
        Ok(MediaSize::new(img.natural_width(), img.natural_height()))
    }
}
