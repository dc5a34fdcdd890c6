//! Browser entry point for the profile page.
//!
//! `loadProfile(domain, isLogging, config?)` runs the load pipeline against
//! the page's DOM and lodash templates, then wires the NFT modal.

pub mod api;
pub mod dom;
pub mod events;
pub mod logging;
pub mod modal;
pub mod session;
pub mod templates;
pub mod view;

use ep_profile_core::{LoadError, ProfileConfig, ProfilePage};
use tracing::warn;
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init();
}

#[wasm_bindgen(js_name = loadProfile)]
pub async fn load_profile(domain: String, is_logging: bool, config: JsValue) -> Result<(), JsValue> {
    let config = config_from_js(config)?;
    let els = dom::Elements::bind()?;
    let templates = templates::LodashTemplates::bind()?;
    let source = api::BrowserSource::new(&config.api_base);
    let view = view::DomPageView::new(els.clone());

    let mut page = ProfilePage::new(domain, is_logging, config, source, api::ImageProbe);
    match page.load(&view, &templates).await {
        Ok(()) => {}
        // Already redirected to the error route.
        Err(err @ LoadError::TextRecords { .. }) => {
            warn!(error = %err, "profile unavailable");
            return Ok(());
        }
        Err(err) => return Err(JsValue::from_str(&err.to_string())),
    }

    session::Session::start(page, templates, &els)?;
    Ok(())
}

fn config_from_js(config: JsValue) -> Result<ProfileConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(ProfileConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(config)?)
}
