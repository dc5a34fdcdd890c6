//! DOM element bindings.
//!
//! Every container the loader touches, resolved once before loading.

use ep_profile_core::Section;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().ok()?.query_selector(selector).ok()?
}

pub fn query_within<T: JsCast>(parent: &Element, selector: &str) -> Option<T> {
    parent
        .query_selector(selector)
        .ok()?
        .and_then(|e| e.dyn_into::<T>().ok())
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

#[derive(Clone)]
pub struct Elements {
    pub main: Element,
    pub loading: Element,
    pub profile: Element,
    pub profile_entry: Element,
    pub avatar: Element,
    pub portfolio: Element,
    pub portfolio_entry: Element,
    pub nft_modal: Element,
    pub wallets: Element,
    pub wallets_entry: Element,

    pub toggle_profile: HtmlElement,
    pub toggle_portfolio: HtmlElement,
    pub toggle_wallets: HtmlElement,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_toggle {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing toggle #{}", $id)))?
    };
}

impl Elements {
    pub fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            main: query("main").ok_or_else(|| JsValue::from_str("missing <main>"))?,
            loading: get_el!("loading-container"),
            profile: get_el!("profile-container"),
            profile_entry: get_el!("profile-entry-container"),
            avatar: get_el!("avatar-container"),
            portfolio: get_el!("portfolio-container"),
            portfolio_entry: get_el!("portfolio-entry-container"),
            nft_modal: get_el!("nft-modal-container"),
            wallets: get_el!("wallets-container"),
            wallets_entry: get_el!("wallets-entry-container"),

            toggle_profile: get_toggle!("toggle-profile"),
            toggle_portfolio: get_toggle!("toggle-portfolio"),
            toggle_wallets: get_toggle!("toggle-wallets"),
        })
    }

    /// Outer container, entry container and reveal toggle of a section.
    pub fn section(&self, section: Section) -> (&Element, &Element, &HtmlElement) {
        match section {
            Section::Profile => (&self.profile, &self.profile_entry, &self.toggle_profile),
            Section::Portfolio => (&self.portfolio, &self.portfolio_entry, &self.toggle_portfolio),
            Section::Wallets => (&self.wallets, &self.wallets_entry, &self.toggle_wallets),
        }
    }
}
