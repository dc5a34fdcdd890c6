//! Template slot inputs.
//!
//! Markup is produced by an external engine. The core hands it a flat map
//! whose text values can only be built through [`Escaped::new`], so unescaped
//! record data cannot reach a template.

use ep_api_types::MediaKind;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// HTML-escaped text, safe for element and quoted-attribute context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escaped(String);

impl Escaped {
    pub fn new(raw: &str) -> Self {
        Self(html_escape::encode_quoted_attribute(raw).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for Escaped {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TemplateValue {
    Text(Escaped),
    Kind(MediaKind),
    Index(usize),
    Null,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateInput(BTreeMap<&'static str, TemplateValue>);

impl TemplateInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escapes `value`. Absent and empty values both become `null`.
    pub fn text(mut self, key: &'static str, value: Option<&str>) -> Self {
        let value = match value {
            Some(raw) if !raw.is_empty() => TemplateValue::Text(Escaped::new(raw)),
            _ => TemplateValue::Null,
        };
        self.0.insert(key, value);
        self
    }

    pub fn kind(mut self, key: &'static str, kind: MediaKind) -> Self {
        self.0.insert(key, TemplateValue::Kind(kind));
        self
    }

    pub fn index(mut self, key: &'static str, index: usize) -> Self {
        self.0.insert(key, TemplateValue::Index(index));
        self
    }

    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.0.get(key)
    }

    /// Escaped text stored under `key`, if any.
    pub fn text_of(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            TemplateValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &TemplateValue)> {
        self.0.iter().map(|(key, value)| (*key, value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateSlot {
    Profile,
    Avatar,
    PortfolioEntry,
    NftModal,
    WalletEntry,
}

impl TemplateSlot {
    pub const ALL: [TemplateSlot; 5] = [
        TemplateSlot::Profile,
        TemplateSlot::Avatar,
        TemplateSlot::PortfolioEntry,
        TemplateSlot::NftModal,
        TemplateSlot::WalletEntry,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TemplateSlot::Profile => "profile",
            TemplateSlot::Avatar => "avatar",
            TemplateSlot::PortfolioEntry => "portfolioEntry",
            TemplateSlot::NftModal => "nftModal",
            TemplateSlot::WalletEntry => "walletEntry",
        }
    }

    /// Id of the `<script type="text/template">` element holding the slot.
    pub fn element_id(self) -> &'static str {
        match self {
            TemplateSlot::Profile => "template-profile",
            TemplateSlot::Avatar => "template-avatar",
            TemplateSlot::PortfolioEntry => "template-portfolio-entry",
            TemplateSlot::NftModal => "template-nft-modal",
            TemplateSlot::WalletEntry => "template-wallet-entry",
        }
    }
}

impl fmt::Display for TemplateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template {0} is not registered")]
    Missing(TemplateSlot),
    #[error("template {slot} failed: {reason}")]
    Render { slot: TemplateSlot, reason: String },
}

/// Turns a slot input into markup.
pub trait TemplateEngine {
    fn render(&self, slot: TemplateSlot, input: &TemplateInput) -> Result<String, TemplateError>;
}

impl<T: TemplateEngine + ?Sized> TemplateEngine for &T {
    fn render(&self, slot: TemplateSlot, input: &TemplateInput) -> Result<String, TemplateError> {
        (**self).render(slot, input)
    }
}
