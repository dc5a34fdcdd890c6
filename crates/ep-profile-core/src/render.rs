//! Section renderers.
//!
//! Each renderer reads [`ProfileState`] and decides whether its section is
//! shown; the caller applies the outcome to the page.

use crate::config::ProfileConfig;
use crate::media::{classify, display_name, grid_image_url};
use crate::state::ProfileState;
use crate::template::{TemplateEngine, TemplateError, TemplateInput, TemplateSlot};
use ep_api_types::{AssetRecord, TextRecordKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    Hidden,
    Shown(String),
}

/// Template key and record for each profile field, in display order.
const PROFILE_FIELDS: [(&str, TextRecordKey); 11] = [
    ("description", TextRecordKey::Description),
    ("email", TextRecordKey::Email),
    ("github", TextRecordKey::Github),
    ("keybase", TextRecordKey::Keybase),
    ("linkedin", TextRecordKey::Linkedin),
    ("peepeth", TextRecordKey::Peepeth),
    ("phone", TextRecordKey::Phone),
    ("telegram", TextRecordKey::Telegram),
    ("twitter", TextRecordKey::Twitter),
    ("url", TextRecordKey::Url),
    ("contentHash", TextRecordKey::ContentHash),
];

pub fn profile_input(state: &ProfileState) -> Option<TemplateInput> {
    let values: Vec<(&'static str, Option<String>)> = PROFILE_FIELDS
        .iter()
        .map(|(name, key)| (*name, state.text_record(key)))
        .collect();

    if values.iter().all(|(_, value)| value.is_none()) {
        return None;
    }

    let gateway = state
        .text_record(&TextRecordKey::ContentHash)
        .filter(|hash| hash.contains("ipfs://"))
        .map(|_| format!("{}.link", state.domain()));

    let input = values
        .iter()
        .fold(TemplateInput::new(), |input, (name, value)| input.text(*name, value.as_deref()))
        .text("contentHashGateway", gateway.as_deref());
    Some(input)
}

pub fn render_profile(
    state: &ProfileState,
    templates: &dyn TemplateEngine,
) -> Result<SectionOutcome, TemplateError> {
    match profile_input(state) {
        None => Ok(SectionOutcome::Hidden),
        Some(input) => Ok(SectionOutcome::Shown(templates.render(TemplateSlot::Profile, &input)?)),
    }
}

pub fn portfolio_entry_input(index: usize, asset: &AssetRecord, config: &ProfileConfig) -> TemplateInput {
    let kind = classify(asset, &config.media);
    let name = display_name(asset);

    TemplateInput::new()
        .index("index", index)
        .text("image_url", Some(grid_image_url(asset, kind, &config.placeholder_image)))
        .text("image_preview_url", asset.image_preview_url())
        .kind("image_type", kind)
        .text("name", Some(&name))
        .text("description", asset.description())
        .text("url", asset.permalink())
}

pub fn render_portfolio(
    state: &ProfileState,
    config: &ProfileConfig,
    templates: &dyn TemplateEngine,
) -> Result<SectionOutcome, TemplateError> {
    if state.assets().is_empty() {
        return Ok(SectionOutcome::Hidden);
    }

    let mut markup = String::new();
    for (index, asset) in state.assets().iter().enumerate() {
        let input = portfolio_entry_input(index, asset, config);
        markup.push_str(&templates.render(TemplateSlot::PortfolioEntry, &input)?);
    }
    Ok(SectionOutcome::Shown(markup))
}

/// Wallet entries with an address. An empty raw list hides the section; a
/// list whose entries are all blank still shows it, with no entries.
pub fn render_wallets(
    state: &ProfileState,
    templates: &dyn TemplateEngine,
) -> Result<SectionOutcome, TemplateError> {
    let wallets = state.wallets();
    if wallets.is_empty() {
        return Ok(SectionOutcome::Hidden);
    }

    let mut markup = String::new();
    for wallet in wallets {
        let Some(address) = wallet.value.as_deref().filter(|value| !value.is_empty()) else {
            continue;
        };
        let input = TemplateInput::new()
            .text("name", Some(&wallet.name))
            .text("address", Some(address));
        markup.push_str(&templates.render(TemplateSlot::WalletEntry, &input)?);
    }
    Ok(SectionOutcome::Shown(markup))
}

/// Avatar markup from the `avatar` text record. Not part of the default
/// render pass; the avatar image is loaded from the provider instead.
pub fn render_avatar(
    state: &ProfileState,
    config: &ProfileConfig,
    templates: &dyn TemplateEngine,
) -> Result<String, TemplateError> {
    let avatar_url = state
        .text_record(&TextRecordKey::Avatar)
        .filter(|url| url.contains("http"))
        .unwrap_or_else(|| config.avatar_placeholder.clone());
    let input = TemplateInput::new().text("avatar_url", Some(&avatar_url));
    templates.render(TemplateSlot::Avatar, &input)
}
