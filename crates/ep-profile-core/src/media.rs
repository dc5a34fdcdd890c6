//! Media classification and display-URL selection for asset records.

use ep_api_types::{AssetRecord, MediaKind};
use serde::{Deserialize, Serialize};

/// Host and extension lists driving [`classify`]. Overridable from config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Hosts serving their own embeddable viewers.
    pub nonstandard_hosts: Vec<String>,
    pub model_extensions: Vec<String>,
    pub video_extensions: Vec<String>,
    pub image_extensions: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|item| (*item).to_owned()).collect()
        }

        Self {
            nonstandard_hosts: owned(&[
                "artblocks.io",
                "arweave.net",
                "ethblock.art",
                "ether.cards",
                "etherheads.io",
                "ethouses.io",
                "everyicon.xyz",
                "pinata.cloud",
                "ipfs.io",
                "stickynft.com",
                "vxviewer.vercel.app",
            ]),
            model_extensions: owned(&[".glb", ".gltf"]),
            video_extensions: owned(&[".mp3", ".mp4", ".mov"]),
            image_extensions: owned(&[".jpg", ".jpeg", ".gif", ".png", ".svg"]),
        }
    }
}

fn ends_with_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack
            .get(haystack.len() - needle.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(needle))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

type Matcher = fn(&str, &str) -> bool;

fn any_url(urls: &[&str], patterns: &[String], matches: Matcher) -> bool {
    urls.iter()
        .any(|url| patterns.iter().any(|pattern| matches(url, pattern)))
}

/// Display strategy for an asset. Depends only on the asset's URL fields;
/// the first matching rule wins.
pub fn classify(asset: &AssetRecord, config: &MediaConfig) -> MediaKind {
    let animations: Vec<&str> = asset.animation_urls().collect();
    let mut video_candidates = animations.clone();
    video_candidates.extend(asset.image_url());

    let rules: [(&[&str], &[String], Matcher, MediaKind); 4] = [
        (animations.as_slice(), config.nonstandard_hosts.as_slice(), contains_ignore_case, MediaKind::Nonstandard),
        (animations.as_slice(), config.model_extensions.as_slice(), ends_with_ignore_case, MediaKind::ThreeD),
        (video_candidates.as_slice(), config.video_extensions.as_slice(), ends_with_ignore_case, MediaKind::Video),
        (animations.as_slice(), config.image_extensions.as_slice(), contains_ignore_case, MediaKind::Image),
    ];

    rules
        .iter()
        .find(|(urls, patterns, matches, _)| any_url(urls, patterns, *matches))
        .map(|(_, _, _, kind)| *kind)
        .unwrap_or(MediaKind::Image)
}

/// Image shown in a portfolio grid cell.
pub fn grid_image_url<'a>(asset: &'a AssetRecord, kind: MediaKind, placeholder: &'a str) -> &'a str {
    let chosen = match kind {
        MediaKind::Nonstandard => asset.image_preview_url().or(asset.image_url()),
        _ => asset
            .animation_url()
            .or(asset.animation_original_url())
            .or(asset.image_url())
            .or(asset.image_original_url()),
    };
    chosen.unwrap_or(placeholder)
}

/// Media shown in the detail modal. Prefers the original image over the
/// resized one, unlike the grid.
pub fn modal_image_url<'a>(asset: &'a AssetRecord, kind: MediaKind, placeholder: &'a str) -> &'a str {
    let chosen = match kind {
        MediaKind::Nonstandard => asset.image_url(),
        _ => asset
            .animation_url()
            .or(asset.animation_original_url())
            .or(asset.image_original_url())
            .or(asset.image_url()),
    };
    chosen.unwrap_or(placeholder)
}

/// Still image used as the poster / size source for videos.
pub fn video_preview_url(asset: &AssetRecord, kind: MediaKind) -> Option<&str> {
    match kind {
        MediaKind::Video => asset.image_url().or(asset.image_preview_url()),
        _ => None,
    }
}

pub const UNIDENTIFIED: &str = "[Unidentified]";

pub fn display_name(asset: &AssetRecord) -> String {
    match (asset.name(), asset.token_id()) {
        (Some(name), _) => name.to_owned(),
        (None, Some(token_id)) => format!("#{token_id}"),
        (None, None) => UNIDENTIFIED.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_animation(url: &str) -> AssetRecord {
        AssetRecord {
            animation_url: Some(url.to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn classifies_by_animation_extension() {
        let config = MediaConfig::default();
        assert_eq!(classify(&with_animation("https://x.io/a.glb"), &config), MediaKind::ThreeD);
        assert_eq!(classify(&with_animation("https://x.io/a.gltf"), &config), MediaKind::ThreeD);
        assert_eq!(classify(&with_animation("https://x.io/a.mp4"), &config), MediaKind::Video);
        assert_eq!(classify(&with_animation("https://x.io/a.MOV"), &config), MediaKind::Video);
        assert_eq!(classify(&with_animation("https://x.io/a.png"), &config), MediaKind::Image);
        assert_eq!(classify(&AssetRecord::default(), &config), MediaKind::Image);
    }

    #[test]
    fn allow_listed_host_wins_over_extension() {
        let config = MediaConfig::default();
        let asset = AssetRecord {
            animation_original_url: Some("https://arweave.net/clip.mp4".into()),
            animation_url: Some("https://cdn.io/model.glb".into()),
            ..Default::default()
        };
        assert_eq!(classify(&asset, &config), MediaKind::Nonstandard);
    }

    #[test]
    fn video_detected_from_image_url() {
        let asset = AssetRecord {
            image_url: Some("https://cdn.io/loop.mp4".into()),
            ..Default::default()
        };
        assert_eq!(classify(&asset, &MediaConfig::default()), MediaKind::Video);
    }

    #[test]
    fn image_url_does_not_trigger_model_or_host_rules() {
        let asset = AssetRecord {
            image_url: Some("https://ipfs.io/ipfs/model.glb".into()),
            ..Default::default()
        };
        assert_eq!(classify(&asset, &MediaConfig::default()), MediaKind::Image);
    }

    #[test]
    fn overridden_lists_change_outcome_only() {
        let config = MediaConfig {
            nonstandard_hosts: vec!["viewer.example".into()],
            video_extensions: vec![".webm".into()],
            ..Default::default()
        };
        assert_eq!(
            classify(&with_animation("https://viewer.example/a.png"), &config),
            MediaKind::Nonstandard
        );
        assert_eq!(classify(&with_animation("https://arweave.net/a.png"), &config), MediaKind::Image);
        assert_eq!(classify(&with_animation("https://x.io/a.webm"), &config), MediaKind::Video);
        assert_eq!(classify(&with_animation("https://x.io/a.mp4"), &config), MediaKind::Image);
    }

    #[test]
    fn grid_and_modal_priorities_differ() {
        let asset = AssetRecord {
            image_url: Some("small.png".into()),
            image_original_url: Some("original.png".into()),
            ..Default::default()
        };
        assert_eq!(grid_image_url(&asset, MediaKind::Image, "ph.png"), "small.png");
        assert_eq!(modal_image_url(&asset, MediaKind::Image, "ph.png"), "original.png");
        assert_eq!(grid_image_url(&AssetRecord::default(), MediaKind::Image, "ph.png"), "ph.png");
    }

    #[test]
    fn nonstandard_prefers_preview_in_grid() {
        let asset = AssetRecord {
            image_url: Some("main.png".into()),
            image_preview_url: Some("preview.png".into()),
            animation_url: Some("https://artblocks.io/live/1".into()),
            ..Default::default()
        };
        assert_eq!(grid_image_url(&asset, MediaKind::Nonstandard, "ph"), "preview.png");
        assert_eq!(modal_image_url(&asset, MediaKind::Nonstandard, "ph"), "main.png");
    }

    #[test]
    fn names_fall_back_to_token_then_placeholder() {
        let named = AssetRecord {
            name: Some("Punk".into()),
            token_id: Some("7".into()),
            ..Default::default()
        };
        let numbered = AssetRecord {
            token_id: Some("7".into()),
            ..Default::default()
        };
        assert_eq!(display_name(&named), "Punk");
        assert_eq!(display_name(&numbered), "#7");
        assert_eq!(display_name(&AssetRecord::default()), UNIDENTIFIED);
    }

    #[test]
    fn preview_only_for_video() {
        let asset = AssetRecord {
            image_preview_url: Some("preview.png".into()),
            ..Default::default()
        };
        assert_eq!(video_preview_url(&asset, MediaKind::Video), Some("preview.png"));
        assert_eq!(video_preview_url(&asset, MediaKind::Image), None);
    }
}
