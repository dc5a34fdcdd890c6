//! NFT detail modal.
//!
//! [`ModalController`] is a two-state machine (closed / open). Every open
//! hands out a [`ModalTicket`]; media work started for an open applies its
//! result only while that ticket is still current, so a slow decode from a
//! previous asset never touches the modal showing the next one.

use crate::config::ProfileConfig;
use crate::layout::{VideoBox, VideoDimensions};
use crate::log::LogSink;
use crate::media::{classify, display_name, modal_image_url, video_preview_url};
use crate::state::ProfileState;
use crate::template::{TemplateEngine, TemplateError, TemplateInput, TemplateSlot};
use async_trait::async_trait;
use ep_api_types::{AssetRecord, MediaKind};
use ep_profile_source::{MediaError, MediaProbe, MediaSize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModalError {
    #[error("no asset at index {0}")]
    UnknownAsset(usize),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// The modal's DOM (or test double).
#[async_trait(?Send)]
pub trait ModalSurface {
    fn show(&self, markup: &str);
    fn hide(&self);
    fn pause_video(&self);
    /// Drop the loading style from the media container.
    fn clear_loading(&self);
    fn set_poster(&self, url: &str);
    fn apply_video_box(&self, video_box: &VideoBox);
    fn viewport_width(&self) -> f64;
    /// Resolves once the modal's video has loaded its metadata.
    async fn video_metadata(&self) -> Result<MediaSize, MediaError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalTicket(u64);

/// Everything resolved for one modal open.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalPlan {
    pub ticket: ModalTicket,
    pub index: usize,
    pub kind: MediaKind,
    pub image_url: String,
    pub preview_url: Option<String>,
    pub input: TemplateInput,
}

/// Outcome of the media work for an open modal.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaReady {
    Image { decoded: bool },
    Video {
        dimensions: Option<VideoDimensions>,
        poster: Option<String>,
    },
}

pub fn modal_input(asset: &AssetRecord, config: &ProfileConfig) -> (MediaKind, String, Option<String>, TemplateInput) {
    let kind = classify(asset, &config.media);
    let image_url = modal_image_url(asset, kind, &config.placeholder_image).to_owned();
    let preview_url = video_preview_url(asset, kind).map(str::to_owned);
    let name = display_name(asset);

    let input = TemplateInput::new()
        .text("image_url", Some(&image_url))
        .text("image_preview_url", preview_url.as_deref())
        .kind("image_type", kind)
        .text("name", Some(&name))
        .text("description", asset.description())
        .text("creator_username", asset.creator_username())
        .text("creator_avatar", asset.creator_avatar())
        .text("url", asset.permalink());
    (kind, image_url, preview_url, input)
}

#[derive(Debug, Default)]
pub struct ModalController {
    generation: u64,
    open: Option<ModalTicket>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn is_current(&self, ticket: ModalTicket) -> bool {
        self.open == Some(ticket)
    }

    /// Render the asset at `index` into the modal and reveal it. Opening
    /// while already open replaces the content and retires the old ticket.
    pub fn open(
        &mut self,
        state: &ProfileState,
        config: &ProfileConfig,
        index: usize,
        templates: &dyn TemplateEngine,
        surface: &dyn ModalSurface,
    ) -> Result<ModalPlan, ModalError> {
        let asset = state.asset(index).ok_or(ModalError::UnknownAsset(index))?;
        let (kind, image_url, preview_url, input) = modal_input(asset, config);
        let markup = templates.render(TemplateSlot::NftModal, &input)?;

        if self.open.is_some() {
            surface.pause_video();
        }
        self.generation += 1;
        let ticket = ModalTicket(self.generation);
        self.open = Some(ticket);
        surface.show(&markup);

        Ok(ModalPlan {
            ticket,
            index,
            kind,
            image_url,
            preview_url,
            input,
        })
    }

    /// Pause any video and hide. Returns `false` if the modal was closed.
    pub fn close(&mut self, surface: &dyn ModalSurface) -> bool {
        if self.open.take().is_none() {
            return false;
        }
        surface.pause_video();
        surface.hide();
        true
    }

    /// Apply finished media work. Stale tickets are ignored and return `false`.
    pub fn apply_media(&self, ticket: ModalTicket, ready: &MediaReady, surface: &dyn ModalSurface) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match ready {
            MediaReady::Image { decoded: true } => surface.clear_loading(),
            MediaReady::Image { decoded: false } => {}
            MediaReady::Video { dimensions, poster } => {
                if let Some(poster) = poster {
                    surface.set_poster(poster);
                }
                surface.apply_video_box(&VideoBox::compute(*dimensions, surface.viewport_width()));
            }
        }
        true
    }
}

/// Wait for the media behind `plan`. Never fails: decode problems degrade to
/// "no enhancement" and are only logged.
pub async fn load_modal_media<S, P>(plan: &ModalPlan, surface: &S, probe: &P, sink: LogSink) -> MediaReady
where
    S: ModalSurface + ?Sized,
    P: MediaProbe + ?Sized,
{
    if plan.kind != MediaKind::Video {
        let decoded = probe.decode_image(&plan.image_url).await.is_ok();
        return MediaReady::Image { decoded };
    }

    let metadata = match surface.video_metadata().await {
        Ok(size) => size,
        Err(err) => {
            sink.log(format!("NFT video metadata unavailable: {err}"));
            MediaSize::new(0, 0)
        }
    };

    if metadata.aspect_ratio().is_some() {
        return MediaReady::Video {
            dimensions: VideoDimensions::resolve(metadata, None),
            poster: None,
        };
    }

    let preview = match plan.preview_url.as_deref() {
        Some(url) => match probe.decode_image(url).await {
            Ok(size) => Some(size),
            Err(err) => {
                sink.log(format!("NFT image failed to load: {err}"));
                None
            }
        },
        None => None,
    };

    MediaReady::Video {
        dimensions: VideoDimensions::resolve(metadata, preview),
        poster: preview.and(plan.preview_url.clone()),
    }
}
