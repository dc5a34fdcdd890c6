//! DOM side of the NFT modal.

use crate::dom::{self, add_class, remove_class};
use async_trait::async_trait;
use ep_profile_core::source::{MediaError, MediaSize};
use ep_profile_core::{ModalSurface, StyleOp, VideoBox};
use js_sys::Promise;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AddEventListenerOptions, Element, HtmlElement, HtmlVideoElement};

const IMAGE_CONTAINER: &str = "#nft-modal-image-container";
const VIDEO_CONTAINER: &str = ".nft-modal__video-container";
/// `HAVE_METADATA`
const READY_METADATA: u16 = 1;
/// `NETWORK_NO_SOURCE`
const NO_SOURCE: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetadataWait {
    Ready,
    Failed,
    /// Settles on `loadedmetadata` or `error`.
    Pending,
}

fn metadata_wait(ready_state: u16, network_state: u16) -> MetadataWait {
    if ready_state >= READY_METADATA {
        MetadataWait::Ready
    } else if network_state == NO_SOURCE {
        MetadataWait::Failed
    } else {
        MetadataWait::Pending
    }
}

pub struct DomModal {
    container: Element,
}

impl DomModal {
    pub fn new(container: Element) -> Self {
        Self { container }
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    fn image_container(&self) -> Option<Element> {
        dom::query_within(&self.container, IMAGE_CONTAINER)
    }

    fn video(&self) -> Option<HtmlVideoElement> {
        dom::query_within(&self.image_container()?, "video")
    }
}

#[async_trait(?Send)]
impl ModalSurface for DomModal {
    fn show(&self, markup: &str) {
        self.container.set_inner_html(markup);
        remove_class(&self.container, "invisible");
        remove_class(&self.container, "invisible-start");
        add_class(&self.container, "visible");
    }

    fn hide(&self) {
        remove_class(&self.container, "visible");
        add_class(&self.container, "invisible");
    }

    fn pause_video(&self) {
        if let Some(video) = self.video() {
            let _ = video.pause();
        }
    }

    fn clear_loading(&self) {
        if let Some(container) = self.image_container() {
            remove_class(&container, "loading");
        }
    }

    fn set_poster(&self, url: &str) {
        if let Some(video) = self.video() {
            video.set_poster(url);
        }
    }

    fn apply_video_box(&self, video_box: &VideoBox) {
        let Some(frame) = self
            .image_container()
            .and_then(|container| dom::query_within::<HtmlElement>(&container, VIDEO_CONTAINER))
        else {
            return;
        };
        let style = frame.style();
        for op in video_box.style_ops() {
            let _ = match op {
                StyleOp::Set(property, value) => style.set_property(property, &value),
                StyleOp::Remove(property) => style.remove_property(property).map(drop),
            };
        }
    }

    fn viewport_width(&self) -> f64 {
        dom::window()
            .and_then(|window| window.inner_width())
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or_default()
    }

    async fn video_metadata(&self) -> Result<MediaSize, MediaError> {
        let video = self
            .video()
            .ok_or_else(|| MediaError::NoSize("modal video".to_owned()))?;

        match metadata_wait(video.ready_state(), video.network_state()) {
            MetadataWait::Ready => {}
            MetadataWait::Failed => return Err(MediaError::NoSize(video.current_src())),
            MetadataWait::Pending => {
                let target = video.clone();
                let settled = Promise::new(&mut |resolve, reject| {
                    let opts = AddEventListenerOptions::new();
                    opts.set_once(true);
                    for (event, callback) in [("loadedmetadata", &resolve), ("error", &reject)] {
                        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
                            event, callback, &opts,
                        );
                    }
                });
                JsFuture::from(settled).await.map_err(|err| MediaError::Decode {
                    url: video.current_src(),
                    reason: format!("{err:?}"),
                })?;
            }
        }

        Ok(MediaSize::new(video.video_width(), video.video_height()))
    }
}
