use crate::dom::{self, Elements, add_class, remove_class};
use ep_profile_core::{AvatarStatus, PageView, Section};
use tracing::warn;
use web_sys::Element;

pub const HIDE: &str = "hide";
const AVATAR_BG: &str = "profile__avatar--bg";
const AVATAR_IMAGE_BG: &str = "profile__avatar--image-bg";

/// Applies loader outcomes to the page's containers.
pub struct DomPageView {
    els: Elements,
}

impl DomPageView {
    pub fn new(els: Elements) -> Self {
        Self { els }
    }
}

impl PageView for DomPageView {
    fn show_section(&self, section: Section, markup: &str) {
        let (_, entry, toggle) = self.els.section(section);
        entry.set_inner_html(markup);
        toggle.click();
    }

    fn hide_section(&self, section: Section) {
        let (container, _, _) = self.els.section(section);
        add_class(container, HIDE);
    }

    fn set_avatar_status(&self, status: AvatarStatus) {
        let avatar = &self.els.avatar;
        match status {
            AvatarStatus::Placeholder => add_class(avatar, AVATAR_BG),
            AvatarStatus::Loaded => {
                remove_class(avatar, AVATAR_BG);
                if let Some(image) = dom::query_within::<Element>(avatar, "img") {
                    remove_class(&image, HIDE);
                    add_class(&image, AVATAR_IMAGE_BG);
                }
            }
        }
    }

    fn set_fully_loaded(&self) {
        add_class(&self.els.loading, HIDE);
        remove_class(&self.els.main, HIDE);
    }

    fn navigate(&self, route: &str) {
        let result = dom::window().and_then(|window| window.location().set_href(route));
        if let Err(err) = result {
            warn!(route, ?err, "navigation failed");
        }
    }
}
