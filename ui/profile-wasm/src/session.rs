//! Post-load page session: the loaded profile plus modal wiring.
//!
//! The portfolio keeps one delegated click listener for the page's
//! lifetime. Listeners for an open modal live in a [`ListenerSet`] that is
//! dropped on close.

use crate::api::{BrowserSource, ImageProbe};
use crate::dom::{self, Elements};
use crate::events::{ListenerSet, is_escape, nft_index};
use crate::modal::DomModal;
use crate::templates::LodashTemplates;
use ep_profile_core::{
    MediaReady, ModalPlan, ModalSurface, ModalTicket, ProfilePage, VideoBox, VideoDimensions,
    load_modal_media,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

pub type Page = ProfilePage<BrowserSource, ImageProbe>;

const MODAL_ROOT: &str = "nft-modal";

pub struct Session {
    page: RefCell<Page>,
    templates: LodashTemplates,
    surface: DomModal,
    /// Last resolved video layout input, re-applied on resize.
    video: RefCell<Option<(ModalTicket, Option<VideoDimensions>)>>,
    listeners: RefCell<Option<ListenerSet>>,
}

impl Session {
    pub fn start(page: Page, templates: LodashTemplates, els: &Elements) -> Result<Rc<Self>, JsValue> {
        let session = Rc::new(Self {
            page: RefCell::new(page),
            templates,
            surface: DomModal::new(els.nft_modal.clone()),
            video: RefCell::new(None),
            listeners: RefCell::new(None),
        });

        let handle = Rc::clone(&session);
        let cb = Closure::wrap(Box::new(move |event: Event| {
            let index = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("[data-nft-index]").ok().flatten())
                .and_then(|cell| nft_index(cell.get_attribute("data-nft-index").as_deref()));
            if let Some(index) = index {
                handle.open(index);
            }
        }) as Box<dyn FnMut(_)>);
        els.portfolio_entry
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();

        Ok(session)
    }

    pub fn open(self: &Rc<Self>, index: usize) {
        let opened = self
            .page
            .borrow_mut()
            .open_modal(index, &self.templates, &self.surface);
        let plan = match opened {
            Ok(plan) => plan,
            Err(err) => {
                warn!(index, error = %err, "cannot open NFT modal");
                return;
            }
        };
        self.video.borrow_mut().take();

        match self.bind_listeners() {
            Ok(listeners) => self.replace_listeners(Some(listeners)),
            Err(err) => warn!(?err, "modal listeners not bound"),
        }

        let session = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            session.finish_media(plan).await;
        });
    }

    pub fn close(&self) {
        if !self.page.borrow_mut().close_modal(&self.surface) {
            return;
        }
        self.video.borrow_mut().take();
        self.replace_listeners(None);
    }

    /// Swap the modal listener set. The old set is dropped after the
    /// current event dispatch, since one of its closures may be running.
    fn replace_listeners(&self, next: Option<ListenerSet>) {
        let previous = self.listeners.replace(next);
        wasm_bindgen_futures::spawn_local(async move {
            drop(previous);
        });
    }

    fn bind_listeners(self: &Rc<Self>) -> Result<ListenerSet, JsValue> {
        let window = dom::window()?;
        let document = dom::document()?;
        let mut set = ListenerSet::new();

        let weak = Rc::downgrade(self);
        let container = self.surface.container().clone();
        set.listen(&document, "click", move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if target == container || target.id() == MODAL_ROOT {
                with_session(&weak, |session| session.close());
            }
        })?;

        let weak = Rc::downgrade(self);
        set.listen(&window, "keydown", move |event: Event| {
            if is_escape(&event) {
                with_session(&weak, |session| session.close());
            }
        })?;

        for event in ["resize", "orientationchange"] {
            let weak = Rc::downgrade(self);
            set.listen(&window, event, move |_: Event| {
                with_session(&weak, |session| session.relayout());
            })?;
        }

        Ok(set)
    }

    async fn finish_media(self: Rc<Self>, plan: ModalPlan) {
        let (probe, sink) = {
            let page = self.page.borrow();
            (*page.probe(), page.sink())
        };
        let ready = load_modal_media(&plan, &self.surface, &probe, sink).await;

        let page = self.page.borrow();
        if !page.modal().apply_media(plan.ticket, &ready, &self.surface) {
            debug!(index = plan.index, "dropping media for a replaced modal");
            return;
        }
        if let MediaReady::Video { dimensions, .. } = ready {
            *self.video.borrow_mut() = Some((plan.ticket, dimensions));
        }
    }

    fn relayout(&self) {
        let Some((ticket, dimensions)) = *self.video.borrow() else {
            return;
        };
        if self.page.borrow().modal().is_current(ticket) {
            let video_box = VideoBox::compute(dimensions, self.surface.viewport_width());
            self.surface.apply_video_box(&video_box);
        }
    }
}

fn with_session(weak: &Weak<Session>, f: impl FnOnce(&Session)) {
    if let Some(session) = weak.upgrade() {
        f(&session);
    }
}
