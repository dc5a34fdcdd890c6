#![allow(dead_code)]

use async_trait::async_trait;
use ep_profile_core::source::{FetchError, MediaError, MediaProbe, MediaSize, ProfileSource};
use ep_profile_core::types::{AssetRecord, TextRecords};
use ep_profile_core::{
    AvatarStatus, ModalSurface, PageView, Section, TemplateEngine, TemplateError, TemplateInput,
    TemplateSlot, VideoBox,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Call log shared between fakes, for ordering across capabilities.
pub type Journal = Rc<RefCell<Vec<String>>>;

/// Profile API double. `None` makes the corresponding call fail.
pub struct FakeSource {
    pub text_records: Option<TextRecords>,
    pub assets: Option<Vec<AssetRecord>>,
    pub calls: RefCell<Vec<String>>,
    pub journal: Journal,
}

impl FakeSource {
    pub fn new(text_records: Option<TextRecords>, assets: Option<Vec<AssetRecord>>) -> Self {
        Self {
            text_records,
            assets,
            calls: RefCell::new(Vec::new()),
            journal: Journal::default(),
        }
    }

    pub fn with_journal(mut self, journal: &Journal) -> Self {
        self.journal = Rc::clone(journal);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.journal.borrow_mut().push(call.clone());
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl ProfileSource for FakeSource {
    async fn text_records(&self, domain: &str) -> Result<TextRecords, FetchError> {
        self.record(format!("text-records/{domain}"));
        self.text_records
            .clone()
            .ok_or(FetchError::Unsuccessful("text records"))
    }

    async fn assets(&self, wallet_address: &str) -> Result<Vec<AssetRecord>, FetchError> {
        self.record(format!("nfts/{wallet_address}"));
        self.assets
            .clone()
            .ok_or_else(|| FetchError::Transport("connection reset".to_owned()))
    }
}

/// Image decoder double: known URLs decode to their size, everything else fails.
#[derive(Default)]
pub struct FakeProbe {
    pub sizes: HashMap<String, MediaSize>,
    pub decoded: RefCell<Vec<String>>,
    pub journal: Journal,
}

impl FakeProbe {
    pub fn with_journal(mut self, journal: &Journal) -> Self {
        self.journal = Rc::clone(journal);
        self
    }

    pub fn with(mut self, url: &str, size: MediaSize) -> Self {
        self.sizes.insert(url.to_owned(), size);
        self
    }

    pub fn decoded(&self) -> Vec<String> {
        self.decoded.borrow().clone()
    }
}

#[async_trait(?Send)]
impl MediaProbe for FakeProbe {
    async fn decode_image(&self, url: &str) -> Result<MediaSize, MediaError> {
        self.journal.borrow_mut().push(format!("decode {url}"));
        self.decoded.borrow_mut().push(url.to_owned());
        self.sizes.get(url).copied().ok_or_else(|| MediaError::Decode {
            url: url.to_owned(),
            reason: "404".to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Shown(Section, String),
    Hidden(Section),
    Avatar(AvatarStatus),
    FullyLoaded,
    Navigate(String),
}

#[derive(Default)]
pub struct RecordingView {
    pub events: RefCell<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    pub fn shown(&self, section: Section) -> Option<String> {
        self.events().into_iter().find_map(|event| match event {
            ViewEvent::Shown(s, markup) if s == section => Some(markup),
            _ => None,
        })
    }

    pub fn hidden(&self, section: Section) -> bool {
        self.events().contains(&ViewEvent::Hidden(section))
    }

    pub fn section_toggles(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, ViewEvent::Shown(..) | ViewEvent::Hidden(_)))
            .count()
    }
}

impl PageView for RecordingView {
    fn show_section(&self, section: Section, markup: &str) {
        self.events.borrow_mut().push(ViewEvent::Shown(section, markup.to_owned()));
    }

    fn hide_section(&self, section: Section) {
        self.events.borrow_mut().push(ViewEvent::Hidden(section));
    }

    fn set_avatar_status(&self, status: AvatarStatus) {
        self.events.borrow_mut().push(ViewEvent::Avatar(status));
    }

    fn set_fully_loaded(&self) {
        self.events.borrow_mut().push(ViewEvent::FullyLoaded);
    }

    fn navigate(&self, route: &str) {
        self.events.borrow_mut().push(ViewEvent::Navigate(route.to_owned()));
    }
}

/// Renders every slot as one `slot:{json}` line.
pub struct JsonTemplates;

impl TemplateEngine for JsonTemplates {
    fn render(&self, slot: TemplateSlot, input: &TemplateInput) -> Result<String, TemplateError> {
        let json = serde_json::to_string(input).map_err(|err| TemplateError::Render {
            slot,
            reason: err.to_string(),
        })?;
        Ok(format!("{slot}:{json}\n"))
    }
}

pub fn entries(markup: &str, slot: TemplateSlot) -> Vec<serde_json::Value> {
    let prefix = format!("{slot}:");
    markup
        .lines()
        .filter_map(|line| line.strip_prefix(&prefix))
        .map(|json| serde_json::from_str(json).unwrap())
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Show(String),
    Hide,
    Pause,
    ClearLoading,
    Poster(String),
    Box(VideoBox),
}

pub struct FakeSurface {
    pub events: RefCell<Vec<SurfaceEvent>>,
    pub metadata: Cell<Option<MediaSize>>,
    pub viewport: Cell<f64>,
}

impl FakeSurface {
    pub fn new(viewport: f64) -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            metadata: Cell::new(None),
            viewport: Cell::new(viewport),
        }
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ModalSurface for FakeSurface {
    fn show(&self, markup: &str) {
        self.events.borrow_mut().push(SurfaceEvent::Show(markup.to_owned()));
    }

    fn hide(&self) {
        self.events.borrow_mut().push(SurfaceEvent::Hide);
    }

    fn pause_video(&self) {
        self.events.borrow_mut().push(SurfaceEvent::Pause);
    }

    fn clear_loading(&self) {
        self.events.borrow_mut().push(SurfaceEvent::ClearLoading);
    }

    fn set_poster(&self, url: &str) {
        self.events.borrow_mut().push(SurfaceEvent::Poster(url.to_owned()));
    }

    fn apply_video_box(&self, video_box: &VideoBox) {
        self.events.borrow_mut().push(SurfaceEvent::Box(video_box.clone()));
    }

    fn viewport_width(&self) -> f64 {
        self.viewport.get()
    }

    async fn video_metadata(&self) -> Result<MediaSize, MediaError> {
        self.metadata
            .get()
            .ok_or_else(|| MediaError::NoSize("video".to_owned()))
    }
}
