//! Profile page core.
//!
//! Platform-free logic behind the public profile page of a name: text-record
//! sanitizing, NFT media classification, section rendering, the load
//! pipeline and the detail modal. DOM, network and templating are reached
//! through the traits in [`view`], [`template`], [`modal`] and
//! `ep-profile-source`.

pub mod config;
pub mod layout;
pub mod loader;
pub mod log;
pub mod media;
pub mod modal;
pub mod render;
pub mod sanitize;
pub mod state;
pub mod template;
pub mod view;

pub use config::{ConfigError, ProfileConfig};
pub use layout::{StyleOp, VideoBox, VideoDimensions};
pub use loader::{LoadError, PORTFOLIO_WALLET, ProfilePage};
pub use log::LogSink;
pub use media::{MediaConfig, classify};
pub use modal::{MediaReady, ModalController, ModalError, ModalPlan, ModalSurface, ModalTicket, load_modal_media};
pub use render::SectionOutcome;
pub use sanitize::sanitize;
pub use state::ProfileState;
pub use template::{Escaped, TemplateEngine, TemplateError, TemplateInput, TemplateSlot, TemplateValue};
pub use view::{AvatarStatus, PageView, Section};

pub use ep_api_types as types;
pub use ep_profile_source as source;
