//! Page controller: load pipeline and render pass.
//!
//! Stages:
//! 1. text records (fatal on failure, navigates to the error route)
//! 2. avatar decode and NFT fetch, concurrently (both non-fatal)
//! 3. render pass once both have settled

use crate::config::ProfileConfig;
use crate::log::LogSink;
use crate::modal::{ModalController, ModalError, ModalPlan, ModalSurface};
use crate::render::{SectionOutcome, render_portfolio, render_profile, render_wallets};
use crate::state::ProfileState;
use crate::template::{TemplateEngine, TemplateError};
use crate::view::{AvatarStatus, PageView, Section};
use ep_api_types::{AssetRecord, TextRecords};
use ep_profile_source::{FetchError, MediaProbe, ProfileSource};
use thiserror::Error;
use tracing::{debug, warn};

/// Wallet whose NFTs fill the portfolio.
pub const PORTFOLIO_WALLET: &str = "ethereum";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("text records for {domain} unavailable: {source}")]
    TextRecords {
        domain: String,
        #[source]
        source: FetchError,
    },
    #[error("profile for {0} was already loaded")]
    AlreadyLoaded(String),
}

pub struct ProfilePage<S, P> {
    state: ProfileState,
    config: ProfileConfig,
    source: S,
    probe: P,
    sink: LogSink,
    modal: ModalController,
    started: bool,
}

impl<S, P> ProfilePage<S, P>
where
    S: ProfileSource,
    P: MediaProbe,
{
    pub fn new(domain: impl Into<String>, is_logging: bool, config: ProfileConfig, source: S, probe: P) -> Self {
        let state = ProfileState::new(domain, is_logging);
        let sink = LogSink::new(state.is_logging_enabled());
        sink.log(format!("Domain is {}", state.domain()));
        Self {
            state,
            config,
            source,
            probe,
            sink,
            modal: ModalController::new(),
            started: false,
        }
    }

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn sink(&self) -> LogSink {
        self.sink
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    /// Run the whole pipeline. Only the first call does anything.
    pub async fn load(&mut self, view: &dyn PageView, templates: &dyn TemplateEngine) -> Result<(), LoadError> {
        if self.started {
            return Err(LoadError::AlreadyLoaded(self.state.domain.clone()));
        }
        self.started = true;

        let text_records = match self.fetch_text_records().await {
            Ok(records) => records,
            Err(err) => {
                view.navigate(&self.config.error_route);
                return Err(err);
            }
        };
        self.state.text_records = text_records;

        let (_, assets) = futures::join!(self.load_avatar(view), self.fetch_assets());
        self.state.assets = assets;

        self.render(view, templates);
        Ok(())
    }

    async fn fetch_text_records(&self) -> Result<TextRecords, LoadError> {
        let domain = self.state.domain();
        match self.source.text_records(domain).await {
            Ok(records) => {
                self.sink.log("Received text records");
                Ok(records)
            }
            Err(source) => {
                self.sink.log(format!("No text records found: {source}"));
                Err(LoadError::TextRecords {
                    domain: domain.to_owned(),
                    source,
                })
            }
        }
    }

    async fn load_avatar(&self, view: &dyn PageView) -> AvatarStatus {
        let url = self.config.avatar_url(self.state.domain());
        let status = match self.probe.decode_image(&url).await {
            Ok(size) => {
                debug!(width = size.width, height = size.height, "avatar decoded");
                AvatarStatus::Loaded
            }
            Err(err) => {
                self.sink.log(format!("Avatar failed to load: {err}"));
                AvatarStatus::Placeholder
            }
        };
        view.set_avatar_status(status);
        status
    }

    async fn fetch_assets(&self) -> Vec<AssetRecord> {
        self.sink.log("Getting NFTs");
        let Some(address) = self.state.text_records.wallet_address(PORTFOLIO_WALLET) else {
            self.sink.log("No ethereum wallet");
            return Vec::new();
        };

        match self.source.assets(address).await {
            Ok(assets) => {
                self.sink.log("Received NFTs");
                assets
            }
            Err(err) => {
                self.sink.log(format!("No NFTs found: {err}"));
                Vec::new()
            }
        }
    }

    /// Profile, portfolio and wallets, then reveal the page.
    pub fn render(&mut self, view: &dyn PageView, templates: &dyn TemplateEngine) {
        let sections = [
            (Section::Profile, render_profile(&self.state, templates)),
            (Section::Portfolio, render_portfolio(&self.state, &self.config, templates)),
            (Section::Wallets, render_wallets(&self.state, templates)),
        ];
        for (section, outcome) in sections {
            apply_section(view, section, outcome);
        }

        self.state.is_fully_loaded = true;
        view.set_fully_loaded();
    }

    pub fn open_modal(
        &mut self,
        index: usize,
        templates: &dyn TemplateEngine,
        surface: &dyn ModalSurface,
    ) -> Result<ModalPlan, ModalError> {
        self.modal.open(&self.state, &self.config, index, templates, surface)
    }

    pub fn close_modal(&mut self, surface: &dyn ModalSurface) -> bool {
        self.modal.close(surface)
    }
}

fn apply_section(view: &dyn PageView, section: Section, outcome: Result<SectionOutcome, TemplateError>) {
    match outcome {
        Ok(SectionOutcome::Shown(markup)) => view.show_section(section, &markup),
        Ok(SectionOutcome::Hidden) => view.hide_section(section),
        Err(err) => {
            warn!(%section, error = %err, "section template failed");
            view.hide_section(section);
        }
    }
}
