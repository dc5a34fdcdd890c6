use anyhow::{Context, bail};
use ep_profile_core::{
    AvatarStatus, PageView, ProfileConfig, ProfilePage, Section, TemplateEngine, TemplateError,
    TemplateInput, TemplateSlot, TemplateValue,
};
use ep_profile_http::{HttpMediaProbe, HttpProfileSource};
use std::cell::RefCell;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: profile-preview <domain> [--log]";

struct Args {
    domain: String,
    log: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut domain = None;
    let mut log = false;
    for arg in args {
        if arg == "--log" {
            log = true;
        } else if arg.starts_with('-') {
            bail!("unknown flag {arg}\n{USAGE}");
        } else if domain.is_some() {
            bail!("unexpected argument {arg}\n{USAGE}");
        } else {
            domain = Some(arg);
        }
    }
    let domain = domain.context(USAGE)?;
    Ok(Args { domain, log })
}

/// Prints every non-empty field as `key: value`, one per line.
struct PlainTemplates;

impl TemplateEngine for PlainTemplates {
    fn render(&self, slot: TemplateSlot, input: &TemplateInput) -> Result<String, TemplateError> {
        let mut out = format!("  [{slot}]\n");
        for (key, value) in input.iter() {
            let value = match value {
                TemplateValue::Text(text) => text.as_str().to_owned(),
                TemplateValue::Kind(kind) => kind.to_string(),
                TemplateValue::Index(index) => index.to_string(),
                TemplateValue::Null => continue,
            };
            out.push_str(&format!("    {key}: {value}\n"));
        }
        Ok(out)
    }
}

/// Collects section output so it prints after the pipeline settles.
#[derive(Default)]
struct TerminalView {
    lines: RefCell<Vec<String>>,
    navigated: RefCell<Option<String>>,
}

impl PageView for TerminalView {
    fn show_section(&self, section: Section, markup: &str) {
        self.lines.borrow_mut().push(format!("== {section} ==\n{markup}"));
    }

    fn hide_section(&self, section: Section) {
        self.lines.borrow_mut().push(format!("== {section} (hidden) =="));
    }

    fn set_avatar_status(&self, status: AvatarStatus) {
        let status = match status {
            AvatarStatus::Loaded => "loaded",
            AvatarStatus::Placeholder => "placeholder",
        };
        self.lines.borrow_mut().push(format!("avatar: {status}"));
    }

    fn set_fully_loaded(&self) {
        info!("page fully loaded");
    }

    fn navigate(&self, route: &str) {
        *self.navigated.borrow_mut() = Some(route.to_owned());
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    let default_filter = if args.log { "ep_profile=info,warn" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = ProfileConfig::from_env().context("load profile config")?;
    let source = HttpProfileSource::new(Some(config.api_base.clone()));
    info!(endpoint = source.endpoint(), domain = %args.domain, "previewing profile");

    let mut page = ProfilePage::new(args.domain, args.log, config, source, HttpMediaProbe::new());
    let view = TerminalView::default();

    let result = page.load(&view, &PlainTemplates).await;
    if let Some(route) = view.navigated.borrow().as_deref() {
        println!("redirected to {route}");
    }
    result.context("load profile")?;

    for line in view.lines.borrow().iter() {
        println!("{line}");
    }
    Ok(())
}
