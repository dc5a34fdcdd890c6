//! Page-level capabilities the loader drives.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Profile,
    Portfolio,
    Wallets,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Profile => "profile",
            Section::Portfolio => "portfolio",
            Section::Wallets => "wallets",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarStatus {
    /// Foreground image decoded.
    Loaded,
    /// Decode failed; keep the background placeholder.
    Placeholder,
}

/// DOM (or terminal) surface for the initial page render.
pub trait PageView {
    fn show_section(&self, section: Section, markup: &str);
    fn hide_section(&self, section: Section);
    fn set_avatar_status(&self, status: AvatarStatus);
    /// Swap the loading indicator for the page body.
    fn set_fully_loaded(&self);
    /// Leave the page after a fatal load failure.
    fn navigate(&self, route: &str);
}
