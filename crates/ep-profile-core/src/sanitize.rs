//! Text-record normalisation.
//!
//! Social handles are stored by users either bare or as full profile URLs;
//! the page always shows the bare handle. Output is *not* escaped, callers
//! go through [`crate::template::Escaped`] before anything reaches markup.

use ep_api_types::TextRecordKey;

/// Marker after which the handle starts, per social record.
fn handle_marker(key: &TextRecordKey) -> Option<&'static str> {
    match key {
        TextRecordKey::Twitter => Some("twitter.com/"),
        TextRecordKey::Github => Some("github.com/"),
        TextRecordKey::Linkedin => Some("linkedin.com/"),
        TextRecordKey::Peepeth => Some("peepeth.com/"),
        TextRecordKey::Telegram => Some("t.me/"),
        TextRecordKey::Keybase => Some("keybase.io/"),
        _ => None,
    }
}

/// Text after the last occurrence of `marker`, or all of `value`.
fn after_last<'a>(value: &'a str, marker: &str) -> &'a str {
    value.rsplit(marker).next().unwrap_or(value)
}

pub fn sanitize(key: &TextRecordKey, raw: Option<&str>) -> Option<String> {
    let value = raw?;

    if let Some(marker) = handle_marker(key) {
        let mut handle = after_last(value, marker);
        if *key == TextRecordKey::Twitter {
            handle = after_last(handle, "@");
        }
        return Some(handle.to_owned());
    }

    match key {
        TextRecordKey::Url if !value.starts_with("http") => Some(format!("https://{value}")),
        _ => Some(value.to_owned()),
    }
}
