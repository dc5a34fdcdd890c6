use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// `{ "success": bool, "data": ... }` wrapper returned by the profile API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
}

impl<T: Default> ApiEnvelope<T> {
    /// Payload of a successful response. `None` when `success` is false; a
    /// successful response without `data` yields the empty payload.
    pub fn into_data(self) -> Option<T> {
        self.success.then(|| self.data.unwrap_or_default())
    }
}

// ── Text records ──

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TextRecordKey {
    Description,
    Email,
    Phone,
    Url,
    Avatar,
    ContentHash,
    Wallets,
    Github,
    Keybase,
    Linkedin,
    Peepeth,
    Telegram,
    Twitter,
    Other(String),
}

impl TextRecordKey {
    pub fn as_str(&self) -> &str {
        match self {
            TextRecordKey::Description => "description",
            TextRecordKey::Email => "email",
            TextRecordKey::Phone => "phone",
            TextRecordKey::Url => "url",
            TextRecordKey::Avatar => "avatar",
            TextRecordKey::ContentHash => "contentHash",
            TextRecordKey::Wallets => "wallets",
            TextRecordKey::Github => "com.github",
            TextRecordKey::Keybase => "io.keybase",
            TextRecordKey::Linkedin => "com.linkedin",
            TextRecordKey::Peepeth => "com.peepeth",
            TextRecordKey::Telegram => "org.telegram",
            TextRecordKey::Twitter => "com.twitter",
            TextRecordKey::Other(key) => key,
        }
    }
}

impl From<&str> for TextRecordKey {
    fn from(key: &str) -> Self {
        match key {
            "description" => TextRecordKey::Description,
            "email" => TextRecordKey::Email,
            "phone" => TextRecordKey::Phone,
            "url" => TextRecordKey::Url,
            "avatar" => TextRecordKey::Avatar,
            "contentHash" => TextRecordKey::ContentHash,
            "wallets" => TextRecordKey::Wallets,
            "com.github" => TextRecordKey::Github,
            "io.keybase" => TextRecordKey::Keybase,
            "com.linkedin" => TextRecordKey::Linkedin,
            "com.peepeth" => TextRecordKey::Peepeth,
            "org.telegram" => TextRecordKey::Telegram,
            "com.twitter" => TextRecordKey::Twitter,
            other => TextRecordKey::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for TextRecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Text records attached to a name.
///
/// The API sends a flat JSON object where every key maps to a string except
/// `wallets`, which is an array of `{name, value}`. Nulls are dropped, other
/// scalars are kept in their JSON text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct TextRecords {
    text: BTreeMap<String, String>,
    wallets: Option<Vec<WalletEntry>>,
}

impl TextRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.text.insert(key.into(), value.into());
        self
    }

    pub fn with_wallets(mut self, wallets: Vec<WalletEntry>) -> Self {
        self.wallets = Some(wallets);
        self
    }

    /// Raw string value for `key`, `None` when the record is absent.
    pub fn get(&self, key: &TextRecordKey) -> Option<&str> {
        self.text.get(key.as_str()).map(String::as_str)
    }

    pub fn wallets(&self) -> Option<&[WalletEntry]> {
        self.wallets.as_deref()
    }

    /// Address of the wallet entry named `name`, ignoring empty values.
    pub fn wallet_address(&self, name: &str) -> Option<&str> {
        self.wallets()?
            .iter()
            .find(|wallet| wallet.name == name)
            .and_then(|wallet| wallet.value.as_deref())
            .filter(|value| !value.is_empty())
    }
}

impl From<BTreeMap<String, serde_json::Value>> for TextRecords {
    fn from(raw: BTreeMap<String, serde_json::Value>) -> Self {
        let mut records = TextRecords::default();
        for (key, value) in raw {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(text) => {
                    records.text.insert(key, text);
                }
                serde_json::Value::Array(items) if key == TextRecordKey::Wallets.as_str() => {
                    let wallets = items
                        .into_iter()
                        .filter_map(|item| serde_json::from_value::<WalletEntry>(item).ok())
                        .collect();
                    records.wallets = Some(wallets);
                }
                other => {
                    records.text.insert(key, other.to_string());
                }
            }
        }
        records
    }
}

// ── Assets ──

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorUser {
    #[serde(default, deserialize_with = "string_or_number")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<CreatorUser>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub profile_img_url: Option<String>,
}

/// One NFT as returned by the asset collection endpoint. Every field may be
/// missing, null or of an unexpected type; unusable values read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub token_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub permalink: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub image_original_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub image_preview_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub animation_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub animation_original_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub creator: Option<Creator>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

impl AssetRecord {
    pub fn name(&self) -> Option<&str> {
        present(&self.name)
    }

    pub fn token_id(&self) -> Option<&str> {
        present(&self.token_id)
    }

    pub fn description(&self) -> Option<&str> {
        present(&self.description)
    }

    pub fn permalink(&self) -> Option<&str> {
        present(&self.permalink)
    }

    pub fn image_url(&self) -> Option<&str> {
        present(&self.image_url)
    }

    pub fn image_original_url(&self) -> Option<&str> {
        present(&self.image_original_url)
    }

    pub fn image_preview_url(&self) -> Option<&str> {
        present(&self.image_preview_url)
    }

    pub fn animation_url(&self) -> Option<&str> {
        present(&self.animation_url)
    }

    pub fn animation_original_url(&self) -> Option<&str> {
        present(&self.animation_original_url)
    }

    /// `animation_original_url` and `animation_url`, whichever are present.
    pub fn animation_urls(&self) -> impl Iterator<Item = &str> {
        [self.animation_original_url(), self.animation_url()]
            .into_iter()
            .flatten()
    }

    pub fn creator_username(&self) -> Option<&str> {
        self.creator
            .as_ref()?
            .user
            .as_ref()?
            .username
            .as_deref()
            .filter(|value| !value.is_empty())
    }

    pub fn creator_avatar(&self) -> Option<&str> {
        self.creator
            .as_ref()?
            .profile_img_url
            .as_deref()
            .filter(|value| !value.is_empty())
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<serde_json::Value>::deserialize(deserializer)?
        .and_then(|value| serde_json::from_value(value).ok()))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

/// How an asset's primary media is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "3d")]
    ThreeD,
    #[serde(rename = "nonstandard")]
    Nonstandard,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::ThreeD => "3d",
            MediaKind::Nonstandard => "nonstandard",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
