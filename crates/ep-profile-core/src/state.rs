//! Load state owned by [`crate::ProfilePage`].

use crate::sanitize::sanitize;
use ep_api_types::{AssetRecord, TextRecordKey, TextRecords, WalletEntry};

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub(crate) domain: String,
    pub(crate) is_logging_enabled: bool,
    pub(crate) is_fully_loaded: bool,
    pub(crate) text_records: TextRecords,
    pub(crate) assets: Vec<AssetRecord>,
}

impl ProfileState {
    pub fn new(domain: impl Into<String>, is_logging_enabled: bool) -> Self {
        Self {
            domain: domain.into(),
            is_logging_enabled,
            ..Default::default()
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.is_logging_enabled
    }

    pub fn is_fully_loaded(&self) -> bool {
        self.is_fully_loaded
    }

    pub fn text_records(&self) -> &TextRecords {
        &self.text_records
    }

    pub fn assets(&self) -> &[AssetRecord] {
        &self.assets
    }

    pub fn asset(&self, index: usize) -> Option<&AssetRecord> {
        self.assets.get(index)
    }

    /// Sanitized value of a text record, `None` when absent.
    pub fn text_record(&self, key: &TextRecordKey) -> Option<String> {
        sanitize(key, self.text_records.get(key))
    }

    /// Wallet list; a missing `wallets` record reads as empty.
    pub fn wallets(&self) -> &[WalletEntry] {
        self.text_records.wallets().unwrap_or_default()
    }
}
