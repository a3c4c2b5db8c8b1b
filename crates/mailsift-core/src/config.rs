//! Roster settings.
//!
//! Settings live in `settings.json` under the platform config directory
//! (`~/.config/mailsift/` on Linux). A missing file yields the defaults,
//! which trust nobody, so every message goes through the full heuristic.

use std::path::{Path, PathBuf};

use mailsift_classify::TrustedSenderSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Persisted roster configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Individually trusted addresses (the organization's staff).
    pub trusted_senders: Vec<String>,
    /// Domains whose every address is trusted.
    pub trusted_domains: Vec<String>,
    /// The mailbox owner's own addresses; mail from these is outgoing.
    pub mailbox_addresses: Vec<String>,
}

impl Settings {
    /// Default settings file location.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mailsift")
            .join("settings.json")
    }

    /// Loads settings from `path`, or defaults if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or isn't valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)?;
        info!(
            senders = settings.trusted_senders.len(),
            domains = settings.trusted_domains.len(),
            "Loaded roster from {:?}",
            path
        );
        Ok(settings)
    }

    /// Parses and normalizes settings from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text isn't valid settings JSON.
    pub fn from_json(contents: &str) -> Result<Self> {
        let mut settings: Self = serde_json::from_str(contents)?;
        settings.normalize();
        Ok(settings)
    }

    /// Writes settings to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file can't be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        info!("Settings saved to {:?}", path);
        Ok(())
    }

    /// Adds a trusted address. Returns `false` if it was already listed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `address` isn't an email address.
    pub fn add_trusted_sender(&mut self, address: &str) -> Result<bool> {
        let address = normalize_address(address)
            .ok_or_else(|| Error::Config(format!("Not an email address: {address}")))?;
        Ok(push_unique(&mut self.trusted_senders, address))
    }

    /// Adds a trusted domain. Returns `false` if it was already listed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `domain` is empty or contains `@` after
    /// the leading one.
    pub fn add_trusted_domain(&mut self, domain: &str) -> Result<bool> {
        let domain = normalize_domain(domain)
            .ok_or_else(|| Error::Config(format!("Not a domain: {domain}")))?;
        Ok(push_unique(&mut self.trusted_domains, domain))
    }

    /// Builds the roster handed to the classifier.
    ///
    /// The mailbox owner's addresses are trusted as well.
    #[must_use]
    pub fn trusted_set(&self) -> TrustedSenderSet {
        let mut set: TrustedSenderSet = self
            .trusted_senders
            .iter()
            .chain(&self.mailbox_addresses)
            .collect();
        for domain in &self.trusted_domains {
            set.insert_domain(domain);
        }
        set
    }

    fn normalize(&mut self) {
        self.trusted_senders =
            normalize_list(&self.trusted_senders, "trustedSenders", normalize_address);
        self.mailbox_addresses =
            normalize_list(&self.mailbox_addresses, "mailboxAddresses", normalize_address);
        self.trusted_domains =
            normalize_list(&self.trusted_domains, "trustedDomains", normalize_domain);
    }
}

fn normalize_address(address: &str) -> Option<String> {
    let address = address.trim().to_lowercase();
    let (local, domain) = address.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(address)
}

fn normalize_domain(domain: &str) -> Option<String> {
    let domain = domain.trim().trim_start_matches('@').to_lowercase();
    if domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(domain)
}

fn normalize_list(
    entries: &[String],
    field: &str,
    normalize: fn(&str) -> Option<String>,
) -> Vec<String> {
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        match normalize(entry) {
            Some(value) => {
                push_unique(&mut out, value);
            }
            None => warn!("Skipping invalid {field} entry: {entry:?}"),
        }
    }
    out
}

fn push_unique(list: &mut Vec<String>, value: String) -> bool {
    if list.contains(&value) {
        return false;
    }
    list.push(value);
    true
}
