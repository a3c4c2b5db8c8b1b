//! Trusted sender roster.

use std::collections::HashSet;

/// Addresses and domains exempt from the full marketing heuristic.
///
/// Entries are normalized to trimmed lower-case, so lookups are
/// case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedSenderSet {
    addresses: HashSet<String>,
    domains: HashSet<String>,
}

impl TrustedSenderSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an address. Returns `false` if it was already present or empty.
    pub fn insert(&mut self, address: &str) -> bool {
        let address = address.trim().to_lowercase();
        if address.is_empty() {
            return false;
        }
        self.addresses.insert(address)
    }

    /// Adds a domain whose every address is trusted.
    ///
    /// A leading `@` is ignored.
    pub fn insert_domain(&mut self, domain: &str) -> bool {
        let domain = domain.trim().trim_start_matches('@').to_lowercase();
        if domain.is_empty() {
            return false;
        }
        self.domains.insert(domain)
    }

    /// Whether `address` is trusted, either directly or by domain.
    #[must_use]
    pub fn contains(&self, address: &str) -> bool {
        let address = address.trim().to_lowercase();
        if address.is_empty() {
            return false;
        }
        if self.addresses.contains(&address) {
            return true;
        }
        address
            .rsplit_once('@')
            .is_some_and(|(_, domain)| self.domains.contains(domain))
    }

    /// Number of trusted addresses and domains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len() + self.domains.len()
    }

    /// Whether nothing is trusted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty() && self.domains.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TrustedSenderSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for TrustedSenderSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for address in iter {
            self.insert(address.as_ref());
        }
    }
}
