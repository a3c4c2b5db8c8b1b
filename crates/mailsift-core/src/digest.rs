//! Batch filtering for the daily digest.
//!
//! Runs the classifier over a batch of fetched messages, drops the unwanted
//! ones and groups the rest by direction and sender.

use std::collections::{BTreeMap, HashMap, HashSet};

use mailsift_classify::{ClassificationVerdict, Classifier, Message, Signal, TrustedSenderSet};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::Result;

/// Whether a message was sent to or by the mailbox owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Received from someone else.
    Incoming,
    /// Sent from one of the owner's addresses.
    Outgoing,
}

/// Kept messages from one sender, in batch order.
#[derive(Debug, Clone, Serialize)]
pub struct SenderBucket {
    /// Normalized sender address.
    pub address: String,
    /// Display name from the first message that had one.
    pub name: String,
    /// Messages from this sender.
    pub messages: Vec<Message>,
}

/// A message left out of the digest, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct ExcludedMessage {
    /// The excluded message.
    pub message: Message,
    /// Why it was excluded.
    pub verdict: ClassificationVerdict,
}

/// Counts for one filtered batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DigestStats {
    /// Messages in the batch.
    pub total: usize,
    /// Messages kept.
    pub kept: usize,
    /// Messages excluded.
    pub excluded: usize,
    /// Excluded messages per signal kind.
    pub by_signal: BTreeMap<&'static str, usize>,
}

/// Result of filtering a batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Digest {
    /// Kept incoming messages grouped by sender.
    pub incoming: Vec<SenderBucket>,
    /// Kept outgoing messages grouped by sender.
    pub outgoing: Vec<SenderBucket>,
    /// Excluded messages and their verdicts.
    pub excluded: Vec<ExcludedMessage>,
    /// Batch counters.
    pub stats: DigestStats,
}

impl Digest {
    /// Buckets for one direction.
    #[must_use]
    pub fn buckets(&self, direction: Direction) -> &[SenderBucket] {
        match direction {
            Direction::Incoming => &self.incoming,
            Direction::Outgoing => &self.outgoing,
        }
    }
}

/// Classifies batches against a fixed roster.
#[derive(Debug, Clone)]
pub struct DigestFilter {
    classifier: Classifier,
    trusted: TrustedSenderSet,
    mailbox: HashSet<String>,
}

impl DigestFilter {
    /// Builds a filter from roster settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the classifier's pattern tables fail to compile.
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self::with_classifier(
            Classifier::new()?,
            settings.trusted_set(),
            &settings.mailbox_addresses,
        ))
    }

    /// Builds a filter from parts.
    #[must_use]
    pub fn with_classifier<I, S>(
        classifier: Classifier,
        trusted: TrustedSenderSet,
        mailbox_addresses: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mailbox = mailbox_addresses
            .into_iter()
            .map(|a| a.as_ref().trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        Self {
            classifier,
            trusted,
            mailbox,
        }
    }

    /// The roster in use.
    #[must_use]
    pub const fn trusted(&self) -> &TrustedSenderSet {
        &self.trusted
    }

    /// Direction of `message` relative to the mailbox owner.
    #[must_use]
    pub fn direction(&self, message: &Message) -> Direction {
        if self.mailbox.contains(&message.sender.normalized_address()) {
            Direction::Outgoing
        } else {
            Direction::Incoming
        }
    }

    /// Classifies one message against the roster.
    #[must_use]
    pub fn classify(&self, message: &Message) -> ClassificationVerdict {
        self.classifier.classify(message, &self.trusted)
    }

    /// Filters a batch into a digest.
    #[must_use]
    pub fn filter(&self, messages: Vec<Message>) -> Digest {
        let mut digest = Digest::default();
        let mut incoming = BucketIndex::default();
        let mut outgoing = BucketIndex::default();

        for message in messages {
            digest.stats.total += 1;
            let verdict = self.classify(&message);

            if verdict.unwanted {
                debug!(
                    sender = %message.sender.address,
                    subject = %message.subject,
                    signals = ?verdict.signals.iter().map(Signal::kind).collect::<Vec<_>>(),
                    "Excluding message"
                );
                for signal in &verdict.signals {
                    *digest.stats.by_signal.entry(signal.kind()).or_default() += 1;
                }
                digest.stats.excluded += 1;
                digest.excluded.push(ExcludedMessage { message, verdict });
                continue;
            }

            digest.stats.kept += 1;
            match self.direction(&message) {
                Direction::Incoming => incoming.push(&mut digest.incoming, message),
                Direction::Outgoing => outgoing.push(&mut digest.outgoing, message),
            }
        }

        info!(
            total = digest.stats.total,
            kept = digest.stats.kept,
            excluded = digest.stats.excluded,
            senders = digest.incoming.len() + digest.outgoing.len(),
            "Filtered batch"
        );
        digest
    }
}

/// Maps normalized sender addresses to their bucket position.
#[derive(Default)]
struct BucketIndex(HashMap<String, usize>);

impl BucketIndex {
    fn push(&mut self, buckets: &mut Vec<SenderBucket>, message: Message) {
        let address = message.sender.normalized_address();
        let idx = *self.0.entry(address.clone()).or_insert_with(|| {
            buckets.push(SenderBucket {
                address,
                name: String::new(),
                messages: Vec::new(),
            });
            buckets.len() - 1
        });

        let bucket = &mut buckets[idx];
        if bucket.name.is_empty() {
            bucket.name.clone_from(&message.sender.name);
        }
        bucket.messages.push(message);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filter() -> DigestFilter {
        let settings = Settings {
            trusted_senders: vec!["ceo@company.com".into()],
            trusted_domains: Vec::new(),
            mailbox_addresses: vec!["me@company.com".into()],
        };
        DigestFilter::new(&settings).unwrap()
    }

    fn batch() -> Vec<Message> {
        vec![
            Message::new("Re: Q2 Budget", "jane@company.com")
                .with_sender_name("Jane Doe")
                .with_body("Let's finalize numbers by Friday."),
            Message::new("50% OFF - Unsubscribe now!", "promo@mailchimp.com"),
            Message::new("Re: Q2 Budget", "me@company.com").with_body("Works for me."),
            Message::new("Hiring plan", "JANE@company.com").with_body("Draft attached."),
            Message::new("Offsite agenda", "ceo@company.com").with_body("See attached."),
        ]
    }

    #[test]
    fn test_filter_partitions_batch() {
        let digest = filter().filter(batch());

        assert_eq!(digest.stats.total, 5);
        assert_eq!(digest.stats.kept, 4);
        assert_eq!(digest.stats.excluded, 1);
        assert_eq!(digest.excluded[0].message.sender.address, "promo@mailchimp.com");
        assert_eq!(digest.stats.by_signal.get("advertising_domain"), Some(&1));
    }

    #[test]
    fn test_kept_messages_grouped_by_direction_and_sender() {
        let digest = filter().filter(batch());

        let incoming = digest.buckets(Direction::Incoming);
        assert_eq!(incoming.len(), 2);
        assert_eq!(incoming[0].address, "jane@company.com");
        assert_eq!(incoming[0].name, "Jane Doe");
        assert_eq!(incoming[0].messages.len(), 2);
        assert_eq!(incoming[1].address, "ceo@company.com");

        let outgoing = digest.buckets(Direction::Outgoing);
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].address, "me@company.com");
    }

    #[test]
    fn test_mailbox_owner_counts_as_trusted() {
        let filter = filter();
        let message = Message::new("URGENT!!! READ THIS NOW", "Me@Company.com");
        assert_eq!(filter.direction(&message), Direction::Outgoing);
        assert!(!filter.classify(&message).unwanted);
    }

    #[test]
    fn test_empty_roster_applies_full_heuristic() {
        let filter = DigestFilter::new(&Settings::default()).unwrap();
        assert!(filter.trusted().is_empty());

        let message = Message::new("URGENT!!! READ THIS NOW", "ceo@company.com");
        assert!(filter.classify(&message).unwanted);
    }

    #[test]
    fn test_empty_batch() {
        let digest = filter().filter(Vec::new());
        assert_eq!(digest.stats, DigestStats::default());
        assert!(digest.incoming.is_empty());
    }
}
