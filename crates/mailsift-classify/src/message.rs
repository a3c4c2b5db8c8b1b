//! Message types consumed by the classifier.
//!
//! [`RawMessage`] mirrors the loosely-typed payload returned by cloud mail
//! APIs, where every field may be missing. Converting it into a [`Message`]
//! resolves absent fields to empty values so the classifier never has to
//! deal with missing data.

use serde::{Deserialize, Serialize};

/// Sender of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sender {
    /// Email address as supplied (not normalized).
    pub address: String,
    /// Display name, empty if unknown.
    pub name: String,
}

impl Sender {
    /// Creates a sender with just an address.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: String::new(),
        }
    }

    /// Creates a sender with a display name and address.
    #[must_use]
    pub fn with_name(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }

    /// Returns the trimmed, lower-cased address.
    #[must_use]
    pub fn normalized_address(&self) -> String {
        self.address.trim().to_lowercase()
    }

    /// Returns the lower-cased part before the last `@`.
    ///
    /// An address without `@` is treated as all local part.
    #[must_use]
    pub fn local_part(&self) -> String {
        let address = self.normalized_address();
        match address.rsplit_once('@') {
            Some((local, _)) => local.to_string(),
            None => address,
        }
    }

    /// Returns the lower-cased part after the last `@`, or an empty string.
    #[must_use]
    pub fn domain(&self) -> String {
        let address = self.normalized_address();
        address
            .rsplit_once('@')
            .map(|(_, domain)| domain.to_string())
            .unwrap_or_default()
    }
}

/// A normalized email message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Subject line, empty if absent.
    pub subject: String,
    /// Sender of the message.
    pub sender: Sender,
    /// Plain-text body, empty if absent.
    pub body: String,
    /// Recipient addresses (to and cc).
    pub recipients: Vec<String>,
}

impl Message {
    /// Creates a message with a subject and sender address.
    #[must_use]
    pub fn new(subject: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            sender: Sender::new(sender),
            body: String::new(),
            recipients: Vec::new(),
        }
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the sender's display name.
    #[must_use]
    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender.name = name.into();
        self
    }

    /// Adds a recipient address.
    #[must_use]
    pub fn with_recipient(mut self, address: impl Into<String>) -> Self {
        self.recipients.push(address.into());
        self
    }
}

/// Message as delivered by a cloud mail API, with every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    /// Subject line.
    pub subject: Option<String>,
    /// Sender.
    pub from: Option<RawRecipient>,
    /// Full body.
    pub body: Option<RawBody>,
    /// Short plain-text preview, used when the full body is missing.
    pub body_preview: Option<String>,
    /// Primary recipients.
    pub to_recipients: Option<Vec<RawRecipient>>,
    /// Carbon-copy recipients.
    pub cc_recipients: Option<Vec<RawRecipient>>,
}

/// Recipient wrapper around an email address.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecipient {
    /// The address record.
    pub email_address: Option<RawEmailAddress>,
}

/// Address record with optional name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEmailAddress {
    /// Email address.
    pub address: Option<String>,
    /// Display name.
    pub name: Option<String>,
}

/// Message body with its content type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBody {
    /// `"text"` or `"html"`.
    pub content_type: Option<String>,
    /// Body content.
    pub content: Option<String>,
}

impl RawBody {
    /// Whether the content is HTML.
    #[must_use]
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("html"))
    }
}

impl RawRecipient {
    fn address(&self) -> Option<&str> {
        self.email_address.as_ref()?.address.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.email_address.as_ref()?.name.as_deref()
    }
}

impl From<RawMessage> for Message {
    fn from(raw: RawMessage) -> Self {
        let sender = raw.from.as_ref().map_or_else(Sender::default, |from| {
            Sender::with_name(
                from.name().unwrap_or_default(),
                from.address().unwrap_or_default(),
            )
        });

        let body = raw
            .body
            .and_then(|b| b.content)
            .filter(|content| !content.trim().is_empty())
            .or(raw.body_preview)
            .unwrap_or_default();

        let recipients = raw
            .to_recipients
            .into_iter()
            .chain(raw.cc_recipients)
            .flatten()
            .filter_map(|r| r.address().map(ToString::to_string))
            .filter(|a| !a.is_empty())
            .collect();

        Self {
            subject: raw.subject.unwrap_or_default(),
            sender,
            body,
            recipients,
        }
    }
}
