//! Loading fetched messages from JSON dumps.
//!
//! Accepts either a bare array of messages or a paged response of the form
//! `{ "value": [...] }` as returned by cloud mail APIs.

use std::path::Path;

use mailsift_classify::{Message, RawMessage};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Page { value: Vec<RawMessage> },
    List(Vec<RawMessage>),
}

impl Payload {
    fn into_messages(self) -> Vec<RawMessage> {
        match self {
            Self::Page { value } => value,
            Self::List(messages) => messages,
        }
    }
}

/// Reads and normalizes every message in a JSON dump.
///
/// # Errors
///
/// Returns an error if the file can't be read or isn't a message list.
pub fn load_messages(path: &Path) -> Result<Vec<Message>> {
    let contents = std::fs::read_to_string(path)?;
    let messages = parse_messages(&contents)?;
    debug!(count = messages.len(), "Loaded messages from {:?}", path);
    Ok(messages)
}

/// Parses and normalizes messages from JSON text.
///
/// # Errors
///
/// Returns an error if the text isn't a message list.
pub fn parse_messages(contents: &str) -> Result<Vec<Message>> {
    let payload: Payload = serde_json::from_str(contents)?;
    Ok(payload.into_messages().into_iter().map(normalize).collect())
}

/// Converts an API message, flattening HTML bodies to plain text first.
#[must_use]
pub fn normalize(mut raw: RawMessage) -> Message {
    if let Some(body) = raw.body.as_mut()
        && body.is_html()
        && let Some(html) = body.content.take()
    {
        body.content = Some(flatten_html(&html));
    }
    Message::from(raw)
}

fn flatten_html(html: &str) -> String {
    match htmd::convert(html) {
        Ok(text) => text,
        Err(err) => {
            warn!("Failed to flatten HTML body, using raw markup: {err}");
            html.to_string()
        }
    }
}
