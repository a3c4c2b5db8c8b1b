//! # mailsift-classify
//!
//! Heuristic classifier that flags marketing and spam email so it can be
//! left out of a digest.
//!
//! ## Features
//!
//! - **Trusted senders**: roster members only face the obvious-advertisement check
//! - **Reply exemption**: plain replies and forwards are always kept
//! - **Signals**: subject keywords, bulk sender addresses, ESP domains, emoji,
//!   footers, capitalization, punctuation, short links and a weighted body score
//! - **Diagnostics**: every verdict lists the signals that fired
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailsift_classify::{Classifier, Message, TrustedSenderSet};
//!
//! let classifier = Classifier::new()?;
//! let trusted: TrustedSenderSet = ["ceo@company.com"].into_iter().collect();
//!
//! let message = Message::new("50% OFF - Unsubscribe now!", "promo@mailchimp.com");
//! let verdict = classifier.classify(&message, &trusted);
//! assert!(verdict.unwanted);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod classifier;
mod error;
mod message;
mod text;
mod trusted;
mod verdict;

pub mod patterns;

pub use classifier::{Classifier, SPAM_SCORE_THRESHOLD};
pub use error::{Error, Result};
pub use message::{Message, RawBody, RawEmailAddress, RawMessage, RawRecipient, Sender};
pub use trusted::TrustedSenderSet;
pub use verdict::{ClassificationVerdict, Route, Signal};
