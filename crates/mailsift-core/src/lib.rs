//! # mailsift-core
//!
//! Collaborator layer around the `mailsift-classify` classifier.
//!
//! This crate provides:
//! - **Settings** - Trusted-sender roster and mailbox addresses
//! - **Inbox loading** - JSON message dumps with HTML bodies flattened to text
//! - **Digest filtering** - Drop unwanted mail, group the rest by direction and sender

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod digest;
mod error;
pub mod inbox;

pub use config::Settings;
pub use digest::{Digest, DigestFilter, DigestStats, Direction, ExcludedMessage, SenderBucket};
pub use error::{Error, Result};
pub use inbox::{load_messages, parse_messages};
