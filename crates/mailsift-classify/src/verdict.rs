//! Classification results.

use serde::Serialize;

/// Which rule set produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Sender is trusted; only the obvious-advertisement check ran.
    TrustedSender,
    /// Reply or forward with no marketing content; kept without scoring.
    ReplyExemption,
    /// Every heuristic signal was evaluated.
    FullHeuristic,
}

/// A heuristic that fired for a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Signal {
    /// Subject matched a marketing/spam phrase.
    SubjectKeyword {
        /// Pattern that matched.
        pattern: &'static str,
    },
    /// Sender local part looks like a bulk mailbox.
    SenderLocalPart {
        /// Substring that matched.
        fragment: &'static str,
    },
    /// Sender domain belongs to an email-service provider.
    AdvertisingDomain {
        /// Domain fragment that matched.
        fragment: &'static str,
    },
    /// Subject contains an emoji.
    EmojiInSubject,
    /// Subject contains promotional characters.
    MarketingCharacters,
    /// Body contains a bulk-mail footer.
    MarketingFooter,
    /// Most subject words are upper-case.
    ExcessiveCapitalization,
    /// Weighted body phrase score exceeded the threshold.
    BodySpamScore {
        /// The computed score.
        score: f64,
    },
    /// Body contains a shortened link or a generic call to action.
    SuspiciousLink,
    /// Subject has runs or clusters of `!` and `?`.
    ExcessivePunctuation,
    /// Trusted sender's message is an explicit advertisement.
    ObviousAdvertisement,
}

impl Signal {
    /// Stable identifier of the signal kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SubjectKeyword { .. } => "subject_keyword",
            Self::SenderLocalPart { .. } => "sender_local_part",
            Self::AdvertisingDomain { .. } => "advertising_domain",
            Self::EmojiInSubject => "emoji_in_subject",
            Self::MarketingCharacters => "marketing_characters",
            Self::MarketingFooter => "marketing_footer",
            Self::ExcessiveCapitalization => "excessive_capitalization",
            Self::BodySpamScore { .. } => "body_spam_score",
            Self::SuspiciousLink => "suspicious_link",
            Self::ExcessivePunctuation => "excessive_punctuation",
            Self::ObviousAdvertisement => "obvious_advertisement",
        }
    }
}

/// Outcome of classifying one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationVerdict {
    /// `true` if the message should be excluded from the digest.
    pub unwanted: bool,
    /// Rule set that was applied.
    pub route: Route,
    /// Signals that fired, in evaluation order.
    pub signals: Vec<Signal>,
}

impl ClassificationVerdict {
    /// Builds a verdict that is unwanted iff any signal fired.
    #[must_use]
    pub fn from_signals(route: Route, signals: Vec<Signal>) -> Self {
        Self {
            unwanted: !signals.is_empty(),
            route,
            signals,
        }
    }

    /// A keep verdict with no signals.
    #[must_use]
    pub const fn kept(route: Route) -> Self {
        Self {
            unwanted: false,
            route,
            signals: Vec::new(),
        }
    }
}
