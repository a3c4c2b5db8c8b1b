//! The importance classifier.
//!
//! Trusted and untrusted senders go through separate entry points:
//! [`Classifier::is_obviously_advertisement`] for members of the roster and
//! [`Classifier::is_likely_unwanted`] for everyone else.
//! [`Classifier::classify`] picks between them based on the roster and never
//! applies both to the same message.

use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use tracing::trace;

use crate::error::{Error, Result};
use crate::message::Message;
use crate::patterns::{
    ADVERTISEMENT_MARKERS, ADVERTISEMENT_SUBJECTS, ADVERTISING_DOMAINS, HIGH_SIGNAL_PHRASES,
    LOCAL_PART_SEPARATORS, LOW_SIGNAL_PHRASES, MARKETING_FOOTER, MEDIUM_SIGNAL_PHRASES,
    REPLY_PREFIX, SENDER_LOCAL_PARTS, SENDER_LOCAL_TOKENS, SUBJECT_KEYWORDS, SUSPICIOUS_LINKS,
    URL_PATTERN,
};
use crate::text;
use crate::trusted::TrustedSenderSet;
use crate::verdict::{ClassificationVerdict, Route, Signal};

/// Body score above which a message is considered spam.
pub const SPAM_SCORE_THRESHOLD: f64 = 3.0;

const HIGH_SIGNAL_WEIGHT: f64 = 2.0;
const MEDIUM_SIGNAL_WEIGHT: f64 = 1.0;
const LOW_SIGNAL_WEIGHT: f64 = 0.5;

/// Link counts above which each extra point is added.
const URL_COUNT_STEPS: [usize; 2] = [3, 6];

/// Spam and marketing classifier with pre-compiled pattern tables.
///
/// Construction compiles every table once. Classification is a pure
/// function of the message and the roster, so one instance can be shared
/// freely between threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    subject_keywords: RegexSet,
    reply_prefix: Regex,
    marketing_footer: RegexSet,
    high_signal: Vec<Regex>,
    medium_signal: Vec<Regex>,
    low_signal: Vec<Regex>,
    url: Regex,
    suspicious_links: RegexSet,
    advertisement_subjects: RegexSet,
    advertisement_markers: RegexSet,
}

impl Classifier {
    /// Compiles the built-in pattern tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] if a table entry is not a valid regex.
    pub fn new() -> Result<Self> {
        Ok(Self {
            subject_keywords: compile_set("subject keyword", SUBJECT_KEYWORDS)?,
            reply_prefix: compile("reply prefix", REPLY_PREFIX)?,
            marketing_footer: compile_set("marketing footer", MARKETING_FOOTER)?,
            high_signal: compile_each("high signal", HIGH_SIGNAL_PHRASES)?,
            medium_signal: compile_each("medium signal", MEDIUM_SIGNAL_PHRASES)?,
            low_signal: compile_each("low signal", LOW_SIGNAL_PHRASES)?,
            url: compile("url", URL_PATTERN)?,
            suspicious_links: compile_set("suspicious link", SUSPICIOUS_LINKS)?,
            advertisement_subjects: compile_set("advertisement subject", ADVERTISEMENT_SUBJECTS)?,
            advertisement_markers: compile_set("advertisement marker", ADVERTISEMENT_MARKERS)?,
        })
    }

    /// Classifies a message, dispatching on whether its sender is trusted.
    #[must_use]
    pub fn classify(
        &self,
        message: &Message,
        trusted: &TrustedSenderSet,
    ) -> ClassificationVerdict {
        let verdict = if trusted.contains(&message.sender.address) {
            let signals = if self.is_obviously_advertisement(message) {
                vec![Signal::ObviousAdvertisement]
            } else {
                Vec::new()
            };
            ClassificationVerdict::from_signals(Route::TrustedSender, signals)
        } else {
            self.heuristic_verdict(message)
        };

        trace!(
            sender = %message.sender.address,
            unwanted = verdict.unwanted,
            route = ?verdict.route,
            signals = verdict.signals.len(),
            "Classified message"
        );
        verdict
    }

    /// Full heuristic for untrusted senders.
    #[must_use]
    pub fn is_likely_unwanted(&self, message: &Message) -> bool {
        self.heuristic_verdict(message).unwanted
    }

    /// Full heuristic for untrusted senders, with every signal that fired.
    #[must_use]
    pub fn heuristic_verdict(&self, message: &Message) -> ClassificationVerdict {
        let subject = message.subject.as_str();
        let body = message.body.as_str();

        if self.is_plain_reply(subject, body) {
            return ClassificationVerdict::kept(Route::ReplyExemption);
        }

        let mut signals = Vec::new();

        if let Some(idx) = self.subject_keywords.matches(subject).iter().next() {
            signals.push(Signal::SubjectKeyword {
                pattern: SUBJECT_KEYWORDS[idx],
            });
        }

        if let Some(fragment) = bulk_local_part(&message.sender.local_part()) {
            signals.push(Signal::SenderLocalPart { fragment });
        }

        let domain = message.sender.domain();
        if let Some(fragment) = ADVERTISING_DOMAINS
            .iter()
            .copied()
            .find(|f| domain.contains(f))
        {
            signals.push(Signal::AdvertisingDomain { fragment });
        }

        if text::contains_emoji(subject) {
            signals.push(Signal::EmojiInSubject);
        }
        if text::contains_marketing_character(subject) {
            signals.push(Signal::MarketingCharacters);
        }
        if self.marketing_footer.is_match(body) {
            signals.push(Signal::MarketingFooter);
        }
        if text::is_excessively_capitalized(subject) {
            signals.push(Signal::ExcessiveCapitalization);
        }

        let score = self.spam_score(body);
        if score > SPAM_SCORE_THRESHOLD {
            signals.push(Signal::BodySpamScore { score });
        }

        if self.suspicious_links.is_match(body) {
            signals.push(Signal::SuspiciousLink);
        }
        if text::has_excessive_punctuation(subject) {
            signals.push(Signal::ExcessivePunctuation);
        }

        ClassificationVerdict::from_signals(Route::FullHeuristic, signals)
    }

    /// Reduced check for trusted senders.
    ///
    /// True only for an explicit marketing subject combined with an
    /// unsubscribe or do-not-reply marker in the body or sender address.
    #[must_use]
    pub fn is_obviously_advertisement(&self, message: &Message) -> bool {
        if !self.advertisement_subjects.is_match(&message.subject) {
            return false;
        }
        self.advertisement_markers.is_match(&message.body)
            || self
                .advertisement_markers
                .is_match(&message.sender.normalized_address())
    }

    /// Weighted phrase score of a message body.
    #[must_use]
    pub fn spam_score(&self, body: &str) -> f64 {
        let weighted = |patterns: &[Regex], weight: f64| -> f64 {
            patterns
                .iter()
                .map(|re| count_as_f64(re.find_iter(body).count()) * weight)
                .sum()
        };

        let mut score = weighted(&self.high_signal, HIGH_SIGNAL_WEIGHT)
            + weighted(&self.medium_signal, MEDIUM_SIGNAL_WEIGHT)
            + weighted(&self.low_signal, LOW_SIGNAL_WEIGHT);

        let urls = self.url.find_iter(body).count();
        for step in URL_COUNT_STEPS {
            if urls > step {
                score += 1.0;
            }
        }
        score
    }

    fn is_plain_reply(&self, subject: &str, body: &str) -> bool {
        self.reply_prefix.is_match(subject.trim())
            && !self.subject_keywords.is_match(subject)
            && !self.marketing_footer.is_match(body)
    }
}

/// First bulk-sender fragment found in a lower-cased local part.
fn bulk_local_part(local_part: &str) -> Option<&'static str> {
    SENDER_LOCAL_PARTS
        .iter()
        .copied()
        .find(|f| local_part.contains(f))
        .or_else(|| {
            local_part
                .split(LOCAL_PART_SEPARATORS)
                .find_map(|token| SENDER_LOCAL_TOKENS.iter().copied().find(|t| *t == token))
        })
}

#[allow(clippy::cast_precision_loss)] // Match counts are far below 2^52
fn count_as_f64(count: usize) -> f64 {
    count as f64
}

fn compile(table: &'static str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| Error::Pattern { table, source })
}

fn compile_set(table: &'static str, patterns: &[&str]) -> Result<RegexSet> {
    RegexSetBuilder::new(patterns)
        .case_insensitive(true)
        .build()
        .map_err(|source| Error::Pattern { table, source })
}

fn compile_each(table: &'static str, patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns.iter().map(|p| compile(table, p)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new().unwrap()
    }

    fn links(count: usize) -> String {
        (0..count)
            .map(|i| format!("http://example.com/page{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn kinds(verdict: &ClassificationVerdict) -> Vec<&'static str> {
        verdict.signals.iter().map(Signal::kind).collect()
    }

    #[test]
    fn test_builtin_tables_compile() {
        let classifier = classifier();
        assert_eq!(classifier.high_signal.len(), HIGH_SIGNAL_PHRASES.len());
        assert_eq!(classifier.subject_keywords.len(), SUBJECT_KEYWORDS.len());
    }

    #[test]
    fn test_promotional_mail_is_unwanted() {
        let message = Message::new("50% OFF - Unsubscribe now!", "promo@mailchimp.com");
        let verdict = classifier().classify(&message, &TrustedSenderSet::new());

        assert!(verdict.unwanted);
        assert_eq!(verdict.route, Route::FullHeuristic);
        let kinds = kinds(&verdict);
        assert!(kinds.contains(&"subject_keyword"));
        assert!(kinds.contains(&"sender_local_part"));
        assert!(kinds.contains(&"advertising_domain"));
        assert!(kinds.contains(&"marketing_characters"));
    }

    #[test]
    fn test_plain_reply_is_kept() {
        let message = Message::new("Re: Q2 Budget", "jane@company.com")
            .with_body("Let's finalize numbers by Friday.");
        let verdict = classifier().classify(&message, &TrustedSenderSet::new());

        assert!(!verdict.unwanted);
        assert_eq!(verdict.route, Route::ReplyExemption);
    }

    #[test]
    fn test_reply_with_marketing_footer_is_scored() {
        let message = Message::new("Re: Q2 Budget", "jane@company.com")
            .with_body("Thanks. To unsubscribe from these updates, visit your settings.");
        let verdict = classifier().classify(&message, &TrustedSenderSet::new());

        assert_eq!(verdict.route, Route::FullHeuristic);
        assert!(verdict.unwanted);
        assert_eq!(kinds(&verdict), vec!["marketing_footer"]);
    }

    #[test]
    fn test_reply_with_marketing_subject_is_scored() {
        let message = Message::new("Fwd: Black Friday sale", "jane@company.com");
        assert!(classifier().is_likely_unwanted(&message));
    }

    #[test]
    fn test_forward_prefixes() {
        let classifier = classifier();
        for subject in ["FW: contract draft", "fwd: contract draft", "  RE: contract draft"] {
            let verdict =
                classifier.heuristic_verdict(&Message::new(subject, "jane@company.com"));
            assert_eq!(verdict.route, Route::ReplyExemption, "{subject}");
        }
    }

    #[test]
    fn test_link_heavy_body_scores_above_threshold() {
        let body = format!("{} This is a limited time deal, so act now.", links(7));
        let classifier = classifier();
        assert_eq!(classifier.spam_score(&body), 4.0);

        let message = Message::new("Quarterly review notes", "jane@company.com").with_body(body);
        let verdict = classifier.classify(&message, &TrustedSenderSet::new());
        assert!(verdict.unwanted);
        assert_eq!(verdict.signals, vec![Signal::BodySpamScore { score: 4.0 }]);
    }

    #[test]
    fn test_spam_score_weights() {
        let classifier = classifier();
        assert_eq!(classifier.spam_score(""), 0.0);
        assert_eq!(classifier.spam_score("Claim your prize today"), 2.0);
        assert_eq!(classifier.spam_score("lottery lottery"), 4.0);
        assert_eq!(classifier.spam_score("Free trial"), 1.0);
        assert_eq!(classifier.spam_score("Learn more"), 0.5);
        assert_eq!(classifier.spam_score(&links(4)), 1.0);
        assert_eq!(classifier.spam_score(&links(6)), 1.0);
        assert_eq!(classifier.spam_score(&links(7)), 2.0);
    }

    #[test]
    fn test_score_at_threshold_is_not_spam() {
        let message = Message::new("Quarterly review notes", "jane@company.com")
            .with_body("limited time, act now, last chance");
        let classifier = classifier();
        assert_eq!(classifier.spam_score(&message.body), 3.0);
        assert!(!classifier.is_likely_unwanted(&message));
    }

    #[test]
    fn test_ordinary_message_is_kept() {
        let message = Message::new("Quarterly review notes", "jane@company.com")
            .with_body("Attached are the notes from Tuesday. See you next week.");
        let verdict = classifier().classify(&message, &TrustedSenderSet::new());
        assert!(!verdict.unwanted);
        assert!(verdict.signals.is_empty());
    }

    #[test]
    fn test_individual_subject_signals() {
        let classifier = classifier();
        let check = |subject: &str| {
            kinds(&classifier.heuristic_verdict(&Message::new(subject, "jane@company.com")))
        };

        assert_eq!(check("Team offsite \u{1F334}"), vec!["emoji_in_subject"]);
        assert_eq!(
            check("QUARTERLY REVIEW NOTES attached"),
            vec!["excessive_capitalization"]
        );
        assert_eq!(check("Report [SPAM]"), vec!["subject_keyword"]);
        assert!(check("Is this right??").contains(&"excessive_punctuation"));
    }

    #[test]
    fn test_suspicious_link_in_body() {
        let message = Message::new("Quarterly review notes", "jane@company.com")
            .with_body("Slides are at bit.ly/3xYz");
        assert_eq!(
            kinds(&classifier().heuristic_verdict(&message)),
            vec!["suspicious_link"]
        );
    }

    #[test]
    fn test_bulk_sender_address() {
        let classifier = classifier();
        let verdict =
            classifier.heuristic_verdict(&Message::new("Your statement", "NoReply@bank.com"));
        assert_eq!(
            verdict.signals,
            vec![Signal::SenderLocalPart { fragment: "noreply" }]
        );

        let verdict =
            classifier.heuristic_verdict(&Message::new("Your statement", "jane@em.sendgrid.net"));
        assert_eq!(
            verdict.signals,
            vec![Signal::AdvertisingDomain { fragment: "sendgrid" }]
        );
    }

    #[test]
    fn test_local_part_tokens_match_whole_tokens_only() {
        let classifier = classifier();
        let fragment = |address: &str| {
            let message = Message::new("Contract draft", address).with_body("See attached.");
            classifier
                .heuristic_verdict(&message)
                .signals
                .into_iter()
                .find_map(|signal| match signal {
                    Signal::SenderLocalPart { fragment } => Some(fragment),
                    _ => None,
                })
        };

        for address in [
            "bishop@lawfirm.com",
            "newsome@lawfirm.com",
            "pressley@lawfirm.com",
            "storey@lawfirm.com",
            "jreturnson@lawfirm.com",
            "othello@lawfirm.com",
            "rinfo@lawfirm.com",
            "stephenewson@lawfirm.com",
        ] {
            assert_eq!(fragment(address), None, "{address}");
        }

        assert_eq!(fragment("news@paper.com"), Some("news"));
        assert_eq!(fragment("team.news@paper.com"), Some("news"));
        assert_eq!(fragment("shop-eu@brand.com"), Some("shop"));
        assert_eq!(fragment("info+orders@brand.com"), Some("info"));
        assert_eq!(fragment("bounces.42@mail.brand.com"), Some("bounce"));
    }

    #[test]
    fn test_personal_sender_is_kept() {
        let message =
            Message::new("Contract draft", "Bishop@LawFirm.com").with_body("See attached.");
        let verdict = classifier().classify(&message, &TrustedSenderSet::new());
        assert!(!verdict.unwanted);
        assert!(verdict.signals.is_empty());
    }

    #[test]
    fn test_marketing_footer_phrases() {
        let classifier = classifier();
        let footers = [
            "To unsubscribe, reply STOP.",
            "You may opt out at any time.",
            "You may opt-out at any time.",
            "Trouble reading? View in browser.",
            "View this email in your browser.",
            "View it in your browser.",
            "Read our privacy policy.",
            "Manage your email preferences.",
            "Update your profile here.",
            "Update profile",
        ];

        for footer in footers {
            let body = format!("Numbers attached. {footer}");

            let fresh = Message::new("Quarterly review notes", "jane@company.com").with_body(&body);
            assert_eq!(
                kinds(&classifier.heuristic_verdict(&fresh)),
                vec!["marketing_footer"],
                "{footer}"
            );

            let reply = Message::new("Re: Q2 Budget", "jane@company.com").with_body(&body);
            let verdict = classifier.heuristic_verdict(&reply);
            assert_eq!(verdict.route, Route::FullHeuristic, "{footer}");
            assert!(verdict.unwanted, "{footer}");
        }
    }

    #[test]
    fn test_body_phrases_tolerate_non_breaking_spaces() {
        let classifier = classifier();
        let body = "Please click\u{a0}here. Limited\u{a0}time, act\u{a0}now, \
                    last\u{a0}chance, buy\u{a0}now";
        assert_eq!(classifier.spam_score(body), 4.0);

        let message = Message::new("Quarterly review notes", "jane@company.com").with_body(body);
        assert_eq!(
            kinds(&classifier.heuristic_verdict(&message)),
            vec!["body_spam_score", "suspicious_link"]
        );
    }

    #[test]
    fn test_trusted_sender_skips_full_heuristic() {
        let trusted: TrustedSenderSet = ["ceo@company.com"].into_iter().collect();
        let message = Message::new("URGENT!!! READ THIS NOW PLEASE", "CEO@company.com")
            .with_body("click here http://a http://b http://c http://d");
        let verdict = classifier().classify(&message, &trusted);

        assert_eq!(verdict.route, Route::TrustedSender);
        assert!(!verdict.unwanted);
    }

    #[test]
    fn test_trusted_sender_obvious_advertisement() {
        let trusted: TrustedSenderSet = ["events@company.com"].into_iter().collect();
        let classifier = classifier();

        let ad = Message::new("Company store: 20% off hoodies", "events@company.com")
            .with_body("Click to unsubscribe.");
        let verdict = classifier.classify(&ad, &trusted);
        assert!(verdict.unwanted);
        assert_eq!(verdict.signals, vec![Signal::ObviousAdvertisement]);

        let noreply = Message::new("Webinar recording", "no-reply@company.com");
        assert!(classifier.is_obviously_advertisement(&noreply));

        let no_marker = Message::new("Company store: 20% off hoodies", "events@company.com")
            .with_body("Grab one at the front desk.");
        assert!(!classifier.classify(&no_marker, &trusted).unwanted);
    }

    #[test]
    fn test_empty_message_is_kept() {
        let verdict = classifier().classify(&Message::default(), &TrustedSenderSet::new());
        assert!(!verdict.unwanted);
    }

    #[test]
    fn test_classifier_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Classifier>();
    }
}
