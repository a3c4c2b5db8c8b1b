//! Static pattern tables used by the classifier.
//!
//! Every regex table is compiled case-insensitively. Substring tables
//! (`SENDER_LOCAL_PARTS`, `ADVERTISING_DOMAINS`) are matched against the
//! lower-cased address, so their entries must stay lower-case.

/// Subject phrases that mark a message as marketing or spam.
pub const SUBJECT_KEYWORDS: &[&str] = &[
    r"\bnewsletter\b",
    r"\bunsubscribe\b",
    r"\bsubscribe\b",
    r"\bsubscription\b",
    r"\bfree\b",
    r"\bclick\b",
    r"\blottery\b",
    r"\bjackpot\b",
    r"\bbitcoin\b",
    r"\bcrypto(currency)?\b",
    r"\bwinner\b",
    r"\byou('ve| have)? won\b",
    r"\bcongratulations\b",
    r"\bprize\b",
    r"\bcash bonus\b",
    r"\bcashback\b",
    r"\bdiscount\b",
    r"\d+\s*%\s*off\b",
    r"\bsale\b",
    r"\bclearance\b",
    r"\bcoupon\b",
    r"\bpromo(tion|tional)?\b",
    r"\bpromo code\b",
    r"\bdeal of the day\b",
    r"\bhot deals?\b",
    r"\bspecial offer\b",
    r"\bexclusive\b",
    r"\blimited[- ]time\b",
    r"\bact now\b",
    r"\bbuy now\b",
    r"\bshop now\b",
    r"\border now\b",
    r"\bdon'?t miss\b",
    r"\blast chance\b",
    r"\bfinal hours?\b",
    r"\bends tonight\b",
    r"\bsave (up to|big|now)\b",
    r"\bgift card\b",
    r"\bearn money\b",
    r"\bmake money\b",
    r"\bwork from home\b",
    r"\bweight loss\b",
    r"\bviagra\b",
    r"\bcasino\b",
    r"\bpre-?approved\b",
    r"\bcredit score\b",
    r"\brisk[- ]free\b",
    r"\bno obligation\b",
    r"\bguaranteed?\b",
    r"\brefinance\b",
    r"\binheritance\b",
    r"\bbeneficiary\b",
    r"\bwire transfer\b",
    r"\binvestment opportunity\b",
    r"\bdouble your\b",
    r"\burgent (action|response) required\b",
    r"\baccount (suspended|verification)\b",
    r"\bverify your account\b",
    r"\bpassword (expired|expiry)\b",
    r"\bwebinar\b",
    r"\bdigest\b",
    r"\bweekly (roundup|update|recap)\b",
    r"\bmonthly (newsletter|update)\b",
    r"\bannouncing\b",
    r"\bintroducing\b",
    r"\bnew arrivals?\b",
    r"\bblack friday\b",
    r"\bcyber monday\b",
    r"\btrending\b",
    r"\brecommended for you\b",
    r"\bjust for you\b",
    r"\bmembers only\b",
    r"\brewards?\b",
    r"\bvip\b",
    r"\[spam\]",
    r"\[ad\]",
    r"\[advert(isement)?\]",
    r"\[promo(tion)?\]",
    r"\[marketing\]",
    r"\[bulk\]",
    r"\bdelivery status notification\b",
    r"\bundeliverable\b",
    r"\bundelivered mail\b",
    r"\bmail delivery (failed|failure|subsystem)\b",
    r"\bdelivery (failure|has failed)\b",
    r"\breturned mail\b",
    r"\bautomatic reply\b",
    r"\bout of office\b",
];

/// Substrings of the sender local part used by bulk and automated senders.
///
/// Matched anywhere in the local part, so entries must be long or unusual
/// enough not to occur inside personal usernames.
pub const SENDER_LOCAL_PARTS: &[&str] = &[
    "noreply",
    "no-reply",
    "no_reply",
    "donotreply",
    "do-not-reply",
    "do_not_reply",
    "dontreply",
    "mailer",
    "postmaster",
    "bounce",
    "marketing",
    "newsletter",
    "promo",
    "notification",
    "automated",
    "auto-confirm",
    "autoreply",
    "webmaster",
    "listserv",
    "mailinglist",
    "mailings",
    "subscriptions",
    "mailout",
];

/// Whole local-part tokens used by bulk and automated senders.
///
/// Matched only against tokens of the local part split on `.`, `-`, `_`
/// and `+`, so `news@` and `team.news@` match but `newsome@` does not.
pub const SENDER_LOCAL_TOKENS: &[&str] = &[
    "return",
    "offers",
    "deals",
    "sales",
    "news",
    "enews",
    "shop",
    "store",
    "info",
    "hello",
    "contact",
    "support",
    "service",
    "billing",
    "invoice",
    "receipts",
    "orders",
    "shipping",
    "delivery",
    "notify",
    "alert",
    "alerts",
    "updates",
    "digest",
    "announce",
    "system",
    "daemon",
    "robot",
    "admin",
    "campaign",
    "bulk",
    "blast",
    "broadcast",
    "events",
    "community",
    "social",
    "feedback",
    "survey",
    "rewards",
    "loyalty",
    "membership",
    "subscribe",
    "account",
    "security",
    "verify",
    "welcome",
    "crm",
    "press",
    "careers",
];

/// Separators between local-part tokens.
pub const LOCAL_PART_SEPARATORS: &[char] = &['.', '-', '_', '+'];

/// Domain fragments of email-service providers and advertising platforms.
pub const ADVERTISING_DOMAINS: &[&str] = &[
    "mailchimp",
    "mcsv.net",
    "mcdlv.net",
    "list-manage",
    "rsgsv.net",
    "sendgrid",
    "constantcontact",
    "ccsend",
    "createsend",
    "cmail",
    "klaviyo",
    "hubspot",
    "hs-email",
    "marketo",
    "mktomail",
    "pardot",
    "exacttarget",
    "exct.net",
    "responsys",
    "sailthru",
    "mailgun",
    "sparkpost",
    "amazonses",
    "mandrill",
    "postmarkapp",
    "sendinblue",
    "brevo",
    "mailjet",
    "getresponse",
    "aweber",
    "convertkit",
    "drip",
    "activecampaign",
    "acems",
    "emarsys",
    "omnisend",
    "mailerlite",
    "moosend",
    "benchmarkemail",
    "icontact",
    "verticalresponse",
    "emailoctopus",
    "substack",
    "beehiiv",
    "buttondown",
    "mailpoet",
    "sendy",
    "listrak",
    "bronto",
    "cheetahmail",
    "epsilon",
    "iterable",
    "braze",
    "customeriomail",
    "sendpulse",
    "zcsend",
    "elasticemail",
    "smtp2go",
    "mailersend",
    "sendlane",
];

/// Subject characters typical of promotional mail.
pub const MARKETING_CHARACTERS: &[char] = &[
    '!', '$', '%', '*', '\u{1F525}', '\u{1F4B0}', '\u{1F381}', '\u{26A1}', '\u{2728}',
    '\u{1F389}', '\u{1F4AF}', '\u{1F449}', '\u{2B50}', '\u{2757}', '\u{203C}',
];

/// Inclusive code point ranges treated as emoji or pictographs.
pub const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F300, 0x1F5FF),
    (0x1F600, 0x1F64F),
    (0x1F680, 0x1F6FF),
    (0x1F700, 0x1F77F),
    (0x1F780, 0x1F7FF),
    (0x1F800, 0x1F8FF),
    (0x1F900, 0x1F9FF),
    (0x1FA00, 0x1FAFF),
    (0x1F1E6, 0x1F1FF),
    (0x2600, 0x26FF),
    (0x2700, 0x27BF),
    (0x2B50, 0x2B50),
    (0x2B55, 0x2B55),
];

/// Body footer phrases found in bulk mail.
pub const MARKETING_FOOTER: &[&str] = &[
    r"\bunsubscribe\b",
    r"\bopt[\s-]*out\b",
    r"\bview\s+(it\s+)?(this\s+email\s+)?in\s+(your\s+)?browser\b",
    r"\bprivacy\s+policy\b",
    r"\bemail\s+preferences\b",
    r"\bupdate\s+(your\s+)?profile\b",
];

/// Subject prefixes of replies and forwards.
pub const REPLY_PREFIX: &str = r"^(re:|fwd:|fw:)";

/// Body phrases worth two points each.
pub const HIGH_SIGNAL_PHRASES: &[&str] = &[
    r"\bviagra\b",
    r"\bcialis\b",
    r"\bonline\s+pharmacy\b",
    r"\bprescription\s+drugs?\b",
    r"\blottery\b",
    r"\byou('ve|\s+have)\s+won\b",
    r"\bclaim\s+your\s+(prize|reward)\b",
    r"\bjackpot\b",
    r"\bbitcoin\b",
    r"\bcrypto(currency)?\b",
    r"\bdouble\s+your\s+(money|investment|bitcoin)\b",
    r"\bget\s+rich\s+quick\b",
    r"\bmake\s+\$?\d+k?\s+(a|per)\s+(day|week)\b",
    r"\bnigerian\s+prince\b",
    r"\binheritance\b",
    r"\bbeneficiary\b",
    r"\bwire\s+transfer\b",
    r"\bwestern\s+union\b",
    r"\birs\b",
    r"\binternal\s+revenue\s+service\b",
    r"\bsocial\s+security\s+(number|administration)\b",
    r"\bcustoms\s+(duty|clearance)\b",
    r"\byour\s+account\s+(has\s+been|will\s+be)\s+(suspended|closed)\b",
    r"\bverify\s+your\s+(account|identity)\b",
    r"\bcasino\b",
    r"\bmiracle\s+cure\b",
];

/// Body phrases worth one point each.
pub const MEDIUM_SIGNAL_PHRASES: &[&str] = &[
    r"\blimited[\s-]time\b",
    r"\bact\s+now\b",
    r"\bspecial\s+offer\b",
    r"\bexclusive\s+deal\b",
    r"\bdon'?t\s+miss\s+(out|this)\b",
    r"\blast\s+chance\b",
    r"\bexpires?\s+(soon|today|tonight)\b",
    r"\bmoney[\s-]back\s+guarantee\b",
    r"\b100%\s+guaranteed\b",
    r"\brisk[\s-]free\b",
    r"\bno\s+obligation\b",
    r"\bfree\s+trial\b",
    r"\bfree\s+gift\b",
    r"\blowest\s+price\b",
    r"\bbest\s+price\b",
    r"\border\s+now\b",
    r"\bbuy\s+now\b",
    r"\bsave\s+big\b",
    r"\bdiscount\b",
    r"\d+\s*%\s*off\b",
    r"\bcall\s+now\b",
];

/// Body phrases worth half a point each.
pub const LOW_SIGNAL_PHRASES: &[&str] = &[
    r"\blearn\s+more\b",
    r"\bsign\s+up\b",
    r"\bsubscribe\b",
    r"\bshop\s+now\b",
    r"\bfind\s+out\s+more\b",
    r"\bread\s+more\b",
    r"\bget\s+started\b",
    r"\bvisit\s+our\s+website\b",
    r"\bfollow\s+us\b",
    r"\bdownload\s+now\b",
];

/// Raw link occurrences in a body.
pub const URL_PATTERN: &str = r"https?://";

/// Shortened links and generic calls to action.
pub const SUSPICIOUS_LINKS: &[&str] = &[
    r"\bbit\.ly\b",
    r"\btinyurl\b",
    r"\bgoo\.gl\b",
    r"\bclick\s+here\b",
    r"\bclick\s+this\s+link\b",
];

/// Explicit advertisement subjects, checked for trusted senders only.
pub const ADVERTISEMENT_SUBJECTS: &[&str] = &[
    r"\d+\s*%\s*off\b",
    r"\bsale\b",
    r"\bspecial offer\b",
    r"\blimited[- ]time offer\b",
    r"\bpromo code\b",
    r"\bcoupon\b",
    r"\bfree shipping\b",
    r"\bnewsletter\b",
    r"\bwebinar\b",
    r"\bexclusive (deal|offer)\b",
    r"\bbuy now\b",
    r"\bshop now\b",
    r"\bdiscount\b",
    r"\bblack friday\b",
    r"\bcyber monday\b",
];

/// Bulk-mail markers in a trusted sender's body or address.
pub const ADVERTISEMENT_MARKERS: &[&str] = &[
    r"\bunsubscribe\b",
    r"\bopt[\s-]*out\b",
    r"\bdo[\s_-]*not[\s_-]*reply\b",
    r"\bno[\s_-]?reply\b",
    r"donotreply",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_tables_are_lowercase() {
        for entry in SENDER_LOCAL_PARTS
            .iter()
            .chain(SENDER_LOCAL_TOKENS)
            .chain(ADVERTISING_DOMAINS)
        {
            assert_eq!(*entry, entry.to_lowercase(), "{entry} must be lower-case");
        }
    }

    #[test]
    fn test_local_tokens_have_no_separators() {
        for token in SENDER_LOCAL_TOKENS {
            assert!(!token.contains(LOCAL_PART_SEPARATORS), "{token}");
        }
    }

    #[test]
    fn test_emoji_ranges_are_ordered() {
        for (start, end) in EMOJI_RANGES {
            assert!(start <= end);
        }
    }
}
