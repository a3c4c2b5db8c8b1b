//! Character-level subject checks that don't need regexes.

use crate::patterns::{EMOJI_RANGES, MARKETING_CHARACTERS};

/// Whether `text` contains an emoji or pictograph code point.
#[must_use]
pub fn contains_emoji(text: &str) -> bool {
    text.chars().any(|c| {
        let cp = u32::from(c);
        EMOJI_RANGES
            .iter()
            .any(|&(start, end)| (start..=end).contains(&cp))
    })
}

/// Whether `text` contains a promotional character.
#[must_use]
pub fn contains_marketing_character(text: &str) -> bool {
    text.chars().any(|c| MARKETING_CHARACTERS.contains(&c))
}

/// Whether more than half of the words in a 4+ word subject are shouting.
///
/// A word counts as upper-case when it is at least two characters long,
/// contains a letter, and has no lower-case letters.
#[must_use]
pub fn is_excessively_capitalized(subject: &str) -> bool {
    let words: Vec<&str> = subject.split_whitespace().collect();
    if words.len() <= 3 {
        return false;
    }
    let shouting = words.iter().filter(|w| is_upper_word(w)).count();
    shouting * 2 > words.len()
}

fn is_upper_word(word: &str) -> bool {
    word.chars().count() > 1
        && word.chars().any(char::is_alphabetic)
        && !word.chars().any(char::is_lowercase)
}

/// Whether `subject` has `!!`/`?!`-style runs or three or more `!`/`?`.
#[must_use]
pub fn has_excessive_punctuation(subject: &str) -> bool {
    let mut total = 0;
    let mut run = 0;
    for c in subject.chars() {
        if matches!(c, '!' | '?') {
            total += 1;
            run += 1;
            if run >= 2 || total >= 3 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}
