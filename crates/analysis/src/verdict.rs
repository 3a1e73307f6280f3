use std::str::FromStr;

use serde::{Deserialize, Serialize};

use common::Error;

/// Recommendation parsed from a language-model reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    BuyCall,
    BuyPut,
    Wait,
}

const KEYWORDS: [(&str, Verdict); 3] = [
    ("BUY_CALL", Verdict::BuyCall),
    ("BUY_PUT", Verdict::BuyPut),
    ("WAIT", Verdict::Wait),
];

impl Verdict {
    /// Parse a free-text reply such as `"**BUY_CALL** - momentum is strong"`.
    ///
    /// The earliest keyword wins, so a reason that mentions another verdict
    /// later on does not change the outcome.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let normalized = normalize(text);
        KEYWORDS
            .iter()
            .filter_map(|(keyword, verdict)| {
                find_word(&normalized, keyword).map(|pos| (pos, *verdict))
            })
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, verdict)| verdict)
            .ok_or_else(|| Error::Verdict(text.chars().take(80).collect()))
    }

    /// Whether the verdict asks for a position (and so warrants an alert).
    pub fn is_trade(&self) -> bool {
        matches!(self, Verdict::BuyCall | Verdict::BuyPut)
    }
}

impl FromStr for Verdict {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verdict::parse(s)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::BuyCall => write!(f, "BUY_CALL"),
            Verdict::BuyPut => write!(f, "BUY_PUT"),
            Verdict::Wait => write!(f, "WAIT"),
        }
    }
}

/// Uppercase, with runs of spaces/hyphens between words collapsed to `_`
/// and every other non-alphanumeric character turned into a space.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_join = false;
    for c in text.chars() {
        if c == ' ' || c == '-' || c == '_' {
            pending_join = true;
            continue;
        }
        if pending_join {
            let prev_alnum = out.chars().last().is_some_and(|p| p.is_ascii_alphanumeric());
            out.push(if prev_alnum && c.is_ascii_alphanumeric() { '_' } else { ' ' });
            pending_join = false;
        }
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(' ');
        }
    }
    out
}

/// Position of `word` in `haystack` where it is not glued to other letters.
fn find_word(haystack: &str, word: &str) -> Option<usize> {
    haystack.match_indices(word).map(|(pos, _)| pos).find(|&pos| {
        let before = haystack[..pos].chars().last();
        let after = haystack[pos + word.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_alphanumeric())
            && !after.is_some_and(|c| c.is_ascii_alphanumeric())
    })
}
