//! Module with the token type and its lexical attributes.
//!
//! A token carries its verbatim text, the information whether it is followed by whitespace and
//! a handful of optional annotations that an upstream pipeline may have assigned. All lexical
//! attributes (lowercase form, shape, punctuation flag and so on) are derived from the text on
//! demand.
use seshat::unicode::{props::Gc, Ucd};
use serde::{Deserialize, Serialize};

/// English number words recognized by [Token::like_num].
const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion", "trillion",
];

const BRACKETS: &[&str] = &["(", ")", "[", "]", "{", "}", "<", ">"];

const QUOTES: &[&str] = &[
    "\"", "'", "`", "\u{ab}", "\u{bb}", "\u{2018}", "\u{2019}", "\u{201a}", "\u{201c}",
    "\u{201d}", "\u{201e}", "''", "``",
];

/// A single token of a [crate::Doc].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    text: String,
    whitespace: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lemma: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dep: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ent_type: Option<String>,
}

impl Token {
    /// Create a new token that is followed by whitespace if `whitespace` is true.
    pub fn new(text: &str, whitespace: bool) -> Self {
        Self {
            text: text.to_string(),
            whitespace,
            ..Default::default()
        }
    }

    /// Set the fine-grained tag.
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    /// Set the coarse-grained part-of-speech.
    pub fn with_pos(mut self, pos: &str) -> Self {
        self.pos = Some(pos.to_string());
        self
    }

    /// Set the lemma.
    pub fn with_lemma(mut self, lemma: &str) -> Self {
        self.lemma = Some(lemma.to_string());
        self
    }

    /// Set the dependency label.
    pub fn with_dep(mut self, dep: &str) -> Self {
        self.dep = Some(dep.to_string());
        self
    }

    /// Set the entity type.
    pub fn with_ent_type(mut self, ent_type: &str) -> Self {
        self.ent_type = Some(ent_type.to_string());
        self
    }

    /// The verbatim text of the token.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True if the token is followed by whitespace.
    #[inline]
    pub fn whitespace(&self) -> bool {
        self.whitespace
    }

    /// The text followed by a single space if the token has trailing whitespace.
    pub fn text_with_ws(&self) -> String {
        if self.whitespace {
            format!("{} ", self.text)
        } else {
            self.text.clone()
        }
    }

    /// The fine-grained tag, if any.
    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// The coarse-grained part-of-speech, if any.
    #[inline]
    pub fn pos(&self) -> Option<&str> {
        self.pos.as_deref()
    }

    /// The lemma, if any.
    #[inline]
    pub fn lemma(&self) -> Option<&str> {
        self.lemma.as_deref()
    }

    /// The dependency label, if any.
    #[inline]
    pub fn dep(&self) -> Option<&str> {
        self.dep.as_deref()
    }

    /// The entity type, if any.
    #[inline]
    pub fn ent_type(&self) -> Option<&str> {
        self.ent_type.as_deref()
    }

    /// Set or clear the fine-grained tag.
    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }

    /// Set or clear the part-of-speech.
    pub fn set_pos(&mut self, pos: Option<String>) {
        self.pos = pos;
    }

    /// Set or clear the lemma.
    pub fn set_lemma(&mut self, lemma: Option<String>) {
        self.lemma = lemma;
    }

    /// Set or clear the dependency label.
    pub fn set_dep(&mut self, dep: Option<String>) {
        self.dep = dep;
    }

    /// Set or clear the entity type.
    pub fn set_ent_type(&mut self, ent_type: Option<String>) {
        self.ent_type = ent_type;
    }

    /// Lowercase form of the text.
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Uppercase form of the text.
    pub fn upper(&self) -> String {
        self.text.to_uppercase()
    }

    /// Number of characters of the text.
    pub fn length(&self) -> usize {
        self.text.chars().count()
    }

    /// The first character of the text.
    pub fn prefix(&self) -> String {
        self.text.chars().take(1).collect()
    }

    /// The last three characters of the text.
    pub fn suffix(&self) -> String {
        let len = self.length();
        self.text.chars().skip(len.saturating_sub(3)).collect()
    }

    /// Orthographic shape of the text.
    ///
    /// Uppercase letters become `X`, lowercase letters `x`, digits `d`, everything else is kept.
    /// Runs of the same shape character are cut off after four repetitions, e.g. `Apple` becomes
    /// `Xxxxx` and `Rustaceans` becomes `Xxxxx`.
    pub fn shape(&self) -> String {
        let mut shape = String::with_capacity(self.text.len());
        let mut last = None;
        let mut run = 0;
        for c in self.text.chars() {
            let s = if c.is_alphabetic() {
                if c.is_uppercase() {
                    'X'
                } else {
                    'x'
                }
            } else if c.is_numeric() {
                'd'
            } else {
                c
            };
            if Some(s) == last {
                run += 1;
            } else {
                run = 0;
                last = Some(s);
            }
            if run < 4 {
                shape.push(s);
            }
        }
        shape
    }

    /// True if the text consists of alphabetic characters only.
    pub fn is_alpha(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }

    /// True if the text consists of ASCII characters only.
    pub fn is_ascii(&self) -> bool {
        self.text.is_ascii()
    }

    /// True if the text consists of digits only.
    pub fn is_digit(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_numeric)
    }

    /// True if the text contains cased characters and all of them are lowercase.
    pub fn is_lower(&self) -> bool {
        let mut cased = self.text.chars().filter(|c| is_cased(*c)).peekable();
        cased.peek().is_some() && cased.all(char::is_lowercase)
    }

    /// True if the text contains cased characters and all of them are uppercase.
    pub fn is_upper(&self) -> bool {
        let mut cased = self.text.chars().filter(|c| is_cased(*c)).peekable();
        cased.peek().is_some() && cased.all(char::is_uppercase)
    }

    /// True if the text is titlecased, i.e. uppercase characters only follow uncased characters
    /// and lowercase characters only follow cased ones.
    pub fn is_title(&self) -> bool {
        let mut previous_cased = false;
        let mut has_cased = false;
        for c in self.text.chars() {
            if c.is_uppercase() {
                if previous_cased {
                    return false;
                }
                previous_cased = true;
                has_cased = true;
            } else if c.is_lowercase() {
                if !previous_cased {
                    return false;
                }
                previous_cased = true;
                has_cased = true;
            } else {
                previous_cased = false;
            }
        }
        has_cased
    }

    /// True if every character of the text belongs to a Unicode punctuation category.
    pub fn is_punct(&self) -> bool {
        !self.text.is_empty()
            && self.text.chars().all(|c| {
                matches!(
                    c.gc(),
                    Gc::Pc | Gc::Pd | Gc::Ps | Gc::Pe | Gc::Pi | Gc::Pf | Gc::Po
                )
            })
    }

    /// True if the text consists of whitespace only.
    pub fn is_space(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_whitespace)
    }

    /// True if the text is a bracket.
    pub fn is_bracket(&self) -> bool {
        BRACKETS.contains(&self.text.as_str())
    }

    /// True if the text is a quotation mark.
    pub fn is_quote(&self) -> bool {
        QUOTES.contains(&self.text.as_str())
    }

    /// True if the text resembles a number, e.g. `10`, `1,000.5`, `-3`, `1/2` or `ten`.
    pub fn like_num(&self) -> bool {
        let text = self
            .text
            .trim_start_matches(['+', '-', '~', '\u{b1}'])
            .replace([',', '.'], "");
        if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
        if let Some((numerator, denominator)) = text.split_once('/') {
            let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
            if digits(numerator) && digits(denominator) {
                return true;
            }
        }
        NUMBER_WORDS.contains(&self.lower().as_str())
    }

    /// True if the text resembles a URL.
    pub fn like_url(&self) -> bool {
        let text = self.lower();
        if text.starts_with("http://")
            || text.starts_with("https://")
            || text.starts_with("ftp://")
            || text.starts_with("www.")
        {
            return true;
        }
        if text.contains('@') || text.starts_with('.') || text.ends_with('.') {
            return false;
        }
        let mut parts = text.rsplitn(2, '.');
        match (parts.next(), parts.next()) {
            (Some(tld), Some(host)) => {
                let tld = tld.split(['/', '?', '#']).next().unwrap_or_default();
                (2..=6).contains(&tld.len())
                    && tld.chars().all(|c| c.is_ascii_alphabetic())
                    && !host.is_empty()
            }
            _ => false,
        }
    }

    /// True if the text resembles an email address.
    pub fn like_email(&self) -> bool {
        match self.text.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain
                        .split_once('.')
                        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            }
            None => false,
        }
    }
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase()
}
