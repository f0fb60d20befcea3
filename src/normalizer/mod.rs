// WHY: canonical letter stream is what palindromes are judged on, never the raw text
// Passes run in a fixed order: citations, marks, final forms, letter filter

use serde::Serialize;
use std::fmt;

pub mod alphabet;
pub mod references;

use alphabet::{fold_final, is_base_letter, is_strippable_mark};
use references::strip_references_into;

/// Which optional passes the normalizer applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationRules {
    /// Replace embedded chapter:verse citations with a space before anything else
    pub strip_references: bool,
}

impl Default for NormalizationRules {
    fn default() -> Self {
        Self { strip_references: true }
    }
}

impl NormalizationRules {
    /// Rules without citation stripping
    pub fn plain() -> Self {
        Self { strip_references: false }
    }
}

/// Ordered sequence of base Hebrew letters derived from a span of raw text.
/// Every element is one of the 22 base letters; final forms never appear.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct CanonicalForm(String);

impl CanonicalForm {
    pub(crate) fn from_normalized(letters: String) -> Self {
        debug_assert!(letters.chars().all(is_base_letter));
        Self(letters)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letters (code points, not bytes)
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn letters(&self) -> std::str::Chars<'_> {
        self.0.chars()
    }
}

impl fmt::Display for CanonicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalForm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for CanonicalForm {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Reusable intermediate buffers for the citation pass
/// WHY: the scanner normalizes every trial span, so buffers are reused across trials
#[derive(Debug, Default)]
pub struct NormalizeScratch {
    between: Vec<char>,
    stripped: Vec<char>,
}

/// Stateless text normalizer parameterized by its rules
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    rules: NormalizationRules,
}

impl Normalizer {
    pub fn new(rules: NormalizationRules) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self::new(NormalizationRules::default())
    }

    /// Normalize text with a new allocation
    pub fn normalize(&self, text: &str) -> CanonicalForm {
        let mut buffer = String::with_capacity(text.len());
        self.normalize_into(text, &mut buffer);
        CanonicalForm::from_normalized(buffer)
    }

    /// Normalize text into supplied buffer, returning the letter count
    pub fn normalize_into(&self, text: &str, buffer: &mut String) -> usize {
        let chars: Vec<char> = text.chars().collect();
        let mut scratch = NormalizeScratch::default();
        self.normalize_chars_into(&chars, &mut scratch, buffer)
    }

    /// Normalize an already decoded span into `buffer`, returning the letter count.
    /// `buffer` is cleared first.
    pub fn normalize_chars_into(
        &self,
        chars: &[char],
        scratch: &mut NormalizeScratch,
        buffer: &mut String,
    ) -> usize {
        buffer.clear();

        if self.rules.strip_references {
            strip_references_into(chars, &mut scratch.between, &mut scratch.stripped);
            push_letters(scratch.stripped.iter().copied(), buffer)
        } else {
            push_letters(chars.iter().copied(), buffer)
        }
    }
}

/// Mark removal, final folding and letter filtering over an already stripped stream
fn push_letters<I>(chars: I, buffer: &mut String) -> usize
where
    I: Iterator<Item = char>,
{
    let mut count = 0;
    for ch in chars {
        if is_strippable_mark(ch) {
            continue;
        }
        let ch = fold_final(ch);
        if is_base_letter(ch) {
            buffer.push(ch);
            count += 1;
        }
    }
    count
}

/// Normalize text with the default (reference-aware) rules
pub fn normalize(text: &str) -> CanonicalForm {
    Normalizer::with_default_rules().normalize(text)
}

/// Normalize text into supplied buffer with the default rules
pub fn normalize_into(text: &str, buffer: &mut String) -> usize {
    Normalizer::with_default_rules().normalize_into(text, buffer)
}
