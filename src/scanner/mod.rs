// WHY: enumerates spans of the original text and judges each on its canonical form
// Enumeration only appends raw matches; deduplication runs afterwards in resolve

use serde::Serialize;
use tracing::{debug, warn};

pub mod palindrome;
pub mod resolve;

pub use palindrome::{is_palindrome, MIN_PALINDROME_LEN};
pub use resolve::{resolve, resolve_with, ResolveKey};

use crate::error::ScanError;
use crate::normalizer::alphabet::is_hebrew_letter;
use crate::normalizer::references::is_reference_opener;
use crate::normalizer::{CanonicalForm, NormalizationRules, NormalizeScratch, Normalizer};

pub const DEFAULT_MIN_LENGTH: usize = 3;
pub const DEFAULT_MAX_LENGTH: usize = 50;

/// Raw spans longer than `raw_span_factor * max_length` code points are not extended
pub const DEFAULT_RAW_SPAN_FACTOR: usize = 4;

/// Half-open span of the original text in code points (combining marks count)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RawSpan {
    pub start: usize,
    pub end: usize,
}

impl RawSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A palindrome found in the text.
/// `length == canonical.len()` and `canonical` is always a palindrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub canonical: CanonicalForm,
    /// Trimmed text of the raw span the palindrome was read from
    pub original: String,
    pub length: usize,
    /// Position of `original` in the scanned text
    pub span: RawSpan,
}

impl Match {
    /// Length of the original text in code points
    pub fn original_len(&self) -> usize {
        self.original.chars().count()
    }
}

/// Deduplicated matches ordered by non-increasing length
pub type MatchSet = Vec<Match>;

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub min_length: usize,
    pub max_length: usize,
    pub raw_span_factor: usize,
    pub rules: NormalizationRules,
    pub resolve_key: ResolveKey,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            raw_span_factor: DEFAULT_RAW_SPAN_FACTOR,
            rules: NormalizationRules::default(),
            resolve_key: ResolveKey::default(),
        }
    }
}

impl ScanConfig {
    pub fn with_range(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.min_length == 0 || self.max_length == 0 || self.min_length > self.max_length {
            return Err(ScanError::InvalidRange {
                min_length: self.min_length,
                max_length: self.max_length,
            });
        }
        if self.raw_span_factor == 0 {
            return Err(ScanError::InvalidSpanFactor);
        }
        Ok(())
    }
}

/// Palindrome scanner over a validated configuration
#[derive(Debug, Clone)]
pub struct PalindromeScanner {
    config: ScanConfig,
    normalizer: Normalizer,
}

impl PalindromeScanner {
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;
        let normalizer = Normalizer::new(config.rules);
        Ok(Self { config, normalizer })
    }

    pub fn with_default_config() -> Self {
        Self {
            config: ScanConfig::default(),
            normalizer: Normalizer::with_default_rules(),
        }
    }

    /// Find every palindromic span of `text` and resolve them into a [`MatchSet`].
    ///
    /// Enumeration is O(n²) over code point offsets, and each trial span is
    /// normalized in full, so this is meant for verse- or paragraph-sized input.
    /// Citation stripping can depend on characters anywhere in the span, so
    /// trials are never normalized incrementally.
    pub fn scan(&self, text: &str) -> MatchSet {
        let raw_matches = self.collect_raw_matches(text);
        resolve_with(raw_matches, self.config.resolve_key)
    }

    /// First stage: every palindromic trial span, in enumeration order, undeduplicated
    pub fn collect_raw_matches(&self, text: &str) -> Vec<Match> {
        let decoded: Vec<(usize, char)> = text.char_indices().collect();
        let chars: Vec<char> = decoded.iter().map(|&(_, ch)| ch).collect();
        let char_count = chars.len();

        let min_length = self.config.min_length.max(MIN_PALINDROME_LEN);
        let max_length = self.config.max_length;
        let raw_limit = max_length.saturating_mul(self.config.raw_span_factor);

        let byte_offset = |pos: usize| decoded.get(pos).map_or(text.len(), |&(byte, _)| byte);

        let mut scratch = NormalizeScratch::default();
        let mut canonical = String::new();
        let mut raw_matches = Vec::new();
        let mut starts_tried = 0usize;

        for start in 0..char_count {
            if !self.can_open_span(chars[start]) {
                continue;
            }
            starts_tried += 1;

            for end in (start + 1)..=char_count {
                if end - start > raw_limit {
                    break;
                }

                let letters = self.normalizer.normalize_chars_into(
                    &chars[start..end],
                    &mut scratch,
                    &mut canonical,
                );
                // a citation still open at `end` counts its letters until it closes,
                // so a palindrome that needs the citation stripped can be cut off here
                if letters > max_length {
                    break;
                }
                if letters < min_length || !is_palindrome(&canonical) {
                    continue;
                }

                let span = trim_span(&chars, start, end);
                raw_matches.push(Match {
                    canonical: CanonicalForm::from_normalized(canonical.clone()),
                    original: text[byte_offset(span.start)..byte_offset(span.end)].to_string(),
                    length: letters,
                    span,
                });
            }
        }

        debug!(
            chars = char_count,
            starts_tried,
            raw_matches = raw_matches.len(),
            "Enumerated palindrome candidates"
        );
        raw_matches
    }

    /// Hebrew letters always open a span; citation openers only when citations are stripped
    fn can_open_span(&self, ch: char) -> bool {
        is_hebrew_letter(ch) || (self.config.rules.strip_references && is_reference_opener(ch))
    }
}

impl Default for PalindromeScanner {
    fn default() -> Self {
        Self::with_default_config()
    }
}

/// Narrow `[start, end)` past leading and trailing whitespace
fn trim_span(chars: &[char], start: usize, end: usize) -> RawSpan {
    let window = &chars[start..end];
    let leading = window.iter().take_while(|c| c.is_whitespace()).count();
    let trailing = window[leading..]
        .iter()
        .rev()
        .take_while(|c| c.is_whitespace())
        .count();
    RawSpan {
        start: start + leading,
        end: end - trailing,
    }
}

/// Validating entry point: rejects malformed ranges instead of returning nothing
pub fn try_find_palindromes(
    text: &str,
    min_length: usize,
    max_length: usize,
) -> Result<MatchSet, ScanError> {
    let scanner = PalindromeScanner::new(ScanConfig::with_range(min_length, max_length))?;
    Ok(scanner.scan(text))
}

/// Find palindromes with the reference-aware rules.
/// A malformed range yields an empty [`MatchSet`]; use [`try_find_palindromes`]
/// to get the error instead.
pub fn find_palindromes(text: &str, min_length: usize, max_length: usize) -> MatchSet {
    match try_find_palindromes(text, min_length, max_length) {
        Ok(matches) => matches,
        Err(e) => {
            warn!("Returning no palindromes: {}", e);
            Vec::new()
        }
    }
}
