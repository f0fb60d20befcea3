// WHY: chapter:verse citations embedded in quoted verses are read as Hebrew letters
// Explicit small-window scanner over code points, run before any other normalization pass

use super::alphabet::{is_combining_mark, is_hebrew_letter};

/// Longest letter group accepted on either side of a citation
pub const MAX_GROUP_LEN: usize = 3;

/// Characters that may open a citation, or begin a span the scanner must try
pub const REFERENCE_OPENERS: &[char] = &['"', '\u{05F4}', '(', '['];

const PAIR_OPENERS: &[char] = &['"', '\u{05F4}', '('];
const PAIR_CLOSERS: &[char] = &['"', '\u{05F4}', ')'];
const PAIR_SEPARATORS: &[char] = &[',', ':'];
const BRACKET_OPENERS: &[char] = &['(', '['];
const BRACKET_CLOSERS: &[char] = &[')', ']'];

/// Replacement emitted for every stripped citation
pub const REPLACEMENT: char = ' ';

#[inline]
pub fn is_reference_opener(ch: char) -> bool {
    REFERENCE_OPENERS.contains(&ch)
}

/// Letters and combining marks both belong to a word for run-boundary purposes
#[inline]
fn is_word_char(ch: char) -> bool {
    is_hebrew_letter(ch) || is_combining_mark(ch)
}

/// Length of the Hebrew letter run starting at `pos`
fn letter_run(chars: &[char], pos: usize) -> usize {
    chars[pos.min(chars.len())..]
        .iter()
        .take_while(|&&c| is_hebrew_letter(c))
        .count()
}

/// Length of a 1-3 letter group at `pos`, if the run there is short enough
fn short_group(chars: &[char], pos: usize) -> Option<usize> {
    let run = letter_run(chars, pos);
    (1..=MAX_GROUP_LEN).contains(&run).then_some(run)
}

fn starts_word_boundary(chars: &[char], pos: usize) -> bool {
    pos == 0 || !is_word_char(chars[pos - 1])
}

fn ends_word_boundary(chars: &[char], pos: usize) -> bool {
    !matches!(chars.get(pos), Some(&c) if is_word_char(c))
}

/// Try to match a separated pair (`"אב,גד"`, `(א:ב)`, `יב,ג`) starting exactly at `pos`.
/// Returns the end position (exclusive) of the match.
pub fn match_separated_pair(chars: &[char], pos: usize) -> Option<usize> {
    let mut cursor = pos;
    let first = *chars.get(cursor)?;

    if PAIR_OPENERS.contains(&first) {
        cursor += 1;
    } else if !starts_word_boundary(chars, cursor) {
        return None;
    }

    cursor += short_group(chars, cursor)?;

    if !chars.get(cursor).is_some_and(|c| PAIR_SEPARATORS.contains(c)) {
        return None;
    }
    cursor += 1;

    cursor += short_group(chars, cursor)?;
    if !ends_word_boundary(chars, cursor) {
        return None;
    }

    if chars.get(cursor).is_some_and(|c| PAIR_CLOSERS.contains(c)) {
        cursor += 1;
    }

    Some(cursor)
}

/// Try to match a bracketed pair (`(אב גד)`, `[א ב]`) starting exactly at `pos`.
/// Returns the end position (exclusive) of the match.
pub fn match_bracketed_pair(chars: &[char], pos: usize) -> Option<usize> {
    let mut cursor = pos;

    if !chars.get(cursor).is_some_and(|c| BRACKET_OPENERS.contains(c)) {
        return None;
    }
    cursor += 1;

    cursor += short_group(chars, cursor)?;

    let gap = chars[cursor..].iter().take_while(|c| c.is_whitespace()).count();
    if gap == 0 {
        return None;
    }
    cursor += gap;

    cursor += short_group(chars, cursor)?;

    if !chars.get(cursor).is_some_and(|c| BRACKET_CLOSERS.contains(c)) {
        return None;
    }

    Some(cursor + 1)
}

/// Leftmost-first, non-overlapping replacement of one citation shape
fn replace_matches<F>(input: &[char], output: &mut Vec<char>, matcher: F) -> usize
where
    F: Fn(&[char], usize) -> Option<usize>,
{
    output.clear();
    output.reserve(input.len());

    let mut replaced = 0;
    let mut pos = 0;
    while pos < input.len() {
        match matcher(input, pos) {
            Some(end) => {
                output.push(REPLACEMENT);
                replaced += 1;
                pos = end;
            }
            None => {
                output.push(input[pos]);
                pos += 1;
            }
        }
    }
    replaced
}

/// Strip both citation shapes, separated pairs first, bracketed pairs second.
/// `scratch` holds the intermediate stream between the two passes.
pub fn strip_references_into(input: &[char], scratch: &mut Vec<char>, output: &mut Vec<char>) -> usize {
    let first = replace_matches(input, scratch, match_separated_pair);
    let second = replace_matches(scratch, output, match_bracketed_pair);
    first + second
}

/// Allocating convenience wrapper over [`strip_references_into`]
pub fn strip_references(text: &str) -> String {
    let input: Vec<char> = text.chars().collect();
    let mut scratch = Vec::new();
    let mut output = Vec::new();
    strip_references_into(&input, &mut scratch, &mut output);
    output.into_iter().collect()
}
