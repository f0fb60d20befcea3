// WHY: single source of truth for the Hebrew code point tables
// Both the citation scanner and the letter filter must agree on what a letter is

/// First code point of the Hebrew letter block (alef)
pub const ALEF: char = '\u{05D0}';

/// Last code point of the Hebrew letter block (tav)
pub const TAV: char = '\u{05EA}';

/// Inclusive range of vowel points, cantillation marks and related signs
pub const MARK_RANGE: std::ops::RangeInclusive<char> = '\u{0591}'..='\u{05C7}';

/// Final (sofit) forms paired with their regular forms
pub const FINAL_FORMS: [(char, char); 5] = [
    ('\u{05DA}', '\u{05DB}'), // final kaf -> kaf
    ('\u{05DD}', '\u{05DE}'), // final mem -> mem
    ('\u{05DF}', '\u{05E0}'), // final nun -> nun
    ('\u{05E3}', '\u{05E4}'), // final pe -> pe
    ('\u{05E5}', '\u{05E6}'), // final tsadi -> tsadi
];

/// Any Hebrew letter, final forms included
#[inline]
pub fn is_hebrew_letter(ch: char) -> bool {
    (ALEF..=TAV).contains(&ch)
}

/// One of the 22 base letters (final forms excluded)
#[inline]
pub fn is_base_letter(ch: char) -> bool {
    is_hebrew_letter(ch) && !is_final_form(ch)
}

#[inline]
pub fn is_final_form(ch: char) -> bool {
    FINAL_FORMS.iter().any(|&(fin, _)| fin == ch)
}

/// Code point removed by the mark pass
#[inline]
pub fn is_strippable_mark(ch: char) -> bool {
    MARK_RANGE.contains(&ch)
}

/// Combining marks proper (general category Mn inside the Hebrew block)
/// WHY: a letter run touching one of these continues a pointed word, while
/// maqaf, paseq and sof pasuq in the same range are punctuation
#[inline]
pub fn is_combining_mark(ch: char) -> bool {
    matches!(ch,
        '\u{0591}'..='\u{05BD}'
        | '\u{05BF}'
        | '\u{05C1}'..='\u{05C2}'
        | '\u{05C4}'..='\u{05C5}'
        | '\u{05C7}')
}

/// Rewrite a final form to its regular form, leave everything else alone
#[inline]
pub fn fold_final(ch: char) -> char {
    FINAL_FORMS
        .iter()
        .find(|&&(fin, _)| fin == ch)
        .map(|&(_, base)| base)
        .unwrap_or(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_alphabet_has_22_letters() {
        let count = (ALEF..=TAV).filter(|&c| is_base_letter(c)).count();
        assert_eq!(count, 22);
    }

    #[test]
    fn test_fold_final_forms() {
        assert_eq!(fold_final('ך'), 'כ');
        assert_eq!(fold_final('ם'), 'מ');
        assert_eq!(fold_final('ן'), 'נ');
        assert_eq!(fold_final('ף'), 'פ');
        assert_eq!(fold_final('ץ'), 'צ');
        assert_eq!(fold_final('א'), 'א');
        assert_eq!(fold_final('x'), 'x');
    }

    #[test]
    fn test_every_fold_lands_on_base_letter() {
        for &(fin, base) in &FINAL_FORMS {
            assert!(is_final_form(fin));
            assert!(is_base_letter(base));
            assert!(!is_base_letter(fin));
        }
    }

    #[test]
    fn test_marks_versus_punctuation() {
        // patah, qamats, dagesh, etnahta
        for mark in ['\u{05B7}', '\u{05B8}', '\u{05BC}', '\u{0591}'] {
            assert!(is_strippable_mark(mark));
            assert!(is_combining_mark(mark));
        }
        // maqaf, paseq, sof pasuq are stripped but do not glue letter runs
        for punct in ['\u{05BE}', '\u{05C0}', '\u{05C3}'] {
            assert!(is_strippable_mark(punct));
            assert!(!is_combining_mark(punct));
        }
        assert!(!is_strippable_mark('א'));
    }
}
