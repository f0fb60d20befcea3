// Test fixtures with known Hebrew texts and expected outputs
// WHY: Golden-file testing requires deterministic input/output pairs for validation

#![allow(dead_code)]

/// Two short words with three length-3 palindromes, one crossing the space
pub const SIMPLE_TEXT: &str = "אבא ואמא";

/// Expected output for SIMPLE_TEXT
/// Format: length<TAB>canonical<TAB>original<TAB>(start,end)
pub const SIMPLE_EXPECTED: &str = "3\tאבא\tאבא\t(0,3)
3\tאוא\tא וא\t(2,6)
3\tאמא\tאמא\t(5,8)";

/// Palindrome only visible once the final mem is folded
pub const SOFIT_TEXT: &str = "מים חיים";

pub const SOFIT_EXPECTED: &str = "3\tמימ\tמים\t(0,3)";

/// Citation in the middle of a palindrome
pub const CITATION_TEXT: &str = "אבג (ד,ה) גבא";

pub const CITATION_EXPECTED: &str = "6\tאבגגבא\tאבג (ד,ה) גבא\t(0,13)
4\tבגגב\tבג (ד,ה) גב\t(1,12)";

/// Text with no Hebrew at all
pub const LATIN_TEXT: &str = "In the beginning God created the heaven and the earth.";

/// Genesis 1:1 with niqqud and te'amim
pub const GENESIS_1_1: &str = "בְּרֵאשִׁ֖ית בָּרָ֣א אֱלֹהִ֑ים אֵ֥ת הַשָּׁמַ֖יִם וְאֵ֥ת הָאָֽרֶץ׃";

/// Assorted inputs for property checks
pub const SAMPLE_CORPUS: &[&str] = &[
    "",
    "   ",
    SIMPLE_TEXT,
    SOFIT_TEXT,
    CITATION_TEXT,
    LATIN_TEXT,
    GENESIS_1_1,
    "וַיֹּאמֶר אֱלֹהִים יְהִי אוֹר וַיְהִי אוֹר (א:ג)",
    "ונתנו לו שמש ותות, \"יב,ג\" [אב גד] ננננ",
    "הַשָּׁמַיִם מְסַפְּרִים כְּבוֹד־אֵל וּמַעֲשֵׂה יָדָיו מַגִּיד הָרָקִיעַ",
    "אָבִיב בָּא, לֹא לֹא; נָשִׂיא אִישׁ נָשִׂיא",
];
