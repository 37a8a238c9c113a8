//! Invisible character stripping for decoded chunks.

use std::borrow::Cow;

/// Whether `c` is a C0 or C1 control character other than a line break.
///
/// `\n` and `\r` are kept; everything else in `U+0000..=U+001F` and
/// `U+007F..=U+009F` counts as invisible.
pub fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00}'..='\u{09}' | '\u{0B}'..='\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}'..='\u{9F}'
    )
}

/// Remove invisible control characters from `text`, keeping line breaks.
///
/// Borrows when nothing needs removing.
pub fn strip_invisible_unicode(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_invisible) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|&c| !is_invisible(c)).collect())
}

/// Apply the filter only when `enabled`.
pub fn apply(text: String, enabled: bool) -> String {
    if !enabled {
        return text;
    }
    match strip_invisible_unicode(&text) {
        Cow::Borrowed(_) => text,
        Cow::Owned(stripped) => stripped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_line_breaks() {
        assert_eq!(strip_invisible_unicode("a\nb\r\nc"), "a\nb\r\nc");
    }

    #[test]
    fn test_strips_c0_and_c1_controls() {
        let input = "\u{0}a\tb\u{0B}c\u{0C}d\u{1B}e\u{7F}f\u{85}g\u{9F}";
        assert_eq!(strip_invisible_unicode(input), "abcdefg");
    }

    #[test]
    fn test_leaves_other_unicode_alone() {
        // zero-width space and BOM are outside the control ranges
        let input = "caf\u{e9} \u{200B}\u{FEFF}\u{A0}";
        assert!(matches!(strip_invisible_unicode(input), Cow::Borrowed(_)));
    }

    #[test]
    fn test_apply_disabled_is_identity() {
        let input = "x\u{0}y".to_string();
        assert_eq!(apply(input.clone(), false), input);
        assert_eq!(apply(input, true), "xy");
    }

    #[test]
    fn test_range_boundaries() {
        assert!(is_invisible('\u{09}'));
        assert!(!is_invisible('\u{0A}'));
        assert!(is_invisible('\u{0B}'));
        assert!(is_invisible('\u{0C}'));
        assert!(!is_invisible('\u{0D}'));
        assert!(is_invisible('\u{0E}'));
        assert!(!is_invisible('\u{20}'));
        assert!(!is_invisible('\u{7E}'));
        assert!(is_invisible('\u{7F}'));
        assert!(is_invisible('\u{9F}'));
        assert!(!is_invisible('\u{A0}'));
    }
}
