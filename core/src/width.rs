//! Per-character cost in encoding units.
//!
//! GSM symbols from the extension table are sent as ESC + code and cost two
//! septets. In UTF-16 a character outside the BMP is a surrogate pair and
//! costs two code units. Everything else costs one.

use crate::encoding::Encoding;
use phf::phf_set;

/// GSM 03.38 extension table symbols reachable through the escape septet.
static GSM_EXTENDED: phf::Set<char> = phf_set! {
    '|', '^', '€', '{', '}', '[', ']', '~', '\\',
};

/// True if `ch` needs the GSM escape septet.
pub fn is_gsm_extended(ch: char) -> bool {
    GSM_EXTENDED.contains(&ch)
}

/// Units `ch` consumes under `encoding`.
///
/// No repertoire validation is done for GSM: characters outside the
/// default alphabet are counted as one septet.
pub fn char_width(ch: char, encoding: Encoding) -> usize {
    match encoding {
        Encoding::Gsm => {
            if is_gsm_extended(ch) {
                2
            } else {
                1
            }
        }
        Encoding::Unicode => ch.len_utf16(),
    }
}

/// Total units of `message` under `encoding`.
pub fn message_units(message: &str, encoding: Encoding) -> usize {
    message.chars().map(|ch| char_width(ch, encoding)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gsm_extended_membership() {
        for ch in ['|', '^', '€', '{', '}', '[', ']', '~', '\\'] {
            assert!(is_gsm_extended(ch), "{ch:?} should be extended");
        }
        for ch in ['a', '0', ' ', '@', '$', '£', '\n', '(', ')'] {
            assert!(!is_gsm_extended(ch), "{ch:?} should be basic");
        }
    }

    #[test]
    fn gsm_widths() {
        assert_eq!(char_width('a', Encoding::Gsm), 1);
        assert_eq!(char_width('€', Encoding::Gsm), 2);
        assert_eq!(char_width('\\', Encoding::Gsm), 2);
    }

    #[test]
    fn unicode_widths() {
        assert_eq!(char_width('a', Encoding::Unicode), 1);
        // Extended GSM symbols are ordinary BMP characters in UTF-16.
        assert_eq!(char_width('€', Encoding::Unicode), 1);
        assert_eq!(char_width('中', Encoding::Unicode), 1);
        assert_eq!(char_width('🙂', Encoding::Unicode), 2);
        assert_eq!(char_width('\u{10000}', Encoding::Unicode), 2);
        assert_eq!(char_width('\u{FFFF}', Encoding::Unicode), 1);
    }

    #[test]
    fn message_units_sums_widths() {
        assert_eq!(message_units("", Encoding::Gsm), 0);
        assert_eq!(message_units("a€b", Encoding::Gsm), 4);
        assert_eq!(message_units("a€b", Encoding::Unicode), 3);
        assert_eq!(message_units("hi🙂", Encoding::Unicode), 4);
    }
}
