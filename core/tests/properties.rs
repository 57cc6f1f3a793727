//! Property-based tests for the segmenter.
//!
//! These tests verify splitting invariants hold for arbitrary messages:
//!
//! - Concatenating the parts reproduces the message
//! - Every part fits the capacity that applies to it
//! - Parts are closed greedily, with no room left for the next character
//! - UTF-16 input never has a surrogate pair torn across parts

use proptest::prelude::*;

use smssplit_core::{char_width, message_units, split_into_parts, Encoding, Segmenter};

fn encoding() -> impl Strategy<Value = Encoding> {
    prop::sample::select(Encoding::ALL.to_vec())
}

/// Messages mixing plain ASCII, GSM extended symbols, astral characters and
/// arbitrary scalars, long enough to need several parts.
fn message() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::char::range('a', 'z'),
            1 => prop::sample::select(vec!['|', '^', '€', '{', '}', '[', ']', '~', '\\']),
            1 => prop::sample::select(vec!['\u{1F642}', '\u{1F600}', '\u{1D11E}', '中', 'é']),
            1 => any::<char>(),
        ],
        0..400,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..0xDC00).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..0xE000).contains(&unit)
}

proptest! {
    #[test]
    fn parts_concatenate_to_message(msg in message(), enc in encoding()) {
        let parts = split_into_parts(&msg, enc);
        prop_assert_eq!(parts.concat(), msg);
    }

    #[test]
    fn parts_respect_capacity(msg in message(), enc in encoding()) {
        let seg = Segmenter::new(enc).segment(&msg);
        prop_assert_eq!(seg.total_units, message_units(&msg, enc));

        if seg.part_count() == 1 {
            prop_assert!(seg.parts[0].units <= enc.single_part_capacity());
        } else {
            for part in &seg.parts {
                prop_assert!(!part.text.is_empty());
                prop_assert!(part.units <= enc.multi_part_capacity());
            }
        }
        for part in &seg.parts {
            prop_assert_eq!(part.units, message_units(part.text, enc));
        }
    }

    #[test]
    fn single_part_iff_within_threshold(msg in message(), enc in encoding()) {
        let fits = message_units(&msg, enc) <= enc.single_part_capacity();
        let parts = Segmenter::new(enc).split(&msg);
        prop_assert_eq!(parts.len() == 1, fits);
    }

    #[test]
    fn parts_are_closed_greedily(msg in message(), enc in encoding()) {
        let seg = Segmenter::new(enc).segment(&msg);
        for pair in seg.parts.windows(2) {
            let next = pair[1].text.chars().next().unwrap();
            prop_assert!(pair[0].units + char_width(next, enc) > enc.multi_part_capacity());
        }
    }

    #[test]
    fn splitting_is_deterministic(msg in message(), enc in encoding()) {
        prop_assert_eq!(split_into_parts(&msg, enc), split_into_parts(&msg, enc));
    }

    #[test]
    fn utf16_split_matches_str_split(msg in message(), enc in encoding()) {
        let segmenter = Segmenter::new(enc);
        let units: Vec<u16> = msg.encode_utf16().collect();
        let from_utf16: Vec<String> = segmenter
            .split_utf16(&units)
            .into_iter()
            .map(|p| String::from_utf16(p).unwrap())
            .collect();
        let from_str: Vec<String> = segmenter.split(&msg).into_iter().map(str::to_owned).collect();
        prop_assert_eq!(from_utf16, from_str);
    }

    #[test]
    fn utf16_pairs_never_torn(units in prop::collection::vec(any::<u16>(), 0..300), enc in encoding()) {
        let parts = Segmenter::new(enc).split_utf16(&units);
        prop_assert_eq!(parts.concat(), units.clone());
        for pair in parts.windows(2) {
            let (last, first) = (pair[0][pair[0].len() - 1], pair[1][0]);
            prop_assert!(!(is_high_surrogate(last) && is_low_surrogate(first)));
        }
    }
}

#[test]
fn threshold_boundary_for_each_encoding() {
    for enc in Encoding::ALL {
        let at = "a".repeat(enc.single_part_capacity());
        assert_eq!(Segmenter::new(enc).split(&at).len(), 1);
        let over = "a".repeat(enc.single_part_capacity() + 1);
        assert_eq!(Segmenter::new(enc).split(&over).len(), 2);
    }
}
