//! Property tests: every backend agrees with `std::str::from_utf8`.

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;
use utf8lanes::{padded_len, validate_utf8, validate_utf8_raw, Backend, Validator};

fn validators() -> Vec<Validator> {
    Backend::ALL
        .iter()
        .filter_map(|&b| Validator::with_backend(b).ok())
        .collect()
}

/// Copy `bytes` into a chunk-padded buffer whose padding is `fill`.
fn padded(bytes: &[u8], fill: u8) -> Vec<u8> {
    let mut buf = bytes.to_vec();
    buf.resize(padded_len(bytes.len()), fill);
    buf
}

/// Bytes biased towards UTF-8 lead and continuation ranges.
fn utf8ish_byte() -> impl Strategy<Value = u8> {
    prop_oneof![
        0x00u8..0x80,
        0x80u8..0xC0,
        0xC0u8..0xE0,
        0xE0u8..0xF0,
        0xF0u8..=0xFF,
        Just(0xE0u8),
        Just(0xEDu8),
        Just(0xF0u8),
        Just(0xF4u8),
    ]
}

proptest! {
    #[test]
    fn prop_ascii_is_valid(input in prop_vec(0u8..0x80, 0..300)) {
        prop_assert!(validate_utf8(&input));
    }

    #[test]
    fn prop_strings_are_valid(input in "\\PC*") {
        for v in validators() {
            prop_assert!(v.validate(input.as_bytes()), "{} rejected {:?}", v.backend(), input);
        }
    }

    #[test]
    fn prop_arbitrary_bytes_match_std(input in prop_vec(any::<u8>(), 0..200)) {
        let expected = std::str::from_utf8(&input).is_ok();
        for v in validators() {
            prop_assert_eq!(v.validate(&input), expected, "{}", v.backend());
        }
    }

    #[test]
    fn prop_utf8ish_bytes_match_std(input in prop_vec(utf8ish_byte(), 0..200)) {
        let expected = std::str::from_utf8(&input).is_ok();
        for v in validators() {
            prop_assert_eq!(v.validate(&input), expected, "{}", v.backend());
        }
    }

    #[test]
    fn prop_raw_matches_slice(
        input in prop_vec(utf8ish_byte(), 0..200),
        fill in any::<u8>(),
    ) {
        let buf = padded(&input, fill);
        let raw = unsafe { validate_utf8_raw(buf.as_ptr(), input.len() as i64) };
        prop_assert_eq!(raw, validate_utf8(&input));
    }

    #[test]
    fn prop_repeated_validation_is_deterministic(
        input in prop_vec(utf8ish_byte(), 0..200),
        fill in any::<u8>(),
    ) {
        let snapshot = input.clone();
        let first = validate_utf8(&input);
        prop_assert_eq!(validate_utf8(&input), first);
        for v in validators() {
            prop_assert_eq!(v.validate(&input), first, "{}", v.backend());
            prop_assert_eq!(v.validate(&input), first, "{}", v.backend());
        }
        prop_assert_eq!(&input, &snapshot);

        let buf = padded(&input, fill);
        let buf_snapshot = buf.clone();
        let len = input.len() as i64;
        let raw_first = unsafe { validate_utf8_raw(buf.as_ptr(), len) };
        let raw_second = unsafe { validate_utf8_raw(buf.as_ptr(), len) };
        prop_assert_eq!(raw_first, raw_second);
        prop_assert_eq!(raw_first, first);
        prop_assert_eq!(&buf, &buf_snapshot);
    }

    #[test]
    fn prop_truncating_multibyte_char_is_invalid(
        prefix in "[a-z]{0,70}",
        c in any::<char>().prop_filter("multi-byte", |c| c.len_utf8() > 1),
        cut in 1usize..4,
    ) {
        let mut buf = [0u8; 4];
        let encoded = c.encode_utf8(&mut buf).as_bytes();
        let cut = cut.min(encoded.len() - 1);
        let mut input = prefix.into_bytes();
        input.extend_from_slice(&encoded[..cut]);
        prop_assert!(!validate_utf8(&input));
    }

    #[test]
    fn prop_concatenation_of_valid_is_valid(a in "\\PC{0,40}", b in "\\PC{0,40}") {
        let joined = format!("{}{}", a, b);
        prop_assert!(validate_utf8(joined.as_bytes()));
    }

    #[test]
    fn prop_lone_continuation_is_invalid(
        text in "\\PC{0,60}",
        pos in any::<prop::sample::Index>(),
        cont in 0x80u8..0xC0,
    ) {
        // Insert at a char boundary so the byte cannot be absorbed
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let at = boundaries[pos.index(boundaries.len())];
        let mut input = text.into_bytes();
        input.insert(at, cont);
        prop_assert!(!validate_utf8(&input));
    }
}
