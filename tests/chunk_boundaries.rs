//! Chunk-boundary behaviour through the public API, on every supported backend.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use utf8lanes::{padded_len, Backend, Validator, CHUNK_WIDTH};

fn validators() -> Vec<Validator> {
    Backend::ALL
        .iter()
        .filter_map(|&b| Validator::with_backend(b).ok())
        .collect()
}

/// Check both entry points of every backend against `expected`.
fn check(input: &[u8], expected: bool) {
    for fill in [0x00, 0x80, 0xFF] {
        let mut buf = input.to_vec();
        buf.resize(padded_len(input.len()), fill);
        for v in validators() {
            assert_eq!(
                v.validate(input),
                expected,
                "{} slice len={} {:02X?}",
                v.backend(),
                input.len(),
                &input[input.len().saturating_sub(8)..]
            );
            let raw = unsafe { v.validate_raw(buf.as_ptr(), input.len() as i64) };
            assert_eq!(
                raw,
                expected,
                "{} raw len={} fill={:#04x}",
                v.backend(),
                input.len(),
                fill
            );
        }
    }
}

fn ascii(len: usize) -> Vec<u8> {
    vec![b'q'; len]
}

#[test]
fn chunk_width_is_32() {
    assert_eq!(CHUNK_WIDTH, 32);
    assert_eq!(padded_len(31), 32);
    assert_eq!(padded_len(64), 64);
    assert_eq!(padded_len(65), 96);
}

#[test]
fn ascii_lengths_around_boundaries() {
    for len in [0, 1, 31, 32, 33, 63, 64, 65, 127, 128, 129] {
        check(&ascii(len), true);
    }
}

#[test]
fn every_sequence_length_at_every_boundary_offset() {
    for c in ['\u{E9}', '\u{20AC}', '\u{1F980}', '\u{10FFFF}', '\u{800}', '\u{10000}'] {
        let mut buf = [0u8; 4];
        let encoded = c.encode_utf8(&mut buf).as_bytes();
        for start in (CHUNK_WIDTH - 4)..=CHUNK_WIDTH {
            let mut input = ascii(start);
            input.extend_from_slice(encoded);
            input.extend_from_slice(b"!");
            check(&input, true);

            // Same sequence cut short by the end of input
            let mut cut = ascii(start);
            cut.extend_from_slice(&encoded[..encoded.len() - 1]);
            check(&cut, false);
        }
    }
}

#[test]
fn illegal_pairs_split_by_boundary() {
    let illegal: [&[u8]; 6] = [
        &[0xC0, 0x80],
        &[0xE0, 0x9F, 0xBF],
        &[0xED, 0xA0, 0x80],
        &[0xF0, 0x8F, 0xBF, 0xBF],
        &[0xF4, 0x90, 0x80, 0x80],
        &[0xF5, 0x80, 0x80, 0x80],
    ];
    for seq in illegal {
        for start in [0, 30, 31, 32, 62, 63] {
            let mut input = ascii(start);
            input.extend_from_slice(seq);
            input.extend_from_slice(&ascii(40));
            check(&input, false);
        }
    }
}

#[test]
fn error_after_long_valid_prefix() {
    let mut input = "Grüße 日本 🦀 ".repeat(50).into_bytes();
    let valid_len = input.len();
    check(&input, true);
    input.extend_from_slice(&[0xED, 0xBF, 0xBF]);
    check(&input, false);
    input.truncate(valid_len);
    input.push(0xFF);
    check(&input, false);
}

#[test]
fn ascii_chunks_between_multibyte_chunks() {
    // Multi-byte chunk, N pure ASCII chunks, then an error that only the
    // nibble lookup can see, right at the start of the next chunk.
    for ascii_chunks in 1..4 {
        let mut input = "é".repeat(16).into_bytes();
        input.extend_from_slice(&ascii(ascii_chunks * CHUNK_WIDTH));
        input.extend_from_slice(&[0xE0, 0x80, 0x80]);
        check(&input, false);
        let n = input.len();
        input[n - 2] = 0xA0;
        check(&input, true);
    }
}

#[test]
fn random_corpora_agree_with_std() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x0075_7466_38);
    let pieces: [&[u8]; 10] = [
        b"a",
        b"xyz ",
        "é".as_bytes(),
        "€".as_bytes(),
        "🦀".as_bytes(),
        &[0x80],
        &[0xC3],
        &[0xED, 0xA0],
        &[0xF0, 0x90],
        &[0xF4, 0x8F, 0xBF],
    ];
    for _ in 0..500 {
        let mut input = Vec::new();
        let len = rng.gen_range(0..150);
        while input.len() < len {
            input.extend_from_slice(pieces[rng.gen_range(0..pieces.len())]);
        }
        let expected = std::str::from_utf8(&input).is_ok();
        check(&input, expected);
    }
}
