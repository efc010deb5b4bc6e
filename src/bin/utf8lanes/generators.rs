//! UTF-8 text generators for benchmarking and testing.
//!
//! Every pattern produces valid UTF-8 of exactly the requested size; the
//! last few bytes are ASCII padding when the final piece would not fit.
//! [`corrupt`] then injects one invalid sequence at a character boundary.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used when none is given.
const DEFAULT_SEED: u64 = 0x5EED_0F_0801;

/// Pattern types for UTF-8 text generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Pattern {
    /// Pure ASCII (single-byte sequences)
    Ascii,
    /// Latin words with diacritics (mostly 2-byte sequences)
    Latin,
    /// Greek and Cyrillic (2-byte sequences)
    GreekCyrillic,
    /// Chinese, Japanese and Korean (3-byte sequences)
    Cjk,
    /// Emoji and astral symbols (4-byte sequences)
    Emoji,
    /// Mostly ASCII prose with scattered non-ASCII words
    Mixed,
    /// Uniform mix of all sequence lengths (1-4 bytes)
    AllLengths,
    /// Log lines, mostly ASCII with occasional non-ASCII names
    LogFile,
    /// Boundary code points only, maximum multi-byte density
    Pathological,
}

impl Utf8Pattern {
    pub const ALL: [Utf8Pattern; 9] = [
        Utf8Pattern::Ascii,
        Utf8Pattern::Latin,
        Utf8Pattern::GreekCyrillic,
        Utf8Pattern::Cjk,
        Utf8Pattern::Emoji,
        Utf8Pattern::Mixed,
        Utf8Pattern::AllLengths,
        Utf8Pattern::LogFile,
        Utf8Pattern::Pathological,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Utf8Pattern::Ascii => "ascii",
            Utf8Pattern::Latin => "latin",
            Utf8Pattern::GreekCyrillic => "greek-cyrillic",
            Utf8Pattern::Cjk => "cjk",
            Utf8Pattern::Emoji => "emoji",
            Utf8Pattern::Mixed => "mixed",
            Utf8Pattern::AllLengths => "all-lengths",
            Utf8Pattern::LogFile => "log-file",
            Utf8Pattern::Pathological => "pathological",
        }
    }
}

/// Invalid sequence classes that [`corrupt`] can inject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption {
    LoneContinuation,
    Truncated,
    Overlong,
    Surrogate,
    TooLarge,
    InvalidLeader,
}

impl Corruption {
    pub const ALL: [Corruption; 6] = [
        Corruption::LoneContinuation,
        Corruption::Truncated,
        Corruption::Overlong,
        Corruption::Surrogate,
        Corruption::TooLarge,
        Corruption::InvalidLeader,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Corruption::LoneContinuation => "lone-continuation",
            Corruption::Truncated => "truncated",
            Corruption::Overlong => "overlong",
            Corruption::Surrogate => "surrogate",
            Corruption::TooLarge => "too-large",
            Corruption::InvalidLeader => "invalid-leader",
        }
    }

    /// The bytes inserted for this class.
    pub fn bytes(self) -> &'static [u8] {
        match self {
            Corruption::LoneContinuation => &[0x80],
            Corruption::Truncated => &[0xE2, 0x82],
            Corruption::Overlong => &[0xC0, 0xAF],
            Corruption::Surrogate => &[0xED, 0xA0, 0x80],
            Corruption::TooLarge => &[0xF4, 0x90, 0x80, 0x80],
            Corruption::InvalidLeader => &[0xF8, 0x88, 0x80, 0x80],
        }
    }
}

const SENTENCES: &[&str] = &[
    "The quick brown fox jumps over the lazy dog.",
    "Pack my box with five dozen liquor jugs.",
    "Sphinx of black quartz, judge my vow.",
    "How vexingly quick daft zebras jump!",
    "Every chunk is thirty-two bytes wide.",
    "Lead bytes announce how many bytes follow.",
];

const LATIN: &[&str] = &[
    "café", "résumé", "naïve", "über", "façade", "jalapeño", "señor", "mañana", "smörgåsbord",
    "Ångström", "Müller", "Größe", "Köln", "Zürich", "Ærø", "Kraków", "Łódź", "Dvořák",
];

const GREEK_CYRILLIC: &[&str] = &[
    "αλφάβητο", "καλημέρα", "Ελλάδα", "σοφία", "θάλασσα", "привет", "мир", "Москва", "книга",
    "Україна", "България", "здравствуйте",
];

const CJK: &[&str] = &[
    "日本語", "東京", "こんにちは", "カタカナ", "ひらがな", "中文", "你好世界", "北京", "漢字",
    "한국어", "서울", "안녕하세요",
];

const EMOJI: &[&str] = &[
    "🎉", "🚀", "🌍", "💻", "🔥", "🦀", "😀", "👍", "🎵", "🌈", "𝔘", "𝕏", "🀄", "🧩",
];

const NAMES: &[&str] = &["alice", "bob", "José", "Zoë", "李雷", "Ölçer", "Søren", "Дмитрий"];

const LEVELS: &[&str] = &["INFO", "WARN", "DEBUG", "ERROR"];

/// First and last code points of each sequence length, minus surrogates.
const BOUNDARY_CHARS: &[char] = &[
    '\u{80}', '\u{7FF}', '\u{800}', '\u{D7FF}', '\u{E000}', '\u{FFFF}', '\u{10000}', '\u{10FFFF}',
];

fn pick<'a>(rng: &mut ChaCha8Rng, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// A random scalar value whose encoding is `len` bytes long.
fn random_char(rng: &mut ChaCha8Rng, len: usize) -> char {
    let range = match len {
        1 => 0x20..0x7F,
        2 => 0x80..0x800,
        3 => 0x800..0x10000,
        _ => 0x10000..0x110000,
    };
    loop {
        if let Some(c) = char::from_u32(rng.gen_range(range.clone())) {
            return c;
        }
    }
}

/// Append the next piece of `pattern` to `piece`.
fn next_piece(pattern: Utf8Pattern, rng: &mut ChaCha8Rng, piece: &mut String) {
    match pattern {
        Utf8Pattern::Ascii => {
            piece.push_str(pick(rng, SENTENCES));
            piece.push(if rng.gen_bool(0.2) { '\n' } else { ' ' });
        }
        Utf8Pattern::Latin => {
            piece.push_str(pick(rng, LATIN));
            piece.push(' ');
        }
        Utf8Pattern::GreekCyrillic => {
            piece.push_str(pick(rng, GREEK_CYRILLIC));
            piece.push(' ');
        }
        Utf8Pattern::Cjk => {
            piece.push_str(pick(rng, CJK));
            if rng.gen_bool(0.1) {
                piece.push('。');
            }
        }
        Utf8Pattern::Emoji => {
            piece.push_str(pick(rng, EMOJI));
        }
        Utf8Pattern::Mixed => {
            let roll: f64 = rng.gen();
            let words = if roll < 0.7 {
                SENTENCES
            } else if roll < 0.8 {
                LATIN
            } else if roll < 0.9 {
                CJK
            } else {
                EMOJI
            };
            piece.push_str(pick(rng, words));
            piece.push(' ');
        }
        Utf8Pattern::AllLengths => {
            let len = rng.gen_range(1..=4);
            piece.push(random_char(rng, len));
        }
        Utf8Pattern::LogFile => {
            use std::fmt::Write;
            let _ = writeln!(
                piece,
                "2026-03-{:02}T{:02}:{:02}:{:02}Z {:<5} request from {} took {}ms",
                rng.gen_range(1..=28),
                rng.gen_range(0..24),
                rng.gen_range(0..60),
                rng.gen_range(0..60),
                pick(rng, LEVELS),
                pick(rng, NAMES),
                rng.gen_range(1..2000),
            );
        }
        Utf8Pattern::Pathological => {
            piece.push(BOUNDARY_CHARS[rng.gen_range(0..BOUNDARY_CHARS.len())]);
        }
    }
}

/// Generate valid UTF-8 text of exactly `target_size` bytes.
pub fn generate_utf8(target_size: usize, pattern: Utf8Pattern, seed: Option<u64>) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.unwrap_or(DEFAULT_SEED));
    let mut out = String::with_capacity(target_size);
    let mut piece = String::new();

    loop {
        piece.clear();
        next_piece(pattern, &mut rng, &mut piece);
        if out.len() + piece.len() > target_size {
            break;
        }
        out.push_str(&piece);
    }

    // Pad with ASCII to the exact size
    let padding = target_size - out.len();
    out.extend(std::iter::repeat(' ').take(padding));
    out.into_bytes()
}

/// Insert one invalid sequence of `class` at a character boundary.
///
/// Returns the byte offset of the inserted sequence.
pub fn corrupt(data: &mut Vec<u8>, class: Corruption, seed: Option<u64>) -> usize {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.unwrap_or(DEFAULT_SEED) ^ 0xBAD);
    let mut offset = if data.is_empty() {
        0
    } else {
        rng.gen_range(0..=data.len())
    };

    // Back up to the start of the character
    while offset < data.len() && offset > 0 && (0x80..0xC0).contains(&data[offset]) {
        offset -= 1;
    }

    data.splice(offset..offset, class.bytes().iter().copied());
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_size_and_valid() {
        for pattern in Utf8Pattern::ALL {
            for size in [0, 1, 3, 31, 32, 33, 1000, 4096] {
                let data = generate_utf8(size, pattern, Some(7));
                assert_eq!(data.len(), size, "{} {}", pattern.name(), size);
                assert!(
                    std::str::from_utf8(&data).is_ok(),
                    "{} {}",
                    pattern.name(),
                    size
                );
                assert!(utf8lanes::validate_utf8(&data), "{} {}", pattern.name(), size);
            }
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = generate_utf8(2048, Utf8Pattern::AllLengths, Some(1));
        let b = generate_utf8(2048, Utf8Pattern::AllLengths, Some(1));
        let c = generate_utf8(2048, Utf8Pattern::AllLengths, Some(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_patterns_hit_expected_lengths() {
        let cjk = generate_utf8(4096, Utf8Pattern::Cjk, Some(3));
        let text = std::str::from_utf8(&cjk).unwrap();
        assert!(text.chars().filter(|c| c.len_utf8() == 3).count() > 1000);

        let emoji = generate_utf8(4096, Utf8Pattern::Emoji, Some(3));
        let text = std::str::from_utf8(&emoji).unwrap();
        assert!(text.chars().filter(|c| c.len_utf8() == 4).count() > 900);

        let ascii = generate_utf8(4096, Utf8Pattern::Ascii, Some(3));
        assert!(ascii.is_ascii());
    }

    #[test]
    fn test_corrupt_every_class_every_pattern() {
        for pattern in Utf8Pattern::ALL {
            for class in Corruption::ALL {
                for seed in 0..8 {
                    let mut data = generate_utf8(300, pattern, Some(seed));
                    let offset = corrupt(&mut data, class, Some(seed));
                    assert_eq!(&data[offset..offset + class.bytes().len()], class.bytes());
                    assert!(
                        std::str::from_utf8(&data).is_err(),
                        "{} {} seed={}",
                        pattern.name(),
                        class.name(),
                        seed
                    );
                    assert!(
                        !utf8lanes::validate_utf8(&data),
                        "{} {} seed={}",
                        pattern.name(),
                        class.name(),
                        seed
                    );
                }
            }
        }
    }

    #[test]
    fn test_corrupt_empty() {
        let mut data = Vec::new();
        assert_eq!(corrupt(&mut data, Corruption::Truncated, None), 0);
        assert_eq!(data, vec![0xE2, 0x82]);
    }
}
