//! Nibble lookup tables for illegal UTF-8 sequences.
//!
//! Every illegal sequence that survives the continuation-mask check can be
//! recognised from three nibbles: the high and low nibble of a lead byte and
//! the high nibble of the byte after it.
//!
//! | 1st   | 2nd   | 3rd   | class                          | bit    |
//! |-------|-------|-------|--------------------------------|--------|
//! | `C`   | `0-1` | any   | overlong 2-byte (`C0`, `C1`)   | `0x01` |
//! | `E`   | `0`   | `8-9` | overlong 3-byte (`E0 80..9F`)  | `0x02` |
//! | `E`   | `D`   | `A-B` | surrogate (`ED A0..BF`)        | `0x04` |
//! | `F`   | `4`   | `9-F` | above U+10FFFF (`F4 90..`)     | `0x08` |
//! | `F`   | `5-F` | any   | lead byte above U+10FFFF       | `0x10` |
//! | `F`   | `0`   | `8`   | overlong 4-byte (`F0 80..8F`)  | `0x20` |
//!
//! Each table maps a nibble value to the OR of the classes it is consistent
//! with, so `FIRST[a] & SECOND[b] & THIRD[c]` is non-zero exactly when the
//! triple `(a, b, c)` matches one row above.

/// `C0 xx` and `C1 xx` encode values below U+0080.
pub const OVERLONG_2: u8 = 0x01;
/// `E0 80..9F` encodes values below U+0800.
pub const OVERLONG_3: u8 = 0x02;
/// `ED A0..BF` encodes U+D800-U+DFFF.
pub const SURROGATE: u8 = 0x04;
/// `F4 90..BF` encodes values above U+10FFFF.
pub const TOO_LARGE: u8 = 0x08;
/// `F5..FF` can only encode values above U+10FFFF.
pub const TOO_LARGE_LEADER: u8 = 0x10;
/// `F0 80..8F` encodes values below U+10000.
pub const OVERLONG_4: u8 = 0x20;

/// Inclusive range of nibble values.
#[derive(Clone, Copy)]
struct Nibbles {
    lo: u8,
    hi: u8,
}

const fn nibbles(lo: u8, hi: u8) -> Nibbles {
    Nibbles { lo, hi }
}

const ANY: Nibbles = nibbles(0x0, 0xF);

/// One forbidden nibble triple and the error class it raises.
#[derive(Clone, Copy)]
struct Rule {
    first: Nibbles,
    second: Nibbles,
    third: Nibbles,
    class: u8,
}

const RULES: [Rule; 6] = [
    Rule {
        first: nibbles(0xC, 0xC),
        second: nibbles(0x0, 0x1),
        third: ANY,
        class: OVERLONG_2,
    },
    Rule {
        first: nibbles(0xE, 0xE),
        second: nibbles(0x0, 0x0),
        third: nibbles(0x8, 0x9),
        class: OVERLONG_3,
    },
    Rule {
        first: nibbles(0xE, 0xE),
        second: nibbles(0xD, 0xD),
        third: nibbles(0xA, 0xB),
        class: SURROGATE,
    },
    Rule {
        first: nibbles(0xF, 0xF),
        second: nibbles(0x4, 0x4),
        third: nibbles(0x9, 0xF),
        class: TOO_LARGE,
    },
    Rule {
        first: nibbles(0xF, 0xF),
        second: nibbles(0x5, 0xF),
        third: ANY,
        class: TOO_LARGE_LEADER,
    },
    Rule {
        first: nibbles(0xF, 0xF),
        second: nibbles(0x0, 0x0),
        third: nibbles(0x8, 0x8),
        class: OVERLONG_4,
    },
];

/// Which nibble of the triple a table is indexed by.
#[derive(Clone, Copy)]
enum Position {
    First,
    Second,
    Third,
}

const fn build_table(position: Position) -> [u8; 16] {
    let mut table = [0u8; 16];
    let mut r = 0;
    while r < RULES.len() {
        let rule = RULES[r];
        let range = match position {
            Position::First => rule.first,
            Position::Second => rule.second,
            Position::Third => rule.third,
        };
        let mut n = range.lo;
        while n <= range.hi {
            table[n as usize] |= rule.class;
            n += 1;
        }
        r += 1;
    }
    table
}

/// Error classes by high nibble of the lead byte (byte `i - 1`).
pub static FIRST_NIBBLE: [u8; 16] = build_table(Position::First);

/// Error classes by low nibble of the lead byte (byte `i - 1`).
pub static SECOND_NIBBLE: [u8; 16] = build_table(Position::Second);

/// Error classes by high nibble of the following byte (byte `i`).
pub static THIRD_NIBBLE: [u8; 16] = build_table(Position::Third);

/// Error classes raised by the byte pair `prev, cur`.
///
/// This is the per-lane operation every kernel performs; the vector kernels
/// do it for 32 pairs at once with byte shuffles.
#[inline(always)]
pub fn classify(prev: u8, cur: u8) -> u8 {
    FIRST_NIBBLE[(prev >> 4) as usize]
        & SECOND_NIBBLE[(prev & 0x0F) as usize]
        & THIRD_NIBBLE[(cur >> 4) as usize]
}
