//! UTF-8 validation entry points.
//!
//! Input is consumed in 32-byte chunks. A chunk is valid when
//!
//! 1. every byte that must be a continuation byte (`10xxxxxx`) is one, and no
//!    other byte is, given the lead bytes in this chunk and the previous one;
//! 2. no lane pairs a lead byte with a follower that makes the sequence
//!    overlong, a surrogate, or larger than U+10FFFF.
//!
//! The input is valid when every chunk is valid and no sequence is still
//! open after the last byte.
//!
//! | Bytes | First byte    | Continuation bytes | Code point range     |
//! |-------|---------------|--------------------|----------------------|
//! | 1     | `0xxxxxxx`    | -                  | U+0000 - U+007F      |
//! | 2     | `110xxxxx`    | `10xxxxxx`         | U+0080 - U+07FF      |
//! | 3     | `1110xxxx`    | `10xxxxxx` × 2     | U+0800 - U+FFFF      |
//! | 4     | `11110xxx`    | `10xxxxxx` × 3     | U+10000 - U+10FFFF   |
//!
//! The verdict is a plain `bool`; no offset or error kind is reported.

use super::backend::Backend;

/// Bytes consumed per step by every kernel.
pub const CHUNK_WIDTH: usize = 32;

/// `len` rounded up to a whole number of chunks.
///
/// This is how many bytes [`validate_utf8_raw`] may read.
///
/// # Examples
///
/// ```
/// use utf8lanes::padded_len;
///
/// assert_eq!(padded_len(0), 0);
/// assert_eq!(padded_len(1), 32);
/// assert_eq!(padded_len(32), 32);
/// assert_eq!(padded_len(33), 64);
/// ```
#[inline]
pub const fn padded_len(len: usize) -> usize {
    len.div_ceil(CHUNK_WIDTH) * CHUNK_WIDTH
}

/// Validate that `input` is well-formed UTF-8.
///
/// Uses the fastest kernel available on the running CPU (see
/// [`Backend::detect`]). Never reads outside `input`.
///
/// # Examples
///
/// ```
/// use utf8lanes::validate_utf8;
///
/// assert!(validate_utf8(b"Hello, world!"));
/// assert!(validate_utf8("émoji: 🎉".as_bytes()));
///
/// // Bare continuation byte
/// assert!(!validate_utf8(&[0x80]));
///
/// // Truncated sequence
/// assert!(!validate_utf8(&[0xC2]));
/// ```
#[inline]
pub fn validate_utf8(input: &[u8]) -> bool {
    let backend = Backend::detect();
    // SAFETY: detect only returns backends the CPU supports
    unsafe { backend.validate_unchecked(input) }
}

/// Validate `len` bytes starting at `data`.
///
/// The kernels read whole 32-byte chunks, so the final chunk may be read
/// past `len`. Bytes beyond `len` never affect the result. A `len` of zero
/// or less is valid and reads nothing.
///
/// # Safety
///
/// - `data..data + padded_len(len)` must be readable memory
/// - `data` may be dangling only when `len <= 0`
///
/// # Examples
///
/// ```
/// use utf8lanes::{padded_len, validate_utf8_raw};
///
/// let text = "naïve café";
/// let mut buf = vec![0u8; padded_len(text.len())];
/// buf[..text.len()].copy_from_slice(text.as_bytes());
///
/// assert!(unsafe { validate_utf8_raw(buf.as_ptr(), text.len() as i64) });
/// ```
#[inline]
pub unsafe fn validate_utf8_raw(data: *const u8, len: i64) -> bool {
    if len <= 0 {
        return true;
    }
    Backend::detect().validate_raw_unchecked(data, len)
}
