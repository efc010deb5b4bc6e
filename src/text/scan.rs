//! Chunk scanner shared by every backend.
//!
//! The loop is written once against [`ChunkLanes`]; each backend supplies
//! loads, movemasks, the one-byte shift and the nibble lookups for its own
//! register type. The scanner functions are `#[inline(always)]` so that they
//! are compiled inside the backend's `#[target_feature]` entry point.

use super::continuation::{ContinuationCarry, PrefixMasks};
use super::utf8::CHUNK_WIDTH;

/// One 32-byte chunk held in a backend's registers.
///
/// # Safety
///
/// Implementations may execute instructions that require a CPU feature.
/// Every method is `unsafe` to call: the caller must know the feature is
/// present on the running CPU.
pub(crate) unsafe trait ChunkLanes: Copy {
    /// Load 32 bytes from `ptr` (no alignment requirement).
    unsafe fn load(ptr: *const u8) -> Self;

    /// A chunk of 0x00 bytes.
    unsafe fn zero() -> Self;

    /// Bit `i` set iff byte `i` has its high bit set.
    unsafe fn high_mask(self) -> u32;

    /// Movemasks of every byte shifted left by 1, 2 and 3 bits.
    unsafe fn prefix_masks(self, high: u32) -> PrefixMasks;

    /// The byte stream shifted forward by one: `[prev[31], self[0..31]]`.
    unsafe fn shift_in(self, prev: Self) -> Self;

    /// True if any lane `i` has `classify(shifted[i], self[i]) != 0`.
    unsafe fn has_illegal_sequence(self, shifted: Self) -> bool;
}

/// Loop-carried state of one validation call.
pub(crate) struct ChunkScanner<L> {
    carry: ContinuationCarry,
    /// Previous chunk, the source of `shifted[0]`. Starts as all zeros so
    /// nothing before the buffer is ever read.
    prev: L,
}

impl<L: ChunkLanes> ChunkScanner<L> {
    #[inline(always)]
    pub(crate) unsafe fn new() -> Self {
        Self {
            carry: ContinuationCarry::CLEAR,
            prev: L::zero(),
        }
    }

    /// Check one chunk. Returns false as soon as the chunk is known invalid.
    #[inline(always)]
    pub(crate) unsafe fn step(&mut self, bytes: L) -> bool {
        let high = bytes.high_mask();

        // Quick skip for ASCII at a clean boundary
        if high == 0 && self.carry.is_clear() {
            self.prev = bytes;
            return true;
        }

        if !self.carry.advance(&bytes.prefix_masks(high)) {
            return false;
        }

        let shifted = bytes.shift_in(self.prev);
        if bytes.has_illegal_sequence(shifted) {
            return false;
        }

        self.prev = bytes;
        true
    }

    /// Valid only if no multi-byte sequence is left open.
    #[inline(always)]
    pub(crate) fn finish(self) -> bool {
        self.carry.is_clear()
    }
}

/// Validate a slice without reading past its end.
///
/// Whole chunks are loaded in place. The final partial chunk is copied into
/// a zeroed scratch chunk; the zero padding is ASCII and cannot raise an
/// error, and a sequence cut short by it fails the continuation check.
///
/// # Safety
///
/// The CPU must support the features `L` uses.
#[inline(always)]
pub(crate) unsafe fn scan_slice<L: ChunkLanes>(input: &[u8]) -> bool {
    let mut scanner = ChunkScanner::<L>::new();

    let mut chunks = input.chunks_exact(CHUNK_WIDTH);
    for chunk in &mut chunks {
        if !scanner.step(L::load(chunk.as_ptr())) {
            return false;
        }
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut scratch = [0u8; CHUNK_WIDTH];
        scratch[..tail.len()].copy_from_slice(tail);
        if !scanner.step(L::load(scratch.as_ptr())) {
            return false;
        }
    }

    scanner.finish()
}

/// Validate `len` bytes at `ptr`, always reading whole 32-byte chunks.
///
/// The final chunk is read in full; lanes past `len` are zeroed before
/// they are inspected, so only `ptr[0..len)` decides the verdict.
///
/// # Safety
///
/// - `ptr..ptr + padded_len(len)` must be readable
/// - The CPU must support the features `L` uses
#[inline(always)]
pub(crate) unsafe fn scan_raw<L: ChunkLanes>(mut ptr: *const u8, mut len: i64) -> bool {
    let mut scanner = ChunkScanner::<L>::new();

    while len > 0 {
        let bytes = if len >= CHUNK_WIDTH as i64 {
            L::load(ptr)
        } else {
            let mut scratch = [0u8; CHUNK_WIDTH];
            core::ptr::copy_nonoverlapping(ptr, scratch.as_mut_ptr(), CHUNK_WIDTH);
            scratch[len as usize..].fill(0);
            L::load(scratch.as_ptr())
        };

        if !scanner.step(bytes) {
            return false;
        }

        len -= CHUNK_WIDTH as i64;
        ptr = ptr.wrapping_add(CHUNK_WIDTH);
    }

    scanner.finish()
}
