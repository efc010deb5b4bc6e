//! Portable chunk kernel.
//!
//! Emulates the 32 lanes with four little-endian `u64` words: byte `i` of the
//! chunk is byte `i % 8` of word `i / 8`. Movemasks and the one-byte shift
//! are done with word arithmetic; the nibble lookup is done per lane.

use crate::text::continuation::PrefixMasks;
use crate::text::scan::{scan_raw, scan_slice, ChunkLanes};
use crate::text::tables::classify;

/// Lowest bit of every byte.
const LSB: u64 = 0x0101_0101_0101_0101;

/// Gathers bit 0 of each byte into the top byte, byte `k` landing at bit `56 + k`.
const GATHER: u64 = 0x0102_0408_1020_4080;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PortableChunk([u64; 4]);

/// Bit `k` set iff byte `k` of `word` has its high bit set.
#[inline(always)]
fn movemask(word: u64) -> u32 {
    (((word >> 7) & LSB).wrapping_mul(GATHER) >> 56) as u32
}

impl PortableChunk {
    #[inline(always)]
    fn mask_with(self, f: impl Fn(u64) -> u64) -> u32 {
        let w = self.0;
        movemask(f(w[0]))
            | (movemask(f(w[1])) << 8)
            | (movemask(f(w[2])) << 16)
            | (movemask(f(w[3])) << 24)
    }

    #[inline(always)]
    fn to_bytes(self) -> [u8; 32] {
        bytemuck::cast(self.0.map(u64::to_le))
    }
}

unsafe impl ChunkLanes for PortableChunk {
    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> Self {
        let bytes = ptr.cast::<[u8; 32]>().read_unaligned();
        Self(bytemuck::cast::<[u8; 32], [u64; 4]>(bytes).map(u64::from_le))
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self([0; 4])
    }

    #[inline(always)]
    unsafe fn high_mask(self) -> u32 {
        self.mask_with(|w| w)
    }

    #[inline(always)]
    unsafe fn prefix_masks(self, high: u32) -> PrefixMasks {
        // Bit 7 - n of each byte moved to bit 7; neighbours never reach it
        PrefixMasks {
            high,
            shl: [
                self.mask_with(|w| w << 1),
                self.mask_with(|w| w << 2),
                self.mask_with(|w| w << 3),
            ],
        }
    }

    #[inline(always)]
    unsafe fn shift_in(self, prev: Self) -> Self {
        let w = self.0;
        Self([
            (w[0] << 8) | (prev.0[3] >> 56),
            (w[1] << 8) | (w[0] >> 56),
            (w[2] << 8) | (w[1] >> 56),
            (w[3] << 8) | (w[2] >> 56),
        ])
    }

    #[inline(always)]
    unsafe fn has_illegal_sequence(self, shifted: Self) -> bool {
        let prev = shifted.to_bytes();
        let cur = self.to_bytes();
        prev.iter()
            .zip(cur.iter())
            .fold(0u8, |errors, (&p, &c)| errors | classify(p, c))
            != 0
    }
}

/// Validate UTF-8 with the portable kernel.
#[inline]
pub fn validate_portable(input: &[u8]) -> bool {
    // SAFETY: the portable lanes need no CPU feature
    unsafe { scan_slice::<PortableChunk>(input) }
}

/// Validate `len` bytes at `data` with the portable kernel, reading whole
/// 32-byte chunks.
///
/// # Safety
///
/// `data..data + padded_len(len)` must be readable.
#[inline]
pub unsafe fn validate_portable_raw(data: *const u8, len: i64) -> bool {
    scan_raw::<PortableChunk>(data, len)
}
