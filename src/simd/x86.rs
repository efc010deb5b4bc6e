//! AVX2 chunk kernel.
//!
//! One chunk is one `__m256i`. The nibble tables are looked up with
//! `vpshufb`, which shuffles within each 128-bit half, so every table is
//! broadcast to both halves.

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::text::continuation::PrefixMasks;
use crate::text::scan::{scan_raw, scan_slice, ChunkLanes};
use crate::text::tables::{FIRST_NIBBLE, SECOND_NIBBLE, THIRD_NIBBLE};

#[derive(Clone, Copy)]
pub(crate) struct Avx2Chunk(__m256i);

#[inline(always)]
unsafe fn broadcast_table(table: &[u8; 16]) -> __m256i {
    _mm256_broadcastsi128_si256(_mm_loadu_si128(table.as_ptr() as *const __m128i))
}

#[inline(always)]
unsafe fn high_nibbles(v: __m256i) -> __m256i {
    // No 8-bit shift on x86; the mask drops bits pulled in from the neighbour
    _mm256_and_si256(_mm256_srli_epi16::<4>(v), _mm256_set1_epi8(0x0F))
}

#[inline(always)]
unsafe fn low_nibbles(v: __m256i) -> __m256i {
    _mm256_and_si256(v, _mm256_set1_epi8(0x0F))
}

unsafe impl ChunkLanes for Avx2Chunk {
    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> Self {
        Self(_mm256_loadu_si256(ptr as *const __m256i))
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self(_mm256_setzero_si256())
    }

    #[inline(always)]
    unsafe fn high_mask(self) -> u32 {
        _mm256_movemask_epi8(self.0) as u32
    }

    #[inline(always)]
    unsafe fn prefix_masks(self, high: u32) -> PrefixMasks {
        // 16-bit shifts carry bits across bytes, but bit 7 of each byte after
        // a shift by n < 8 still comes from the same byte.
        PrefixMasks {
            high,
            shl: [
                _mm256_movemask_epi8(_mm256_slli_epi16::<1>(self.0)) as u32,
                _mm256_movemask_epi8(_mm256_slli_epi16::<2>(self.0)) as u32,
                _mm256_movemask_epi8(_mm256_slli_epi16::<3>(self.0)) as u32,
            ],
        }
    }

    #[inline(always)]
    unsafe fn shift_in(self, prev: Self) -> Self {
        // [prev.hi, self.lo], so alignr sees the right neighbour in each half
        let straddle = _mm256_permute2x128_si256::<0x21>(prev.0, self.0);
        Self(_mm256_alignr_epi8::<15>(self.0, straddle))
    }

    #[inline(always)]
    unsafe fn has_illegal_sequence(self, shifted: Self) -> bool {
        let e1 = _mm256_shuffle_epi8(broadcast_table(&FIRST_NIBBLE), high_nibbles(shifted.0));
        let e2 = _mm256_shuffle_epi8(broadcast_table(&SECOND_NIBBLE), low_nibbles(shifted.0));
        let e3 = _mm256_shuffle_epi8(broadcast_table(&THIRD_NIBBLE), high_nibbles(self.0));
        _mm256_testz_si256(_mm256_and_si256(e1, e2), e3) == 0
    }
}

/// Validate UTF-8 using AVX2.
///
/// # Safety
///
/// The CPU must support AVX2 (caller should check).
#[target_feature(enable = "avx2")]
pub unsafe fn validate_avx2(input: &[u8]) -> bool {
    scan_slice::<Avx2Chunk>(input)
}

/// Validate `len` bytes at `data` using AVX2, reading whole 32-byte chunks.
///
/// # Safety
///
/// - `data..data + padded_len(len)` must be readable
/// - The CPU must support AVX2 (caller should check)
#[target_feature(enable = "avx2")]
pub unsafe fn validate_avx2_raw(data: *const u8, len: i64) -> bool {
    scan_raw::<Avx2Chunk>(data, len)
}
