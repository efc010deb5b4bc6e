//! NEON chunk kernel for ARM64.
//!
//! A chunk is held as two 128-bit registers. NEON is mandatory on aarch64,
//! so the entry points need no runtime check.

use core::arch::aarch64::*;

use crate::text::continuation::PrefixMasks;
use crate::text::scan::{scan_raw, scan_slice, ChunkLanes};
use crate::text::tables::{FIRST_NIBBLE, SECOND_NIBBLE, THIRD_NIBBLE};

#[derive(Clone, Copy)]
pub(crate) struct NeonChunk {
    lo: uint8x16_t,
    hi: uint8x16_t,
}

/// Bit `i` set iff byte `i` of `v` has its high bit set.
#[inline(always)]
unsafe fn movemask(v: uint8x16_t) -> u32 {
    // 0 or 1 per byte, then pack 8 bytes into 8 bits with a multiply
    let bits = vreinterpretq_u64_u8(vshrq_n_u8::<7>(v));
    const MAGIC: u64 = 0x0102040810204080;
    let lo = vgetq_lane_u64::<0>(bits).wrapping_mul(MAGIC) >> 56;
    let hi = vgetq_lane_u64::<1>(bits).wrapping_mul(MAGIC) >> 56;
    (lo | (hi << 8)) as u32
}

impl NeonChunk {
    #[inline(always)]
    unsafe fn mask(self) -> u32 {
        movemask(self.lo) | (movemask(self.hi) << 16)
    }

    #[inline(always)]
    unsafe fn map(self, f: impl Fn(uint8x16_t) -> uint8x16_t) -> Self {
        Self {
            lo: f(self.lo),
            hi: f(self.hi),
        }
    }
}

unsafe impl ChunkLanes for NeonChunk {
    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> Self {
        Self {
            lo: vld1q_u8(ptr),
            hi: vld1q_u8(ptr.add(16)),
        }
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self {
            lo: vdupq_n_u8(0),
            hi: vdupq_n_u8(0),
        }
    }

    #[inline(always)]
    unsafe fn high_mask(self) -> u32 {
        self.mask()
    }

    #[inline(always)]
    unsafe fn prefix_masks(self, high: u32) -> PrefixMasks {
        PrefixMasks {
            high,
            shl: [
                self.map(|v| vshlq_n_u8::<1>(v)).mask(),
                self.map(|v| vshlq_n_u8::<2>(v)).mask(),
                self.map(|v| vshlq_n_u8::<3>(v)).mask(),
            ],
        }
    }

    #[inline(always)]
    unsafe fn shift_in(self, prev: Self) -> Self {
        Self {
            lo: vextq_u8::<15>(prev.hi, self.lo),
            hi: vextq_u8::<15>(self.lo, self.hi),
        }
    }

    #[inline(always)]
    unsafe fn has_illegal_sequence(self, shifted: Self) -> bool {
        let first = vld1q_u8(FIRST_NIBBLE.as_ptr());
        let second = vld1q_u8(SECOND_NIBBLE.as_ptr());
        let third = vld1q_u8(THIRD_NIBBLE.as_ptr());
        let low_mask = vdupq_n_u8(0x0F);

        let errors = |prev: uint8x16_t, cur: uint8x16_t| {
            let e1 = vqtbl1q_u8(first, vshrq_n_u8::<4>(prev));
            let e2 = vqtbl1q_u8(second, vandq_u8(prev, low_mask));
            let e3 = vqtbl1q_u8(third, vshrq_n_u8::<4>(cur));
            vandq_u8(vandq_u8(e1, e2), e3)
        };

        let any = vorrq_u8(errors(shifted.lo, self.lo), errors(shifted.hi, self.hi));
        vmaxvq_u8(any) != 0
    }
}

/// Validate UTF-8 using NEON.
#[inline]
pub fn validate_neon(input: &[u8]) -> bool {
    // SAFETY: target_arch = aarch64 guarantees NEON
    unsafe { validate_neon_impl(input) }
}

#[target_feature(enable = "neon")]
unsafe fn validate_neon_impl(input: &[u8]) -> bool {
    scan_slice::<NeonChunk>(input)
}

/// Validate `len` bytes at `data` using NEON, reading whole 32-byte chunks.
///
/// # Safety
///
/// `data..data + padded_len(len)` must be readable.
#[target_feature(enable = "neon")]
pub unsafe fn validate_neon_raw(data: *const u8, len: i64) -> bool {
    scan_raw::<NeonChunk>(data, len)
}
