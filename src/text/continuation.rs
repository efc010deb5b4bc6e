//! Continuation-byte accounting across 32-byte chunks.
//!
//! Every multi-byte lead byte requires a fixed number of continuation bytes
//! right after it. The tracker turns the per-chunk prefix masks into two
//! bitmasks, the bytes that *must* be continuations and the bytes that
//! *are* continuations, and requires them to be equal:
//!
//! ```text
//!   bytes:        61 C3 80 62 E0 A0 80 63 F0 90 80 80 00
//!   code points:  61|C3 80|62|E0 A0 80|63|F0 90 80 80|00
//!   required +1:  -  -  1  -  -  1  -  -  -  1  -  -  -
//!   required +2:  -  -  -  -  -  -  1  -  -  -  1  -  -
//!   required +3:  -  -  -  -  -  -  -  -  -  -  -  1  -
//!   required:     0  0  1  0  0  1  1  0  0  1  1  1  0
//! ```
//!
//! Requirements shifted past bit 31 belong to the next chunk and are carried.

/// Movemasks of one chunk.
///
/// Bit `i` of `shl[n - 1]` is the most significant bit of byte `i` after a
/// left shift by `n`, i.e. bit `7 - n` of the byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrefixMasks {
    /// Bytes with the high bit set.
    pub high: u32,
    /// Movemasks of the bytes shifted left by 1, 2 and 3 bits.
    pub shl: [u32; 3],
}

impl PrefixMasks {
    /// Compute the masks one byte at a time.
    ///
    /// The kernels produce the same masks with vector movemasks; this form is
    /// the reference they are tested against.
    pub fn from_bytes(chunk: &[u8; 32]) -> Self {
        let mut masks = Self::default();
        for (i, &byte) in chunk.iter().enumerate() {
            masks.high |= ((byte >> 7) as u32) << i;
            for n in 0..3 {
                masks.shl[n] |= (((byte << (n + 1)) >> 7) as u32) << i;
            }
        }
        masks
    }
}

/// Continuation requirements spilling into the next chunk.
///
/// Holds bits 32..35 of the previous chunk's required-continuation mask,
/// shifted down to bit 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContinuationCarry(u32);

impl ContinuationCarry {
    /// No pending requirements.
    pub const CLEAR: Self = Self(0);

    /// True if no multi-byte sequence is open at the chunk boundary.
    #[inline(always)]
    pub fn is_clear(self) -> bool {
        self.0 == 0
    }

    /// Raw carried bits, bit 0 being the first byte of the next chunk.
    #[inline(always)]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Check one chunk's continuation bytes and advance the carry.
    ///
    /// Returns false if the actual continuation bytes differ from the
    /// required ones. The carry is left untouched in that case.
    #[inline(always)]
    pub fn advance(&mut self, masks: &PrefixMasks) -> bool {
        let high = masks.high as u64;
        let mut req = self.0 as u64;

        // Lead bytes of 2+ byte sequences (11xxxxxx)
        let mut set = high & masks.shl[0] as u64;
        let cont = (high ^ set) as u32;
        req |= set << 1;

        // Lead bytes of 3+ byte sequences (111xxxxx)
        set &= masks.shl[1] as u64;
        req |= set << 2;

        // Lead bytes of 4 byte sequences (1111xxxx)
        set &= masks.shl[2] as u64;
        req |= set << 3;

        if cont != req as u32 {
            return false;
        }

        self.0 = (req >> 32) as u32;
        true
    }
}
