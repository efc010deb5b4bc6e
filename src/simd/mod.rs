//! Chunk kernels for UTF-8 validation.
//!
//! On x86_64, AVX2 processes a chunk in one 256-bit register.
//! On ARM, NEON processes a chunk as a pair of 128-bit registers.
//! Everywhere, the portable kernel emulates the 32 lanes with four `u64` words.
//!
//! All kernels run the same chunk algorithm and agree on every input.

#[cfg(target_arch = "x86_64")]
pub mod x86;

#[cfg(target_arch = "aarch64")]
pub mod neon;

pub mod portable;

#[cfg(target_arch = "x86_64")]
pub use x86::{validate_avx2, validate_avx2_raw};

#[cfg(target_arch = "aarch64")]
pub use neon::{validate_neon, validate_neon_raw};

pub use portable::{validate_portable, validate_portable_raw};
