//! # utf8lanes
//!
//! Chunked UTF-8 validation for Rust.
//!
//! Input is processed in 32-byte chunks. Each chunk is checked for
//! continuation-byte structure with a handful of scalar bitmasks, and for
//! illegal encodings (overlong forms, surrogates, code points above U+10FFFF)
//! with three 16-entry nibble lookup tables applied to every lane at once.
//!
//! ## Module Organization
//!
//! - [`text`] - UTF-8 validation entry points, lookup tables and the chunk scanner
//! - [`simd`] - Architecture kernels (AVX2, NEON) and the portable lane emulation
//!
//! ## Quick Start
//!
//! ```
//! use utf8lanes::validate_utf8;
//!
//! assert!(validate_utf8(b"Hello, world!"));
//! assert!(validate_utf8("日本語 🎉".as_bytes()));
//!
//! // Overlong encoding of '/'
//! assert!(!validate_utf8(&[0xC0, 0xAF]));
//! ```
//!
//! ## Features
//!
//! - `std` (default) - Runtime CPU detection; AVX2 is used on x86_64 when present
//! - `portable` - Force the portable kernel in [`validate_utf8`]
//! - `serde` - Serialization support for [`Backend`]
//! - `cli` - The `utf8lanes` command line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// =============================================================================
// Core modules
// =============================================================================

/// UTF-8 validation.
pub mod text;

/// Per-architecture chunk kernels.
pub mod simd;

// =============================================================================
// Public re-exports
// =============================================================================

pub use text::backend::{Backend, UnsupportedBackend, Validator};
pub use text::utf8::{padded_len, validate_utf8, validate_utf8_raw, CHUNK_WIDTH};
