//! UTF-8 validation.
//!
//! - [`utf8`] - the public entry points and chunk geometry
//! - [`backend`] - kernel selection and the [`Validator`](backend::Validator) type
//! - [`tables`] - the nibble lookup tables for illegal sequences
//! - [`continuation`] - continuation-byte accounting across chunks
//!
//! ```
//! use utf8lanes::text::utf8::validate_utf8;
//!
//! assert!(validate_utf8("日本語".as_bytes()));
//!
//! // Surrogate U+D800
//! assert!(!validate_utf8(&[0xED, 0xA0, 0x80]));
//! ```

pub mod backend;
pub mod continuation;
pub(crate) mod scan;
pub mod tables;
pub mod utf8;

pub use backend::{Backend, UnsupportedBackend, Validator};
pub use utf8::{padded_len, validate_utf8, validate_utf8_raw, CHUNK_WIDTH};
