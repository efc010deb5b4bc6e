//! Benchmark comparison crate for UTF-8 validators.
//!
//! This crate exists solely to benchmark utf8lanes against other UTF-8
//! validators without adding them as dependencies of utf8lanes itself.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --bench utf8_validators
//! ```
