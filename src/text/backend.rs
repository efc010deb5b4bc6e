//! Kernel selection.
//!
//! [`Backend::detect`] picks the fastest kernel the running CPU supports:
//!
//! - x86_64: AVX2 when detected at runtime (`std`) or enabled at compile time
//! - aarch64: NEON
//! - everything else, or with the `portable` feature: the portable kernel
//!
//! [`Validator`] pins a backend explicitly, e.g. to compare kernels.

use core::fmt;

/// A chunk kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Backend {
    /// 256-bit AVX2 registers (x86_64).
    Avx2,
    /// Pairs of 128-bit NEON registers (aarch64).
    Neon,
    /// Four `u64` words per chunk; runs anywhere.
    Portable,
}

impl Backend {
    /// Every backend, fastest first.
    pub const ALL: [Backend; 3] = [Backend::Avx2, Backend::Neon, Backend::Portable];

    /// The fastest backend supported by the running CPU.
    pub fn detect() -> Self {
        if cfg!(feature = "portable") {
            return Backend::Portable;
        }
        if Backend::Avx2.is_supported() {
            return Backend::Avx2;
        }
        if Backend::Neon.is_supported() {
            return Backend::Neon;
        }
        Backend::Portable
    }

    /// True if this backend can run on the current CPU.
    pub fn is_supported(self) -> bool {
        match self {
            Backend::Avx2 => avx2_supported(),
            Backend::Neon => cfg!(target_arch = "aarch64"),
            Backend::Portable => true,
        }
    }

    /// Short lowercase name, as accepted by the command line tool.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Avx2 => "avx2",
            Backend::Neon => "neon",
            Backend::Portable => "portable",
        }
    }

    /// # Safety
    ///
    /// `self.is_supported()` must be true.
    #[inline]
    pub(crate) unsafe fn validate_unchecked(self, input: &[u8]) -> bool {
        match self {
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => crate::simd::x86::validate_avx2(input),
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => crate::simd::neon::validate_neon(input),
            _ => crate::simd::portable::validate_portable(input),
        }
    }

    /// # Safety
    ///
    /// `self.is_supported()` must be true and `data..data + padded_len(len)`
    /// must be readable.
    #[inline]
    pub(crate) unsafe fn validate_raw_unchecked(self, data: *const u8, len: i64) -> bool {
        match self {
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => crate::simd::x86::validate_avx2_raw(data, len),
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => crate::simd::neon::validate_neon_raw(data, len),
            _ => crate::simd::portable::validate_portable_raw(data, len),
        }
    }
}

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
#[inline]
fn avx2_supported() -> bool {
    true
}

#[cfg(all(
    target_arch = "x86_64",
    not(target_feature = "avx2"),
    any(test, feature = "std")
))]
#[inline]
fn avx2_supported() -> bool {
    is_x86_feature_detected!("avx2")
}

// No runtime detection without std
#[cfg(not(all(
    target_arch = "x86_64",
    any(target_feature = "avx2", test, feature = "std")
)))]
#[inline]
fn avx2_supported() -> bool {
    false
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a [`Validator`] is asked for a backend the CPU lacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnsupportedBackend {
    /// The backend that was requested.
    pub backend: Backend,
}

impl fmt::Display for UnsupportedBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} backend is not supported on this CPU", self.backend)
    }
}

#[cfg(any(test, feature = "std"))]
impl std::error::Error for UnsupportedBackend {}

/// UTF-8 validator bound to one backend.
///
/// # Examples
///
/// ```
/// use utf8lanes::{Backend, Validator};
///
/// let portable = Validator::with_backend(Backend::Portable).unwrap();
/// assert!(portable.validate("Ψ".as_bytes()));
///
/// let fastest = Validator::new();
/// assert!(fastest.backend().is_supported());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Validator {
    backend: Backend,
}

impl Validator {
    /// Validator using [`Backend::detect`].
    pub fn new() -> Self {
        Self {
            backend: Backend::detect(),
        }
    }

    /// Validator using `backend`, if the CPU supports it.
    pub fn with_backend(backend: Backend) -> Result<Self, UnsupportedBackend> {
        if backend.is_supported() {
            Ok(Self { backend })
        } else {
            Err(UnsupportedBackend { backend })
        }
    }

    /// The backend this validator runs.
    #[inline]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Validate that `input` is well-formed UTF-8.
    #[inline]
    pub fn validate(&self, input: &[u8]) -> bool {
        // SAFETY: construction checked is_supported
        unsafe { self.backend.validate_unchecked(input) }
    }

    /// Validate `len` bytes at `data`, reading whole 32-byte chunks.
    ///
    /// # Safety
    ///
    /// Same contract as [`validate_utf8_raw`](crate::validate_utf8_raw).
    #[inline]
    pub unsafe fn validate_raw(&self, data: *const u8, len: i64) -> bool {
        if len <= 0 {
            return true;
        }
        self.backend.validate_raw_unchecked(data, len)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported() -> Vec<Validator> {
        Backend::ALL
            .iter()
            .filter_map(|&b| Validator::with_backend(b).ok())
            .collect()
    }

    #[test]
    fn test_portable_always_supported() {
        assert!(Backend::Portable.is_supported());
        assert!(Validator::with_backend(Backend::Portable).is_ok());
    }

    #[test]
    fn test_detect_is_supported() {
        assert!(Backend::detect().is_supported());
        assert_eq!(Validator::new().backend(), Backend::detect());
        assert_eq!(Validator::default(), Validator::new());
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_neon_unsupported_on_x86() {
        let err = Validator::with_backend(Backend::Neon).unwrap_err();
        assert_eq!(err.backend, Backend::Neon);
        assert_eq!(err.to_string(), "neon backend is not supported on this CPU");
    }

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn test_avx2_unsupported_on_arm() {
        assert!(Validator::with_backend(Backend::Avx2).is_err());
        if !cfg!(feature = "portable") {
            assert_eq!(Backend::detect(), Backend::Neon);
        }
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = Backend::ALL.iter().map(|b| b.to_string()).collect();
        assert_eq!(names, ["avx2", "neon", "portable"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_lowercase_names() {
        assert_eq!(serde_json::to_string(&Backend::Avx2).unwrap(), "\"avx2\"");
        let backend: Backend = serde_json::from_str("\"portable\"").unwrap();
        assert_eq!(backend, Backend::Portable);
        assert!(serde_json::from_str::<Backend>("\"sse2\"").is_err());
    }

    #[test]
    fn test_backends_agree() {
        let inputs: Vec<Vec<u8>> = vec![
            Vec::new(),
            b"plain ascii".to_vec(),
            "Ωmega ∑ 😀".repeat(13).into_bytes(),
            vec![0xF0, 0x80, 0x80, 0x80],
            vec![0xED, 0xA0, 0x80],
            {
                let mut v = vec![b'a'; 63];
                v.push(0xF4);
                v.extend_from_slice(&[0x8F, 0xBF, 0xBF]);
                v
            },
            {
                let mut v = "ü".repeat(40).into_bytes();
                v.pop();
                v
            },
        ];
        let validators = supported();
        for input in &inputs {
            let expected = core::str::from_utf8(input).is_ok();
            for v in &validators {
                assert_eq!(v.validate(input), expected, "{} on {:?}", v.backend(), input);
            }
        }
    }

    #[test]
    fn test_raw_backends_agree() {
        let text = "€uro ".repeat(10);
        let mut buf = text.clone().into_bytes();
        buf.resize(crate::padded_len(text.len()), 0xC3);
        for v in supported() {
            for end in 0..=text.len() {
                let expected = core::str::from_utf8(&text.as_bytes()[..end]).is_ok();
                let got = unsafe { v.validate_raw(buf.as_ptr(), end as i64) };
                assert_eq!(got, expected, "{} end={}", v.backend(), end);
            }
        }
    }
}
