//! Entropy sources for polynomial coefficients
//!
//! The splitter only needs one capability from its randomness: "give me `n`
//! bytes". [`EntropySource`] is that capability. Any [`RngCore`] can be
//! adapted with [`RngSource`]; [`DefaultSource`] is ChaCha20 seeded from the
//! operating system.
//!
//! The strength of the shares is bounded by the strength of the source. A
//! predictable source leaks the secret.

use crate::error::{Result, SsssError};
use rand::rngs::OsRng;
use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Supplier of raw random bytes
///
/// # Example
/// ```
/// use gf28_ssss::{EntropySource, Result};
///
/// /// Counter used only for reproducible demos; never use for real secrets.
/// struct Counter(u8);
///
/// impl EntropySource for Counter {
///     fn random_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
///         Ok((0..n)
///             .map(|_| {
///                 self.0 = self.0.wrapping_add(1);
///                 self.0
///             })
///             .collect())
///     }
/// }
///
/// let mut counter = Counter(0);
/// assert_eq!(counter.random_bytes(3).unwrap(), vec![1, 2, 3]);
/// ```
pub trait EntropySource {
    /// Returns exactly `n` random bytes
    fn random_bytes(&mut self, n: usize) -> Result<Vec<u8>>;
}

impl<S: EntropySource + ?Sized> EntropySource for &mut S {
    #[inline]
    fn random_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        (**self).random_bytes(n)
    }
}

impl<S: EntropySource + ?Sized> EntropySource for Box<S> {
    #[inline]
    fn random_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        (**self).random_bytes(n)
    }
}

/// Adapts any [`RngCore`] into an [`EntropySource`]
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> EntropySource for RngSource<R> {
    fn random_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.rng.fill_bytes(&mut buf);
        Ok(buf)
    }
}

/// ChaCha20 CSPRNG, the source used when the caller does not supply one
pub type DefaultSource = RngSource<ChaCha20Rng>;

impl RngSource<ChaCha20Rng> {
    /// Seeds ChaCha20 from the operating system
    pub fn from_os_rng() -> Result<Self> {
        let rng = ChaCha20Rng::try_from_rng(&mut OsRng)
            .map_err(|e| SsssError::EntropyFailure(e.to_string()))?;
        Ok(Self::new(rng))
    }

    /// Deterministic stream for reproducible tests and benchmarks
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::new(ChaCha20Rng::from_seed(seed))
    }
}
