use crate::config::Config;
use crate::entropy::{DefaultSource, EntropySource};
use crate::error::{Result, SsssError};
use crate::gf28::{Gf28, MASK};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One share of a split secret
///
/// Encoded as `[x] || y_0 || y_1 || ... || y_{L-1}`, where `x` is the share's
/// nonzero x-coordinate and `y_i` is the evaluation at `x` of the polynomial
/// hiding secret byte `i`. This byte layout is the interchange format.
///
/// # Example
/// ```
/// use gf28_ssss::{DefaultSource, split};
///
/// let mut rng = DefaultSource::from_os_rng().unwrap();
/// let shares = split(b"secret", 3, 5, &mut rng).unwrap();
/// let share = &shares[0];
///
/// assert_eq!(share.x(), 1);
/// assert_eq!(share.secret_len(), 6);
/// assert_eq!(share.as_bytes().len(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>")]
#[cfg_attr(feature = "zeroize", derive(Zeroize, ZeroizeOnDrop))]
pub struct Share(Vec<u8>);

impl Share {
    /// The x-coordinate of every point in this share
    #[inline]
    pub fn x(&self) -> u8 {
        self.0[0]
    }

    /// The y-coordinate for secret byte `idx`
    #[inline]
    pub fn y(&self, idx: usize) -> Result<u8> {
        get_y(&self.0, idx)
    }

    /// All y-coordinates, one per secret byte
    #[inline]
    pub fn ys(&self) -> &[u8] {
        &self.0[1..]
    }

    /// Length of the secret this share was split from
    #[inline]
    pub fn secret_len(&self) -> usize {
        self.0.len() - 1
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        std::mem::take(&mut self.0)
    }
}

impl AsRef<[u8]> for Share {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for Share {
    type Error = SsssError;

    /// Accepts any encoding with a nonzero x-coordinate
    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        match bytes.first() {
            Some(&x) if x != 0 => Ok(Self(bytes)),
            _ => Err(SsssError::InvalidShareFormat),
        }
    }
}

/// Returns the x-coordinate of an encoded share
///
/// ```
/// use gf28_ssss::get_x;
///
/// assert_eq!(get_x(&[3, 0x41, 0x42]).unwrap(), 3);
/// assert!(get_x(&[]).is_err());
/// ```
pub fn get_x(share: &[u8]) -> Result<u8> {
    share
        .first()
        .copied()
        .ok_or(SsssError::IndexOutOfRange { index: 0, len: 0 })
}

/// Returns the y-coordinate for secret byte `idx` of an encoded share
///
/// ```
/// use gf28_ssss::get_y;
///
/// assert_eq!(get_y(&[3, 0x41, 0x42], 1).unwrap(), 0x42);
/// assert!(get_y(&[3, 0x41, 0x42], 2).is_err());
/// ```
pub fn get_y(share: &[u8], idx: usize) -> Result<u8> {
    idx.checked_add(1)
        .and_then(|pos| share.get(pos))
        .copied()
        .ok_or(SsssError::IndexOutOfRange {
            index: idx,
            len: share.len().saturating_sub(1),
        })
}

/// Messages that can be split
///
/// Byte containers are used as-is. Text is taken one byte per character, so
/// only characters up to U+00FF are accepted; anything wider fails with
/// [`SsssError::UnsupportedInputType`].
pub trait SecretInput {
    fn secret_bytes(&self) -> Result<Cow<'_, [u8]>>;
}

impl SecretInput for [u8] {
    fn secret_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<const N: usize> SecretInput for [u8; N] {
    fn secret_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl SecretInput for Vec<u8> {
    fn secret_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl SecretInput for str {
    fn secret_bytes(&self) -> Result<Cow<'_, [u8]>> {
        self.chars()
            .map(|c| {
                u8::try_from(c).map_err(|_| {
                    SsssError::UnsupportedInputType(format!(
                        "character U+{:04X} does not fit in one byte",
                        c as u32
                    ))
                })
            })
            .collect::<Result<Vec<u8>>>()
            .map(Cow::Owned)
    }
}

impl SecretInput for String {
    fn secret_bytes(&self) -> Result<Cow<'_, [u8]>> {
        self.as_str().secret_bytes()
    }
}

impl<T: SecretInput + ?Sized> SecretInput for &T {
    fn secret_bytes(&self) -> Result<Cow<'_, [u8]>> {
        (**self).secret_bytes()
    }
}

/// Splits `message` into `n` shares, any `k` of which determine it
///
/// `n == 0` means `n = k`. Parameters are checked before the message is
/// converted or any randomness is drawn.
///
/// # Errors
/// - [`SsssError::InvalidThreshold`] if `k < 2`
/// - [`SsssError::InsufficientShares`] if `n < k`
/// - [`SsssError::TooManyShares`] if `n > 255`
/// - [`SsssError::UnsupportedInputType`] if text holds a character above U+00FF
/// - [`SsssError::EntropyFailure`] if `rng` fails or returns a short buffer
///
/// # Example
/// ```
/// use gf28_ssss::{DefaultSource, split};
///
/// let mut rng = DefaultSource::from_os_rng().unwrap();
/// let shares = split("attack at dawn", 3, 5, &mut rng).unwrap();
/// assert_eq!(shares.len(), 5);
/// assert!(shares.iter().all(|s| s.secret_len() == 14));
/// ```
pub fn split<M, R>(message: &M, k: usize, n: usize, rng: &mut R) -> Result<Vec<Share>>
where
    M: SecretInput + ?Sized,
    R: EntropySource + ?Sized,
{
    Splitter::builder(k).total_shares(n).build()?.split(message, rng)
}

/// Threshold secret splitter over GF(2^8)
///
/// Each secret byte becomes the constant term of a random polynomial of
/// degree `threshold - 1`; share `j` holds that polynomial evaluated at
/// `x = j + 1`.
///
/// # Example
/// ```
/// use gf28_ssss::{Config, DefaultSource, SplitMode, Splitter};
///
/// let splitter = Splitter::builder(3)
///     .total_shares(5)
///     .with_config(Config::new().with_mode(SplitMode::Parallel))
///     .build()
///     .unwrap();
///
/// let mut rng = DefaultSource::from_seed([0x5A; 32]);
/// let shares = splitter.split(b"my secret data", &mut rng).unwrap();
/// assert_eq!(shares.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Splitter {
    threshold: usize,
    total_shares: usize,
    config: Config,
}

/// Builder for [`Splitter`]
#[derive(Debug)]
pub struct SplitterBuilder {
    threshold: usize,
    total_shares: usize,
    config: Config,
}

impl SplitterBuilder {
    /// Starts a builder with `total_shares` defaulting to `threshold`
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            total_shares: 0,
            config: Config::default(),
        }
    }

    /// Sets the number of shares to produce; 0 means "same as threshold"
    pub fn total_shares(mut self, total_shares: usize) -> Self {
        self.total_shares = total_shares;
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Validates the parameters
    pub fn build(self) -> Result<Splitter> {
        let threshold = self.threshold;
        let total_shares = if self.total_shares == 0 {
            threshold
        } else {
            self.total_shares
        };

        if threshold <= 1 {
            return Err(SsssError::InvalidThreshold(threshold));
        }
        if total_shares < threshold {
            return Err(SsssError::InsufficientShares {
                threshold,
                total_shares,
            });
        }
        if total_shares > MASK as usize {
            return Err(SsssError::TooManyShares(total_shares));
        }

        self.config.validate()?;

        Ok(Splitter {
            threshold,
            total_shares,
            config: self.config,
        })
    }
}

impl Splitter {
    pub fn builder(threshold: usize) -> SplitterBuilder {
        SplitterBuilder::new(threshold)
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn total_shares(&self) -> usize {
        self.total_shares
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Splits `message` drawing coefficients from `rng`
    ///
    /// `rng` is asked for `threshold - 1` bytes once per message byte, in
    /// message order.
    pub fn split<M, R>(&self, message: &M, rng: &mut R) -> Result<Vec<Share>>
    where
        M: SecretInput + ?Sized,
        R: EntropySource + ?Sized,
    {
        let mut secret = message.secret_bytes()?;
        let shares = self.split_bytes(&secret, rng);
        if let Cow::Owned(bytes) = &mut secret {
            wipe(bytes);
        }
        shares
    }

    /// Splits `message` with a freshly OS-seeded [`DefaultSource`]
    pub fn split_with_default_rng<M>(&self, message: &M) -> Result<Vec<Share>>
    where
        M: SecretInput + ?Sized,
    {
        let mut secret = message.secret_bytes()?;
        let mut rng = DefaultSource::from_os_rng()?;
        let shares = self.split_bytes(&secret, &mut rng);
        if let Cow::Owned(bytes) = &mut secret {
            wipe(bytes);
        }
        shares
    }

    fn split_bytes<R>(&self, secret: &[u8], rng: &mut R) -> Result<Vec<Share>>
    where
        R: EntropySource + ?Sized,
    {
        let parallel = self.config.evaluates_in_parallel(secret.len());
        tracing::debug!(
            threshold = self.threshold,
            total_shares = self.total_shares,
            secret_len = secret.len(),
            parallel,
            "splitting secret"
        );

        let mut shares: Vec<Vec<u8>> = (1..=self.total_shares)
            .map(|x| {
                let mut share = Vec::with_capacity(1 + secret.len());
                share.push(x as u8);
                share
            })
            .collect();

        if parallel {
            self.evaluate_parallel(secret, rng, &mut shares)?;
        } else {
            self.evaluate_sequential(secret, rng, &mut shares)?;
        }

        Ok(shares.into_iter().map(Share).collect())
    }

    fn evaluate_sequential<R>(
        &self,
        secret: &[u8],
        rng: &mut R,
        shares: &mut [Vec<u8>],
    ) -> Result<()>
    where
        R: EntropySource + ?Sized,
    {
        let mut coeffs = vec![0u8; self.threshold];
        let result: Result<()> = secret.iter().try_for_each(|&byte| {
            draw_coefficients(&mut *rng, byte, &mut coeffs)?;
            for share in shares.iter_mut() {
                let x = Gf28::new(share[0]);
                share.push(evaluate(&coeffs, x).value());
            }
            Ok(())
        });
        wipe(&mut coeffs);
        result
    }

    // Coefficients for every byte are drawn up front, in the same order as the
    // sequential path, so both modes yield identical shares.
    fn evaluate_parallel<R>(
        &self,
        secret: &[u8],
        rng: &mut R,
        shares: &mut [Vec<u8>],
    ) -> Result<()>
    where
        R: EntropySource + ?Sized,
    {
        let k = self.threshold;
        let mut table = vec![0u8; secret.len() * k];
        let drawn = secret
            .iter()
            .zip(table.chunks_exact_mut(k))
            .try_for_each(|(&byte, coeffs)| draw_coefficients(&mut *rng, byte, coeffs));
        if let Err(e) = drawn {
            wipe(&mut table);
            return Err(e);
        }

        shares.par_iter_mut().for_each(|share| {
            let x = Gf28::new(share[0]);
            share.extend(table.chunks_exact(k).map(|coeffs| evaluate(coeffs, x).value()));
        });

        wipe(&mut table);
        Ok(())
    }
}

/// Fills `coeffs` with the secret byte followed by `coeffs.len() - 1` random bytes
fn draw_coefficients<R>(rng: &mut R, secret_byte: u8, coeffs: &mut [u8]) -> Result<()>
where
    R: EntropySource + ?Sized,
{
    let degree = coeffs.len() - 1;
    let mut random = rng.random_bytes(degree)?;
    if random.len() != degree {
        let got = random.len();
        wipe(&mut random);
        return Err(SsssError::EntropyFailure(format!(
            "requested {} bytes, got {}",
            degree, got
        )));
    }
    coeffs[0] = secret_byte;
    coeffs[1..].copy_from_slice(&random);
    wipe(&mut random);
    Ok(())
}

/// Horner evaluation, `coeffs[0]` being the constant term
#[inline]
fn evaluate(coeffs: &[u8], x: Gf28) -> Gf28 {
    coeffs
        .iter()
        .rev()
        .fold(Gf28::ZERO, |acc, &c| acc * x + Gf28::new(c))
}

#[inline]
fn wipe(buf: &mut [u8]) {
    #[cfg(feature = "zeroize")]
    buf.zeroize();
    #[cfg(not(feature = "zeroize"))]
    let _ = buf;
}
