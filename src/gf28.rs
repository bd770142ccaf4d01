//! Arithmetic over GF(2^8)
//!
//! Elements are bytes. Addition is XOR; multiplication and division go through
//! discrete log / antilog tables generated from [`GEN`] and the primitive
//! polynomial [`PRIM_POLY`]. The tables are built once per process on first
//! use and are read-only afterwards.
//!
//! Two surfaces are provided:
//!
//! - [`Gf28`], a typed element with operator overloads, used by the splitter.
//! - Checked free functions ([`add`], [`mul`], [`div`], ...) taking wide
//!   integers, which reject anything outside `0..=255` with
//!   [`SsssError::InvalidElement`].
//!
//! # Example
//! ```
//! use gf28_ssss::gf28::{self, Gf28};
//!
//! let a = Gf28::new(0x53);
//! let b = Gf28::new(0xCA);
//! assert_eq!((a * b).checked_div(b).unwrap(), a);
//!
//! assert_eq!(gf28::add(0x53, 0xCA).unwrap(), 0x99);
//! assert!(gf28::mul(256, 1).is_err());
//! ```

use crate::error::{Result, SsssError};
use once_cell::sync::Lazy;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

/// Additive identity
pub const ZERO: u8 = 0;
/// Multiplicative identity
pub const ONE: u8 = 1;
/// Number of distinct elements in the field
pub const SIZE: usize = 1 << 8;
/// Bitmask for field elements, also the order of the multiplicative group
pub const MASK: u8 = 0xFF;
/// Generator of the multiplicative group. Being 2, multiplying by it is a shift.
pub const GEN: u8 = 0x02;
/// Primitive reducing polynomial x^8 + x^4 + x^3 + x^2 + 1
pub const PRIM_POLY: u16 = 0o435;

const ORDER: usize = MASK as usize;

struct Tables {
    log: [u8; SIZE],
    exp: [u8; SIZE],
}

impl Tables {
    fn build() -> Self {
        // 0 has no discrete log
        let mut log = [MASK; SIZE];
        let mut exp = [ZERO; SIZE];

        let mut accum = ONE as u16;
        for i in 0..ORDER {
            log[accum as usize] = i as u8;
            exp[i] = accum as u8;
            accum <<= 1;
            if accum & SIZE as u16 != 0 {
                accum = (accum ^ PRIM_POLY) & MASK as u16;
            }
        }

        tracing::trace!(generator = GEN, poly = PRIM_POLY, "built GF(2^8) log/exp tables");
        Self { log, exp }
    }
}

static TABLES: Lazy<Tables> = Lazy::new(Tables::build);

/// Discrete log table; `log_table()[0]` holds the sentinel 255
pub fn log_table() -> &'static [u8; SIZE] {
    &TABLES.log
}

/// Antilog table; `exp_table()[i]` is `GEN^i` for `i` in `0..255`
pub fn exp_table() -> &'static [u8; SIZE] {
    &TABLES.exp
}

/// An element of GF(2^8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Gf28(pub u8);

impl Gf28 {
    pub const ZERO: Self = Self(ZERO);
    pub const ONE: Self = Self(ONE);
    pub const GEN: Self = Self(GEN);

    #[inline]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == ZERO
    }

    /// Multiplication via log/antilog lookup
    #[inline]
    pub fn multiply(self, other: Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::ZERO;
        }
        let t = &*TABLES;
        let mut idx = t.log[self.0 as usize] as usize + t.log[other.0 as usize] as usize;
        if idx >= ORDER {
            idx -= ORDER;
        }
        Self(t.exp[idx])
    }

    /// Division, failing with [`SsssError::DivisionByZero`] when `other` is zero
    ///
    /// # Example
    /// ```
    /// use gf28_ssss::Gf28;
    ///
    /// let a = Gf28::new(0x1D);
    /// assert_eq!(a.checked_div(Gf28::new(0x02)).unwrap(), Gf28::new(0x80));
    /// assert!(a.checked_div(Gf28::ZERO).is_err());
    /// ```
    #[inline]
    pub fn checked_div(self, other: Self) -> Result<Self> {
        if other.is_zero() {
            return Err(SsssError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Self::ZERO);
        }
        let t = &*TABLES;
        let mut idx = t.log[self.0 as usize] as isize - t.log[other.0 as usize] as isize;
        if idx < 0 {
            idx += ORDER as isize;
        }
        Ok(Self(t.exp[idx as usize]))
    }

    /// Multiplicative inverse; zero has none
    #[inline]
    pub fn inverse(self) -> Result<Self> {
        if self.is_zero() {
            return Err(SsssError::DivisionByZero);
        }
        let t = &*TABLES;
        Ok(Self(t.exp[(ORDER - t.log[self.0 as usize] as usize) % ORDER]))
    }

    /// Integer power by square-and-multiply
    ///
    /// `x^0` is 1 for every `x`, zero included. A negative exponent raises the
    /// inverse instead, so `Gf28::ZERO.pow(-1)` fails with
    /// [`SsssError::DivisionByZero`].
    ///
    /// # Example
    /// ```
    /// use gf28_ssss::Gf28;
    ///
    /// let base = Gf28::new(0x03);
    /// assert_eq!(base.pow(3).unwrap(), base * base * base);
    /// assert_eq!(base.pow(-1).unwrap(), base.inverse().unwrap());
    /// ```
    pub fn pow(self, n: i32) -> Result<Self> {
        if n < 0 {
            return Ok(self.inverse()?.pow_unsigned(n.unsigned_abs()));
        }
        Ok(self.pow_unsigned(n as u32))
    }

    fn pow_unsigned(self, mut exp: u32) -> Self {
        let mut result = Self::ONE;
        let mut base = self;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.multiply(base);
            }
            base = base.multiply(base);
            exp >>= 1;
        }
        result
    }
}

impl fmt::Display for Gf28 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

impl From<u8> for Gf28 {
    #[inline]
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Gf28> for u8 {
    #[inline]
    fn from(value: Gf28) -> Self {
        value.0
    }
}

impl TryFrom<i64> for Gf28 {
    type Error = SsssError;

    fn try_from(value: i64) -> Result<Self> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| SsssError::InvalidElement(value))
    }
}

impl TryFrom<i32> for Gf28 {
    type Error = SsssError;

    fn try_from(value: i32) -> Result<Self> {
        Self::try_from(i64::from(value))
    }
}

impl Add for Gf28 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        #[allow(clippy::suspicious_arithmetic_impl)]
        let result = self.0 ^ other.0;
        Self(result)
    }
}

impl Sub for Gf28 {
    type Output = Self;
    // Characteristic 2: subtraction is addition
    #[inline]
    fn sub(self, other: Self) -> Self {
        self + other
    }
}

impl Mul for Gf28 {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.multiply(other)
    }
}

impl AddAssign for Gf28 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Gf28 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl MulAssign for Gf28 {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

/// Returns true iff `x` is in `0..=255`
///
/// ```
/// use gf28_ssss::gf28::is_elem;
///
/// assert!(is_elem(255));
/// assert!(!is_elem(256));
/// assert!(!is_elem(-1));
/// ```
#[inline]
pub fn is_elem(x: i64) -> bool {
    (0..=i64::from(MASK)).contains(&x)
}

#[inline]
fn elem(x: i64) -> Result<Gf28> {
    Gf28::try_from(x)
}

/// Field addition (XOR)
pub fn add(x: i64, y: i64) -> Result<u8> {
    Ok((elem(x)? + elem(y)?).0)
}

/// Field subtraction, identical to [`add`]
pub fn sub(x: i64, y: i64) -> Result<u8> {
    Ok((elem(x)? - elem(y)?).0)
}

/// Field multiplication
pub fn mul(x: i64, y: i64) -> Result<u8> {
    Ok((elem(x)? * elem(y)?).0)
}

/// Field division; `y` must be nonzero
pub fn div(x: i64, y: i64) -> Result<u8> {
    Ok(elem(x)?.checked_div(elem(y)?)?.0)
}

/// Multiplicative inverse; `x` must be nonzero
pub fn inv(x: i64) -> Result<u8> {
    Ok(elem(x)?.inverse()?.0)
}

/// `x` raised to the integer power `n`
pub fn pow(x: i64, n: i32) -> Result<u8> {
    Ok(elem(x)?.pow(n)?.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_layout() {
        let exp = exp_table();
        let log = log_table();
        assert_eq!(exp[0], 0x01);
        assert_eq!(exp[1], 0x02);
        assert_eq!(exp[7], 0x80);
        // 2^8 = x^8 folded back by the reducing polynomial
        assert_eq!(exp[8], 0x1D);
        assert_eq!(log[0], MASK);
        assert_eq!(log[1], 0);
        assert_eq!(log[2], 1);
    }

    #[test]
    fn test_tables_are_mutual_inverses() {
        let exp = exp_table();
        let log = log_table();
        for x in 1..SIZE {
            assert_eq!(exp[log[x] as usize] as usize, x);
        }
        for i in 0..ORDER {
            assert_eq!(log[exp[i] as usize] as usize, i);
        }
    }

    #[test]
    fn test_generator_visits_every_nonzero_element() {
        let mut seen = [false; SIZE];
        for i in 0..255 {
            let v = Gf28::GEN.pow(i).unwrap().0 as usize;
            assert!(!seen[v], "GEN^{} repeats {:#04x}", i, v);
            seen[v] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_addition() {
        let a = Gf28::new(0x53);
        let b = Gf28::new(0xCA);
        assert_eq!((a + b).0, 0x99);
        assert_eq!(a + a, Gf28::ZERO);
        assert_eq!(a - b, a + b);
    }

    #[test]
    fn test_multiplication_known_values() {
        assert_eq!(Gf28::new(0x80) * Gf28::new(0x02), Gf28::new(0x1D));
        assert_eq!(Gf28::new(0x02) * Gf28::new(0x8E), Gf28::ONE);
        assert_eq!(Gf28::new(0x03) * Gf28::new(0x03), Gf28::new(0x05));
    }

    #[test]
    fn test_multiplication_matches_shift_and_reduce() {
        fn slow_mul(mut a: u8, mut b: u8) -> u8 {
            let mut p = 0u8;
            while b != 0 {
                if b & 1 != 0 {
                    p ^= a;
                }
                let carry = a & 0x80;
                a <<= 1;
                if carry != 0 {
                    a ^= (PRIM_POLY & 0xFF) as u8;
                }
                b >>= 1;
            }
            p
        }

        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!((Gf28(a) * Gf28(b)).0, slow_mul(a, b), "{} * {}", a, b);
            }
        }
    }

    #[test]
    fn test_zero_is_absorbing() {
        for y in 0..=255u8 {
            assert_eq!(Gf28::ZERO * Gf28(y), Gf28::ZERO);
            assert_eq!(Gf28(y) * Gf28::ZERO, Gf28::ZERO);
        }
    }

    #[test]
    fn test_all_inverses() {
        for i in 1..=255u8 {
            let a = Gf28::new(i);
            assert_eq!(a * a.inverse().unwrap(), Gf28::ONE);
        }
        assert_eq!(Gf28::new(0x02).inverse().unwrap(), Gf28::new(0x8E));
    }

    #[test]
    fn test_zero_inverse() {
        assert_eq!(Gf28::ZERO.inverse(), Err(SsssError::DivisionByZero));
    }

    #[test]
    fn test_division_undoes_multiplication() {
        for x in 0..=255u8 {
            for y in 1..=255u8 {
                let product = Gf28(x) * Gf28(y);
                assert_eq!(product.checked_div(Gf28(y)).unwrap(), Gf28(x));
            }
        }
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            Gf28::new(7).checked_div(Gf28::ZERO),
            Err(SsssError::DivisionByZero)
        );
        assert_eq!(Gf28::ZERO.checked_div(Gf28::new(9)).unwrap(), Gf28::ZERO);
    }

    #[test]
    fn test_pow_matches_repeated_multiplication() {
        for x in 0..=255u8 {
            let mut expected = Gf28::ONE;
            for n in 0..20 {
                assert_eq!(Gf28(x).pow(n).unwrap(), expected, "{}^{}", x, n);
                expected *= Gf28(x);
            }
        }
    }

    #[test]
    fn test_pow_edge_cases() {
        assert_eq!(Gf28::ZERO.pow(0).unwrap(), Gf28::ONE);
        assert_eq!(Gf28::ZERO.pow(5).unwrap(), Gf28::ZERO);
        assert_eq!(Gf28::ZERO.pow(-1), Err(SsssError::DivisionByZero));
        // multiplicative group has order 255
        assert_eq!(Gf28::new(0x35).pow(255).unwrap(), Gf28::ONE);
        let x = Gf28::new(0x35);
        assert_eq!(x.pow(-3).unwrap(), x.inverse().unwrap().pow(3).unwrap());
        assert_eq!(x.pow(i32::MIN).unwrap(), x.inverse().unwrap().pow_unsigned(1 << 31));
    }

    #[test]
    fn test_is_elem() {
        assert!(is_elem(0));
        assert!(is_elem(255));
        assert!(!is_elem(256));
        assert!(!is_elem(-1));
    }

    #[test]
    fn test_checked_functions_reject_invalid_elements() {
        assert_eq!(add(256, 0), Err(SsssError::InvalidElement(256)));
        assert_eq!(sub(0, -1), Err(SsssError::InvalidElement(-1)));
        assert_eq!(mul(1, 300), Err(SsssError::InvalidElement(300)));
        assert_eq!(div(-5, 1), Err(SsssError::InvalidElement(-5)));
        assert_eq!(inv(1000), Err(SsssError::InvalidElement(1000)));
        assert_eq!(pow(256, 0), Err(SsssError::InvalidElement(256)));
    }

    #[test]
    fn test_checked_functions() {
        assert_eq!(add(0x53, 0xCA).unwrap(), 0x99);
        assert_eq!(sub(0x53, 0xCA).unwrap(), 0x99);
        assert_eq!(mul(0x80, 0x02).unwrap(), 0x1D);
        assert_eq!(div(0x1D, 0x02).unwrap(), 0x80);
        assert_eq!(div(0x1D, 0), Err(SsssError::DivisionByZero));
        assert_eq!(inv(0), Err(SsssError::DivisionByZero));
        assert_eq!(inv(0x02).unwrap(), 0x8E);
        assert_eq!(pow(0x02, 8).unwrap(), 0x1D);
        assert_eq!(pow(0, 0).unwrap(), 1);
    }

    #[test]
    fn test_distributivity() {
        let a = Gf28::new(0x12);
        let b = Gf28::new(0x34);
        let c = Gf28::new(0x56);
        assert_eq!(a * (b + c), (a * b) + (a * c));
    }

    #[test]
    fn test_tables_consistent_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| (*log_table(), *exp_table())))
            .collect();
        for handle in handles {
            let (log, exp) = handle.join().unwrap();
            assert_eq!(&log, log_table());
            assert_eq!(&exp, exp_table());
        }
    }
}
