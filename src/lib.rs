//! GF(2^8) arithmetic and Shamir's Secret Sharing for byte strings
//!
//! A secret of `L` bytes is split into `n` shares of `1 + L` bytes each, such
//! that any `k` shares determine the secret and any `k - 1` of them are
//! indistinguishable from random. Each secret byte is hidden independently
//! in the constant term of a random polynomial over GF(2^8).
//!
//! Share layout: `[x] || y_0 || ... || y_{L-1}`.
//!
//! # Quick Start
//!
//! ```
//! use gf28_ssss::{DefaultSource, get_x, get_y, split};
//!
//! let mut rng = DefaultSource::from_os_rng().unwrap();
//!
//! // 5 shares, any 3 of which determine the secret
//! let shares = split(b"my secret data", 3, 5, &mut rng).unwrap();
//! assert_eq!(shares.len(), 5);
//!
//! let first = shares[0].as_bytes();
//! assert_eq!(get_x(first).unwrap(), 1);
//! assert!(get_y(first, 13).is_ok());
//! assert!(get_y(first, 14).is_err());
//! ```

mod config;
mod entropy;
mod error;
pub mod gf28;
mod shamir;

pub use config::{Config, SplitMode};
pub use entropy::{DefaultSource, EntropySource, RngSource};
pub use error::{Result, SsssError};
pub use gf28::Gf28;
pub use shamir::{SecretInput, Share, Splitter, SplitterBuilder, get_x, get_y, split};

// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        Config, DefaultSource, EntropySource, Gf28, Result, Share, SplitMode, Splitter,
        SsssError, split,
    };
}
