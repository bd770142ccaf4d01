use crate::error::{Result, SsssError};
use serde::{Deserialize, Serialize};

/// How shares are evaluated once the random coefficients have been drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitMode {
    /// Evaluate shares one after another on the calling thread
    #[default]
    Sequential,
    /// Evaluate shares on the rayon thread pool
    Parallel,
}

/// Configuration options for splitting
///
/// Both modes consume the entropy source in the same order and produce
/// identical shares for the same entropy stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Processing mode
    pub mode: SplitMode,
    /// Messages shorter than this are evaluated sequentially even in parallel mode
    pub parallel_min_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: SplitMode::default(),
            parallel_min_bytes: 4096,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the processing mode
    pub fn with_mode(mut self, mode: SplitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the smallest message length evaluated in parallel
    pub fn with_parallel_min_bytes(mut self, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(SsssError::InvalidConfig(
                "Parallel minimum length cannot be zero".into(),
            ));
        }
        self.parallel_min_bytes = size;
        Ok(self)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.parallel_min_bytes == 0 {
            return Err(SsssError::InvalidConfig(
                "Parallel minimum length cannot be zero".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn evaluates_in_parallel(&self, message_len: usize) -> bool {
        self.mode == SplitMode::Parallel && message_len >= self.parallel_min_bytes
    }
}
