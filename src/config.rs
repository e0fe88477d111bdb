use crate::types::CANONICAL_SIZE;
use core::num::NonZeroUsize;
use thiserror::Error;
use typed_builder::TypedBuilder;

/// Parameters of a benchmark run.
///
/// `RunConfig::default()` is the canonical benchmark: the sum over
/// `0..10_000` on one worker per available CPU.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RunConfig {
    /// Length of the summed range, starting at zero.
    #[builder(default = CANONICAL_SIZE)]
    pub size: u32,
    /// Worker count. `None` sizes the pool to the available parallelism.
    #[builder(default, setter(strip_option))]
    pub threads: Option<NonZeroUsize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Error kind for configurations the driver refuses to run.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// Only powers of ten partition without a remainder, so only they can be
    /// checked against the closed-form sum.
    #[error("size {0} is not a power of ten")]
    SizeNotPowerOfTen(u32),
}

impl RunConfig {
    /// Check that the run's result can be validated.
    ///
    /// # Errors
    /// If `size` is not a power of ten.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut size = self.size;
        while size >= 10 && size % 10 == 0 {
            size /= 10;
        }
        if size == 1 {
            Ok(())
        } else {
            Err(ConfigError::SizeNotPowerOfTen(self.size))
        }
    }
}
