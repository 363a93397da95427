//! Configuration validation for Shamir Secret Sharing splits.

use super::{ShareCount, Threshold};
use crate::error::{CoreError, Result};

/// Validated pair of threshold (`k`) and share count (`n`).
///
/// Enforces `2 <= k <= n <= 20` at the type level, so a [`SplitConfig`]
/// reaching [`crate::facade::split`] is always a legal Shamir configuration.
#[derive(Debug, Clone, Copy)]
pub struct SplitConfig {
    threshold: Threshold,
    share_count: ShareCount,
}

impl SplitConfig {
    /// Creates a new split configuration.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidArguments`] if `threshold` exceeds
    /// `share_count`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mnemonic_sss::domain::{SplitConfig, Threshold, ShareCount};
    ///
    /// let config = SplitConfig::new(
    ///     Threshold::new(3).unwrap(),
    ///     ShareCount::new(5).unwrap(),
    /// ).unwrap();
    /// assert_eq!(*config.threshold(), 3);
    /// assert_eq!(*config.share_count(), 5);
    ///
    /// let result = SplitConfig::new(
    ///     Threshold::new(5).unwrap(),
    ///     ShareCount::new(3).unwrap(),
    /// );
    /// assert!(result.is_err());
    /// ```
    pub fn new(threshold: Threshold, share_count: ShareCount) -> Result<Self> {
        if *threshold > *share_count {
            return Err(CoreError::InvalidArguments(format!(
                "threshold {} cannot exceed share count {}",
                *threshold, *share_count
            )));
        }
        Ok(Self {
            threshold,
            share_count,
        })
    }

    /// The threshold (`k`).
    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// The total share count (`n`).
    #[must_use]
    pub fn share_count(&self) -> ShareCount {
        self.share_count
    }
}
