//! `Threshold` newtype for Shamir Secret Sharing.

use crate::error::{CoreError, Result};

/// Minimum number of shares required to reconstruct a secret.
///
/// Invariant: `2 <= value <= 20`. A threshold of 1 provides no security
/// benefit (any single share would recover the secret outright); 20 is the
/// ceiling the original tool imposes so `x` values stay representable as
/// small share indices and the split rejection loop stays tractable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(u8);

impl Threshold {
    /// Minimum valid threshold.
    pub const MIN: u8 = 2;
    /// Maximum valid threshold.
    pub const MAX: u8 = 20;

    /// Creates a new threshold, failing if `value` is outside `2..=20`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidArguments`] if `value` is outside range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mnemonic_sss::domain::Threshold;
    ///
    /// let threshold = Threshold::new(3).unwrap();
    /// assert_eq!(*threshold, 3);
    ///
    /// assert!(Threshold::new(1).is_err());
    /// assert!(Threshold::new(21).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(CoreError::InvalidArguments(format!(
                "threshold must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for Threshold {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_below_minimum() {
        assert!(Threshold::new(0).is_err());
        assert!(Threshold::new(1).is_err());
    }

    #[test]
    fn rejects_above_maximum() {
        assert!(Threshold::new(21).is_err());
        assert!(Threshold::new(255).is_err());
    }

    #[test]
    fn accepts_boundary_values() {
        assert_eq!(*Threshold::new(2).unwrap(), 2);
        assert_eq!(*Threshold::new(20).unwrap(), 20);
    }
}
