//! Error kinds for the mnemonic/Shamir core.
//!
//! Every non-invariant error bubbles up through [`CoreError`]; no operation
//! in this crate panics on caller-supplied input. `InternalInvariant` is
//! reserved for conditions that indicate a bug in this crate itself (a bad
//! buffer index, a coefficient array of the wrong size) rather than bad
//! input, and callers should treat it as fatal.

use thiserror::Error;

/// Errors produced by the BigInt, BIP-39 and Shamir engine layers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Wrong word count, unknown word, or bad checksum.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Threshold/share-count out of range, duplicate share index, or too
    /// few shares supplied.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The system RNG failed to produce randomness.
    #[error("randomness failure: {0}")]
    RandomnessFailure(String),

    /// The split rejection loop hit `MAX_ITERATIONS` without finding a
    /// batch of shares that all fit in 256 bits.
    #[error("rejection loop exhausted after {0} iterations")]
    RejectionExhausted(usize),

    /// Lagrange interpolation produced a value that exceeds 256 bits,
    /// which only happens when the supplied shares are not all consistent
    /// with the same polynomial.
    #[error("reconstruction failure: recovered value exceeds 256 bits, shares are likely invalid")]
    ReconstructionFailure,

    /// A programmer error: a buffer index, bit offset, or array length
    /// invariant was violated. This should never happen for any input this
    /// crate's public API accepts; surfacing it as an error (rather than
    /// panicking outright) lets callers and tests observe it without
    /// taking the whole process down.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
