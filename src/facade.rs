//! The three mnemonic-in / mnemonic-out operations the rest of this crate
//! exists to provide: `generate`, `split`, `recover`. Composes
//! [`crate::bip39`] (encode/decode) with [`crate::shamir`] (the field
//! arithmetic) so neither the CLI nor the WASM bindings ever touch a
//! [`crate::bigint::BigUint`] directly.

use zeroize::Zeroize;

use crate::bigint::BigUint;
use crate::bip39;
use crate::domain::{ShareIndex, SplitConfig, Threshold};
use crate::error::{CoreError, Result};
use crate::shamir::{self, Share};

/// A 24-word phrase, either a master secret or one share.
pub type Mnemonic = [&'static str; bip39::WORD_COUNT];

/// An ordered collection of `(share index, share mnemonic)` pairs.
///
/// The recover algorithm's contract (spec.md §4.4, §9) is to use exactly
/// the first `k` entries *in the order given*, not sorted by index — a
/// `HashMap`/`BTreeMap` cannot express that, so this crate represents a
/// share set as an ordered `Vec` of pairs instead of a true map.
pub type ShareSet = Vec<(ShareIndex, Mnemonic)>;

const GENERATE_MAX_ATTEMPTS: usize = shamir::MAX_ITERATIONS;

/// Draws a fresh random 256-bit secret and encodes it as a mnemonic.
///
/// Mirrors `create_secret` in the reference implementation: draw uniform in
/// `[0, P)`, reject and redraw if the result exceeds 256 bits.
///
/// # Errors
/// [`CoreError::RandomnessFailure`] if the OS RNG fails, or no acceptable
/// value is drawn within [`GENERATE_MAX_ATTEMPTS`] tries (astronomically
/// unlikely, since `P` exceeds `2^256` by a small margin).
pub fn generate() -> Result<Mnemonic> {
    for _ in 0..GENERATE_MAX_ATTEMPTS {
        let candidate = BigUint::rand_range(shamir::prime())?;
        if candidate.bit_len() <= 256 {
            let mut entropy = candidate.to_bytes_be(32)?;
            let words = bip39::encode(
                entropy
                    .as_slice()
                    .try_into()
                    .expect("to_bytes_be(32) returns exactly 32 bytes"),
            );
            entropy.zeroize();
            return Ok(words);
        }
    }
    Err(CoreError::RandomnessFailure(
        "could not draw a secret under 256 bits within the iteration cap".into(),
    ))
}

/// Splits `mnemonic` into `config.share_count()` shares, `config.threshold()`
/// of which suffice to recover it, returned in ascending `x` order.
///
/// # Errors
/// [`CoreError::InvalidMnemonic`] if `mnemonic` fails checksum validation;
/// otherwise whatever [`shamir::split`] returns.
pub fn split(mnemonic: &Mnemonic, config: SplitConfig) -> Result<ShareSet> {
    let mut entropy = bip39::decode(mnemonic)?;
    let secret = BigUint::from_bytes_be(&entropy);
    entropy.zeroize();

    let shares = shamir::split(&secret, config)?;

    let mut result = Vec::with_capacity(shares.len());
    for Share { x, mut y } in shares {
        let mut y_bytes = y.to_bytes_be(32)?;
        let words = bip39::encode(
            y_bytes
                .as_slice()
                .try_into()
                .expect("to_bytes_be(32) returns exactly 32 bytes"),
        );
        y_bytes.zeroize();
        y.zeroize();
        result.push((x, words));
    }
    Ok(result)
}

/// Recovers the original mnemonic from `shares`, using exactly the first
/// `threshold` entries in the order they appear in `shares`.
///
/// # Errors
/// [`CoreError::InvalidMnemonic`] if any of the first `threshold` shares
/// fails checksum validation; [`CoreError::InvalidArguments`] if fewer than
/// `threshold` shares are given or their `x` values are not distinct;
/// [`CoreError::ReconstructionFailure`] if the recovered value exceeds 256
/// bits.
pub fn recover(shares: &ShareSet, threshold: Threshold) -> Result<Mnemonic> {
    let k = *threshold as usize;
    if shares.len() < k {
        return Err(CoreError::InvalidArguments(format!(
            "need at least {k} shares to recover, got {}",
            shares.len()
        )));
    }

    let mut decoded = Vec::with_capacity(k);
    for (x, words) in shares.iter().take(k) {
        let mut y_bytes = bip39::decode(words)?;
        let y = BigUint::from_bytes_be(&y_bytes);
        y_bytes.zeroize();
        decoded.push(Share { x: *x, y });
    }

    let mut recovered = shamir::recover(&decoded, threshold)?;
    let mut entropy = recovered.to_bytes_be(32)?;
    recovered.zeroize();
    let words = bip39::encode(
        entropy
            .as_slice()
            .try_into()
            .expect("to_bytes_be(32) returns exactly 32 bytes"),
    );
    entropy.zeroize();
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShareCount;

    fn config(k: u8, n: u8) -> SplitConfig {
        SplitConfig::new(Threshold::new(k).unwrap(), ShareCount::new(n).unwrap()).unwrap()
    }

    #[test]
    fn generate_produces_a_valid_mnemonic() {
        let words = generate().unwrap();
        assert!(bip39::is_valid(&words));
    }

    #[test]
    fn split_then_recover_round_trips() {
        let master = generate().unwrap();
        let shares = split(&master, config(3, 5)).unwrap();
        assert_eq!(shares.len(), 5);
        for (_, words) in &shares {
            assert!(bip39::is_valid(words));
        }

        let subset: ShareSet = vec![shares[0].clone(), shares[2].clone(), shares[4].clone()];
        let recovered = recover(&subset, Threshold::new(3).unwrap()).unwrap();
        assert_eq!(recovered, master);
    }

    #[test]
    fn split_rejects_invalid_master_mnemonic() {
        let mut bad = generate().unwrap();
        bad[0] = bad[1];
        assert!(split(&bad, config(2, 3)).is_err());
    }

    #[test]
    fn recover_rejects_invalid_share_mnemonic() {
        let master = generate().unwrap();
        let mut shares = split(&master, config(2, 3)).unwrap();
        shares[0].1[0] = shares[0].1[1];
        assert!(recover(&shares, Threshold::new(2).unwrap()).is_err());
    }

    #[test]
    fn recover_only_consults_the_first_k_entries_in_order() {
        let master = generate().unwrap();
        let shares = split(&master, config(2, 4)).unwrap();
        let mut ordered: ShareSet = vec![shares[0].clone(), shares[1].clone()];
        // A trailing bogus entry must not affect the outcome.
        ordered.push((ShareIndex::new(4).unwrap(), shares[3].1));
        let recovered = recover(&ordered, Threshold::new(2).unwrap()).unwrap();
        assert_eq!(recovered, master);
    }
}
