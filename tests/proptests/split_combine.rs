//! Property tests for the Shamir engine's split/recover round trip.

use mnemonic_sss::bigint::BigUint;
use mnemonic_sss::domain::{ShareCount, SplitConfig, Threshold};
use mnemonic_sss::shamir;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

/// A valid `(threshold, share_count)` pair, `2 <= k <= n <= 20`.
#[derive(Clone, Copy, Debug)]
struct ValidParams {
    k: u8,
    n: u8,
}

impl Arbitrary for ValidParams {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = (u8::arbitrary(g) % 19) + 2; // 2..=20
        let k = (u8::arbitrary(g) % (n - 1)) + 2; // 2..=n
        ValidParams { k, n }
    }
}

#[quickcheck]
fn prop_split_then_recover_with_first_k_shares_round_trips(secret: u64, params: ValidParams) -> bool {
    let secret = BigUint::from_u64(secret);
    let config = SplitConfig::new(
        Threshold::new(params.k).unwrap(),
        ShareCount::new(params.n).unwrap(),
    )
    .unwrap();

    let Ok(shares) = shamir::split(&secret, config) else {
        return false;
    };
    if shares.len() != params.n as usize {
        return false;
    }

    let Ok(recovered) = shamir::recover(&shares, Threshold::new(params.k).unwrap()) else {
        return false;
    };
    recovered == secret
}

#[quickcheck]
fn prop_every_share_fits_in_256_bits(secret: u64, params: ValidParams) -> bool {
    let secret = BigUint::from_u64(secret);
    let config = SplitConfig::new(
        Threshold::new(params.k).unwrap(),
        ShareCount::new(params.n).unwrap(),
    )
    .unwrap();
    let Ok(shares) = shamir::split(&secret, config) else {
        return false;
    };
    shares.iter().all(|s| s.y.bit_len() <= 256)
}

#[quickcheck]
fn prop_recover_fails_with_fewer_than_k_shares(secret: u64, params: ValidParams) -> bool {
    let secret = BigUint::from_u64(secret);
    let config = SplitConfig::new(
        Threshold::new(params.k).unwrap(),
        ShareCount::new(params.n).unwrap(),
    )
    .unwrap();
    let Ok(shares) = shamir::split(&secret, config) else {
        return true;
    };
    let insufficient = &shares[..(params.k as usize - 1)];
    shamir::recover(insufficient, Threshold::new(params.k).unwrap()).is_err()
}

#[quickcheck]
fn prop_recover_ignores_trailing_shares_beyond_k(secret: u64, params: ValidParams) -> bool {
    let secret = BigUint::from_u64(secret);
    let config = SplitConfig::new(
        Threshold::new(params.k).unwrap(),
        ShareCount::new(params.n).unwrap(),
    )
    .unwrap();
    let Ok(shares) = shamir::split(&secret, config) else {
        return true;
    };
    let Ok(recovered) = shamir::recover(&shares, Threshold::new(params.k).unwrap()) else {
        return false;
    };
    recovered == secret
}
