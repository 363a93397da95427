//! Property tests for the BigInt layer and the BIP-39 codec.

use mnemonic_sss::bigint::BigUint;
use mnemonic_sss::bip39;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

/// Wrapper generating arbitrary 32-byte entropy buffers.
#[derive(Clone, Debug)]
struct Entropy([u8; 32]);

impl Arbitrary for Entropy {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut bytes = [0u8; 32];
        for b in &mut bytes {
            *b = u8::arbitrary(g);
        }
        Entropy(bytes)
    }
}

#[quickcheck]
fn prop_bip39_round_trips_any_entropy(entropy: Entropy) -> bool {
    let Entropy(bytes) = entropy;
    let words = bip39::encode(&bytes);
    bip39::is_valid(&words) && bip39::decode(&words).unwrap() == bytes
}

#[quickcheck]
fn prop_bigint_add_sub_round_trips(a: u32, b: u32) -> bool {
    let a = BigUint::from_u64(u64::from(a));
    let b = BigUint::from_u64(u64::from(b));
    a.add(&b).sub(&b).unwrap() == a
}

#[quickcheck]
fn prop_bigint_mul_div_rem_round_trips(a: u32, b: u32) -> bool {
    if b == 0 {
        return true;
    }
    let a = BigUint::from_u64(u64::from(a));
    let b = BigUint::from_u64(u64::from(b));
    let (q, r) = a.div_rem(&b).unwrap();
    q.mul(&b).add(&r) == a
}

#[quickcheck]
fn prop_bigint_ordering_is_transitive(a: u32, b: u32, c: u32) -> bool {
    let a = BigUint::from_u64(u64::from(a));
    let b = BigUint::from_u64(u64::from(b));
    let c = BigUint::from_u64(u64::from(c));
    if a <= b && b <= c {
        a <= c
    } else {
        true
    }
}
