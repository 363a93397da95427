//! Shamir Secret Sharing over the fixed 257-bit prime field.
//!
//! Grounded directly in `SecretSharing.cpp`'s `evaluate_polynomial`,
//! `split_secret` and `lagrange_interpolate`/`regenerate_secret`: Horner
//! evaluation, whole-batch rejection sampling capped at `MAX_ITERATIONS`,
//! and Lagrange interpolation at `x = 0` using exactly the first `k`
//! supplied shares. The "extended modulus" computed in both
//! `evaluate_polynomial` and `lagrange_interpolate` — a random coefficient
//! `r` multiplied into `P` — is reproduced here too: it is dead code in the
//! original (every reduction still targets `P`, never `r*P`), and we keep
//! it rather than silently dropping reference behavior, per the open
//! question this crate's design notes resolve in favor of preservation.

use std::sync::LazyLock;

use crate::bigint::BigUint;
use crate::domain::{ShareIndex, SplitConfig, Threshold};
use crate::error::{CoreError, Result};

/// The cap on rejection-sampling attempts in [`split`], matching the
/// original `MAX_ITERATIONS` in `SecretSharing.cpp`.
pub const MAX_ITERATIONS: usize = 500_000;

/// Exclusive upper bound for the masking coefficient `r` drawn per call to
/// [`evaluate_polynomial`] and [`lagrange_interpolate_at_zero`].
const MASK_COEFFICIENT_UPPER_BOUND: u64 = 65_536;

/// `P = 187110422339161656731757292403725394067928975545356095774785896842956550853219`,
/// a 257-bit prime, chosen greater than `2^256` so every 256-bit entropy
/// value is a valid field element.
static PRIME: LazyLock<BigUint> = LazyLock::new(|| {
    BigUint::from_hex("19dacbefdfb3cb55f89b1c92f770e853c47fcc24a65bf1b7d268fbc37d4ea5263")
        .expect("PRIME is a fixed, valid hex literal")
});

/// The bit width an emitted share's `y` value must not exceed, so it can be
/// serialized as 256-bit mnemonic entropy.
const MAX_SHARE_Y_BITS: usize = 256;

/// One `(x, y)` point on the secret polynomial.
///
/// `y` is dropped via [`BigUint`]'s own zeroizing `Drop` impl; there is
/// nothing sensitive in `x` (a share's index is not a secret).
#[derive(Clone)]
pub struct Share {
    pub x: ShareIndex,
    pub y: BigUint,
}

/// Draws the masking coefficient `r ∈ [1, 65536)` and multiplies it into
/// [`PRIME`], exactly mirroring the reference implementation's dead
/// `ext_prime1` computation. The result is intentionally discarded: every
/// reduction below still targets `PRIME`, never the extended modulus. See
/// this crate's design notes for why the call is preserved anyway.
fn draw_and_discard_extended_modulus() -> Result<()> {
    let upper = BigUint::from_u64(MASK_COEFFICIENT_UPPER_BOUND);
    let r = loop {
        let candidate = BigUint::rand_range(&upper)?;
        if !candidate.is_zero() {
            break candidate;
        }
    };
    let _extended_modulus = r.mul(&PRIME);
    Ok(())
}

fn mul_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    a.mul(b).mod_nonneg(p)
}

/// `(a - b) mod p`, valid even when `a < b`.
fn sub_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    if *a >= *b {
        a.sub(b).expect("checked a >= b")
    } else {
        let diff = b.sub(a).expect("checked b > a");
        p.sub(&diff).expect("diff < p since a, b < p")
    }
}

fn product_mod(values: &[BigUint], p: &BigUint) -> BigUint {
    values
        .iter()
        .fold(BigUint::one(), |acc, v| mul_mod(&acc, v, p))
}

/// `num / den mod p`, via modular inverse.
fn div_mod(num: &BigUint, den: &BigUint, p: &BigUint) -> Result<BigUint> {
    let inv = den.mod_inverse(p)?;
    Ok(mul_mod(num, &inv, p))
}

/// The field modulus, exposed so [`crate::facade::generate`] can draw a
/// fresh secret in the same field shares live in.
pub(crate) fn prime() -> &'static BigUint {
    &PRIME
}

/// Evaluates `y(x) = coefficients[0] + coefficients[1]*x + ... mod P` using
/// Horner's method, `coefficients[0]` being the secret.
pub fn evaluate_polynomial(coefficients: &[BigUint], x: u64) -> Result<BigUint> {
    if coefficients.is_empty() {
        return Err(CoreError::InternalInvariant(
            "evaluate_polynomial requires at least one coefficient".into(),
        ));
    }
    draw_and_discard_extended_modulus()?;

    let bx = BigUint::from_u64(x);
    let mut acc = BigUint::zero();
    for coeff in coefficients.iter().rev() {
        acc = acc.mul(&bx).add(coeff).mod_nonneg(&PRIME);
    }
    Ok(acc)
}

/// Splits `secret` into `n` shares, `k` of which suffice to reconstruct it.
///
/// Implements the whole-batch rejection loop from §4.4: every attempt
/// redraws all `k-1` random coefficients and recomputes the full batch of
/// `n` shares, accepting only if every `y` fits in 256 bits.
///
/// # Errors
/// [`CoreError::RejectionExhausted`] if no acceptable batch is found within
/// [`MAX_ITERATIONS`] attempts; [`CoreError::RandomnessFailure`] if the
/// system RNG fails.
pub fn split(secret: &BigUint, config: SplitConfig) -> Result<Vec<Share>> {
    let threshold = *config.threshold() as usize;
    let total = *config.share_count() as u64;

    for _ in 0..MAX_ITERATIONS {
        let mut coefficients = Vec::with_capacity(threshold);
        coefficients.push(secret.clone());
        for _ in 1..threshold {
            coefficients.push(BigUint::rand_range(&PRIME)?);
        }

        let mut shares = Vec::with_capacity(total as usize);
        let mut all_fit = true;
        for x in 1..=total {
            let y = evaluate_polynomial(&coefficients, x)?;
            all_fit &= y.bit_len() <= MAX_SHARE_Y_BITS;
            shares.push(Share {
                x: ShareIndex::new(x as u8)?,
                y,
            });
        }

        if all_fit {
            return Ok(shares);
        }
    }

    Err(CoreError::RejectionExhausted(MAX_ITERATIONS))
}

/// Reconstructs the secret from `shares` using exactly the first `threshold`
/// of them (in the order given), via Lagrange interpolation at `x = 0`.
///
/// # Errors
/// [`CoreError::InvalidArguments`] if fewer than `threshold` shares are
/// given, or if any two of the first `threshold` shares share an `x` value.
/// [`CoreError::ReconstructionFailure`] if the interpolated value exceeds
/// 256 bits (a symptom of inconsistent or corrupted shares).
pub fn recover(shares: &[Share], threshold: Threshold) -> Result<BigUint> {
    let k = *threshold as usize;
    if shares.len() < k {
        return Err(CoreError::InvalidArguments(format!(
            "need at least {k} shares to recover, got {}",
            shares.len()
        )));
    }
    let used = &shares[..k];

    let mut seen_x = std::collections::HashSet::with_capacity(k);
    for share in used {
        if !seen_x.insert(*share.x) {
            return Err(CoreError::InvalidArguments(format!(
                "duplicate share index {} among the shares used to recover",
                *share.x
            )));
        }
    }

    draw_and_discard_extended_modulus()?;

    let x_vals: Vec<BigUint> = used.iter().map(|s| BigUint::from_u64(*s.x as u64)).collect();

    let mut numerator_components = Vec::with_capacity(k);
    let mut denominator_components = Vec::with_capacity(k);
    for i in 0..k {
        let mut nums = Vec::with_capacity(k - 1);
        let mut dens = Vec::with_capacity(k - 1);
        for j in 0..k {
            if i == j {
                continue;
            }
            // Numerator term for evaluation at x=0: (0 - x_j) mod P.
            nums.push(sub_mod(&BigUint::zero(), &x_vals[j], &PRIME));
            dens.push(sub_mod(&x_vals[i], &x_vals[j], &PRIME));
        }
        numerator_components.push(product_mod(&nums, &PRIME));
        denominator_components.push(product_mod(&dens, &PRIME));
    }

    let denominator_total = product_mod(&denominator_components, &PRIME);

    let mut numerator_total = BigUint::zero();
    for i in 0..k {
        let scaled = mul_mod(&numerator_components[i], &denominator_total, &PRIME);
        let scaled = mul_mod(&scaled, &used[i].y, &PRIME);
        let term = div_mod(&scaled, &denominator_components[i], &PRIME)?;
        numerator_total = numerator_total.add(&term).mod_nonneg(&PRIME);
    }

    let result = div_mod(&numerator_total, &denominator_total, &PRIME)?;
    // Matches the reference's defensive "+ P then nnmod"; result is already
    // in [0, P) at this point, so this is a no-op, kept for fidelity.
    let result = result.add(&PRIME).mod_nonneg(&PRIME);

    if result.bit_len() > MAX_SHARE_Y_BITS {
        return Err(CoreError::ReconstructionFailure);
    }
    Ok(result)
}
