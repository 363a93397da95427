//! Arbitrary-precision unsigned integer arithmetic.
//!
//! Grounded in the shape of `mimblewimble-grin/core`'s `BigUint`-backed
//! `Difficulty` type (construction from big-endian bytes, comparison,
//! arithmetic operators) and the original C++ `num_t` wrapper around
//! OpenSSL's `BIGNUM*`. Unlike both of those, storage here is an owned
//! `Vec<u64>` of little-endian limbs so that destruction can zero it: the
//! values this type carries (entropy, polynomial coefficients, share
//! y-values) are secrets for the lifetime of the process.

use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CoreError, Result};

const LIMB_BITS: u32 = u64::BITS;

/// An arbitrary-precision unsigned integer, stored as little-endian `u64`
/// limbs with no leading (most-significant) zero limb. Zero is the empty
/// limb vector.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BigUint {
    limbs: Vec<u64>,
}

impl BigUint {
    fn from_limbs(mut limbs: Vec<u64>) -> Self {
        while limbs.last() == Some(&0) {
            limbs.pop();
        }
        Self { limbs }
    }

    /// The additive identity.
    #[must_use]
    pub fn zero() -> Self {
        Self { limbs: Vec::new() }
    }

    /// The multiplicative identity.
    #[must_use]
    pub fn one() -> Self {
        Self { limbs: vec![1] }
    }

    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self::from_limbs(vec![value])
    }

    /// Parses a hexadecimal string (with or without a leading `0x`) into a
    /// value.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        if s.is_empty() {
            return Ok(Self::zero());
        }
        let mut bytes = Vec::with_capacity(s.len().div_ceil(2));
        let padded: String = if s.len() % 2 == 1 {
            format!("0{s}")
        } else {
            s.to_string()
        };
        for chunk in padded.as_bytes().chunks(2) {
            let byte_str = std::str::from_utf8(chunk)
                .map_err(|_| CoreError::InvalidArguments("non-UTF8 hex string".into()))?;
            let byte = u8::from_str_radix(byte_str, 16)
                .map_err(|_| CoreError::InvalidArguments(format!("invalid hex digit in {s}")))?;
            bytes.push(byte);
        }
        Ok(Self::from_bytes_be(&bytes))
    }

    /// Builds a value from a big-endian byte buffer of any length,
    /// including ones shorter than the eventual width of the value.
    #[must_use]
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let mut limbs = vec![0u64; bytes.len().div_ceil(8)];
        for (i, &b) in bytes.iter().rev().enumerate() {
            let limb_idx = i / 8;
            let shift = (i % 8) * 8;
            limbs[limb_idx] |= u64::from(b) << shift;
        }
        Self::from_limbs(limbs)
    }

    /// Serializes to a big-endian buffer of exactly `len` bytes, left-padded
    /// with zeros. Fails if the value does not fit in `len` bytes.
    pub fn to_bytes_be(&self, len: usize) -> Result<Vec<u8>> {
        let needed = self.bit_len().div_ceil(8);
        if needed > len {
            return Err(CoreError::InvalidArguments(format!(
                "value needs {needed} bytes, but only {len} were requested"
            )));
        }
        let mut out = vec![0u8; len];
        for (i, limb) in self.limbs.iter().enumerate() {
            for b in 0..8 {
                let byte_pos = i * 8 + b;
                if byte_pos >= len {
                    break;
                }
                let byte = ((limb >> (b * 8)) & 0xFF) as u8;
                out[len - 1 - byte_pos] = byte;
            }
        }
        Ok(out)
    }

    /// 0 for zero; otherwise the position of the top set bit, plus one.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(top) => {
                let used_limbs = self.limbs.len() - 1;
                used_limbs * LIMB_BITS as usize + (LIMB_BITS - top.leading_zeros()) as usize
            }
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut result = Vec::with_capacity(self.limbs.len().max(other.limbs.len()) + 1);
        let mut carry = 0u128;
        for i in 0..self.limbs.len().max(other.limbs.len()) {
            let a = u128::from(self.limbs.get(i).copied().unwrap_or(0));
            let b = u128::from(other.limbs.get(i).copied().unwrap_or(0));
            let sum = a + b + carry;
            result.push(sum as u64);
            carry = sum >> LIMB_BITS;
        }
        if carry > 0 {
            result.push(carry as u64);
        }
        Self::from_limbs(result)
    }

    /// Subtracts `other` from `self`. Fails if the result would be
    /// negative — this type has no representation for negative values and
    /// the core algorithms never rely on one (modular subtraction is
    /// performed via explicit add-then-reduce, see [`crate::shamir`]).
    pub fn sub(&self, other: &Self) -> Result<Self> {
        if *self < *other {
            return Err(CoreError::InternalInvariant(
                "BigUint::sub underflow: left-hand side is smaller than right-hand side".into(),
            ));
        }
        let mut result = Vec::with_capacity(self.limbs.len());
        let mut borrow = 0i128;
        for i in 0..self.limbs.len() {
            let a = i128::from(self.limbs[i]);
            let b = i128::from(other.limbs.get(i).copied().unwrap_or(0));
            let mut diff = a - b - borrow;
            if diff < 0 {
                diff += 1i128 << LIMB_BITS;
                borrow = 1;
            } else {
                borrow = 0;
            }
            result.push(diff as u64);
        }
        Ok(Self::from_limbs(result))
    }

    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut result = vec![0u64; self.limbs.len() + other.limbs.len()];
        for (i, &a) in self.limbs.iter().enumerate() {
            let mut carry = 0u128;
            for (j, &b) in other.limbs.iter().enumerate() {
                let idx = i + j;
                let product = u128::from(a) * u128::from(b) + u128::from(result[idx]) + carry;
                result[idx] = product as u64;
                carry = product >> LIMB_BITS;
            }
            let mut k = i + other.limbs.len();
            while carry > 0 {
                let sum = u128::from(result[k]) + carry;
                result[k] = sum as u64;
                carry = sum >> LIMB_BITS;
                k += 1;
            }
        }
        Self::from_limbs(result)
    }

    /// Quotient and remainder of `self / other`. Fails on division by zero.
    pub fn div_rem(&self, other: &Self) -> Result<(Self, Self)> {
        if other.is_zero() {
            return Err(CoreError::InvalidArguments("division by zero".into()));
        }
        if *self < *other {
            return Ok((Self::zero(), self.clone()));
        }

        // Plain binary long division: simple, and more than fast enough for
        // the few-hundred-bit values this crate ever deals with.
        let mut quotient = Self::zero();
        let mut remainder = Self::zero();
        for bit in (0..self.bit_len()).rev() {
            remainder = remainder.shl1();
            if self.bit(bit) {
                remainder = remainder.add(&Self::one());
            }
            if remainder >= *other {
                remainder = remainder.sub(other)?;
                quotient = quotient.set_bit(bit);
            }
        }
        Ok((quotient, remainder))
    }

    /// `self mod m`, always in `[0, m)`.
    pub fn mod_nonneg(&self, m: &Self) -> Self {
        if m.is_zero() {
            return self.clone();
        }
        match self.div_rem(m) {
            Ok((_, rem)) => rem,
            Err(_) => self.clone(),
        }
    }

    /// The modular multiplicative inverse of `self` modulo `m`. Fails when
    /// `gcd(self, m) != 1`.
    pub fn mod_inverse(&self, m: &Self) -> Result<Self> {
        if m.is_zero() || *m == Self::one() {
            return Err(CoreError::InternalInvariant(
                "mod_inverse requires a modulus greater than one".into(),
            ));
        }

        let mut old_r = self.mod_nonneg(m);
        let mut r = m.clone();
        let mut old_s = Signed::positive(Self::one());
        let mut s = Signed::positive(Self::zero());

        while !r.is_zero() {
            let (q, rem) = old_r.div_rem(&r)?;
            old_r = r;
            r = rem;

            let qs = Signed::positive(q).mul(&s);
            let new_s = old_s.sub(&qs);
            old_s = s;
            s = new_s;
        }

        if old_r != Self::one() {
            return Err(CoreError::InvalidArguments(
                "value has no modular inverse for the given modulus".into(),
            ));
        }

        let reduced = old_s.value.mod_nonneg(m);
        if old_s.negative && !reduced.is_zero() {
            m.sub(&reduced)
        } else {
            Ok(reduced)
        }
    }

    /// A cryptographically strong uniform random value in `[0, exclusive_upper)`.
    pub fn rand_range(exclusive_upper: &Self) -> Result<Self> {
        if exclusive_upper.is_zero() {
            return Err(CoreError::InvalidArguments(
                "rand_range requires a positive exclusive upper bound".into(),
            ));
        }
        let bits = exclusive_upper.bit_len();
        let byte_len = bits.div_ceil(8);
        let top_bits = bits % 8;
        let mask: u8 = if top_bits == 0 { 0xFF } else { (1u8 << top_bits) - 1 };

        for _ in 0..10_000 {
            let mut buf = vec![0u8; byte_len];
            OsRng.try_fill_bytes(&mut buf).map_err(|e| {
                CoreError::RandomnessFailure(format!("OS RNG failed: {e}"))
            })?;
            if byte_len > 0 {
                buf[0] &= mask;
            }
            let candidate = Self::from_bytes_be(&buf);
            if candidate < *exclusive_upper {
                return Ok(candidate);
            }
        }
        Err(CoreError::RandomnessFailure(
            "rejection sampling did not converge within the iteration cap".into(),
        ))
    }

    fn bit(&self, index: usize) -> bool {
        let limb_idx = index / LIMB_BITS as usize;
        let bit_idx = index % LIMB_BITS as usize;
        match self.limbs.get(limb_idx) {
            Some(limb) => (limb >> bit_idx) & 1 == 1,
            None => false,
        }
    }

    fn set_bit(mut self, index: usize) -> Self {
        let limb_idx = index / LIMB_BITS as usize;
        let bit_idx = index % LIMB_BITS as usize;
        if limb_idx >= self.limbs.len() {
            self.limbs.resize(limb_idx + 1, 0);
        }
        self.limbs[limb_idx] |= 1u64 << bit_idx;
        self
    }

    fn shl1(&self) -> Self {
        let mut result = Vec::with_capacity(self.limbs.len() + 1);
        let mut carry = 0u64;
        for &limb in &self.limbs {
            result.push((limb << 1) | carry);
            carry = limb >> (LIMB_BITS - 1);
        }
        if carry > 0 {
            result.push(carry);
        }
        Self::from_limbs(result)
    }
}

impl PartialEq for BigUint {
    fn eq(&self, other: &Self) -> bool {
        self.limbs == other.limbs
    }
}
impl Eq for BigUint {}

impl PartialOrd for BigUint {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigUint {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.limbs
            .len()
            .cmp(&other.limbs.len())
            .then_with(|| self.limbs.iter().rev().cmp(other.limbs.iter().rev()))
    }
}

impl std::fmt::Debug for BigUint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BigUint({} bits)", self.bit_len())
    }
}

/// A sign-tracked `BigUint`, used internally by [`BigUint::mod_inverse`]'s
/// extended-Euclidean Bezout coefficients, which can go negative even
/// though the gcd remainder sequence itself never does.
struct Signed {
    value: BigUint,
    negative: bool,
}

impl Signed {
    fn positive(value: BigUint) -> Self {
        Self { value, negative: false }
    }

    fn normalize(value: BigUint, negative: bool) -> Self {
        let negative = negative && !value.is_zero();
        Self { value, negative }
    }

    fn mul(&self, other: &Self) -> Self {
        let value = self.value.mul(&other.value);
        Self::normalize(value, self.negative != other.negative)
    }

    fn sub(&self, other: &Self) -> Self {
        let other_negated = Self::normalize(other.value.clone(), !other.negative);
        self.add(&other_negated)
    }

    fn add(&self, other: &Self) -> Self {
        if self.negative == other.negative {
            let value = self.value.add(&other.value);
            Self::normalize(value, self.negative)
        } else if self.value >= other.value {
            let value = self.value.sub(&other.value).expect("checked self.value >= other.value");
            Self::normalize(value, self.negative)
        } else {
            let value = other.value.sub(&self.value).expect("checked other.value > self.value");
            Self::normalize(value, other.negative)
        }
    }
}
