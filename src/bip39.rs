//! BIP-39-style 24-word mnemonic codec.
//!
//! Encodes a 256-bit entropy value plus an 8-bit SHA-256-derived checksum
//! into 24 words from the standard English wordlist, and decodes it back.
//! The bit-packing here (MSB-first, 11 bits per word, spanning up to three
//! bytes per word) is transcribed from the original implementation's
//! `calculate_word_index`/`derive_key_from_mnemonic`, just expressed with
//! ordinary widened-integer arithmetic instead of raw pointer aliasing.

use std::collections::HashMap;
use std::sync::LazyLock;

use zeroize::Zeroize;

use crate::error::{CoreError, Result};
use crate::hash::sha256;
use crate::wordlist::WORDLIST;

/// Number of words in a mnemonic.
pub const WORD_COUNT: usize = 24;
/// Size of the entropy portion, in bytes.
pub const ENTROPY_SIZE: usize = 32;
/// Size of the entropy + checksum buffer this codec packs into words.
pub const BUFFER_SIZE: usize = ENTROPY_SIZE + 1;
/// Number of leading characters used to look a word up by abbreviation.
pub const ABBREVIATION_LEN: usize = 4;

/// Full word to ordinal-index lookup, built once, process-wide.
static WORD_TO_INDEX_MAP: LazyLock<HashMap<&'static str, u16>> = LazyLock::new(|| {
    WORDLIST
        .iter()
        .enumerate()
        .map(|(idx, &word)| (word, idx as u16))
        .collect()
});

/// Abbreviated (first 4 characters) to full word lookup, built once,
/// process-wide. Panics if the standard wordlist ever stops being
/// unambiguous under 4-character truncation — a property of the embedded
/// data, not of any caller input, so there is nothing a caller could do to
/// recover from it.
static ABBREVIATION_TO_WORD_MAP: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(WORDLIST.len());
    for &word in WORDLIST.iter() {
        let abbr: String = word.chars().take(ABBREVIATION_LEN).collect();
        if let Some(existing) = map.insert(abbr.clone(), word) {
            panic!(
                "abbreviated wordlist collision: \"{abbr}\" matches both \"{existing}\" and \"{word}\""
            );
        }
    }
    map
});

/// Looks up a word's ordinal index in the standard wordlist.
#[must_use]
pub fn word_index(word: &str) -> Option<u16> {
    WORD_TO_INDEX_MAP.get(word).copied()
}

/// Resolves a 4-character abbreviation to its full word.
#[must_use]
pub fn resolve_abbreviation(abbr: &str) -> Option<&'static str> {
    ABBREVIATION_TO_WORD_MAP.get(abbr).copied()
}

/// Computes the 11-bit value spanning `offset..offset+11` bits of
/// `pa || pb || pc` (MSB-first), where `offset < 8`. `pc` is only
/// consulted when `offset >= 6`, since only then does the 11-bit window
/// reach into the third byte.
fn calculate_word_index(pa: u8, pb: u8, pc: u8, offset: u32) -> u16 {
    debug_assert!(offset < 8);
    let a = u32::from(pa);
    let b = u32::from(pb);
    let c = u32::from(pc);

    let x = (a << (8 + offset)) & 0xFFFF;
    let y = (b << offset) & 0xFFFF;

    let combined = if offset < 6 {
        x | y
    } else {
        let z = c >> (8 - offset);
        x | y | z
    };

    ((combined >> 5) & 0x07FF) as u16
}

/// Writes the 11-bit `word_index` into the `offset..offset+11` bit window
/// of `buf` starting at `byte_start`, the inverse of
/// [`calculate_word_index`].
fn write_word_index(buf: &mut [u8], byte_start: usize, offset: u32, word_index: u16) {
    debug_assert!(offset < 8);
    let shifted = u32::from(word_index) << 5;
    let hi = ((shifted >> 8) & 0xFF) as u8;
    let lo = (shifted & 0xFF) as u8;

    let bits_to_keep: u8 = (0xFFu32 << (8 - offset) & 0xFF) as u8;
    buf[byte_start] = (buf[byte_start] & bits_to_keep) | (hi >> offset);
    let hi_shifted = ((u32::from(hi) << (8 - offset)) & 0xFF) as u8;
    buf[byte_start + 1] = hi_shifted | (lo >> offset);
    if offset >= 6 {
        buf[byte_start + 2] = ((u32::from(lo) << (8 - offset)) & 0xFF) as u8;
    }
}

/// Encodes 256-bit entropy into 24 words, computing and appending the
/// checksum byte internally.
pub fn encode(entropy: &[u8; ENTROPY_SIZE]) -> [&'static str; WORD_COUNT] {
    let mut buf = [0u8; BUFFER_SIZE];
    buf[..ENTROPY_SIZE].copy_from_slice(entropy);
    let checksum = sha256(entropy);
    buf[ENTROPY_SIZE] = checksum[0];

    let mut words = [""; WORD_COUNT];
    for (i, word_slot) in words.iter_mut().enumerate() {
        let bit_start = i * 11;
        let byte_start = bit_start / 8;
        let offset = (bit_start % 8) as u32;

        let idx = if i == WORD_COUNT - 1 {
            calculate_word_index(buf[byte_start], buf[byte_start + 1], 0, offset)
        } else {
            calculate_word_index(buf[byte_start], buf[byte_start + 1], buf[byte_start + 2], offset)
        };
        *word_slot = WORDLIST[idx as usize];
    }

    buf.zeroize();
    words
}

/// Decodes 24 words back into their 256-bit entropy, validating the
/// checksum. Every word must be present in the wordlist.
pub fn decode(words: &[&str; WORD_COUNT]) -> Result<[u8; ENTROPY_SIZE]> {
    let mut indices = [0u16; WORD_COUNT];
    for (i, word) in words.iter().enumerate() {
        match word_index(word) {
            Some(idx) => indices[i] = idx,
            None => {
                indices.zeroize();
                return Err(CoreError::InvalidMnemonic(format!(
                    "word not in wordlist: {word}"
                )));
            }
        }
    }

    let mut buf = [0u8; BUFFER_SIZE];
    for (i, &idx) in indices.iter().enumerate() {
        let bit_start = i * 11;
        let byte_start = bit_start / 8;
        let offset = (bit_start % 8) as u32;
        write_word_index(&mut buf, byte_start, offset, idx);
    }
    indices.zeroize();

    let checksum = sha256(&buf[..ENTROPY_SIZE]);
    if checksum[0] != buf[ENTROPY_SIZE] {
        buf.zeroize();
        return Err(CoreError::InvalidMnemonic("bad checksum".into()));
    }

    let mut entropy = [0u8; ENTROPY_SIZE];
    entropy.copy_from_slice(&buf[..ENTROPY_SIZE]);
    buf.zeroize();
    Ok(entropy)
}

/// Validates that `words` is a well-formed, checksum-valid 24-word
/// mnemonic.
#[must_use]
pub fn is_valid(words: &[&str; WORD_COUNT]) -> bool {
    decode(words).is_ok()
}
