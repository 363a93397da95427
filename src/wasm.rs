//! WASM bindings for mnemonic-sss.
//!
//! Mirrors the teacher's `wasm.rs` shape (panic hook, `wee_alloc` on
//! `wasm32`, `serde_json`-serialized results) over the three facade
//! operations: `wasm_generate`, `wasm_split`, `wasm_recover`.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::bip39::{self, WORD_COUNT};
use crate::domain::{ShareCount, ShareIndex, SplitConfig, Threshold};
use crate::facade::{self, Mnemonic, ShareSet};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Use wee_alloc as the global allocator for smaller WASM binary size.
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// One share, as exchanged over the JSON boundary.
#[derive(Serialize, Deserialize)]
pub struct JsShare {
    pub index: u8,
    pub mnemonic: String,
}

/// Result of a split operation.
#[derive(Serialize, Deserialize)]
pub struct SplitResult {
    pub shares: Vec<JsShare>,
    pub share_count: u8,
    pub threshold: u8,
}

fn parse_mnemonic(words: &str) -> Result<Mnemonic, JsValue> {
    let tokens: Vec<&str> = words.split_whitespace().collect();
    if tokens.len() != WORD_COUNT {
        return Err(JsValue::from_str(&format!(
            "expected {WORD_COUNT} words, got {}",
            tokens.len()
        )));
    }
    let mut result = [""; WORD_COUNT];
    for (slot, token) in result.iter_mut().zip(tokens.iter()) {
        let normalized = token.trim().to_lowercase();
        let idx = bip39::word_index(&normalized)
            .ok_or_else(|| JsValue::from_str(&format!("word not in wordlist: {normalized}")))?;
        *slot = crate::wordlist::WORDLIST[idx as usize];
    }
    Ok(result)
}

fn format_mnemonic(words: &Mnemonic) -> String {
    words.join(" ")
}

/// Generates a fresh random master mnemonic.
#[wasm_bindgen]
pub fn wasm_generate() -> Result<String, JsValue> {
    let words = facade::generate().map_err(|e| JsValue::from_str(&format!("generate failed: {e}")))?;
    Ok(format_mnemonic(&words))
}

/// Splits `mnemonic` into `total` shares, `threshold` of which suffice to
/// recover it. Returns a JSON-encoded [`SplitResult`].
#[wasm_bindgen]
pub fn wasm_split(mnemonic: &str, total: u8, threshold: u8) -> Result<String, JsValue> {
    let threshold_obj =
        Threshold::new(threshold).map_err(|e| JsValue::from_str(&format!("invalid threshold: {e}")))?;
    let share_count =
        ShareCount::new(total).map_err(|e| JsValue::from_str(&format!("invalid share count: {e}")))?;
    let config = SplitConfig::new(threshold_obj, share_count)
        .map_err(|e| JsValue::from_str(&format!("invalid configuration: {e}")))?;

    let words = parse_mnemonic(mnemonic)?;
    let shares = facade::split(&words, config).map_err(|e| JsValue::from_str(&format!("split failed: {e}")))?;

    let result = SplitResult {
        shares: shares
            .into_iter()
            .map(|(index, mnemonic)| JsShare {
                index: *index,
                mnemonic: format_mnemonic(&mnemonic),
            })
            .collect(),
        share_count: total,
        threshold,
    };

    serde_json::to_string(&result).map_err(|e| JsValue::from_str(&format!("serialization failed: {e}")))
}

/// Recovers the master mnemonic from a JSON array of `{index, mnemonic}`
/// shares (order preserved: the first `threshold` entries are used).
#[wasm_bindgen]
pub fn wasm_recover(shares_json: &str, threshold: u8) -> Result<String, JsValue> {
    let threshold_obj =
        Threshold::new(threshold).map_err(|e| JsValue::from_str(&format!("invalid threshold: {e}")))?;

    let js_shares: Vec<JsShare> = serde_json::from_str(shares_json)
        .map_err(|e| JsValue::from_str(&format!("invalid shares JSON: {e}")))?;

    let mut shares: ShareSet = Vec::with_capacity(js_shares.len());
    for js_share in js_shares {
        let index = ShareIndex::new(js_share.index)
            .map_err(|e| JsValue::from_str(&format!("invalid share index: {e}")))?;
        let words = parse_mnemonic(&js_share.mnemonic)?;
        shares.push((index, words));
    }

    let recovered = facade::recover(&shares, threshold_obj)
        .map_err(|e| JsValue::from_str(&format!("recover failed: {e}")))?;
    Ok(format_mnemonic(&recovered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasm_split_and_recover_round_trip() {
        let mnemonic = wasm_generate().unwrap();

        let split_json = wasm_split(&mnemonic, 5, 3).unwrap();
        let data: SplitResult = serde_json::from_str(&split_json).unwrap();
        assert_eq!(data.shares.len(), 5);
        assert_eq!(data.share_count, 5);
        assert_eq!(data.threshold, 3);

        let selected = serde_json::to_string(&data.shares[0..3]).unwrap();
        let recovered = wasm_recover(&selected, 3).unwrap();
        assert_eq!(recovered, mnemonic);
    }

    #[test]
    fn wasm_split_rejects_invalid_threshold() {
        let mnemonic = wasm_generate().unwrap();
        assert!(wasm_split(&mnemonic, 5, 1).is_err());
    }

    #[test]
    fn wasm_split_rejects_invalid_mnemonic() {
        assert!(wasm_split("invalid mnemonic words", 5, 3).is_err());
    }

    #[test]
    fn wasm_recover_rejects_insufficient_shares() {
        let mnemonic = wasm_generate().unwrap();
        let split_json = wasm_split(&mnemonic, 5, 3).unwrap();
        let data: SplitResult = serde_json::from_str(&split_json).unwrap();

        let selected = serde_json::to_string(&data.shares[0..2]).unwrap();
        assert!(wasm_recover(&selected, 3).is_err());
    }
}
