//! End-to-end coverage of the facade, run against fixed vectors and
//! generated secrets alike. Complements the `#[cfg(test)]` unit tests that
//! live alongside each module.

use mnemonic_sss::bip39;
use mnemonic_sss::domain::{ShareCount, SplitConfig, Threshold};
use mnemonic_sss::facade::{self, Mnemonic, ShareSet};

fn config(k: u8, n: u8) -> SplitConfig {
    SplitConfig::new(Threshold::new(k).unwrap(), ShareCount::new(n).unwrap()).unwrap()
}

fn parse(words: &str) -> Mnemonic {
    let tokens: Vec<&str> = words.split_whitespace().collect();
    let array: [&str; bip39::WORD_COUNT] = tokens.try_into().expect("fixture has 24 words");
    array
}

/// E1 from the specification's end-to-end scenarios: a fixed entropy value
/// must encode to an exact, known 24-word phrase.
#[test]
fn known_entropy_encodes_to_known_mnemonic() {
    let entropy_hex = "7FBFF79949E8DBAB9BCF271B39CD29895CEFB9CC658643AB8DAB424CD00DD0CF";
    let mut bytes = [0u8; 32];
    for (i, chunk) in entropy_hex.as_bytes().chunks(2).enumerate() {
        let s = std::str::from_utf8(chunk).unwrap();
        bytes[i] = u8::from_str_radix(s, 16).unwrap();
    }
    let words = bip39::encode(&bytes);
    let expected = "leisure zero town need misery still hundred top brass solar engine bargain \
                     solve table cover radio dry fragile hello loyal snack alone drip trouble";
    assert_eq!(words.join(" "), expected);
}

/// E2: a fixed mnemonic must decode to a known entropy value.
#[test]
fn known_mnemonic_decodes_to_known_entropy() {
    let words = parse(
        "enable sing drop leopard deny glow caught season mosquito toss exit belt pony reject \
         junior proud simple force hurt quality dry federal police bicycle",
    );
    let entropy = bip39::decode(&words).unwrap();
    let expected_hex = "4959290DC023AAC7891E11901CB53F8A7A7F69DE4D66C90B61BF57943AA8E9E8";
    let expected: Vec<u8> = (0..expected_hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&expected_hex[i..i + 2], 16).unwrap())
        .collect();
    assert_eq!(&entropy[..], expected.as_slice());
}

/// E3: a 23-word phrase never reaches this crate's typed mnemonic boundary.
#[test]
fn wrong_word_count_is_rejected_at_the_type_boundary() {
    let words = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon \
                 abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon \
                 abandon abandon abandon";
    let tokens: Vec<&str> = words.split_whitespace().collect();
    assert_eq!(tokens.len(), 23);
    let array: Result<[&str; bip39::WORD_COUNT], _> = tokens.try_into();
    assert!(array.is_err());
}

/// E4: replacing the last word with another wordlist entry breaks the
/// checksum.
#[test]
fn replacing_last_word_breaks_checksum() {
    let mut words = facade::generate().unwrap();
    let replacement = if words[23] == "zoo" { "abandon" } else { "zoo" };
    words[23] = replacement;
    assert!(!bip39::is_valid(&words));
}

/// E5: a word not in the wordlist makes the mnemonic invalid.
#[test]
fn unknown_word_is_rejected() {
    let mut words = facade::generate().unwrap();
    words[0] = "hippo";
    assert!(!bip39::is_valid(&words));
}

/// E6: split then recover over every k-subset of shares reconstructs the
/// original mnemonic.
#[test]
fn every_k_of_n_subset_recovers_the_master_mnemonic() {
    let master = facade::generate().unwrap();
    let shares = facade::split(&master, config(3, 5)).unwrap();
    assert_eq!(shares.len(), 5);

    for i in 0..shares.len() {
        for j in (i + 1)..shares.len() {
            for l in (j + 1)..shares.len() {
                let subset: ShareSet = vec![shares[i], shares[j], shares[l]];
                let recovered = facade::recover(&subset, Threshold::new(3).unwrap()).unwrap();
                assert_eq!(recovered, master, "subset ({i}, {j}, {l})");
            }
        }
    }
}

/// E7: substituting a random, unrelated mnemonic for one share either fails
/// recovery outright or recovers something other than the original.
#[test]
fn substituting_a_foreign_share_never_silently_recovers_the_original() {
    let master = facade::generate().unwrap();
    let mut shares = facade::split(&master, config(3, 5)).unwrap();
    shares[0].1 = facade::generate().unwrap();

    let subset: ShareSet = shares[..3].to_vec();
    match facade::recover(&subset, Threshold::new(3).unwrap()) {
        Err(_) => {}
        Ok(recovered) => assert_ne!(recovered, master),
    }
}

#[test]
fn generate_always_produces_a_checksum_valid_mnemonic() {
    for _ in 0..20 {
        let words = facade::generate().unwrap();
        assert!(bip39::is_valid(&words));
    }
}

#[test]
fn split_rejects_threshold_above_share_count_at_config_construction() {
    let result = SplitConfig::new(Threshold::new(5).unwrap(), ShareCount::new(3).unwrap());
    assert!(result.is_err());
}

#[test]
fn recover_rejects_fewer_shares_than_threshold() {
    let master = facade::generate().unwrap();
    let shares = facade::split(&master, config(4, 6)).unwrap();
    let subset: ShareSet = shares[..2].to_vec();
    assert!(facade::recover(&subset, Threshold::new(4).unwrap()).is_err());
}

#[test]
fn boundary_threshold_two_and_share_count_twenty_round_trips() {
    let master = facade::generate().unwrap();
    let shares = facade::split(&master, config(2, 20)).unwrap();
    assert_eq!(shares.len(), 20);
    let subset: ShareSet = vec![shares[0], shares[19]];
    let recovered = facade::recover(&subset, Threshold::new(2).unwrap()).unwrap();
    assert_eq!(recovered, master);
}
