//! CLI command bodies: `split`, `recover`, `generate`.
//!
//! Each wraps a [`crate::facade`] operation with the interactive prompt
//! flow, stdout formatting, and (for `split`) the post-split self-test
//! loop. Shaped after `split_mnemonic`/`combine_shares` in the teacher's
//! `commands.rs`: plain functions returning `anyhow::Result<()>`, printing
//! progress with `println!`, wrapping [`crate::error::CoreError`] with
//! `anyhow::Context`.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};

use crate::domain::{ShareIndex, SplitConfig, Threshold};
use crate::facade::{self, Mnemonic, ShareSet};
use crate::input::{self, EntryMode, WordLength};

fn format_mnemonic(words: &Mnemonic) -> String {
    words.join(" ")
}

/// Runs `generate`: produce a fresh random master mnemonic and print it.
pub fn generate() -> Result<()> {
    info!("generating a new random master mnemonic");
    let mnemonic = facade::generate().context("failed to generate a random mnemonic")?;
    println!("{}", format_mnemonic(&mnemonic));
    Ok(())
}

/// Runs `split`: prompt for the master mnemonic, split it, print every
/// share, then run the post-split self-test over all `C(n, k)` subsets.
pub fn split<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    config: SplitConfig,
    entry_mode: EntryMode,
    word_length: WordLength,
) -> Result<()> {
    let master = input::read_mnemonic(
        reader,
        writer,
        "master mnemonic",
        entry_mode,
        word_length,
    )
    .context("failed to read the master mnemonic")?;

    info!(
        "splitting master mnemonic into {} shares (threshold {})",
        *config.share_count(),
        *config.threshold()
    );

    let shares = facade::split(&master, config).context("failed to split mnemonic")?;

    println!("\nGenerated {} shares (threshold {}):", shares.len(), *config.threshold());
    for (x, words) in &shares {
        println!("{x}: {}", format_mnemonic(words));
    }

    self_test(&shares, config.threshold(), &master)?;
    Ok(())
}

/// Runs `recover`: prompt for `threshold` shares (and each one's share
/// index), recover, print the reconstructed master mnemonic.
pub fn recover<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    threshold: Threshold,
    entry_mode: EntryMode,
    word_length: WordLength,
) -> Result<()> {
    let count = *threshold as usize;
    let mut shares: ShareSet = Vec::with_capacity(count);

    for i in 1..=count {
        let label = format!("share {i}/{count}");
        let words = input::read_mnemonic(reader, writer, &label, entry_mode, word_length)
            .with_context(|| format!("failed to read {label}"))?;

        loop {
            write!(writer, "Which share index (1-20) does {label} correspond to? ")
                .context("failed to write prompt")?;
            writer.flush().context("failed to flush prompt")?;
            let mut line = String::new();
            reader.read_line(&mut line).context("failed to read share index")?;
            match line.trim().parse::<u8>().ok().and_then(|v| ShareIndex::new(v).ok()) {
                Some(index) => {
                    shares.push((index, words));
                    break;
                }
                None => {
                    writeln!(writer, "Please enter a number between 1 and 20.")
                        .context("failed to write prompt")?;
                }
            }
        }
    }

    info!("attempting recovery from {} shares (threshold {})", shares.len(), count);
    let recovered = facade::recover(&shares, threshold).context("failed to recover mnemonic")?;
    println!("\nRecovered master mnemonic:");
    println!("{}", format_mnemonic(&recovered));
    Ok(())
}

/// After a successful split, walks every `k`-combination of the produced
/// shares through `recover` and confirms it reconstructs `master`.
///
/// Grounded in `EndToEndTests.cpp`'s combinatorial coverage of
/// `split`/`recover`; enumerates combinations via a boolean selection mask
/// advanced with [`next_combination`], mirroring the reference's
/// `std::next_permutation`-over-a-mask technique.
fn self_test(shares: &ShareSet, threshold: Threshold, master: &Mnemonic) -> Result<()> {
    let n = shares.len();
    let k = *threshold as usize;

    let total = binomial(n, k);
    println!("\nRunning self-test over all C({n}, {k}) = {total} share combinations...");
    info!("self-test: verifying {total} combinations of {n} shares taken {k} at a time");

    let mut mask = vec![false; n - k];
    mask.resize(n, true);

    let mut checked = 0usize;
    loop {
        let subset: ShareSet = mask
            .iter()
            .enumerate()
            .filter(|(_, &selected)| selected)
            .map(|(i, _)| shares[i])
            .collect();

        let recovered = facade::recover(&subset, threshold)
            .with_context(|| format!("self-test combination {} failed to recover", checked + 1))?;
        if recovered != *master {
            bail!("self-test combination {} recovered the wrong mnemonic", checked + 1);
        }
        checked += 1;
        debug!("self-test: combination {checked}/{total} ok");

        if !next_combination(&mut mask) {
            break;
        }
    }

    if checked != total {
        warn!("self-test expected {total} combinations but only checked {checked}");
    }
    println!("Self-test passed: all {checked} combinations reconstruct the original mnemonic.");
    Ok(())
}

/// Advances a boolean selection mask to the next combination in
/// lexicographic order (the mask equivalent of `std::next_permutation`).
/// Returns `false` once the mask has cycled back to its first combination.
fn next_combination(mask: &mut [bool]) -> bool {
    let n = mask.len();
    if n == 0 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && mask[i - 1] >= mask[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = n - 1;
    while mask[j] <= mask[i - 1] {
        j -= 1;
    }
    mask.swap(i - 1, j);
    mask[i..].reverse();
    true
}

fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result = 1usize;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShareCount;

    fn config(k: u8, n: u8) -> SplitConfig {
        SplitConfig::new(Threshold::new(k).unwrap(), ShareCount::new(n).unwrap()).unwrap()
    }

    #[test]
    fn binomial_matches_known_values() {
        assert_eq!(binomial(5, 3), 10);
        assert_eq!(binomial(20, 2), 190);
        assert_eq!(binomial(4, 4), 1);
        assert_eq!(binomial(4, 0), 1);
    }

    #[test]
    fn next_combination_enumerates_all_c_n_k() {
        let n = 5;
        let k = 3;
        let mut mask = vec![false; n - k];
        mask.resize(n, true);
        let mut count = 1;
        while next_combination(&mut mask) {
            count += 1;
        }
        assert_eq!(count, binomial(n, k));
    }

    #[test]
    fn generate_prints_a_valid_mnemonic() {
        generate().unwrap();
    }

    #[test]
    fn split_then_self_test_passes() {
        let master = facade::generate().unwrap();
        let input_text = format!("{}\n", master.join(" "));
        let mut reader = std::io::Cursor::new(input_text.into_bytes());
        let mut writer = Vec::new();

        let result = split(
            &mut reader,
            &mut writer,
            config(3, 5),
            EntryMode::Phrase,
            WordLength::Long,
        );
        assert!(result.is_ok(), "{result:?}");
    }

    #[test]
    fn recover_reads_shares_and_indices() {
        let master = facade::generate().unwrap();
        let shares = facade::split(&master, config(2, 4)).unwrap();

        let input_text = format!(
            "{}\n{}\n{}\n{}\n",
            shares[0].1.join(" "),
            *shares[0].0,
            shares[1].1.join(" "),
            *shares[1].0,
        );
        let mut reader = std::io::Cursor::new(input_text.into_bytes());
        let mut writer = Vec::new();

        let result = recover(
            &mut reader,
            &mut writer,
            Threshold::new(2).unwrap(),
            EntryMode::Phrase,
            WordLength::Long,
        );
        assert!(result.is_ok(), "{result:?}");
    }
}
