//! `clap`-derived argument parsing for the `mnemonic-sss` binary.
//!
//! Implements the surface the shipped tool exposes: `split | recover |
//! generate` subcommands, `--quorum`/`--total` sized and range-checked
//! through the domain newtypes at parse time, and `--word`/`--mode` for the
//! interactive prompt flavor. Shaped after the teacher's `Cli`/`Commands`
//! pair, with the flags' own validators delegating to the domain layer
//! instead of hand-rolled range checks.

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::{ShareCount, Threshold};
use crate::input::{EntryMode, WordLength};

fn validate_threshold(s: &str) -> Result<Threshold, String> {
    let value: u8 = s.parse().map_err(|_| format!("'{s}' is not a valid number"))?;
    Threshold::new(value).map_err(|e| e.to_string())
}

fn validate_share_count(s: &str) -> Result<ShareCount, String> {
    let value: u8 = s.parse().map_err(|_| format!("'{s}' is not a valid number"))?;
    ShareCount::new(value).map_err(|e| e.to_string())
}

/// `--word short|long`: whether typed words are 4-character abbreviations
/// or spelled out in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WordArg {
    Short,
    Long,
}

impl From<WordArg> for WordLength {
    fn from(value: WordArg) -> Self {
        match value {
            WordArg::Short => WordLength::Short,
            WordArg::Long => WordLength::Long,
        }
    }
}

/// `--mode word|phrase`: word-by-word prompting or one line per mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Word,
    Phrase,
}

impl From<ModeArg> for EntryMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Word => EntryMode::Word,
            ModeArg::Phrase => EntryMode::Phrase,
        }
    }
}

#[derive(Parser)]
#[command(name = "mnemonic-sss")]
#[command(about = "Shamir Secret Sharing over 24-word BIP-39 mnemonics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a master mnemonic into shares.
    Split {
        /// Minimum number of shares needed to reconstruct (2..total).
        #[arg(long, value_parser = validate_threshold)]
        quorum: Threshold,

        /// Total number of shares to create (2..=20).
        #[arg(long, value_parser = validate_share_count)]
        total: ShareCount,

        /// Whether to type words as 4-character abbreviations or in full.
        #[arg(long, value_enum, default_value_t = WordArg::Short)]
        word: WordArg,

        /// Whether to enter mnemonics word-by-word or as one line.
        #[arg(long, value_enum, default_value_t = ModeArg::Word)]
        mode: ModeArg,
    },
    /// Recover the master mnemonic from a quorum of shares.
    Recover {
        /// Number of shares that will be supplied (2..=20).
        #[arg(long, value_parser = validate_threshold)]
        quorum: Threshold,

        /// Whether to type words as 4-character abbreviations or in full.
        #[arg(long, value_enum, default_value_t = WordArg::Short)]
        word: WordArg,

        /// Whether to enter mnemonics word-by-word or as one line.
        #[arg(long, value_enum, default_value_t = ModeArg::Word)]
        mode: ModeArg,
    },
    /// Generate a fresh random master mnemonic.
    Generate,
}
