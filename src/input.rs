//! Interactive mnemonic input: the boundary state machine the CLI drives to
//! collect a 24-word mnemonic from a terminal.
//!
//! *Prompt → Read line → Normalize (trim + lowercase) → Validate word or
//! whole phrase → {Accept | Re-prompt}*, grounded in
//! `Mnemonics.cpp`'s `input_mnemonics_list`: word-by-word or whole-phrase
//! entry, abbreviated (4-character prefix) or full-word input, and a
//! restart-from-word-1 policy when the completed mnemonic fails checksum
//! validation.

use std::io::{BufRead, Write};

use zeroize::Zeroize;

use crate::bip39::{self, WORD_COUNT};
use crate::error::{CoreError, Result};
use crate::facade::Mnemonic;

/// Whether the user types one word at a time or the whole phrase on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    Word,
    Phrase,
}

/// Whether a typed word is a 4-character abbreviation or the full word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordLength {
    Short,
    Long,
}

/// Reads a 24-word mnemonic from `reader`, prompting on `writer`.
///
/// `label` names the mnemonic being collected ("master mnemonic", "share 3",
/// ...) for the prompt text. Loops until a checksum-valid mnemonic is
/// entered; a checksum failure on the 24th word restarts collection from
/// word 1, per spec.
pub fn read_mnemonic<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
    entry_mode: EntryMode,
    word_length: WordLength,
) -> Result<Mnemonic> {
    loop {
        let words = match entry_mode {
            EntryMode::Phrase => read_phrase(reader, writer, label, word_length)?,
            EntryMode::Word => read_words_one_at_a_time(reader, writer, label, word_length)?,
        };

        if bip39::is_valid(&words) {
            return Ok(words);
        }

        writeln!(
            writer,
            "That mnemonic's checksum does not match — starting {label} over from word 1."
        )
        .map_err(io_err)?;
    }
}

fn read_phrase<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
    word_length: WordLength,
) -> Result<Mnemonic> {
    loop {
        write!(writer, "Enter the {WORD_COUNT} words of the {label}, separated by spaces: ")
            .map_err(io_err)?;
        writer.flush().map_err(io_err)?;

        let mut line = read_line(reader)?;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.len() != WORD_COUNT {
            writeln!(
                writer,
                "Expected {WORD_COUNT} words, got {}. Try again.",
                tokens.len()
            )
            .map_err(io_err)?;
            line.zeroize();
            continue;
        }

        match resolve_all(&tokens, word_length) {
            Ok(words) => {
                line.zeroize();
                return Ok(words);
            }
            Err(bad_word) => {
                writeln!(writer, "Unrecognized word \"{bad_word}\". Try again.").map_err(io_err)?;
                line.zeroize();
            }
        }
    }
}

fn read_words_one_at_a_time<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
    word_length: WordLength,
) -> Result<Mnemonic> {
    let mut words = [""; WORD_COUNT];
    let mut i = 0;
    while i < WORD_COUNT {
        write!(writer, "{label} word {}/{WORD_COUNT}: ", i + 1).map_err(io_err)?;
        writer.flush().map_err(io_err)?;

        let mut line = read_line(reader)?;
        let normalized = normalize(&line);

        match resolve_one(&normalized, word_length) {
            Some(word) => {
                words[i] = word;
                i += 1;
            }
            None => {
                writeln!(writer, "Unrecognized word \"{normalized}\". Try again.").map_err(io_err)?;
            }
        }
        line.zeroize();
    }
    Ok(words)
}

fn resolve_all(tokens: &[&str], word_length: WordLength) -> std::result::Result<Mnemonic, String> {
    let mut words = [""; WORD_COUNT];
    for (slot, token) in words.iter_mut().zip(tokens.iter()) {
        let normalized = normalize(token);
        match resolve_one(&normalized, word_length) {
            Some(word) => *slot = word,
            None => return Err(normalized),
        }
    }
    Ok(words)
}

fn resolve_one(normalized: &str, word_length: WordLength) -> Option<&'static str> {
    match word_length {
        WordLength::Short => bip39::resolve_abbreviation(normalized),
        WordLength::Long => full_word(normalized),
    }
}

/// Looks up `normalized` as a complete word, returning the wordlist's own
/// static string rather than the caller's owned buffer.
fn full_word(normalized: &str) -> Option<&'static str> {
    bip39::word_index(normalized)?;
    crate::wordlist::WORDLIST.iter().find(|&&w| w == normalized).copied()
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| CoreError::InvalidArguments(format!("failed to read input: {e}")))?;
    Ok(line)
}

fn io_err(e: std::io::Error) -> CoreError {
    CoreError::InvalidArguments(format!("failed to write prompt: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_mnemonic() -> Mnemonic {
        crate::facade::generate().unwrap()
    }

    /// Mirrors `bip39`'s own truncation: words shorter than 4 characters
    /// (e.g. "aim", "act") are their own abbreviation.
    fn abbreviate(word: &str) -> String {
        word.chars().take(4).collect()
    }

    #[test]
    fn reads_a_valid_phrase_in_one_line() {
        let mnemonic = valid_mnemonic();
        let input = format!("{}\n", mnemonic.join(" "));
        let mut reader = std::io::Cursor::new(input.into_bytes());
        let mut writer = Vec::new();

        let result = read_mnemonic(
            &mut reader,
            &mut writer,
            "master mnemonic",
            EntryMode::Phrase,
            WordLength::Long,
        )
        .unwrap();
        assert_eq!(result, mnemonic);
    }

    #[test]
    fn reprompts_the_whole_phrase_on_wrong_word_count() {
        let mnemonic = valid_mnemonic();
        let short_line = mnemonic[..23].join(" ");
        let full_line = mnemonic.join(" ");
        let input = format!("{short_line}\n{full_line}\n");
        let mut reader = std::io::Cursor::new(input.into_bytes());
        let mut writer = Vec::new();

        let result = read_mnemonic(
            &mut reader,
            &mut writer,
            "master mnemonic",
            EntryMode::Phrase,
            WordLength::Long,
        )
        .unwrap();
        assert_eq!(result, mnemonic);
    }

    #[test]
    fn reads_words_one_at_a_time_by_abbreviation() {
        let mnemonic = valid_mnemonic();
        let mut input = String::new();
        for word in &mnemonic {
            input.push_str(&abbreviate(word));
            input.push('\n');
        }
        let mut reader = std::io::Cursor::new(input.into_bytes());
        let mut writer = Vec::new();

        let result = read_mnemonic(
            &mut reader,
            &mut writer,
            "share 1",
            EntryMode::Word,
            WordLength::Short,
        )
        .unwrap();
        assert_eq!(result, mnemonic);
    }

    #[test]
    fn reprompts_a_single_word_on_bad_abbreviation() {
        let mnemonic = valid_mnemonic();
        let mut input = String::new();
        input.push_str("zzzz\n");
        for word in &mnemonic {
            input.push_str(&abbreviate(word));
            input.push('\n');
        }
        let mut reader = std::io::Cursor::new(input.into_bytes());
        let mut writer = Vec::new();

        let result = read_mnemonic(
            &mut reader,
            &mut writer,
            "share 1",
            EntryMode::Word,
            WordLength::Short,
        )
        .unwrap();
        assert_eq!(result, mnemonic);
    }
}
