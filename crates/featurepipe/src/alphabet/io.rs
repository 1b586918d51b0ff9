//! # Alphabet IO
//!
//! Persisted form: the ordered symbol sequence (index = position) plus
//! the growth flag, tagged with a format version.
//!
//! Version history:
//! * v1 - symbols only; growth implied enabled.
//! * v2 - adds the `growth` flag. Current.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    alphabet::Alphabet,
    errors::{FPResult, FeaturePipeError},
    types::Symbol,
};

/// The newest alphabet format this reader writes and understands.
pub const ALPHABET_FORMAT_VERSION: u32 = 2;

fn growth_default() -> bool {
    true
}

/// A detached, serializable snapshot of an [`Alphabet`].
///
/// Index is implied by position in `symbols`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphabetExport<S> {
    /// The format version of this export.
    pub version: u32,

    /// The growth flag at export time. Absent in v1 exports, where
    /// growth was implied enabled.
    #[serde(default = "growth_default")]
    pub growth: bool,

    /// All symbols, in index order.
    pub symbols: Vec<S>,
}

impl<S: Symbol> Alphabet<S> {
    /// Snapshot this alphabet into a serializable export.
    pub fn export(&self) -> AlphabetExport<S> {
        AlphabetExport {
            version: ALPHABET_FORMAT_VERSION,
            growth: !self.is_frozen(),
            symbols: self.symbols(),
        }
    }

    /// Rebuild an alphabet from an export.
    ///
    /// Symbols are re-interned in stored order, so every symbol keeps
    /// the exact index it held when exported.
    ///
    /// ## Returns
    /// * `Ok(alphabet)` - on success.
    /// * `Err(FeaturePipeError::IncompatibleVersion)` - if the export is
    ///   newer than this reader.
    /// * `Err(FeaturePipeError::Parse)` - if the symbol list repeats an
    ///   entry (a corrupt export; re-interning would renumber).
    pub fn import(export: AlphabetExport<S>) -> FPResult<Self> {
        if export.version > ALPHABET_FORMAT_VERSION {
            return Err(FeaturePipeError::IncompatibleVersion {
                component: "alphabet".to_string(),
                found: export.version,
                supported: ALPHABET_FORMAT_VERSION,
            });
        }

        let alphabet = Self::new();
        for (position, symbol) in export.symbols.iter().enumerate() {
            let index = alphabet.intern(symbol)?;
            if index as usize != position {
                return Err(FeaturePipeError::Parse(format!(
                    "duplicate symbol at position {position} in alphabet export"
                )));
            }
        }

        if !export.growth {
            alphabet.freeze();
        }
        Ok(alphabet)
    }
}

/// Write a string alphabet to a [`Write`] writer.
///
/// Lines are:
/// ```terminaloutput
/// featurepipe.alphabet {VERSION} {GROWTH}
/// {JSON STRING}
/// ...
/// ```
///
/// Symbols are JSON-escaped, one per line, in index order.
///
/// ## Arguments
/// * `alphabet` - the alphabet to save.
/// * `writer` - the writer to target.
pub fn write_alphabet<W: Write>(
    alphabet: &Alphabet<String>,
    writer: &mut W,
) -> FPResult<()> {
    let export = alphabet.export();

    writeln!(
        writer,
        "featurepipe.alphabet {} {}",
        export.version, export.growth
    )?;
    for symbol in &export.symbols {
        let line = serde_json::to_string(symbol)
            .map_err(|e| FeaturePipeError::Parse(e.to_string()))?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Read a string alphabet from a [`BufRead`] line reader.
///
/// ## Arguments
/// * `reader` - the line reader.
pub fn read_alphabet<R: BufRead>(reader: R) -> FPResult<Alphabet<String>> {
    let mut lines = reader.lines();

    let header = lines
        .next()
        .ok_or_else(|| FeaturePipeError::Parse("empty alphabet file".to_string()))??;
    let parts = header.split(' ').collect::<Vec<&str>>();
    if parts.len() != 3 || parts[0] != "featurepipe.alphabet" {
        return Err(FeaturePipeError::Parse(format!(
            "bad alphabet header: {header:?}"
        )));
    }

    let version: u32 = parts[1]
        .parse()
        .map_err(|e: core::num::ParseIntError| FeaturePipeError::Parse(e.to_string()))?;
    let growth: bool = parts[2]
        .parse()
        .map_err(|e: core::str::ParseBoolError| FeaturePipeError::Parse(e.to_string()))?;

    let mut symbols = Vec::new();
    for line in lines {
        let line = line?;
        let symbol: String =
            serde_json::from_str(&line).map_err(|e| FeaturePipeError::Parse(e.to_string()))?;
        symbols.push(symbol);
    }

    Alphabet::import(AlphabetExport {
        version,
        growth,
        symbols,
    })
}

/// Save a string alphabet to a file.
///
/// ## Arguments
/// * `alphabet` - the alphabet to save.
/// * `path` - the path to save to.
pub fn save_alphabet_path<P: AsRef<Path>>(
    alphabet: &Alphabet<String>,
    path: P,
) -> FPResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_alphabet(alphabet, &mut writer)
}

/// Load a string alphabet from a file.
///
/// ## Arguments
/// * `path` - the path to load from.
pub fn load_alphabet_path<P: AsRef<Path>>(path: P) -> FPResult<Alphabet<String>> {
    let reader = BufReader::new(File::open(path)?);
    read_alphabet(reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated(words: &[&str]) -> Alphabet<String> {
        let alphabet = Alphabet::new();
        for word in words {
            alphabet.intern(&word.to_string()).unwrap();
        }
        alphabet
    }

    #[test]
    fn test_export_import_round_trip() {
        for words in [
            &[][..],
            &["solo"][..],
            &["a", "b", "c"][..],
            &["cat", "dog", "cat again", "with spaces", "line\nbreak"][..],
        ] {
            let alphabet = populated(words);
            let export = alphabet.export();
            assert_eq!(export.version, ALPHABET_FORMAT_VERSION);
            assert!(export.growth);

            let rebuilt = Alphabet::import(export).unwrap();
            assert_eq!(rebuilt.len(), alphabet.len());
            for word in words {
                assert_eq!(
                    rebuilt.lookup_index(&word.to_string()),
                    alphabet.lookup_index(&word.to_string()),
                );
            }
            assert!(!rebuilt.is_frozen());
        }
    }

    #[test]
    fn test_round_trip_preserves_frozen_flag() {
        let alphabet = populated(&["a", "b"]);
        alphabet.freeze();

        let rebuilt = Alphabet::import(alphabet.export()).unwrap();
        assert!(rebuilt.is_frozen());
        assert!(rebuilt.intern(&"c".to_string()).is_err());
        assert_eq!(rebuilt.lookup_index(&"b".to_string()), Some(1));
    }

    #[test]
    fn test_v1_export_implies_growth() {
        let rebuilt: Alphabet<String> = Alphabet::import(AlphabetExport {
            version: 1,
            growth: true,
            symbols: vec!["x".to_string()],
        })
        .unwrap();
        assert!(!rebuilt.is_frozen());

        // v1 exports on disk carry no growth field at all.
        let json = r#"{"version":1,"symbols":["x","y"]}"#;
        let export: AlphabetExport<String> = serde_json::from_str(json).unwrap();
        assert!(export.growth);
    }

    #[test]
    fn test_future_version_rejected() {
        let result: FPResult<Alphabet<String>> = Alphabet::import(AlphabetExport {
            version: ALPHABET_FORMAT_VERSION + 1,
            growth: true,
            symbols: vec![],
        });
        assert!(matches!(
            result,
            Err(FeaturePipeError::IncompatibleVersion {
                found,
                supported: ALPHABET_FORMAT_VERSION,
                ..
            }) if found == ALPHABET_FORMAT_VERSION + 1
        ));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let result: FPResult<Alphabet<String>> = Alphabet::import(AlphabetExport {
            version: ALPHABET_FORMAT_VERSION,
            growth: true,
            symbols: vec!["a".to_string(), "a".to_string()],
        });
        assert!(matches!(result, Err(FeaturePipeError::Parse(_))));
    }

    #[test]
    fn test_save_load_path() {
        let alphabet = populated(&["apple", "banana", "pear"]);
        alphabet.freeze();

        tempdir::TempDir::new("alphabet_test")
            .and_then(|dir| {
                let path = dir.path().join("data.alphabet");

                save_alphabet_path(&alphabet, &path).expect("Failed to save alphabet");
                let loaded = load_alphabet_path(&path).expect("Failed to load alphabet");

                assert_eq!(loaded.symbols(), alphabet.symbols());
                assert!(loaded.is_frozen());

                Ok(())
            })
            .unwrap();
    }
}
