use crate::core::error::{Diagnostic, Result, SeqstatError};
use crate::core::record::{ParsedRecord, SeqFormat};
use std::collections::HashSet;
use std::path::Path;

/// Strict cores: ACGTU for nucleotides, the twenty standard amino acids
/// for proteins. Characters here never draw a warning.
const STRICT: &[u8] = b"ACDEFGHIKLMNPQRSTUVWY";

/// IUPAC extended/ambiguity codes plus gap and stop symbols. Legal, but
/// outside the strict cores, so they draw a soft warning.
const EXTENDED: &[u8] = b"BJOXZ*-";

enum CharClass {
    Strict,
    Extended,
    Illegal,
}

fn classify(ch: char) -> CharClass {
    let up = ch.to_ascii_uppercase();
    if up.is_ascii() && STRICT.contains(&(up as u8)) {
        CharClass::Strict
    } else if up.is_ascii() && EXTENDED.contains(&(up as u8)) {
        CharClass::Extended
    } else {
        CharClass::Illegal
    }
}

/// Per-record content checks layered on top of structural parsing:
/// whole-file name uniqueness (hard) and alphabet membership (hard for
/// non-IUPAC characters, soft for ambiguity codes).
pub struct Validator {
    seen: HashSet<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    pub fn check(
        &mut self,
        parsed: &ParsedRecord,
        index: usize,
        warnings: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        let record = &parsed.record;
        if !self.seen.insert(record.name.clone()) {
            return Err(SeqstatError::DuplicateName {
                name: record.name.clone(),
                line: parsed.span.header_line,
            });
        }

        let mut unusual: Option<char> = None;
        for ch in record.seq.chars() {
            match classify(ch) {
                CharClass::Strict => {}
                CharClass::Extended => {
                    if unusual.is_none() {
                        unusual = Some(ch);
                    }
                }
                CharClass::Illegal => {
                    return Err(SeqstatError::IllegalCharacter {
                        name: record.name.clone(),
                        ch,
                        line: parsed.span.seq_line,
                    });
                }
            }
        }
        if let Some(ch) = unusual {
            warnings.push(Diagnostic::warning(
                parsed.span.seq_line,
                format!(
                    "sequence '{}' uses extended IUPAC code '{}'",
                    record.name, ch
                ),
                Some(index),
            ));
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Advisory only: the sniffed format always wins over the extension.
pub fn extension_warning(path: &Path, format: SeqFormat) -> Option<Diagnostic> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if format.known_extensions().contains(&ext.as_str()) {
        return None;
    }
    Some(Diagnostic::warning(
        1,
        format!("detected {format} content but extension '.{ext}' is uncommon for {format}"),
        None,
    ))
}
