use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeqstatError>;

/// Hard failures. Any of these aborts the whole run: no statistics are
/// printed and no output file is left behind.
#[derive(Debug, Error)]
pub enum SeqstatError {
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("input file is not readable: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("{path} is an empty file")]
    EmptyFile { path: PathBuf },

    #[error("unable to determine file format (expected FASTA or FASTQ)")]
    UnrecognizedFormat,

    #[error("truncated record '{name}' starting at line {line}")]
    TruncatedRecord { name: String, line: u64 },

    #[error("corrupted record at line {line}: {msg}")]
    CorruptedRecord { line: u64, msg: String },

    #[error("duplicate sequence name '{name}' at line {line}")]
    DuplicateName { name: String, line: u64 },

    #[error("illegal character '{ch}' in sequence '{name}' near line {line}")]
    IllegalCharacter { name: String, ch: char, line: u64 },

    #[error(
        "sequence/quality length mismatch for '{name}' at line {line}: \
         sequence has {seq_len} bases, quality has {qual_len}"
    )]
    QualityLengthMismatch {
        name: String,
        line: u64,
        seq_len: usize,
        qual_len: usize,
    },

    #[error("no valid sequences found")]
    EmptyValidFile,

    #[error("FASTA files cannot be converted to FASTQ: quality data does not exist")]
    ReverseConversionDisallowed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    Warning,
    Error,
}

/// Non-fatal finding surfaced alongside successful results. Hard errors
/// travel as `SeqstatError`; diagnostics are the soft side channel.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub line: u64,
    pub severity: Severity,
    pub message: String,
    pub record_index: Option<usize>,
}

impl Diagnostic {
    pub fn warning(line: u64, message: String, record_index: Option<usize>) -> Self {
        Self {
            line,
            severity: Severity::Warning,
            message,
            record_index,
        }
    }
}
