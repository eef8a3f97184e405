use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeqFormat {
    Fasta,
    Fastq,
}

impl SeqFormat {
    /// Canonical extension used when deriving output file names.
    pub fn extension(self) -> &'static str {
        match self {
            SeqFormat::Fasta => "fasta",
            SeqFormat::Fastq => "fastq",
        }
    }

    /// Extensions commonly seen in the wild for this format.
    pub fn known_extensions(self) -> &'static [&'static str] {
        match self {
            SeqFormat::Fasta => &["fasta", "fa", "fna", "ffn", "faa"],
            SeqFormat::Fastq => &["fastq", "fq"],
        }
    }
}

impl fmt::Display for SeqFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeqFormat::Fasta => write!(f, "FASTA"),
            SeqFormat::Fastq => write!(f, "FASTQ"),
        }
    }
}

/// One parsed sequence record. Immutable once constructed; `qual` is
/// present only for FASTQ input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    pub name: String,
    pub desc: Option<String>,
    pub seq: String,
    pub qual: Option<String>,
}

impl Record {
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// Line positions a record came from, kept for diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct RecordSpan {
    pub header_line: u64,
    /// First sequence line. For multi-line FASTA bodies, findings inside
    /// the body are reported against this line.
    pub seq_line: u64,
}

#[derive(Clone, Debug)]
pub struct ParsedRecord {
    pub record: Record,
    pub span: RecordSpan,
}

/// Split the text after the marker byte (`>` or `@`) into a name token
/// and an optional description. Returns `None` when the name is missing
/// or the marker is followed by whitespace.
pub(crate) fn parse_name(rest: &[u8]) -> Option<(String, Option<String>)> {
    let first = rest.first()?;
    if first.is_ascii_whitespace() {
        return None;
    }
    let rest = rest.trim_ascii_end();
    match rest.iter().position(|b| b.is_ascii_whitespace()) {
        Some(i) => {
            let name = String::from_utf8_lossy(&rest[..i]).into_owned();
            let desc = String::from_utf8_lossy(rest[i..].trim_ascii_start()).into_owned();
            Some((name, Some(desc)))
        }
        None => Some((String::from_utf8_lossy(rest).into_owned(), None)),
    }
}
