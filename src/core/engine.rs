use crate::core::error::{Diagnostic, Result};
use crate::core::fasta::FastaParser;
use crate::core::fastq::FastqParser;
use crate::core::io::MmapSource;
use crate::core::record::{ParsedRecord, Record, SeqFormat};
use crate::core::sniff;
use crate::core::validate::{self, Validator};
use log::debug;
use std::path::Path;

/// Everything a single validated pass over the input yields. Records are
/// immutable from here on; warnings are the soft-diagnostic side channel.
#[derive(Debug)]
pub struct Analysis {
    pub format: SeqFormat,
    pub records: Vec<Record>,
    pub warnings: Vec<Diagnostic>,
}

/// Sniff, parse, and validate the input in one forward pass. The first
/// hard error aborts; soft findings accumulate in `warnings`.
pub fn analyze(path: &Path) -> Result<Analysis> {
    let source = MmapSource::open(path)?;
    let data = source.bytes();
    let format = sniff::detect_format(data)?;
    debug!("{}: detected {format}, {} bytes", path.display(), source.len());

    let mut warnings = Vec::new();
    if let Some(diag) = validate::extension_warning(path, format) {
        warnings.push(diag);
    }

    let mut records = Vec::new();
    match format {
        SeqFormat::Fasta => drain(FastaParser::new(data), &mut records, &mut warnings)?,
        SeqFormat::Fastq => drain(FastqParser::new(data), &mut records, &mut warnings)?,
    }
    debug!("{}: {} valid records", path.display(), records.len());

    Ok(Analysis {
        format,
        records,
        warnings,
    })
}

fn drain<I>(parser: I, records: &mut Vec<Record>, warnings: &mut Vec<Diagnostic>) -> Result<()>
where
    I: Iterator<Item = Result<ParsedRecord>>,
{
    let mut validator = Validator::new();
    for parsed in parser {
        let parsed = parsed?;
        validator.check(&parsed, records.len(), warnings)?;
        records.push(parsed.record);
    }
    Ok(())
}
