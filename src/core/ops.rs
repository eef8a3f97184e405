use crate::core::error::{Result, SeqstatError};
use crate::core::io;
use crate::core::record::{Record, SeqFormat};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

/// Records drawn by `extract`.
pub const EXTRACT_SAMPLE_SIZE: usize = 25;

#[derive(Clone, Copy, Debug)]
pub enum Operation {
    Extract { seed: Option<u64> },
    Filter { min_len: usize },
    Convert,
}

#[derive(Debug)]
pub struct OpOutcome {
    pub written: usize,
    /// None when nothing qualified and no file was created.
    pub out_path: Option<PathBuf>,
}

/// Run one operation over the validated record set. Output files are
/// written atomically; a failure leaves no partial file behind.
pub fn run_operation(
    op: Operation,
    input: &Path,
    format: SeqFormat,
    records: &[Record],
) -> Result<OpOutcome> {
    match op {
        Operation::Extract { seed } => extract(input, format, records, seed),
        Operation::Filter { min_len } => filter(input, format, records, min_len),
        Operation::Convert => convert(input, format, records),
    }
}

fn extract(
    input: &Path,
    format: SeqFormat,
    records: &[Record],
    seed: Option<u64>,
) -> Result<OpOutcome> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sample = reservoir_sample(records.iter(), EXTRACT_SAMPLE_SIZE, &mut rng);
    let out = derived_path(input, "extract", format.extension());
    let written = io::write_records(&out, format, sample)?;
    Ok(OpOutcome {
        written,
        out_path: Some(out),
    })
}

/// Algorithm R: every item ends up in the sample with probability
/// k/n regardless of position.
fn reservoir_sample<'a, I>(items: I, k: usize, rng: &mut StdRng) -> Vec<&'a Record>
where
    I: Iterator<Item = &'a Record>,
{
    let mut reservoir: Vec<&Record> = Vec::with_capacity(k);
    for (i, item) in items.enumerate() {
        if reservoir.len() < k {
            reservoir.push(item);
        } else {
            let j = rng.gen_range(0..=i);
            if j < k {
                reservoir[j] = item;
            }
        }
    }
    reservoir
}

fn filter(
    input: &Path,
    format: SeqFormat,
    records: &[Record],
    min_len: usize,
) -> Result<OpOutcome> {
    let kept: Vec<&Record> = records.iter().filter(|r| r.len() >= min_len).collect();
    if kept.is_empty() {
        // A threshold nothing reaches is a normal outcome, not an error;
        // no output file is created.
        return Ok(OpOutcome {
            written: 0,
            out_path: None,
        });
    }
    let out = derived_path(input, &format!("filter_ge{min_len}"), format.extension());
    let written = io::write_records(&out, format, kept)?;
    Ok(OpOutcome {
        written,
        out_path: Some(out),
    })
}

fn convert(input: &Path, format: SeqFormat, records: &[Record]) -> Result<OpOutcome> {
    if format == SeqFormat::Fasta {
        return Err(SeqstatError::ReverseConversionDisallowed);
    }
    let out = input.with_file_name(format!("{}.fasta", stem(input)));
    // Quality is dropped by the FASTA writer; names, descriptions and
    // sequences pass through in order.
    let written = io::write_records(&out, SeqFormat::Fasta, records.iter())?;
    Ok(OpOutcome {
        written,
        out_path: Some(out),
    })
}

fn stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sequences".to_string())
}

fn derived_path(input: &Path, tag: &str, ext: &str) -> PathBuf {
    input.with_file_name(format!("{}.{tag}.{ext}", stem(input)))
}
