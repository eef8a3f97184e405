use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seqstat", version, about = "Statistics and operations for plain FASTA/FASTQ")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print file statistics, then run an operation.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Input FASTA or FASTQ file.
    pub input: PathBuf,

    /// Run this operation directly instead of prompting.
    #[arg(long, value_enum)]
    pub op: Option<OpArg>,

    /// Minimum sequence length for `--op filter`.
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Seed for `--op extract`; omit for a random draw.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OpArg {
    #[value(name = "extract")]
    Extract,
    #[value(name = "filter")]
    Filter,
    #[value(name = "convert")]
    Convert,
}
