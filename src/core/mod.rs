pub mod engine;
pub mod error;
pub mod fasta;
pub mod fastq;
pub mod io;
pub mod ops;
pub mod record;
pub mod sniff;
pub mod stats;
pub mod validate;
