//! End-to-end tests driving the analysis pass, statistics, and the
//! three operations over real files on disk.

use seqstat::core::engine;
use seqstat::core::error::SeqstatError;
use seqstat::core::ops::{self, EXTRACT_SAMPLE_SIZE, Operation};
use seqstat::core::record::SeqFormat;
use seqstat::core::stats;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn fasta_stats_two_record_scenario() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "toy.fasta", ">a\nACGT\n>b\nNNNN\n");
    let analysis = engine::analyze(&input).unwrap();
    assert_eq!(analysis.format, SeqFormat::Fasta);
    assert!(analysis.warnings.is_empty());

    let report = stats::compute(&analysis.records).unwrap();
    assert_eq!(report.count, 2);
    assert_eq!(report.average_length, 4.00);
    assert_eq!(report.average_gc, 25.00);
    assert_eq!(report.average_n, 2.00);
    assert_eq!(report.max_length, 4);
    assert_eq!(report.max_names, vec!["a", "b"]);
    assert_eq!(report.min_names, vec!["a", "b"]);
}

#[test]
fn total_length_matches_per_record_sum() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "reads.fastq",
        "@r1\nACGTAC\n+\nIIIIII\n@r2\nGG\n+\nII\n@r3\nACGTACGTA\n+\nIIIIIIIII\n",
    );
    let analysis = engine::analyze(&input).unwrap();
    let report = stats::compute(&analysis.records).unwrap();
    let sum: u64 = analysis.records.iter().map(|r| r.len() as u64).sum();
    assert_eq!(report.total_length, sum);
    assert_eq!(report.total_length, 17);
}

#[test]
fn preflight_failures_are_distinct() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("nope.fasta");
    assert!(matches!(
        engine::analyze(&missing).unwrap_err(),
        SeqstatError::FileNotFound { .. }
    ));

    let empty = write_input(&dir, "empty.fasta", "");
    assert!(matches!(
        engine::analyze(&empty).unwrap_err(),
        SeqstatError::EmptyFile { .. }
    ));

    let junk = write_input(&dir, "junk.fasta", "this is not a sequence file\n");
    assert!(matches!(
        engine::analyze(&junk).unwrap_err(),
        SeqstatError::UnrecognizedFormat
    ));
}

#[test]
fn lone_header_is_truncated_in_both_formats() {
    let dir = TempDir::new().unwrap();

    let fasta = write_input(&dir, "lone.fasta", ">only\n");
    assert!(matches!(
        engine::analyze(&fasta).unwrap_err(),
        SeqstatError::TruncatedRecord { ref name, line: 1 } if name == "only"
    ));

    let fastq = write_input(&dir, "lone.fastq", "@only\n");
    assert!(matches!(
        engine::analyze(&fastq).unwrap_err(),
        SeqstatError::TruncatedRecord { ref name, line: 1 } if name == "only"
    ));
}

#[test]
fn duplicate_name_reports_second_occurrence_line() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "dup.fasta", ">a\nACGT\n>b\nGG\n>a\nTT\n");
    assert!(matches!(
        engine::analyze(&input).unwrap_err(),
        SeqstatError::DuplicateName { ref name, line: 5 } if name == "a"
    ));
}

#[test]
fn soft_warnings_do_not_abort() {
    let dir = TempDir::new().unwrap();
    // FASTA content behind a .fastq extension, with an ambiguity code.
    let input = write_input(&dir, "mislabeled.fastq", ">a\nACGTX\n>b\nGGGG\n");
    let analysis = engine::analyze(&input).unwrap();
    assert_eq!(analysis.format, SeqFormat::Fasta);
    assert_eq!(analysis.records.len(), 2);
    assert_eq!(analysis.warnings.len(), 2);
    assert!(analysis.warnings[0].message.contains(".fastq"));
    assert!(analysis.warnings[1].message.contains('X'));
    assert_eq!(analysis.warnings[1].record_index, Some(0));
}

#[test]
fn filter_threshold_zero_keeps_everything_in_order() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "mix.fasta", ">a\nACGTAC\n>b\nGG\n>c\nACGT\n");
    let analysis = engine::analyze(&input).unwrap();

    let outcome = ops::run_operation(
        Operation::Filter { min_len: 0 },
        &input,
        analysis.format,
        &analysis.records,
    )
    .unwrap();
    assert_eq!(outcome.written, 3);
    let out = outcome.out_path.unwrap();
    assert_eq!(out, dir.path().join("mix.filter_ge0.fasta"));

    let reparsed = engine::analyze(&out).unwrap();
    assert_eq!(reparsed.records, analysis.records);
}

#[test]
fn filter_above_max_creates_no_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "short.fasta", ">a\nACGT\n");
    let analysis = engine::analyze(&input).unwrap();

    let outcome = ops::run_operation(
        Operation::Filter { min_len: 100 },
        &input,
        analysis.format,
        &analysis.records,
    )
    .unwrap();
    assert_eq!(outcome.written, 0);
    assert!(outcome.out_path.is_none());
    assert!(!dir.path().join("short.filter_ge100.fasta").exists());
}

#[test]
fn filter_keeps_fastq_formatting() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "reads.fastq",
        "@r1\nACGTAC\n+\nIIIIII\n@r2\nGG\n+\nII\n",
    );
    let analysis = engine::analyze(&input).unwrap();

    let outcome = ops::run_operation(
        Operation::Filter { min_len: 3 },
        &input,
        analysis.format,
        &analysis.records,
    )
    .unwrap();
    assert_eq!(outcome.written, 1);

    let reparsed = engine::analyze(&outcome.out_path.unwrap()).unwrap();
    assert_eq!(reparsed.format, SeqFormat::Fastq);
    assert_eq!(reparsed.records.len(), 1);
    assert_eq!(reparsed.records[0].name, "r1");
    assert_eq!(reparsed.records[0].qual.as_deref(), Some("IIIIII"));
}

#[test]
fn extract_draws_25_unique_members() {
    let dir = TempDir::new().unwrap();
    let mut contents = String::new();
    for i in 0..1000 {
        contents.push_str(&format!(">s{i}\nACGTACGT\n"));
    }
    let input = write_input(&dir, "big.fasta", &contents);
    let analysis = engine::analyze(&input).unwrap();
    assert_eq!(analysis.records.len(), 1000);

    let sample_names = |seed: u64| -> Vec<String> {
        let outcome = ops::run_operation(
            Operation::Extract { seed: Some(seed) },
            &input,
            analysis.format,
            &analysis.records,
        )
        .unwrap();
        assert_eq!(outcome.written, EXTRACT_SAMPLE_SIZE);
        let out = outcome.out_path.unwrap();
        assert_eq!(out, dir.path().join("big.extract.fasta"));
        engine::analyze(&out)
            .unwrap()
            .records
            .iter()
            .map(|r| r.name.clone())
            .collect()
    };

    let first = sample_names(1);
    assert_eq!(first.len(), EXTRACT_SAMPLE_SIZE);
    let mut unique = first.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), EXTRACT_SAMPLE_SIZE);
    for name in &first {
        assert!(analysis.records.iter().any(|r| &r.name == name));
    }

    let second = sample_names(2);
    assert_ne!(first, second);
}

#[test]
fn extract_keeps_all_records_of_a_small_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "tiny.fastq", "@r1\nAC\n+\nII\n@r2\nGT\n+\nII\n");
    let analysis = engine::analyze(&input).unwrap();

    let outcome = ops::run_operation(
        Operation::Extract { seed: Some(0) },
        &input,
        analysis.format,
        &analysis.records,
    )
    .unwrap();
    assert_eq!(outcome.written, 2);
    assert_eq!(
        outcome.out_path.unwrap(),
        dir.path().join("tiny.extract.fastq")
    );
}

#[test]
fn convert_round_trips_names_and_sequences() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "reads.fq",
        "@r1 first\nACGT\n+\nIIII\n@r2\nGGCC\n+\nJJJJ\n",
    );
    let analysis = engine::analyze(&input).unwrap();

    let outcome = ops::run_operation(
        Operation::Convert,
        &input,
        analysis.format,
        &analysis.records,
    )
    .unwrap();
    assert_eq!(outcome.written, 2);
    let out = outcome.out_path.unwrap();
    assert_eq!(out, dir.path().join("reads.fasta"));

    let converted = engine::analyze(&out).unwrap();
    assert_eq!(converted.format, SeqFormat::Fasta);
    assert_eq!(converted.records.len(), 2);
    for (orig, conv) in analysis.records.iter().zip(&converted.records) {
        assert_eq!(orig.name, conv.name);
        assert_eq!(orig.desc, conv.desc);
        assert_eq!(orig.seq, conv.seq);
        assert_eq!(conv.qual, None);
    }
}

#[test]
fn convert_rejects_fasta_with_exact_message() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "genome.fasta", ">a\nACGT\n");
    let analysis = engine::analyze(&input).unwrap();

    let err = ops::run_operation(
        Operation::Convert,
        &input,
        analysis.format,
        &analysis.records,
    )
    .unwrap_err();
    assert!(matches!(err, SeqstatError::ReverseConversionDisallowed));
    assert_eq!(
        err.to_string(),
        "FASTA files cannot be converted to FASTQ: quality data does not exist"
    );
    assert!(!dir.path().join("genome.fasta.fasta").exists());
}

#[test]
fn corrupted_fastq_reports_offending_line() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "bad.fastq", "@r1\nACGT\n+\nIIII\n@r2\nGG\n\n+\nII\n");
    assert!(matches!(
        engine::analyze(&input).unwrap_err(),
        SeqstatError::CorruptedRecord { line: 7, .. }
    ));
}
