use crate::core::error::{Result, SeqstatError};
use crate::core::record::Record;

/// Names retained when records tie for the extreme lengths. Ties beyond
/// the cap are counted and reported as "(+N more)".
pub const TIE_NAME_CAP: usize = 10;

/// One-pass aggregate over validated records. O(1) memory aside from the
/// bounded tie-name buffers.
#[derive(Clone, Debug)]
pub struct RunningStats {
    count: u64,
    total_len: u64,
    gc_sum: f64,
    n_sum: u64,
    max_len: usize,
    min_len: usize,
    max_names: Vec<String>,
    min_names: Vec<String>,
    // Total records at the extreme, including those past the cap.
    max_ties: u64,
    min_ties: u64,
}

#[derive(Clone, Debug)]
pub struct StatsReport {
    pub count: u64,
    pub total_length: u64,
    pub average_length: f64,
    pub max_length: usize,
    pub max_names: Vec<String>,
    pub max_extra_ties: u64,
    pub min_length: usize,
    pub min_names: Vec<String>,
    pub min_extra_ties: u64,
    pub average_gc: f64,
    pub average_n: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self {
            count: 0,
            total_len: 0,
            gc_sum: 0.0,
            n_sum: 0,
            max_len: 0,
            min_len: usize::MAX,
            max_names: Vec::new(),
            min_names: Vec::new(),
            max_ties: 0,
            min_ties: 0,
        }
    }

    pub fn update(&mut self, record: &Record) {
        let len = record.seq.len();
        let (gc, n) = gc_and_n(&record.seq);

        self.count += 1;
        self.total_len += len as u64;
        self.n_sum += n;
        // GC% excludes Ns from the denominator; an all-N sequence scores 0.
        let denom = len as u64 - n;
        if denom > 0 {
            self.gc_sum += gc as f64 / denom as f64 * 100.0;
        }

        if len > self.max_len {
            self.max_len = len;
            self.max_names.clear();
            self.max_names.push(record.name.clone());
            self.max_ties = 1;
        } else if len == self.max_len {
            self.max_ties += 1;
            if self.max_names.len() < TIE_NAME_CAP {
                self.max_names.push(record.name.clone());
            }
        }

        if len < self.min_len {
            self.min_len = len;
            self.min_names.clear();
            self.min_names.push(record.name.clone());
            self.min_ties = 1;
        } else if len == self.min_len {
            self.min_ties += 1;
            if self.min_names.len() < TIE_NAME_CAP {
                self.min_names.push(record.name.clone());
            }
        }
    }

    pub fn finalize(self) -> Result<StatsReport> {
        if self.count == 0 {
            return Err(SeqstatError::EmptyValidFile);
        }
        let count = self.count as f64;
        Ok(StatsReport {
            count: self.count,
            total_length: self.total_len,
            average_length: round_half_up2(self.total_len as f64 / count),
            max_length: self.max_len,
            max_extra_ties: self.max_ties - self.max_names.len() as u64,
            max_names: self.max_names,
            min_length: self.min_len,
            min_extra_ties: self.min_ties - self.min_names.len() as u64,
            min_names: self.min_names,
            average_gc: round_half_up2(self.gc_sum / count),
            average_n: round_half_up2(self.n_sum as f64 / count),
        })
    }
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate a validated record set in one pass.
pub fn compute(records: &[Record]) -> Result<StatsReport> {
    let mut stats = RunningStats::new();
    for record in records {
        stats.update(record);
    }
    stats.finalize()
}

fn gc_and_n(seq: &str) -> (u64, u64) {
    let mut gc = 0u64;
    let mut n = 0u64;
    for &b in seq.as_bytes() {
        match b.to_ascii_uppercase() {
            b'G' | b'C' => gc += 1,
            b'N' => n += 1,
            _ => {}
        }
    }
    (gc, n)
}

/// Half-up rounding to 2 decimals. The epsilon absorbs binary
/// representation error on exact halves (e.g. 4.005).
pub fn round_half_up2(x: f64) -> f64 {
    ((x + 1e-12) * 100.0 + 0.5).floor() / 100.0
}
