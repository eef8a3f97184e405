use crate::core::error::{Result, SeqstatError};
use crate::core::io::{LineCursor, is_blank};
use crate::core::record::{ParsedRecord, Record, RecordSpan, parse_name};

/// Streaming FASTQ parser. Records are groups of exactly four non-blank
/// lines: `@name`, sequence, `+` separator, quality. Blank lines are
/// skipped between groups but are a structural error inside one, since
/// tolerating them would desynchronize the 4-line grammar.
pub struct FastqParser<'a> {
    lines: LineCursor<'a>,
    done: bool,
}

impl<'a> FastqParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            lines: LineCursor::new(data),
            done: false,
        }
    }

    fn group_line(&mut self, name: &str, header_line: u64) -> Result<(u64, &'a [u8])> {
        match self.lines.next_line() {
            None => Err(SeqstatError::TruncatedRecord {
                name: name.to_string(),
                line: header_line,
            }),
            Some((ln, line)) if is_blank(line) => Err(SeqstatError::CorruptedRecord {
                line: ln,
                msg: "blank line inside a FASTQ record".to_string(),
            }),
            Some((ln, line)) => Ok((ln, line)),
        }
    }

    fn next_record(&mut self) -> Result<Option<ParsedRecord>> {
        let (header_line, header) = loop {
            match self.lines.next_line() {
                None => return Ok(None),
                Some((_, line)) if is_blank(line) => continue,
                Some((ln, line)) => break (ln, line),
            }
        };
        if header[0] != b'@' {
            return Err(SeqstatError::CorruptedRecord {
                line: header_line,
                msg: "FASTQ header must start with '@'".to_string(),
            });
        }
        let (name, desc) =
            parse_name(&header[1..]).ok_or_else(|| SeqstatError::CorruptedRecord {
                line: header_line,
                msg: "'@' must be immediately followed by a sequence name".to_string(),
            })?;

        let (seq_line, seq) = self.group_line(&name, header_line)?;
        let (plus_line, plus) = self.group_line(&name, header_line)?;
        let (qual_line, qual) = self.group_line(&name, header_line)?;

        if plus[0] != b'+' {
            return Err(SeqstatError::CorruptedRecord {
                line: plus_line,
                msg: "separator line must start with '+'".to_string(),
            });
        }
        let seq = String::from_utf8_lossy(seq.trim_ascii()).into_owned();
        let qual = String::from_utf8_lossy(qual.trim_ascii()).into_owned();
        if seq.len() != qual.len() {
            return Err(SeqstatError::QualityLengthMismatch {
                name,
                line: qual_line,
                seq_len: seq.len(),
                qual_len: qual.len(),
            });
        }

        Ok(Some(ParsedRecord {
            record: Record {
                name,
                desc,
                seq,
                qual: Some(qual),
            },
            span: RecordSpan {
                header_line,
                seq_line,
            },
        }))
    }
}

impl Iterator for FastqParser<'_> {
    type Item = Result<ParsedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
