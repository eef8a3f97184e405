use crate::core::error::{Result, SeqstatError};
use crate::core::io::{LineCursor, is_blank};
use crate::core::record::{ParsedRecord, Record, RecordSpan, parse_name};

/// Streaming FASTA parser. A record is a `>name` header followed by one
/// or more sequence lines; multi-line bodies are concatenated. Blank
/// lines between records and inside bodies are skipped. A header with no
/// body before the next header or EOF is a truncated record.
pub struct FastaParser<'a> {
    lines: LineCursor<'a>,
    // Header consumed while scanning the previous record's body.
    pending: Option<(u64, &'a [u8])>,
    done: bool,
}

impl<'a> FastaParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            lines: LineCursor::new(data),
            pending: None,
            done: false,
        }
    }

    fn take_header(&mut self) -> Result<Option<(u64, &'a [u8])>> {
        if let Some(pending) = self.pending.take() {
            return Ok(Some(pending));
        }
        while let Some((ln, line)) = self.lines.next_line() {
            if is_blank(line) {
                continue;
            }
            if line[0] != b'>' {
                return Err(SeqstatError::CorruptedRecord {
                    line: ln,
                    msg: "expected a '>' header line".to_string(),
                });
            }
            return Ok(Some((ln, line)));
        }
        Ok(None)
    }

    fn next_record(&mut self) -> Result<Option<ParsedRecord>> {
        let Some((header_line, header)) = self.take_header()? else {
            return Ok(None);
        };
        let (name, desc) =
            parse_name(&header[1..]).ok_or_else(|| SeqstatError::CorruptedRecord {
                line: header_line,
                msg: "'>' must be immediately followed by a sequence name".to_string(),
            })?;

        let mut seq = String::new();
        let mut seq_line = header_line + 1;
        while let Some((ln, line)) = self.lines.next_line() {
            if is_blank(line) {
                continue;
            }
            if line[0] == b'>' {
                self.pending = Some((ln, line));
                break;
            }
            if seq.is_empty() {
                seq_line = ln;
            }
            seq.push_str(&String::from_utf8_lossy(line.trim_ascii()));
        }
        if seq.is_empty() {
            return Err(SeqstatError::TruncatedRecord {
                name,
                line: header_line,
            });
        }

        Ok(Some(ParsedRecord {
            record: Record {
                name,
                desc,
                seq,
                qual: None,
            },
            span: RecordSpan {
                header_line,
                seq_line,
            },
        }))
    }
}

impl Iterator for FastaParser<'_> {
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
