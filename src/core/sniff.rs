use crate::core::error::{Result, SeqstatError};
use crate::core::io::{LineCursor, is_blank};
use crate::core::record::SeqFormat;

/// Classify the input by the first byte of its first non-blank line.
/// The detected format wins over the file extension.
pub fn detect_format(data: &[u8]) -> Result<SeqFormat> {
    let mut lines = LineCursor::new(data);
    while let Some((_, line)) = lines.next_line() {
        if is_blank(line) {
            continue;
        }
        return match line[0] {
            b'>' => Ok(SeqFormat::Fasta),
            b'@' => Ok(SeqFormat::Fastq),
            _ => Err(SeqstatError::UnrecognizedFormat),
        };
    }
    Err(SeqstatError::UnrecognizedFormat)
}
