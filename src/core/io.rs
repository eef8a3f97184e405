use crate::core::error::{Result, SeqstatError};
use crate::core::record::{Record, SeqFormat};
use memchr::memchr;
use memmap2::Mmap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub struct MmapSource {
    mmap: Mmap,
}

impl MmapSource {
    /// Open the input read-only. Fails before any parsing for missing,
    /// unreadable, or zero-byte files.
    pub fn open(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path).map_err(|e| classify_open_error(e, path))?;
        if meta.len() == 0 {
            return Err(SeqstatError::EmptyFile {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|e| classify_open_error(e, path))?;
        // SAFETY: read-only file mapping.
        let mmap = unsafe { Mmap::map(&file) }?;
        Ok(Self { mmap })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }
}

fn classify_open_error(e: io::Error, path: &Path) -> SeqstatError {
    match e.kind() {
        io::ErrorKind::NotFound => SeqstatError::FileNotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => SeqstatError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => SeqstatError::Io(e),
    }
}

/// Forward-only iterator over the lines of a byte slice, tracking
/// 1-based line numbers. Strips the trailing `\n` and a `\r` before it.
pub struct LineCursor<'a> {
    data: &'a [u8],
    pos: usize,
    line: u64,
}

impl<'a> LineCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            line: 0,
        }
    }

    pub fn next_line(&mut self) -> Option<(u64, &'a [u8])> {
        let data = self.data;
        if self.pos >= data.len() {
            return None;
        }
        let rest = &data[self.pos..];
        let (mut line, consumed) = match memchr(b'\n', rest) {
            Some(i) => (&rest[..i], i + 1),
            None => (rest, rest.len()),
        };
        if line.last() == Some(&b'\r') {
            line = &line[..line.len() - 1];
        }
        self.pos += consumed;
        self.line += 1;
        Some((self.line, line))
    }
}

pub fn is_blank(line: &[u8]) -> bool {
    line.trim_ascii().is_empty()
}

/// Write records to `path` in the given format. Output goes to a temp
/// file in the destination directory and is renamed into place, so a
/// failure mid-write leaves nothing behind.
pub fn write_records<'a, I>(path: &Path, format: SeqFormat, records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Record>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    let mut written = 0usize;
    {
        let mut w = BufWriter::new(tmp.as_file_mut());
        for rec in records {
            write_record(&mut w, format, rec)?;
            written += 1;
        }
        w.flush()?;
    }
    tmp.persist(path).map_err(|e| SeqstatError::Io(e.error))?;
    Ok(written)
}

fn write_record<W: Write>(w: &mut W, format: SeqFormat, rec: &Record) -> io::Result<()> {
    match format {
        SeqFormat::Fasta => {
            write_header(w, '>', rec)?;
            writeln!(w, "{}", rec.seq)
        }
        SeqFormat::Fastq => {
            write_header(w, '@', rec)?;
            let qual = rec.qual.as_deref().unwrap_or("");
            writeln!(w, "{}\n+\n{}", rec.seq, qual)
        }
    }
}

fn write_header<W: Write>(w: &mut W, marker: char, rec: &Record) -> io::Result<()> {
    match &rec.desc {
        Some(desc) => writeln!(w, "{marker}{} {desc}", rec.name),
        None => writeln!(w, "{marker}{}", rec.name),
    }
}
