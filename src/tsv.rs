use std::{io::BufRead, path::Path};

use anyhow::Context;
use compress_io::compress::CompressIo;

/// Streaming reader for the headered, tab separated ClinVar extracts
///
/// The column header is the last `#` line before the data or, when there
/// is no `#` line, the first line of the input. Fields are looked up by
/// column name through indices resolved once with [`TsvReader::column`].
pub struct TsvReader<R: BufRead> {
    rdr: R,
    buffer: String,
    header: Vec<Box<str>>,
    line: usize,
    skipped: usize,
    held: bool,
}

/// Column index resolved against the header of a [`TsvReader`]
#[derive(Debug, Clone, Copy)]
pub struct Column(usize);

/// One data line split into fields
pub struct TsvRecord<'a> {
    fields: Vec<&'a str>,
    line: usize,
}

impl<'a> TsvRecord<'a> {
    pub fn get(&self, col: Column) -> &'a str {
        self.fields[col.0]
    }

    /// 1-based line number in the input
    pub fn line(&self) -> usize {
        self.line
    }
}

fn strip_eol(s: &str) -> &str {
    s.trim_end_matches(['\r', '\n'])
}

fn split_header(s: &str) -> Vec<Box<str>> {
    strip_eol(s).split('\t').map(|f| Box::from(f.trim())).collect()
}

/// Open a plain or compressed file
pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<TsvReader<impl BufRead>> {
    let path = path.as_ref();
    let rdr = CompressIo::new()
        .path(path)
        .bufreader()
        .with_context(|| format!("Could not open {} for input", path.display()))?;
    debug!("Opened {} for input", path.display());
    TsvReader::new(rdr).with_context(|| format!("Could not read header from {}", path.display()))
}

impl<R: BufRead> TsvReader<R> {
    pub fn new(mut rdr: R) -> anyhow::Result<Self> {
        let mut buffer = String::new();
        let mut header = None;
        let mut line = 0;
        let mut held = false;
        loop {
            buffer.clear();
            if rdr.read_line(&mut buffer)? == 0 {
                break;
            }
            line += 1;
            if let Some(s) = buffer.strip_prefix('#') {
                header = Some(split_header(s));
            } else if !buffer.trim().is_empty() {
                // First data line (or the header itself if there was no '#' line)
                if header.is_none() {
                    header = Some(split_header(&buffer));
                } else {
                    held = true;
                    line -= 1;
                }
                break;
            }
        }
        let header = header.ok_or_else(|| anyhow!("No header line found"))?;
        trace!("Header with {} columns", header.len());
        Ok(Self {
            rdr,
            buffer,
            header,
            line,
            skipped: 0,
            held,
        })
    }

    /// Index of a required column
    pub fn column(&self, name: &str) -> anyhow::Result<Column> {
        self.header
            .iter()
            .position(|h| h.as_ref() == name)
            .map(Column)
            .ok_or_else(|| anyhow!("Required column '{}' missing from header", name))
    }

    /// Number of data lines dropped because their width did not match the header
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Next data line, or `None` at end of input
    ///
    /// Blank lines and lines with the wrong number of fields are skipped
    pub fn next_record(&mut self) -> anyhow::Result<Option<TsvRecord<'_>>> {
        loop {
            if !self.held {
                self.buffer.clear();
                if self.rdr.read_line(&mut self.buffer)? == 0 {
                    return Ok(None);
                }
            }
            self.held = false;
            self.line += 1;
            let s = strip_eol(&self.buffer);
            if s.trim().is_empty() {
                continue;
            }
            if s.split('\t').count() != self.header.len() {
                trace!("Skipping malformed line {}", self.line);
                self.skipped += 1;
                continue;
            }
            break;
        }
        Ok(Some(TsvRecord {
            fields: strip_eol(&self.buffer).split('\t').collect(),
            line: self.line,
        }))
    }
}
