//! Fixed-layout edge records.
//!
//! An unweighted record is `[src: u32][dst: u32]`, a weighted one appends
//! `[weight: f64]`. Records are packed back to back with no header; the
//! stream ends exactly on a record boundary.

use std::io::{self, ErrorKind, Read, Write};

use thiserror::Error;

use crate::config::Mode;
use crate::endian::Endian;

const MAX_RECORD_LEN: usize = 16;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub src: u32,
    pub dst: u32,
    pub weight: f64,
}

impl Edge {
    pub fn new(src: u32, dst: u32) -> Edge { Edge { src, dst, weight: 1.0 } }
    pub fn weighted(src: u32, dst: u32, weight: f64) -> Edge { Edge { src, dst, weight } }
    pub fn is_self_loop(&self) -> bool { self.src == self.dst }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("record {record} truncated: {read} of {expected} bytes")]
    Truncated { record: u64, read: usize, expected: usize },
}

/// Decodes edge records from a byte stream.
///
/// Yields `Ok(edge)` per complete record and stops at a clean end of input.
/// The first error ends the iteration.
pub struct EdgeReader<R> {
    reader: R,
    mode: Mode,
    endian: Endian,
    records: u64,
    done: bool,
}

impl<R: Read> EdgeReader<R> {
    pub fn new(reader: R, mode: Mode, endian: Endian) -> EdgeReader<R> {
        EdgeReader { reader, mode, endian, records: 0, done: false }
    }

    /// Number of complete records decoded so far.
    pub fn records(&self) -> u64 { self.records }

    /// Reads the next edge, or `None` when input ends on a record boundary.
    pub fn next_edge(&mut self) -> Result<Option<Edge>, RecordError> {
        let expected = self.mode.record_len();
        let mut buf = [0u8; MAX_RECORD_LEN];
        let read = fill(&mut self.reader, &mut buf[..expected])?;

        if read == 0 {
            return Ok(None);
        }
        if read < expected {
            return Err(RecordError::Truncated { record: self.records, read, expected });
        }

        let src = self.endian.read_u32(&buf[0..4]);
        let dst = self.endian.read_u32(&buf[4..8]);
        let weight = match self.mode {
            Mode::Weighted => self.endian.read_f64(&buf[8..16]),
            Mode::Unweighted => 1.0,
        };

        self.records += 1;
        Ok(Some(Edge { src, dst, weight }))
    }
}

impl<R: Read> Iterator for EdgeReader<R> {
    type Item = Result<Edge, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.next_edge().transpose();
        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }
        next
    }
}

// reads until `buf` is full or the stream ends; returns the byte count.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut read = 0;
    while read < buf.len() {
        match reader.read(&mut buf[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(read)
}

/// Encodes edges in the record layout `EdgeReader` decodes.
pub struct EdgeWriter<W> {
    writer: W,
    mode: Mode,
    endian: Endian,
}

impl<W: Write> EdgeWriter<W> {
    pub fn new(writer: W, mode: Mode, endian: Endian) -> EdgeWriter<W> {
        EdgeWriter { writer, mode, endian }
    }

    pub fn write(&mut self, edge: &Edge) -> io::Result<()> {
        self.endian.write_u32(&mut self.writer, edge.src)?;
        self.endian.write_u32(&mut self.writer, edge.dst)?;
        if self.mode.is_weighted() {
            self.endian.write_f64(&mut self.writer, edge.weight)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> { self.writer.flush() }

    pub fn into_inner(self) -> W { self.writer }
}
