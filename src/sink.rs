//! Output capability for scans.
//!
//! A sink receives the replaced text as a series of contiguous spans; their
//! concatenation is the full output. Spans borrow from the input or from the
//! stored replacement texts and must not be retained past the call.

use std::io;

/// Receives output spans of a scan.
pub trait Sink<C> {
    fn write(&mut self, span: &[C]);
}

/// Growable buffer output.
impl<C: Copy> Sink<C> for Vec<C> {
    fn write(&mut self, span: &[C]) {
        self.extend_from_slice(span);
    }
}

/// String output for char scans.
impl Sink<char> for String {
    fn write(&mut self, span: &[char]) {
        self.extend(span.iter());
    }
}

/// Streams byte scans into any [`io::Write`].
///
/// The sink contract has no error channel, so the first write error is
/// remembered, later spans are discarded and [`finish`][IoSink::finish]
/// reports the outcome.
pub struct IoSink<W> {
    writer: W,
    result: io::Result<()>,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            result: Ok(()),
        }
    }

    /// Returns the first error encountered, if any.
    pub fn finish(self) -> io::Result<()> {
        self.result
    }
}

impl<W: io::Write> Sink<u8> for IoSink<W> {
    fn write(&mut self, span: &[u8]) {
        if self.result.is_ok() {
            if let Err(error) = self.writer.write_all(span) {
                self.result = Err(error);
            }
        }
    }
}

/// Counts output units without storing them.
#[derive(Debug, Default)]
pub struct CountingSink {
    pub units: usize,
    pub writes: usize,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C> Sink<C> for CountingSink {
    fn write(&mut self, span: &[C]) {
        self.units += span.len();
        self.writes += 1;
    }
}
