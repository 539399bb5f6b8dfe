use std::io::{self, Read, Write};

#[inline]
fn exhausted() -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "request exceeds remaining buffer capacity",
    )
}

/// A byte source over a fixed slice with strict bounds.
///
/// Unlike `&[u8]`, reads never come back short: a request for more
/// bytes than what is left fails as a whole with
/// [`io::ErrorKind::UnexpectedEof`] and consumes nothing. Running out
/// of data is therefore a sizing bug, not a silent truncation.
#[derive(Clone, Debug)]
pub struct FixedReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FixedReader<'a> {
    /// Creates a new [`FixedReader`] over a given byte slice.
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Gets the number of bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Gets the number of bytes that can still be read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Consumes the reader and returns the underlying slice.
    #[inline]
    pub fn into_inner(self) -> &'a [u8] {
        self.data
    }
}

impl Read for FixedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let src = self.data[self.pos..]
            .get(..buf.len())
            .ok_or_else(exhausted)?;

        buf.copy_from_slice(src);
        self.pos += buf.len();

        Ok(buf.len())
    }
}

/// A byte sink over a fixed, pre-sized slice with strict bounds.
///
/// A write that does not fit into the remaining capacity fails as a
/// whole with [`io::ErrorKind::UnexpectedEof`] instead of writing a
/// prefix of the data.
#[derive(Debug)]
pub struct FixedWriter<'a> {
    data: &'a mut [u8],
    pos: usize,
}

impl<'a> FixedWriter<'a> {
    /// Creates a new [`FixedWriter`] over a given byte slice.
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Gets the number of bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Gets the number of bytes that can still be written.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Gets a view of the bytes that were written so far.
    #[inline]
    pub fn written(&self) -> &[u8] {
        &self.data[..self.pos]
    }

    /// Consumes the writer and returns the underlying slice.
    #[inline]
    pub fn into_inner(self) -> &'a mut [u8] {
        self.data
    }
}

impl Write for FixedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let dest = self.data[self.pos..]
            .get_mut(..buf.len())
            .ok_or_else(exhausted)?;

        dest.copy_from_slice(buf);
        self.pos += buf.len();

        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
