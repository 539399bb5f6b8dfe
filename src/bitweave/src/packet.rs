//! Contracts for types with a fixed bit layout.
//!
//! A type describes its layout once, as a sequence of [`Reader`] and
//! [`Writer`] accessor calls in a fixed order. Bit widths and field order
//! are entirely up to the implementation; nothing here validates them.

use std::io;

use bitweave_bit_buf::{FixedReader, FixedWriter};

use crate::{Error, Reader, Writer};

/// Reports the encoded size of a value in bytes.
pub trait Sizer {
    /// Gets the number of bytes the value occupies once encoded,
    /// including padding of a trailing partial byte.
    fn size(&self) -> usize;
}

/// A value that can populate itself from bit-packed data.
pub trait Packer {
    /// Reads all fields of the value from `reader`, in layout order.
    ///
    /// Failures are handled by the reader's policy.
    fn read_bits<R: io::Read>(&mut self, reader: &mut Reader<R>);

    /// Populates the value from raw bytes and returns how many were
    /// consumed.
    ///
    /// The default implementation runs [`Self::read_bits`] with a
    /// checked reader over `data`.
    fn read_from(&mut self, data: &[u8]) -> Result<usize, Error> {
        let mut reader = Reader::new(FixedReader::new(data)).check();
        self.read_bits(&mut reader);

        match reader.take_error() {
            Some(e) => Err(e),
            None => Ok(reader.index()),
        }
    }
}

/// A value that can encode itself as bit-packed data.
pub trait Unpacker {
    /// Writes all fields of the value to `writer`, in layout order.
    ///
    /// Failures are handled by the writer's policy.
    fn write_bits<W: io::Write>(&self, writer: &mut Writer<W>);

    /// Encodes the value into `buf` and returns how many bytes were
    /// written.
    ///
    /// The default implementation runs [`Self::write_bits`] with a
    /// checked writer over `buf` and zero-pads a trailing partial byte.
    fn write_to(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let mut writer = Writer::new(FixedWriter::new(buf)).check();
        self.write_bits(&mut writer);
        writer.flush(false);

        match writer.take_error() {
            Some(e) => Err(e),
            None => Ok(writer.index()),
        }
    }
}

/// The full set of capabilities a codec type provides.
///
/// This is implemented automatically for every type that is a
/// [`Sizer`], [`Packer`] and [`Unpacker`].
pub trait Packet: Sizer + Packer + Unpacker {
    /// Encodes the value into a freshly allocated buffer of
    /// [`Sizer::size`] bytes.
    fn to_vec(&self) -> Result<Vec<u8>, Error> {
        let mut buf = vec![0; self.size()];
        let len = self.write_to(&mut buf)?;
        buf.truncate(len);

        Ok(buf)
    }
}

impl<T: Sizer + Packer + Unpacker + ?Sized> Packet for T {}
