use std::{io, mem};

use bitweave_utils::{align::bits_to_bytes, hints::cold_path};
use byteorder::{BigEndian, ByteOrder};

use crate::FixedReader;

// How many bytes are discarded per source read when skipping.
const SKIP_CHUNK: usize = 64;

/// A reader which enables bit-based deserialization of data.
///
/// Individual bit reading starts at the MSB of each byte, working
/// towards the LSB. At most one byte of the source is buffered at
/// a time.
///
/// Failures of the underlying source are passed through unchanged;
/// running out of data is reported as [`io::ErrorKind::UnexpectedEof`].
#[derive(Debug)]
pub struct BitReader<R> {
    // The source where bytes are being fetched from.
    inner: R,

    // Unconsumed bits of the last fetched byte, kept
    // at the top with zeroes shifted in from below.
    carry: u8,

    // How many bits in `carry` are still valid.
    // When 0, the reader is aligned.
    count: u32,

    // How many whole bytes were fetched from `inner`.
    index: usize,
}

impl<R> BitReader<R> {
    /// Creates a new [`BitReader`] over a given byte source.
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            carry: 0,
            count: 0,
            index: 0,
        }
    }

    /// Gets the number of whole bytes fetched from the source.
    ///
    /// A partially consumed byte counts as fetched.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Overrides the byte index.
    ///
    /// This does not reposition the underlying source; it only moves
    /// the bookkeeping, e.g. after the caller seeked the source itself.
    #[inline]
    pub fn set_index(&mut self, index: usize) {
        log::trace!("moving reader index from {} to {index}", self.index);
        self.index = index;
    }

    /// Gets the number of bits still buffered from the last fetched byte.
    #[inline]
    pub fn buffered_bits(&self) -> u32 {
        self.count
    }

    /// Indicates whether the reader sits on a byte boundary.
    #[inline]
    pub fn is_aligned(&self) -> bool {
        self.count == 0
    }

    /// Discards the bits left in the current byte, if any.
    ///
    /// This never touches the source. Calling it on an aligned reader
    /// has no effect.
    #[inline]
    pub fn align(&mut self) {
        self.consume_carry(self.count);
    }

    /// Binds the reader to a new source and returns the previous one.
    ///
    /// All buffered state and the byte index are cleared.
    pub fn reset(&mut self, inner: R) -> R {
        log::trace!("resetting reader after {} bytes", self.index);

        self.carry = 0;
        self.count = 0;
        self.index = 0;

        mem::replace(&mut self.inner, inner)
    }

    /// Gets a reference to the underlying source.
    #[inline]
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Gets a mutable reference to the underlying source.
    ///
    /// Reading from it directly while bits are buffered will
    /// desynchronize the reader.
    #[inline]
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consumes the reader and returns the underlying source.
    ///
    /// Any buffered bits are lost.
    #[inline]
    pub fn into_inner(self) -> R {
        self.inner
    }

    #[inline]
    fn consume_carry(&mut self, nbits: u32) {
        debug_assert!(nbits <= self.count);

        self.carry = self.carry.checked_shl(nbits).unwrap_or(0);
        self.count -= nbits;
    }
}

impl<'a> BitReader<FixedReader<'a>> {
    /// Creates a new [`BitReader`] over a fixed byte slice.
    ///
    /// See [`FixedReader`] for the bounds semantics.
    pub const fn from_buffer(data: &'a [u8]) -> Self {
        Self::new(FixedReader::new(data))
    }
}

impl<R: io::Read> BitReader<R> {
    #[inline]
    fn fetch(&mut self) -> io::Result<u8> {
        let mut byte = [0; 1];
        match self.inner.read_exact(&mut byte) {
            Ok(()) => {
                self.index += 1;
                Ok(byte[0])
            }

            Err(e) => {
                cold_path();
                Err(e)
            }
        }
    }

    /// Reads a single bit.
    pub fn read_bit(&mut self) -> io::Result<bool> {
        if self.count == 0 {
            self.carry = self.fetch()?;
            self.count = u8::BITS;
        }

        let bit = self.carry & 0x80 != 0;
        self.consume_carry(1);

        Ok(bit)
    }

    /// Reads the next 8 bits as a byte.
    ///
    /// When aligned, this takes the byte straight from the source.
    /// Otherwise the buffered bits are merged with the leading bits
    /// of a freshly fetched byte.
    pub fn read_byte(&mut self) -> io::Result<u8> {
        let fresh = self.fetch()?;
        if self.count == 0 {
            return Ok(fresh);
        }

        let byte = self.carry | fresh >> self.count;
        self.carry = fresh << (u8::BITS - self.count);

        Ok(byte)
    }

    /// Reads an `nbits` wide unsigned value, MSB-first.
    ///
    /// Whole bytes are read first, followed by the remaining bits one
    /// at a time. `nbits` must not exceed 64; reading 0 bits yields 0
    /// without touching the source.
    pub fn read_bits(&mut self, nbits: u32) -> io::Result<u64> {
        debug_assert!(nbits <= u64::BITS);

        let nbytes = (nbits >> 3) as usize;
        let mut value = 0;

        if nbytes != 0 {
            let mut buf = [0; 8];
            for byte in &mut buf[..nbytes] {
                *byte = self.read_byte()?;
            }

            value = BigEndian::read_uint(&buf, nbytes);
        }

        for _ in 0..nbits & 7 {
            value = (value << 1) | u64::from(self.read_bit()?);
        }

        Ok(value)
    }

    /// Fills `buf` with the next bytes in the stream.
    ///
    /// An aligned reader forwards this to the source directly. Unaligned
    /// reads are done byte by byte and are considerably slower.
    ///
    /// On failure, [`Self::index`] reflects how many bytes were taken
    /// from the source before the error occurred.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.count != 0 {
            for byte in buf.iter_mut() {
                *byte = self.read_byte()?;
            }

            return Ok(buf.len());
        }

        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    cold_path();
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "source exhausted during bulk read",
                    ));
                }

                Ok(n) => {
                    filled += n;
                    self.index += n;
                }

                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}

                Err(e) => return Err(e),
            }
        }

        Ok(filled)
    }

    /// Skips over the next `nbits` bits.
    ///
    /// Buffered bits are consumed first. Whole bytes are then discarded
    /// from the source, with the last one fetched kept around when the
    /// skip ends in the middle of it.
    pub fn skip(&mut self, nbits: usize) -> io::Result<()> {
        let drained = nbits.min(self.count as usize);
        self.consume_carry(drained as u32);

        let nbits = nbits - drained;
        let nbytes = bits_to_bytes(nbits);
        if nbytes == 0 {
            return Ok(());
        }

        log::trace!("skipping {nbytes} bytes at index {}", self.index);

        let mut scratch = [0; SKIP_CHUNK];
        let mut left = nbytes;
        let mut last = 0;
        while left != 0 {
            let chunk = left.min(SKIP_CHUNK);
            if let Err(e) = self.inner.read_exact(&mut scratch[..chunk]) {
                cold_path();
                return Err(e);
            }

            self.index += chunk;
            last = scratch[chunk - 1];
            left -= chunk;
        }

        // The final byte may only be skipped partially.
        self.carry = last;
        self.count = u8::BITS;
        self.consume_carry((nbits - (nbytes - 1) * 8) as u32);

        Ok(())
    }
}
