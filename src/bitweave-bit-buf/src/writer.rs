use std::{io, mem};

use bitweave_utils::hints::cold_path;
use byteorder::{BigEndian, ByteOrder};

use crate::{utils::low_bits_mask, FixedWriter};

/// A writer which enables bit-based serialization of data.
///
/// Individual bit writing starts at the MSB of each byte, working
/// towards the LSB. Bytes are handed to the sink as soon as they are
/// complete; a trailing partial byte stays buffered until it fills up
/// or [`Self::flush`] pads it.
#[derive(Debug)]
pub struct BitWriter<W> {
    // The sink where completed bytes are being written to.
    inner: W,

    // Bits which are not committed to the sink yet,
    // filled from the top.
    carry: u8,

    // How many bit slots in `carry` are still free.
    // When 8, the writer is aligned.
    free: u32,

    // How many whole bytes were written to `inner`.
    index: usize,
}

impl<W> BitWriter<W> {
    /// Creates a new [`BitWriter`] to a given byte sink.
    pub const fn new(inner: W) -> Self {
        Self {
            inner,
            carry: 0,
            free: u8::BITS,
            index: 0,
        }
    }

    /// Gets the number of whole bytes written to the sink.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Overrides the byte index.
    ///
    /// Together with [`Self::index`], this lets callers come back to
    /// a length field and patch it after the fact.
    #[inline]
    pub fn set_index(&mut self, index: usize) {
        log::trace!("moving writer index from {} to {index}", self.index);
        self.index = index;
    }

    /// Gets the number of bits buffered in the pending partial byte.
    #[inline]
    pub fn buffered_bits(&self) -> u32 {
        u8::BITS - self.free
    }

    /// Indicates whether the writer sits on a byte boundary.
    #[inline]
    pub fn is_aligned(&self) -> bool {
        self.free == u8::BITS
    }

    /// Restores a partially filled byte, e.g. from a previous writing
    /// pass that ended unaligned.
    ///
    /// `data` holds the already written bits at the top and `free` is
    /// the number of bit slots left below them, between 1 and 8. Bits
    /// in the free slots are cleared.
    pub fn resume(&mut self, data: u8, free: u32) {
        debug_assert!((1..=u8::BITS).contains(&free));
        let free = free.clamp(1, u8::BITS);

        log::trace!("resuming writer with {} pending bits", u8::BITS - free);

        self.carry = data & !low_bits_mask(free);
        self.free = free;
    }

    /// Binds the writer to a new sink and returns the previous one.
    ///
    /// The pending partial byte, if any, is discarded and the byte
    /// index is cleared.
    pub fn reset(&mut self, inner: W) -> W {
        log::trace!("resetting writer after {} bytes", self.index);

        self.carry = 0;
        self.free = u8::BITS;
        self.index = 0;

        mem::replace(&mut self.inner, inner)
    }

    /// Gets a reference to the underlying sink.
    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Gets a mutable reference to the underlying sink.
    ///
    /// Writing to it directly while bits are buffered will
    /// desynchronize the writer.
    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consumes the writer and returns the underlying sink.
    ///
    /// A pending partial byte is lost; call [`Self::flush`] first
    /// to keep it.
    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<'a> BitWriter<FixedWriter<'a>> {
    /// Creates a new [`BitWriter`] to a fixed byte slice.
    ///
    /// See [`FixedWriter`] for the bounds semantics.
    pub fn from_buffer(data: &'a mut [u8]) -> Self {
        Self::new(FixedWriter::new(data))
    }
}

impl<W: io::Write> BitWriter<W> {
    #[inline]
    fn emit(&mut self, byte: u8) -> io::Result<()> {
        match self.inner.write_all(&[byte]) {
            Ok(()) => {
                self.index += 1;
                Ok(())
            }

            Err(e) => {
                cold_path();
                Err(e)
            }
        }
    }

    /// Writes a single bit.
    ///
    /// When this completes a byte, it is written to the sink. On
    /// failure, the bit is not recorded.
    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        if self.free == 1 {
            self.emit(self.carry | u8::from(bit))?;
            self.carry = 0;
            self.free = u8::BITS;
        } else {
            self.free -= 1;
            self.carry |= u8::from(bit) << self.free;
        }

        Ok(())
    }

    /// Writes 8 bits from a byte.
    ///
    /// When aligned, the byte goes straight to the sink. Otherwise its
    /// leading bits complete the pending byte and the rest starts the
    /// next one.
    pub fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        if self.free == u8::BITS {
            return self.emit(byte);
        }

        self.emit(self.carry | byte >> (u8::BITS - self.free))?;
        self.carry = byte << self.free;

        Ok(())
    }

    /// Writes the `nbits` least significant bits of `value`, MSB-first.
    ///
    /// Higher bits of `value` are ignored. `nbits` must not exceed 64;
    /// writing 0 bits does nothing.
    pub fn write_bits(&mut self, value: u64, nbits: u32) -> io::Result<()> {
        debug_assert!(nbits <= u64::BITS);
        if nbits == 0 {
            return Ok(());
        }

        // Left-align the value so its leading bit is the MSB of buf[0].
        let mut buf = [0; 8];
        BigEndian::write_u64(&mut buf, value << (u64::BITS - nbits));

        let nbytes = (nbits >> 3) as usize;
        for &byte in &buf[..nbytes] {
            self.write_byte(byte)?;
        }

        let tail = buf.get(nbytes).copied().unwrap_or(0);
        for i in 0..nbits & 7 {
            self.write_bit(tail & (0x80 >> i) != 0)?;
        }

        Ok(())
    }

    /// Writes whole bytes from `buf`.
    ///
    /// An aligned writer forwards this to the sink directly. Unaligned
    /// writes are done byte by byte and are considerably slower.
    ///
    /// On failure, [`Self::index`] reflects how many bytes made it into
    /// the sink before the error occurred.
    pub fn write_bytes(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.free != u8::BITS {
            for &byte in buf {
                self.write_byte(byte)?;
            }

            return Ok(buf.len());
        }

        let mut rest = buf;
        while !rest.is_empty() {
            match self.inner.write(rest) {
                Ok(0) => {
                    cold_path();
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "sink refused bulk write",
                    ));
                }

                Ok(n) => {
                    rest = &rest[n..];
                    self.index += n;
                }

                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}

                Err(e) => return Err(e),
            }
        }

        Ok(buf.len())
    }

    /// Pads the pending partial byte with copies of `pad` and writes it
    /// to the sink.
    ///
    /// An aligned writer is left untouched.
    pub fn flush(&mut self, pad: bool) -> io::Result<()> {
        if self.free == u8::BITS {
            return Ok(());
        }

        let fill = if pad { low_bits_mask(self.free) } else { 0 };
        self.emit(self.carry | fill)?;

        self.carry = 0;
        self.free = u8::BITS;

        Ok(())
    }
}
