use std::io;

use bitweave_bit_buf::{BitWriter, FixedWriter};
use bitweave_utils::hints::cold_path;

use crate::{error::check_width, Error, Policy};

/// A typed writer for bit-packed data.
///
/// Each accessor reports failures through the configured [`Policy`]
/// rather than through its return value. Under [`Policy::Checked`],
/// the writer keeps going after a failure and the most recent error
/// is kept around for [`Self::error`].
#[derive(Debug)]
pub struct Writer<W> {
    inner: BitWriter<W>,

    // The most recent failure, replaced by every new one.
    error: Option<Error>,

    policy: Policy,
}

macro_rules! uint_write_impl {
    ($($fn:ident($ty:ty)),* $(,)*) => {
        $(
            #[doc = concat!("Writes the `nbits` low bits of a [`", stringify!($ty), "`] value.")]
            ///
            /// Requesting more bits than the type holds fails with
            /// [`Error::Overflow`] without writing anything.
            #[inline]
            pub fn $fn(&mut self, v: $ty, nbits: u32) {
                self.write_width(v as u64, nbits, <$ty>::BITS);
            }
        )*
    };
}

macro_rules! int_write_impl {
    ($($fn:ident($ty:ty)),* $(,)*) => {
        $(
            #[doc = concat!("Writes a [`", stringify!($ty), "`] value as `nbits` wide two's complement.")]
            ///
            /// Values outside the `nbits` range are truncated. Requesting more
            /// bits than the type holds fails with [`Error::Overflow`] without
            /// writing anything.
            #[inline]
            pub fn $fn(&mut self, v: $ty, nbits: u32) {
                self.write_width(v as i64 as u64, nbits, <$ty>::BITS);
            }
        )*
    };
}

impl<W> Writer<W> {
    /// Creates a new [`Writer`] to a given byte sink.
    ///
    /// The writer starts out with [`Policy::Checked`], since arbitrary
    /// sinks can fail for reasons outside of the caller's control.
    pub const fn new(inner: W) -> Self {
        Self {
            inner: BitWriter::new(inner),
            error: None,
            policy: Policy::Checked,
        }
    }

    /// Switches the writer to [`Policy::Abort`].
    pub fn must(mut self) -> Self {
        self.policy = Policy::Abort;
        self
    }

    /// Switches the writer to [`Policy::Checked`].
    ///
    /// [`Self::error`] must then be inspected after a sequence of writes.
    pub fn check(mut self) -> Self {
        self.policy = Policy::Checked;
        self
    }

    /// Gets the [`Policy`] currently in use.
    #[inline]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Changes the [`Policy`] for subsequent operations.
    #[inline]
    pub fn set_policy(&mut self, policy: Policy) {
        self.policy = policy;
    }

    /// Gets the most recently recorded error, if any.
    #[inline]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Takes the most recently recorded error out of the writer.
    #[inline]
    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    /// Gets the number of whole bytes written to the sink.
    #[inline]
    pub fn index(&self) -> usize {
        self.inner.index()
    }

    /// Overrides the byte index. See [`BitWriter::set_index`].
    #[inline]
    pub fn set_index(&mut self, index: usize) {
        self.inner.set_index(index);
    }

    /// Indicates whether the writer sits on a byte boundary.
    #[inline]
    pub fn is_aligned(&self) -> bool {
        self.inner.is_aligned()
    }

    /// Restores a partially filled byte. See [`BitWriter::resume`].
    #[inline]
    pub fn resume(&mut self, data: u8, free: u32) {
        self.inner.resume(data, free);
    }

    /// Binds the writer to a new sink and returns the previous one.
    ///
    /// The pending partial byte and the recorded error are cleared;
    /// the policy stays the same.
    pub fn reset(&mut self, inner: W) -> W {
        self.error = None;
        self.inner.reset(inner)
    }

    /// Gets a reference to the underlying sink.
    #[inline]
    pub fn get_ref(&self) -> &W {
        self.inner.get_ref()
    }

    /// Gets a mutable reference to the underlying sink.
    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        self.inner.get_mut()
    }

    /// Consumes the writer and returns the underlying sink.
    ///
    /// A pending partial byte is lost; call [`Self::flush`] first
    /// to keep it.
    #[inline]
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }

    /// Takes the writer apart into its bit engine and any recorded error.
    pub fn into_parts(self) -> (BitWriter<W>, Option<Error>) {
        (self.inner, self.error)
    }

    fn settle<E: Into<Error>>(&mut self, res: Result<(), E>) {
        if let Err(e) = res {
            cold_path();
            self.error = Some(self.policy.apply(e.into()));
        }
    }
}

impl<'a> Writer<FixedWriter<'a>> {
    /// Creates a new [`Writer`] to a fixed byte slice.
    ///
    /// The writer starts out with [`Policy::Abort`], since a pre-sized
    /// buffer running out of room indicates a sizing bug.
    pub fn from_buffer(data: &'a mut [u8]) -> Self {
        Self::new(FixedWriter::new(data)).must()
    }
}

impl<W: io::Write> Writer<W> {
    fn write_width(&mut self, v: u64, nbits: u32, width: u32) {
        let res = match check_width(nbits, width) {
            Ok(()) => self.inner.write_bits(v, nbits).map_err(Error::from),
            Err(e) => Err(e),
        };

        self.settle(res);
    }

    /// Writes a [`bool`] as a single bit.
    #[inline]
    pub fn write_bool(&mut self, v: bool) {
        let res = self.inner.write_bit(v);
        self.settle(res);
    }

    uint_write_impl! {
        write_u8(u8),
        write_u16(u16),
        write_u32(u32),
        write_u64(u64),
    }

    int_write_impl! {
        write_i8(i8),
        write_i16(i16),
        write_i32(i32),
        write_i64(i64),
    }

    /// Writes whole bytes from `buf` and returns how many were written.
    ///
    /// The count is short only when a failure was recorded.
    pub fn write(&mut self, buf: &[u8]) -> usize {
        let start = self.inner.index();
        let res = self.inner.write_bytes(buf);
        self.settle(res.map(drop));

        self.inner.index().wrapping_sub(start)
    }

    /// Pads the pending partial byte with copies of `pad` and writes it
    /// to the sink. Does nothing when aligned.
    pub fn flush(&mut self, pad: bool) {
        let res = self.inner.flush(pad);
        self.settle(res);
    }
}

impl<W> From<BitWriter<W>> for Writer<W> {
    fn from(inner: BitWriter<W>) -> Self {
        Self {
            inner,
            error: None,
            policy: Policy::Checked,
        }
    }
}
