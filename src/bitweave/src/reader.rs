use std::io;

use bitweave_bit_buf::{utils::sign_extend, BitReader, FixedReader};
use bitweave_utils::hints::cold_path;

use crate::{error::check_width, Error, Policy};

/// A typed reader for bit-packed data.
///
/// Each accessor reports failures through the configured [`Policy`]
/// rather than through its return value. Under [`Policy::Checked`],
/// a failed accessor returns zero and the error is kept around for
/// [`Self::error`].
///
/// ```
/// use bitweave::Reader;
///
/// let mut reader = Reader::from_buffer(&[0b1011_0011, 0xFF]).check();
/// assert_eq!(reader.read_u8(3), 0b101);
/// assert!(reader.read_bool());
/// assert_eq!(reader.read_u16(12), 0x3FF);
///
/// // Nothing left, so this records an error instead of panicking.
/// assert_eq!(reader.read_u32(1), 0);
/// assert!(reader.error().is_some_and(|e| e.is_exhausted()));
/// ```
#[derive(Debug)]
pub struct Reader<R> {
    inner: BitReader<R>,

    // The most recent failure, replaced by every new one.
    error: Option<Error>,

    policy: Policy,
}

macro_rules! uint_read_impl {
    ($($fn:ident() -> $ty:ty),* $(,)*) => {
        $(
            #[doc = concat!("Reads an `nbits` wide [`", stringify!($ty), "`] value.")]
            ///
            /// Requesting more bits than the type holds fails with
            /// [`Error::Overflow`] without consuming anything.
            #[inline]
            pub fn $fn(&mut self, nbits: u32) -> $ty {
                self.read_width(nbits, <$ty>::BITS) as $ty
            }
        )*
    };
}

macro_rules! int_read_impl {
    ($($fn:ident() -> $ty:ty),* $(,)*) => {
        $(
            #[doc = concat!("Reads an `nbits` wide two's complement [`", stringify!($ty), "`] value.")]
            ///
            /// The value is sign-extended from bit `nbits - 1`. Requesting
            /// more bits than the type holds fails with [`Error::Overflow`]
            /// without consuming anything.
            #[inline]
            pub fn $fn(&mut self, nbits: u32) -> $ty {
                sign_extend(self.read_width(nbits, <$ty>::BITS), nbits) as $ty
            }
        )*
    };
}

impl<R> Reader<R> {
    /// Creates a new [`Reader`] over a given byte source.
    ///
    /// The reader starts out with [`Policy::Abort`].
    pub const fn new(inner: R) -> Self {
        Self {
            inner: BitReader::new(inner),
            error: None,
            policy: Policy::Abort,
        }
    }

    /// Switches the reader to [`Policy::Abort`].
    pub fn must(mut self) -> Self {
        self.policy = Policy::Abort;
        self
    }

    /// Switches the reader to [`Policy::Checked`].
    ///
    /// [`Self::error`] must then be inspected after a sequence of reads.
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

    /// Takes the most recently recorded error out of the reader.
    #[inline]
    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    /// Gets the number of whole bytes fetched from the source.
    #[inline]
    pub fn index(&self) -> usize {
        self.inner.index()
    }

    /// Overrides the byte index. See [`BitReader::set_index`].
    #[inline]
    pub fn set_index(&mut self, index: usize) {
        self.inner.set_index(index);
    }

    /// Indicates whether the reader sits on a byte boundary.
    #[inline]
    pub fn is_aligned(&self) -> bool {
        self.inner.is_aligned()
    }

    /// Discards the bits left in the current byte, if any.
    #[inline]
    pub fn align(&mut self) {
        self.inner.align();
    }

    /// Binds the reader to a new source and returns the previous one.
    ///
    /// Buffered bits and the recorded error are cleared; the policy
    /// stays the same.
    pub fn reset(&mut self, inner: R) -> R {
        self.error = None;
        self.inner.reset(inner)
    }

    /// Gets a reference to the underlying source.
    #[inline]
    pub fn get_ref(&self) -> &R {
        self.inner.get_ref()
    }

    /// Gets a mutable reference to the underlying source.
    #[inline]
    pub fn get_mut(&mut self) -> &mut R {
        self.inner.get_mut()
    }

    /// Consumes the reader and returns the underlying source.
    #[inline]
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    /// Takes the reader apart into its bit engine and any recorded error.
    pub fn into_parts(self) -> (BitReader<R>, Option<Error>) {
        (self.inner, self.error)
    }

    fn settle<T: Default, E: Into<Error>>(&mut self, res: Result<T, E>) -> T {
        match res {
            Ok(v) => v,
            Err(e) => {
                cold_path();
                self.error = Some(self.policy.apply(e.into()));
                T::default()
            }
        }
    }
}

impl<'a> Reader<FixedReader<'a>> {
    /// Creates a new [`Reader`] over a fixed byte slice.
    ///
    /// The reader starts out with [`Policy::Abort`], since reading past
    /// the end of a pre-sized buffer indicates malformed input or a
    /// layout bug.
    pub const fn from_buffer(data: &'a [u8]) -> Self {
        Self::new(FixedReader::new(data))
    }
}

impl<R: io::Read> Reader<R> {
    fn read_width(&mut self, nbits: u32, width: u32) -> u64 {
        let res = match check_width(nbits, width) {
            Ok(()) => self.inner.read_bits(nbits).map_err(Error::from),
            Err(e) => Err(e),
        };

        self.settle(res)
    }

    /// Reads a single bit as a [`bool`].
    #[inline]
    pub fn read_bool(&mut self) -> bool {
        let res = self.inner.read_bit();
        self.settle(res)
    }

    uint_read_impl! {
        read_u8() -> u8,
        read_u16() -> u16,
        read_u32() -> u32,
        read_u64() -> u64,
    }

    int_read_impl! {
        read_i8() -> i8,
        read_i16() -> i16,
        read_i32() -> i32,
        read_i64() -> i64,
    }

    /// Fills `buf` with the next bytes and returns how many were read.
    ///
    /// The count is short only when a failure was recorded.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let start = self.inner.index();
        let res = self.inner.read_bytes(buf);
        self.settle(res.map(drop));

        self.inner.index().wrapping_sub(start)
    }

    /// Skips over the next `nbits` bits.
    pub fn skip(&mut self, nbits: usize) {
        let res = self.inner.skip(nbits);
        self.settle(res);
    }
}

impl<R> From<BitReader<R>> for Reader<R> {
    fn from(inner: BitReader<R>) -> Self {
        Self {
            inner,
            error: None,
            policy: Policy::Abort,
        }
    }
}
