//! Miscellaneous utilities for working with bits.

/// Sign-extends an `nbits` wide value to [`i64`].
#[inline]
pub fn sign_extend(value: u64, nbits: u32) -> i64 {
    if nbits == 0 {
        return 0;
    }

    let shift = u64::BITS - nbits;
    (value << shift) as i64 >> shift
}

/// Builds a byte with its `nbits` least significant bits set.
#[inline]
pub const fn low_bits_mask(nbits: u32) -> u8 {
    debug_assert!(nbits <= u8::BITS);
    ((1u16 << nbits) - 1) as u8
}
