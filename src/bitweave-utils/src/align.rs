//! Alignment arithmetic for bit and byte offsets.

/// Rounds `value` down to the previous multiple of `align`.
///
/// `align` must be a power of two.
#[inline]
pub const fn align_down(value: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    value & !(align - 1)
}

/// Rounds `value` up to the next multiple of `align`.
///
/// `align` must be a power of two.
#[inline]
pub const fn align_up(value: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    align_down(value + (align - 1), align)
}

/// Gets the number of whole bytes needed to store `bits` bits.
///
/// Unlike going through [`align_up`], this cannot overflow.
#[inline]
pub const fn bits_to_bytes(bits: usize) -> usize {
    (bits >> 3) + (bits & 7 != 0) as usize
}
