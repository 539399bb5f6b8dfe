//! Hints for the compiler that affect code optimization.

/// Marks the calling path as unlikely, e.g. source exhaustion or
/// a failed sink write.
///
/// Stand-in for [`std::hint::cold_path`] while it is unstable.
#[cold]
#[inline(always)]
pub fn cold_path() {}
