//! Provides bit level reading and writing over byte-oriented I/O.
//!
//! Wire formats frequently pack fields into widths that do not line up
//! with byte boundaries. The types in this crate sit between such formats
//! and any [`std::io::Read`] or [`std::io::Write`] implementation, taking
//! care of shifting bits in and out of whole bytes.
//!
//! # Bit order
//!
//! All values are transferred MSB-first: the first bit read from or
//! written to a byte is its most significant one, and multi-bit values
//! start with their most significant bit.
//!
//! # Alignment
//!
//! Both directions keep at most one partial byte around. Whole-byte
//! operations on an aligned engine are forwarded straight to the
//! underlying source or sink; unaligned ones go through the carry byte
//! and are correspondingly slower.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod buffer;
pub use buffer::{FixedReader, FixedWriter};

mod reader;
pub use reader::BitReader;

mod writer;
pub use writer::BitWriter;

pub mod utils;
