//! Typed bit-level reading and writing on top of [`bitweave_bit_buf`].
//!
//! [`Reader`] and [`Writer`] wrap the bit engine with fixed-width integer
//! and boolean accessors. Instead of returning a [`Result`] from every
//! call, failures are routed through a [`Policy`]:
//!
//! - [`Policy::Abort`] panics on the first failure. This suits framing
//!   into pre-sized buffers, where running out of room is a bug.
//!
//! - [`Policy::Checked`] records the failure and keeps going. Callers
//!   run a whole sequence of accessors and inspect [`Reader::error`] or
//!   [`Writer::error`] once at the end.
//!
//! ```
//! use bitweave::Writer;
//!
//! let mut buf = [0; 2];
//! let mut writer = Writer::from_buffer(&mut buf).check();
//! writer.write_u8(0x5, 3);
//! writer.write_bool(true);
//! writer.write_u16(0x3FF, 12);
//! writer.flush(false);
//! assert!(writer.error().is_none());
//! assert_eq!(buf, [0xB3, 0xFF]);
//! ```
//!
//! Types with a fixed bit layout plug into this through the
//! [`Packer`], [`Unpacker`] and [`Sizer`] contracts.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use bitweave_bit_buf::{BitReader, BitWriter, FixedReader, FixedWriter};

mod error;
pub use error::Error;

mod packet;
pub use packet::*;

mod policy;
pub use policy::Policy;

mod reader;
pub use reader::Reader;

mod writer;
pub use writer::Writer;
