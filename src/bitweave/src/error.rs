use std::io;

use thiserror::Error;

/// Errors that may occur while reading or writing bits.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying source or sink failed, most commonly because it
    /// ran out of data or capacity.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// More bits were requested than the accessor's integer type holds.
    #[error("cannot fit {requested} bits into a {width}-bit integer")]
    Overflow { requested: u32, width: u32 },
}

impl Error {
    /// Whether this error reports an exhausted source or sink.
    pub fn is_exhausted(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::UnexpectedEof | io::ErrorKind::WriteZero
            ),
            Self::Overflow { .. } => false,
        }
    }

    /// Whether this error reports a declared-width overflow.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow { .. })
    }
}

#[inline]
pub(crate) fn check_width(nbits: u32, width: u32) -> Result<(), Error> {
    if nbits <= width {
        Ok(())
    } else {
        Err(Error::Overflow {
            requested: nbits,
            width,
        })
    }
}
