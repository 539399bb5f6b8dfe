use crate::Error;

/// Decides what happens when an operation on a [`Reader`] or
/// [`Writer`] fails.
///
/// [`Reader`]: crate::Reader
/// [`Writer`]: crate::Writer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Policy {
    /// Panics on the spot.
    ///
    /// Meant for data that was validated or sized up front, where any
    /// failure indicates a programming error.
    #[default]
    Abort,

    /// Stores the error and carries on.
    ///
    /// Every failure replaces the previously stored one. Operations
    /// after a failure yield zero values but do not panic.
    Checked,
}

impl Policy {
    /// Applies the policy to `err`, handing back what should be stored
    /// in the sticky error slot.
    pub(crate) fn apply(self, err: Error) -> Error {
        match self {
            Self::Abort => {
                log::error!("aborting on bit I/O failure: {err}");
                panic!("{err}");
            }

            Self::Checked => {
                log::debug!("recording bit I/O failure: {err}");
                err
            }
        }
    }
}
