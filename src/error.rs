/// Errors reported by the LED controller and its transmission strategies.
///
/// Out-of-range pixel indexes are not errors: writes are ignored and reads
/// return black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A pixel or bitstream buffer does not fit its fixed capacity.
    AllocationFailure {
        /// Number of elements the strip needs
        requested: usize,
        /// Number of elements the buffer can hold
        capacity: usize,
    },

    /// Transmission requested before a successful `begin()`.
    NotInitialized,

    /// The inter-frame reset wait did not finish in time.
    ResetTimeout,

    /// The hardware did not report transfer completion in time.
    TransferTimeout,

    /// The data pin reported an error while bit-timing a frame.
    Output,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::AllocationFailure {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "buffer allocation failed: {} elements requested, capacity is {}",
                    requested, capacity
                )
            }
            Error::NotInitialized => write!(f, "controller is not initialized"),
            Error::ResetTimeout => write!(f, "timed out waiting for the reset period"),
            Error::TransferTimeout => {
                write!(f, "timed out waiting for the transfer to complete")
            }
            Error::Output => write!(f, "data pin error"),
        }
    }
}

impl core::error::Error for Error {}
