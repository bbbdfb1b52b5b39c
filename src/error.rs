//! Error handling.

use core::fmt;

/// An enumeration of the failure conditions reported by container operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The allocation capability could not satisfy a memory request
    AllocFailed,
    /// The requested capacity exceeds the maximum representable size
    CapacityOverflow,
    /// A checked element access was beyond the logical size
    OutOfRange,
    /// An insertion source aliases the container's own storage
    Aliased,
}

impl Error {
    /// Generic description of this error
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllocFailed => "Allocation failed",
            Self::CapacityOverflow => "Capacity overflow",
            Self::OutOfRange => "Index out of range",
            Self::Aliased => "Insertion source aliases the container",
        }
    }

    /// Generate a panic with this error as the reason
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        panic!("{}", self.as_str());
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// An error raised by insertion operations when storage was not available.
/// Includes the value that was to be inserted.
#[derive(Clone)]
pub struct InsertError<T> {
    pub(crate) error: Error,
    pub(crate) value: T,
}

impl<T> InsertError<T> {
    pub(crate) fn new(error: Error, value: T) -> Self {
        Self { error, value }
    }

    /// Generic description of this error
    pub fn as_str(&self) -> &'static str {
        "Insertion error"
    }

    /// Get a reference to the contained `Error`
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Unwrap the inner value of this error
    pub fn into_value(self) -> T {
        self.value
    }

    /// Generate a panic with this error as the reason
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        panic!("{}: {}", self.as_str(), self.error.as_str());
    }
}

impl<T> fmt::Debug for InsertError<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}: {}", self.as_str(), self.error))
    }
}

#[cfg(feature = "std")]
impl<T> std::error::Error for InsertError<T> {}
