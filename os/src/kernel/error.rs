//! Error types for descriptor-table configuration
//!
//! Table construction and installation cannot fail; these errors come from
//! validating a configuration before any hardware is touched, and from
//! PIC operations on vectors the chips do not own.

/// Configuration and PIC errors with the offending values attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// PIC vector offset is not a multiple of 8
    ///
    /// In 8086 mode the chip ignores the low three bits of ICW2, so an
    /// unaligned offset would silently land somewhere else.
    MisalignedOffset {
        /// The rejected offset
        offset: u8,
    },

    /// PIC vector window overlaps the 32 CPU exception vectors
    OffsetInExceptionRange {
        /// The rejected offset
        offset: u8,
    },

    /// Master and slave vector windows overlap
    OverlappingOffsets {
        master: u8,
        slave: u8,
    },

    /// Vector is not raised by either PIC
    NotPicVector {
        vector: u8,
    },

    /// IRQ line number beyond the 16 lines of the chained pair
    InvalidIrqLine {
        line: u8,
    },
}

impl TableError {
    /// Returns a human-readable description of the error
    pub fn description(&self) -> &'static str {
        match self {
            Self::MisalignedOffset { .. } => "PIC vector offset is not a multiple of 8",
            Self::OffsetInExceptionRange { .. } => {
                "PIC vector offset overlaps CPU exception vectors"
            }
            Self::OverlappingOffsets { .. } => "master and slave PIC vector windows overlap",
            Self::NotPicVector { .. } => "vector is not handled by the PICs",
            Self::InvalidIrqLine { .. } => "IRQ line does not exist",
        }
    }
}

/// Convenience type alias for Results with TableError
pub type TableResult<T> = Result<T, TableError>;

impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MisalignedOffset { offset } | Self::OffsetInExceptionRange { offset } => {
                write!(f, "{}: offset {:#04x}", self.description(), offset)
            }
            Self::OverlappingOffsets { master, slave } => {
                write!(
                    f,
                    "{}: master {:#04x}, slave {:#04x}",
                    self.description(),
                    master,
                    slave
                )
            }
            Self::NotPicVector { vector } => {
                write!(f, "{}: vector {:#04x}", self.description(), vector)
            }
            Self::InvalidIrqLine { line } => write!(f, "{}: line {}", self.description(), line),
        }
    }
}
