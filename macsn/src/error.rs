//! Error types for identity block operations

use core::fmt;

/// Result type for identity block operations
pub type Result<T> = core::result::Result<T, MacsnError>;

/// Device operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceOp {
    /// Reading the image from the device
    Read,
    /// Writing the image back to the device
    Write,
}

/// Mutable field a setter operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Serial number
    Serial,
    /// Hardware revision (major.minor)
    HardwareRevision,
    /// Build date (YYMMDDhhmmss)
    BuildDate,
}

impl Field {
    /// Field name as shown to the operator
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Serial => "serial number",
            Self::HardwareRevision => "hardware revision",
            Self::BuildDate => "build date",
        }
    }
}

/// Errors that can occur while reading, provisioning or saving the identity block
///
/// A checksum mismatch is deliberately absent: a corrupted record is still
/// readable and is reported through [`crate::ChecksumStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacsnError {
    /// Storage device absent or the transfer did not complete
    DeviceError(DeviceOp),

    /// Buffer handed to the codec has the wrong size
    InvalidLength {
        /// Size the codec requires
        expected: usize,
        /// Size it was given
        actual: usize,
    },

    /// Write-once field already provisioned
    AlreadySet(Field),

    /// Setter input is malformed
    InvalidFormat(Field),

    /// Record version has no known payload layout
    UnsupportedVersion(u8),
}

impl MacsnError {
    /// Whether the failure came from the storage device
    pub const fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceError(_))
    }

    /// Get a human-readable description of the error
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DeviceError(DeviceOp::Read) => "Unable to read MACSN from storage",
            Self::DeviceError(DeviceOp::Write) => "Unable to write MACSN to storage",
            Self::InvalidLength { .. } => "Invalid MACSN image length",
            Self::AlreadySet(Field::Serial) => "Serial Number already set",
            Self::AlreadySet(_) => "Field already set",
            Self::InvalidFormat(Field::Serial) => "Invalid Serial Number",
            Self::InvalidFormat(Field::HardwareRevision) => "Invalid hardware revision, expected XX.YY",
            Self::InvalidFormat(Field::BuildDate) => "Invalid build date, expected YYMMDDhhmmss",
            Self::UnsupportedVersion(_) => "Unsupported MACSN format version",
        }
    }
}

impl fmt::Display for MacsnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { expected, actual } => {
                write!(f, "{} ({} bytes, expected {})", self.as_str(), actual, expected)
            }
            Self::UnsupportedVersion(version) => write!(f, "{} {}", self.as_str(), version),
            _ => f.write_str(self.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_includes_detail() {
        let err = MacsnError::InvalidLength { expected: 128, actual: 12 };
        assert_eq!(err.to_string(), "Invalid MACSN image length (12 bytes, expected 128)");
        assert_eq!(
            MacsnError::UnsupportedVersion(7).to_string(),
            "Unsupported MACSN format version 7"
        );
    }

    #[test]
    fn test_device_error_classification() {
        assert!(MacsnError::DeviceError(DeviceOp::Read).is_device_error());
        assert!(!MacsnError::AlreadySet(Field::Serial).is_device_error());
    }
}
