//! Layout constants for the MACSN identity image
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0x00    6     Build date, decimal pairs YYMMDDhhmmss (0xFF = unset)
//! 0x06    1     Format version (3 or 4)
//! 0x07    2     Hardware revision major, minor
//! 0x09    115   Version payload
//! 0x7C    4     CRC32 of bytes 0x00-0x7B (little-endian)
//! 0x80    122   Padding
//! 0xFA    6     MAC address
//! ```
//!
//! V3 payload: serial (17, NUL padded), key size (1), key (97).
//! V4 payload: serial (4, big-endian u32), compressed data (77), key size (1), key (33).

/// Size of the checksummed record
pub const RECORD_SIZE: usize = 128;

/// Size of the full image on the device (record + padding + MAC)
pub const IMAGE_SIZE: usize = 256;

/// Byte offset of the image on the device
pub const MACSN_OFFSET: u64 = 0;

pub const DATE_OFFSET: usize = 0x00;
pub const DATE_LEN: usize = 6;
pub const VERSION_OFFSET: usize = 0x06;
pub const HWREV_OFFSET: usize = 0x07;
pub const PAYLOAD_OFFSET: usize = 0x09;
pub const PAYLOAD_LEN: usize = CRC_OFFSET - PAYLOAD_OFFSET;

/// CRC field; the checksum covers everything before it
pub const CRC_OFFSET: usize = RECORD_SIZE - 4;

pub const PADDING_OFFSET: usize = RECORD_SIZE;
pub const PADDING_LEN: usize = MAC_OFFSET - PADDING_OFFSET;
pub const MAC_OFFSET: usize = IMAGE_SIZE - MAC_LEN;
pub const MAC_LEN: usize = 6;

/// V3 payload sizes
pub mod v3 {
    pub const SERIAL_LEN: usize = 17;
    pub const KEY_LEN: usize = 97;
}

/// V4 payload sizes
pub mod v4 {
    pub const SERIAL_LEN: usize = 4;
    pub const COMPRESSED_LEN: usize = 77;
    pub const KEY_LEN: usize = 33;

    /// Fixed prefix of the synthesized serial text
    pub const SERIAL_PREFIX: &str = "EC2KWRG";

    /// Stored value meaning "no serial provisioned"
    pub const SERIAL_UNSET: u32 = u32::MAX;
}

/// Sentinel for erased EEPROM bytes
pub const ERASED: u8 = 0xFF;

/// Known record format versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FormatVersion {
    /// Text serial, 97-byte key
    V3 = 3,
    /// Integer serial, compressed data, 33-byte key
    V4 = 4,
}

impl FormatVersion {
    /// Map a raw version byte to a known format
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            3 => Some(Self::V3),
            4 => Some(Self::V4),
            _ => None,
        }
    }
}

// Both payloads fill the space between the header and the CRC exactly.
const _: () = assert!(v3::SERIAL_LEN + 1 + v3::KEY_LEN == PAYLOAD_LEN);
const _: () = assert!(v4::SERIAL_LEN + v4::COMPRESSED_LEN + 1 + v4::KEY_LEN == PAYLOAD_LEN);
const _: () = assert!(PADDING_LEN == 122);
