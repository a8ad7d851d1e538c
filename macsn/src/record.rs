//! In-memory form of the identity record

use crate::mac::MacAddress;
use crate::types::{v3, v4, FormatVersion, DATE_LEN, ERASED, PADDING_LEN, PAYLOAD_LEN};

/// Build date as six decimal pairs `YY MM DD hh mm ss`
///
/// Each byte holds the pair's decimal value (`23` is stored as `0x17`), not
/// packed nibbles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildDate(pub [u8; DATE_LEN]);

impl BuildDate {
    pub const UNSET: Self = Self([ERASED; DATE_LEN]);

    pub fn is_set(&self) -> bool {
        self.0[0] != ERASED
    }

    /// Full year (2000 + YY)
    pub fn year(&self) -> u16 {
        2000 + self.0[0] as u16
    }

    pub fn month(&self) -> u8 {
        self.0[1]
    }

    pub fn day(&self) -> u8 {
        self.0[2]
    }

    /// Hour with the high bit masked off
    pub fn hour(&self) -> u8 {
        self.0[3] & 0x7F
    }

    pub fn minute(&self) -> u8 {
        self.0[4]
    }

    pub fn second(&self) -> u8 {
        self.0[5]
    }
}

/// Hardware revision, one raw byte each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HardwareRevision {
    pub major: u8,
    pub minor: u8,
}

impl HardwareRevision {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    pub fn to_bytes(self) -> [u8; 2] {
        [self.major, self.minor]
    }
}

/// Version 3 payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V3Payload {
    /// NUL-padded text, 0xFF in byte 0 when unset
    pub serial: [u8; v3::SERIAL_LEN],
    pub key_size: u8,
    pub key: [u8; v3::KEY_LEN],
}

impl V3Payload {
    /// Freshly erased payload
    pub fn erased() -> Self {
        Self {
            serial: [ERASED; v3::SERIAL_LEN],
            key_size: ERASED,
            key: [ERASED; v3::KEY_LEN],
        }
    }

    /// A serial counts as provisioned unless its first byte is erased or NUL
    pub fn serial_is_set(&self) -> bool {
        !matches!(self.serial[0], ERASED | 0x00)
    }

    /// Stored serial up to the first NUL
    pub fn serial_bytes(&self) -> &[u8] {
        let end = self.serial.iter().position(|&b| b == 0).unwrap_or(self.serial.len());
        &self.serial[..end]
    }
}

/// Version 4 payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V4Payload {
    /// Serial number, host order (the image stores it big-endian)
    pub serial: u32,
    /// Opaque, passed through unchanged
    pub compressed: [u8; v4::COMPRESSED_LEN],
    pub key_size: u8,
    pub key: [u8; v4::KEY_LEN],
}

impl V4Payload {
    pub fn erased() -> Self {
        Self {
            serial: v4::SERIAL_UNSET,
            compressed: [ERASED; v4::COMPRESSED_LEN],
            key_size: ERASED,
            key: [ERASED; v4::KEY_LEN],
        }
    }

    pub fn serial_is_set(&self) -> bool {
        self.serial != v4::SERIAL_UNSET
    }
}

/// Version-specific part of the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    V3(V3Payload),
    V4(V4Payload),
    /// Version byte with no known layout, kept verbatim
    Unknown {
        version: u8,
        raw: [u8; PAYLOAD_LEN],
    },
}

impl Payload {
    /// Erased payload for a known format
    pub fn erased(version: FormatVersion) -> Self {
        match version {
            FormatVersion::V3 => Self::V3(V3Payload::erased()),
            FormatVersion::V4 => Self::V4(V4Payload::erased()),
        }
    }

    /// Raw version byte selecting this payload
    pub fn version(&self) -> u8 {
        match self {
            Self::V3(_) => FormatVersion::V3 as u8,
            Self::V4(_) => FormatVersion::V4 as u8,
            Self::Unknown { version, .. } => *version,
        }
    }

    /// Known format, if any
    pub fn format(&self) -> Option<FormatVersion> {
        FormatVersion::from_u8(self.version())
    }

    /// License key bytes, without the size prefix
    pub fn key(&self) -> Option<(u8, &[u8])> {
        match self {
            Self::V3(p) => Some((p.key_size, &p.key[..])),
            Self::V4(p) => Some((p.key_size, &p.key[..])),
            Self::Unknown { .. } => None,
        }
    }
}

/// The 128-byte checksummed identity record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub date: BuildDate,
    pub hwrev: HardwareRevision,
    pub payload: Payload,
    /// CRC as stored; see [`crate::codec::is_valid`]
    pub crc: u32,
}

impl IdentityRecord {
    /// Blank record as found on a freshly erased part, with its CRC filled in
    pub fn erased(version: FormatVersion) -> Self {
        let mut record = Self {
            date: BuildDate::UNSET,
            hwrev: HardwareRevision::new(ERASED, ERASED),
            payload: Payload::erased(version),
            crc: 0,
        };
        record.update_crc();
        record
    }

    pub fn version(&self) -> u8 {
        self.payload.version()
    }

    /// Recompute the stored CRC from the current field values
    pub fn update_crc(&mut self) {
        self.crc = crate::codec::compute_checksum(&crate::codec::encode(self));
    }
}

/// Full on-device image: record, reserved padding and MAC trailer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityBlock {
    pub record: IdentityRecord,
    /// Opaque, preserved bit-exact
    pub padding: [u8; PADDING_LEN],
    pub mac: MacAddress,
}

impl IdentityBlock {
    pub fn new(record: IdentityRecord, mac: MacAddress) -> Self {
        Self {
            record,
            padding: [ERASED; PADDING_LEN],
            mac,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_date_accessors() {
        let date = BuildDate([23, 6, 15, 0x80 | 14, 30, 0]);
        assert!(date.is_set());
        assert_eq!(date.year(), 2023);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
        assert_eq!(date.hour(), 14);
        assert_eq!(date.minute(), 30);
        assert_eq!(date.second(), 0);
        assert!(!BuildDate::UNSET.is_set());
    }

    #[test]
    fn test_v3_serial_state() {
        let mut p = V3Payload::erased();
        assert!(!p.serial_is_set());
        p.serial = [0; v3::SERIAL_LEN];
        assert!(!p.serial_is_set());
        p.serial[..3].copy_from_slice(b"ABC");
        assert!(p.serial_is_set());
        assert_eq!(p.serial_bytes(), b"ABC");
    }

    #[test]
    fn test_payload_version() {
        assert_eq!(Payload::erased(FormatVersion::V3).version(), 3);
        assert_eq!(Payload::erased(FormatVersion::V4).version(), 4);
        let unknown = Payload::Unknown { version: 9, raw: [0; PAYLOAD_LEN] };
        assert_eq!(unknown.version(), 9);
        assert_eq!(unknown.format(), None);
        assert!(unknown.key().is_none());
    }

    #[test]
    fn test_erased_record_is_valid() {
        let record = IdentityRecord::erased(FormatVersion::V4);
        assert!(crate::codec::is_valid(&record));
    }
}
