//! Serialization and integrity check for the identity record
//!
//! Decoding never validates the CRC. A record whose checksum does not match is
//! still decoded field by field; callers ask [`checksum_status`] separately.

use crate::error::{MacsnError, Result};
use crate::mac::MacAddress;
use crate::record::{
    BuildDate, HardwareRevision, IdentityBlock, IdentityRecord, Payload, V3Payload, V4Payload,
};
use crate::types::{
    v3, v4, FormatVersion, CRC_OFFSET, DATE_LEN, DATE_OFFSET, HWREV_OFFSET, IMAGE_SIZE,
    MAC_LEN, MAC_OFFSET, PADDING_LEN, PADDING_OFFSET, PAYLOAD_LEN, PAYLOAD_OFFSET, RECORD_SIZE,
    VERSION_OFFSET,
};

/// Stored vs. computed checksum of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumStatus {
    pub stored: u32,
    pub computed: u32,
}

impl ChecksumStatus {
    pub fn is_valid(&self) -> bool {
        self.stored == self.computed
    }
}

/// Copy `N` bytes starting at `offset`
fn array<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}

fn check_len(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(MacsnError::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

fn decode_payload(version: u8, raw: &[u8; PAYLOAD_LEN]) -> Payload {
    match FormatVersion::from_u8(version) {
        Some(FormatVersion::V3) => {
            let key_offset = v3::SERIAL_LEN + 1;
            Payload::V3(V3Payload {
                serial: array(raw, 0),
                key_size: raw[v3::SERIAL_LEN],
                key: array(raw, key_offset),
            })
        }
        Some(FormatVersion::V4) => {
            let compressed_offset = v4::SERIAL_LEN;
            let key_size_offset = compressed_offset + v4::COMPRESSED_LEN;
            Payload::V4(V4Payload {
                serial: u32::from_be_bytes(array(raw, 0)),
                compressed: array(raw, compressed_offset),
                key_size: raw[key_size_offset],
                key: array(raw, key_size_offset + 1),
            })
        }
        None => Payload::Unknown { version, raw: *raw },
    }
}

fn encode_payload(payload: &Payload) -> [u8; PAYLOAD_LEN] {
    let mut raw = [0u8; PAYLOAD_LEN];
    match payload {
        Payload::V3(p) => {
            raw[..v3::SERIAL_LEN].copy_from_slice(&p.serial);
            raw[v3::SERIAL_LEN] = p.key_size;
            raw[v3::SERIAL_LEN + 1..].copy_from_slice(&p.key);
        }
        Payload::V4(p) => {
            let key_size_offset = v4::SERIAL_LEN + v4::COMPRESSED_LEN;
            raw[..v4::SERIAL_LEN].copy_from_slice(&p.serial.to_be_bytes());
            raw[v4::SERIAL_LEN..key_size_offset].copy_from_slice(&p.compressed);
            raw[key_size_offset] = p.key_size;
            raw[key_size_offset + 1..].copy_from_slice(&p.key);
        }
        Payload::Unknown { raw: stored, .. } => raw.copy_from_slice(stored),
    }
    raw
}

/// Deserialize a 128-byte record
///
/// Fails only on a length mismatch. Unknown versions decode to
/// [`Payload::Unknown`] and re-encode unchanged.
pub fn decode(bytes: &[u8]) -> Result<IdentityRecord> {
    check_len(bytes, RECORD_SIZE)?;

    let version = bytes[VERSION_OFFSET];
    let raw: [u8; PAYLOAD_LEN] = array(bytes, PAYLOAD_OFFSET);

    Ok(IdentityRecord {
        date: BuildDate(array(bytes, DATE_OFFSET)),
        hwrev: HardwareRevision::new(bytes[HWREV_OFFSET], bytes[HWREV_OFFSET + 1]),
        payload: decode_payload(version, &raw),
        crc: u32::from_le_bytes(array(bytes, CRC_OFFSET)),
    })
}

/// Serialize a record to its 128-byte on-device form
pub fn encode(record: &IdentityRecord) -> [u8; RECORD_SIZE] {
    let mut bytes = [0u8; RECORD_SIZE];
    bytes[DATE_OFFSET..DATE_OFFSET + DATE_LEN].copy_from_slice(&record.date.0);
    bytes[VERSION_OFFSET] = record.version();
    bytes[HWREV_OFFSET..HWREV_OFFSET + 2].copy_from_slice(&record.hwrev.to_bytes());
    bytes[PAYLOAD_OFFSET..CRC_OFFSET].copy_from_slice(&encode_payload(&record.payload));
    bytes[CRC_OFFSET..].copy_from_slice(&record.crc.to_le_bytes());
    bytes
}

/// CRC-32 (IEEE) over everything but the trailing CRC field
pub fn compute_checksum(bytes: &[u8; RECORD_SIZE]) -> u32 {
    crc32fast::hash(&bytes[..CRC_OFFSET])
}

/// Compare the stored CRC against the record contents
pub fn checksum_status(record: &IdentityRecord) -> ChecksumStatus {
    ChecksumStatus {
        stored: record.crc,
        computed: compute_checksum(&encode(record)),
    }
}

/// Whether the stored CRC matches the record contents
pub fn is_valid(record: &IdentityRecord) -> bool {
    checksum_status(record).is_valid()
}

/// Deserialize the full 256-byte device image
pub fn decode_block(bytes: &[u8]) -> Result<IdentityBlock> {
    check_len(bytes, IMAGE_SIZE)?;

    let record = decode(&bytes[..RECORD_SIZE])?;
    let padding: [u8; PADDING_LEN] = array(bytes, PADDING_OFFSET);
    let mac: [u8; MAC_LEN] = array(bytes, MAC_OFFSET);

    Ok(IdentityBlock {
        record,
        padding,
        mac: MacAddress::from_bytes(&mac),
    })
}

/// Serialize the full device image
pub fn encode_block(block: &IdentityBlock) -> [u8; IMAGE_SIZE] {
    let mut bytes = [0u8; IMAGE_SIZE];
    bytes[..RECORD_SIZE].copy_from_slice(&encode(&block.record));
    bytes[PADDING_OFFSET..MAC_OFFSET].copy_from_slice(&block.padding);
    bytes[MAC_OFFSET..].copy_from_slice(block.mac.as_bytes());
    bytes
}
