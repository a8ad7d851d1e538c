//! Provisioning rules for the mutable fields
//!
//! Serial numbers are write-once. Hardware revision and build date may be
//! rewritten at any time. Every function here only touches the field it owns;
//! the caller refreshes the CRC afterwards.

use alloc::format;
use alloc::string::String;

use crate::error::{Field, MacsnError, Result};
use crate::record::{BuildDate, HardwareRevision, Payload};
use crate::types::{v3, v4, DATE_LEN};

/// Provision the serial number in `payload`
///
/// V3 stores up to 16 bytes of text (stopping at a NUL) with a terminator
/// always left. V4 expects `EC2KWRG` followed by decimal digits.
pub fn apply_serial(payload: &mut Payload, text: &str) -> Result<()> {
    match payload {
        Payload::V3(p) => {
            if p.serial_is_set() {
                return Err(MacsnError::AlreadySet(Field::Serial));
            }
            let bytes = text.as_bytes();
            let len = bytes
                .iter()
                .position(|&b| b == 0)
                .unwrap_or(bytes.len())
                .min(v3::SERIAL_LEN - 1);
            if len == 0 {
                return Err(MacsnError::InvalidFormat(Field::Serial));
            }
            p.serial = [0; v3::SERIAL_LEN];
            p.serial[..len].copy_from_slice(&bytes[..len]);
            Ok(())
        }
        Payload::V4(p) => {
            if p.serial_is_set() {
                return Err(MacsnError::AlreadySet(Field::Serial));
            }
            p.serial = parse_v4_serial(text)?;
            Ok(())
        }
        Payload::Unknown { version, .. } => Err(MacsnError::UnsupportedVersion(*version)),
    }
}

/// Parse `EC2KWRG<digits>` into the stored integer
///
/// `u32::MAX` is refused: it is the unset sentinel and would leave the field
/// writable again.
pub fn parse_v4_serial(text: &str) -> Result<u32> {
    let digits = text
        .strip_prefix(v4::SERIAL_PREFIX)
        .ok_or(MacsnError::InvalidFormat(Field::Serial))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MacsnError::InvalidFormat(Field::Serial));
    }
    match digits.parse::<u32>() {
        Ok(value) if value != v4::SERIAL_UNSET => Ok(value),
        _ => Err(MacsnError::InvalidFormat(Field::Serial)),
    }
}

/// Text form of the provisioned serial, `None` while unset
pub fn serial_text(payload: &Payload) -> Option<String> {
    match payload {
        Payload::V3(p) if p.serial_is_set() => {
            Some(String::from_utf8_lossy(p.serial_bytes()).into_owned())
        }
        Payload::V4(p) if p.serial_is_set() => {
            Some(format!("{}{:09}", v4::SERIAL_PREFIX, p.serial))
        }
        _ => None,
    }
}

/// Read one hex part starting at `pos`, returning the value and the next position
fn hex_part(bytes: &[u8], pos: usize) -> Result<(u8, usize)> {
    let end = bytes[pos..]
        .iter()
        .position(|b| !b.is_ascii_hexdigit())
        .map_or(bytes.len(), |n| pos + n);
    let digits = core::str::from_utf8(&bytes[pos..end])
        .map_err(|_| MacsnError::InvalidFormat(Field::HardwareRevision))?;
    let value = u8::from_str_radix(digits, 16)
        .map_err(|_| MacsnError::InvalidFormat(Field::HardwareRevision))?;
    Ok((value, end))
}

/// Apply an `XX.YY` hex revision string
///
/// A lone `XX` (or `XX.`) updates only the major byte. Anything after the
/// minor part is ignored.
pub fn apply_hardware_revision(hwrev: &mut HardwareRevision, text: &str) -> Result<()> {
    let bytes = text.as_bytes();
    let (major, pos) = hex_part(bytes, 0)?;

    let minor = match bytes.get(pos) {
        None => None,
        Some(b'.') if pos + 1 == bytes.len() => None,
        Some(b'.') => Some(hex_part(bytes, pos + 1)?.0),
        Some(_) => return Err(MacsnError::InvalidFormat(Field::HardwareRevision)),
    };

    hwrev.major = major;
    if let Some(minor) = minor {
        hwrev.minor = minor;
    }
    Ok(())
}

/// Parse `YYMMDDhhmmss` into six decimal-pair bytes
pub fn parse_build_date(text: &str) -> Result<BuildDate> {
    let bytes = text.as_bytes();
    if bytes.len() != DATE_LEN * 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(MacsnError::InvalidFormat(Field::BuildDate));
    }

    let mut date = [0u8; DATE_LEN];
    for (slot, pair) in date.iter_mut().zip(bytes.chunks_exact(2)) {
        *slot = (pair[0] - b'0') * 10 + (pair[1] - b'0');
    }
    Ok(BuildDate(date))
}
