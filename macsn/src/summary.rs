//! Human-readable view of the identity block
//!
//! Mirrors what the board shell prints for `macsn read`. Corrupt records are
//! still shown; the CRC line reports the expected value instead.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::codec::{self, ChecksumStatus};
use crate::mac::MacAddress;
use crate::policy;
use crate::record::{BuildDate, HardwareRevision, IdentityBlock};

/// Snapshot of the decoded fields for display
#[derive(Debug, Clone)]
pub struct IdentitySummary {
    pub version: u8,
    pub mac: Option<MacAddress>,
    pub serial: Option<String>,
    pub hwrev: HardwareRevision,
    pub date: Option<BuildDate>,
    pub checksum: ChecksumStatus,
}

impl IdentitySummary {
    pub fn from_block(block: &IdentityBlock) -> Self {
        let record = &block.record;
        Self {
            version: record.version(),
            mac: block.mac.is_valid().then_some(block.mac),
            serial: policy::serial_text(&record.payload),
            hwrev: record.hwrev,
            date: record.date.is_set().then_some(record.date),
            checksum: codec::checksum_status(record),
        }
    }

    /// Format as lines for display
    pub fn format_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        lines.push(format!("  VER: {}", self.version));

        match &self.mac {
            Some(mac) => lines.push(format!("  MAC: {}", mac.to_env_string())),
            None => lines.push("  MAC: Not Set!".into()),
        }

        match &self.serial {
            Some(sn) => lines.push(format!("   SN: {}", sn)),
            None => lines.push("   SN: Not Set!".into()),
        }

        lines.push(format!("HWrev: {:02x}.{:02x}", self.hwrev.major, self.hwrev.minor));

        match &self.date {
            Some(d) => lines.push(format!(
                " Date: {}/{:02}/{:02} {:02}:{:02}:{:02}",
                d.year(),
                d.month(),
                d.day(),
                d.hour(),
                d.minute(),
                d.second()
            )),
            None => lines.push(" Date: Not Set!".into()),
        }

        if self.checksum.is_valid() {
            lines.push(format!("  CRC: {:08x} (valid)", self.checksum.stored));
        } else {
            lines.push(format!(
                "  CRC: {:08x} (should be {:08x})",
                self.checksum.stored, self.checksum.computed
            ));
        }

        lines
    }
}

/// Hex dump, 16 bytes per row with a byte offset prefix
pub fn hex_dump(bytes: &[u8]) -> Vec<String> {
    let mut lines = Vec::with_capacity(bytes.len().div_ceil(16) + 1);
    lines.push(format!("MACSN dump: (0x{:x} bytes)", bytes.len()));
    for (row, chunk) in bytes.chunks(16).enumerate() {
        let mut line = format!("{:02X}:", row * 16);
        for b in chunk {
            line.push_str(&format!(" {:02X}", b));
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::IdentityRecord;
    use crate::types::FormatVersion;

    #[test]
    fn test_unprovisioned_summary() {
        let block = IdentityBlock::new(IdentityRecord::erased(FormatVersion::V3), MacAddress::ERASED);
        let lines = IdentitySummary::from_block(&block).format_lines();
        assert_eq!(lines[0], "  VER: 3");
        assert_eq!(lines[1], "  MAC: Not Set!");
        assert_eq!(lines[2], "   SN: Not Set!");
        assert_eq!(lines[3], "HWrev: ff.ff");
        assert_eq!(lines[4], " Date: Not Set!");
        assert!(lines[5].ends_with("(valid)"));
    }

    #[test]
    fn test_provisioned_summary() {
        let mut record = IdentityRecord::erased(FormatVersion::V4);
        record.date = BuildDate([23, 6, 15, 14, 30, 5]);
        record.hwrev = HardwareRevision::new(0x0A, 0x1F);
        policy::apply_serial(&mut record.payload, "EC2KWRG000000042").unwrap();
        let block = IdentityBlock::new(record, MacAddress::from_bytes(&[0, 0x1b, 0xc5, 1, 2, 3]));

        let lines = IdentitySummary::from_block(&block).format_lines();
        assert_eq!(lines[1], "  MAC: 00:1b:c5:01:02:03");
        assert_eq!(lines[2], "   SN: EC2KWRG000000042");
        assert_eq!(lines[3], "HWrev: 0a.1f");
        assert_eq!(lines[4], " Date: 2023/06/15 14:30:05");
        assert!(lines[5].contains("should be"));
    }

    #[test]
    fn test_hex_dump_rows() {
        let lines = hex_dump(&[0xAB; 20]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "MACSN dump: (0x14 bytes)");
        assert!(lines[1].starts_with("00: AB AB"));
        assert_eq!(lines[2], "10: AB AB AB AB");
    }
}
