//! Hardware network address stored at the end of the image

use alloc::format;
use alloc::string::String;
use core::fmt;
use smoltcp::wire::EthernetAddress;

use crate::types::MAC_LEN;

/// Device MAC address
///
/// Provisioned outside this crate; the store only reads it back and mirrors it
/// into the environment.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MacAddress(pub EthernetAddress);

impl MacAddress {
    /// Erased (all-ones) address
    pub const ERASED: Self = Self(EthernetAddress([0xFF; MAC_LEN]));

    pub fn from_bytes(bytes: &[u8; MAC_LEN]) -> Self {
        Self(EthernetAddress(*bytes))
    }

    pub fn as_bytes(&self) -> &[u8; MAC_LEN] {
        &self.0 .0
    }

    /// Non-zero unicast address
    ///
    /// Erased EEPROM reads back as broadcast, which is rejected with the other
    /// multicast addresses.
    pub fn is_valid(&self) -> bool {
        !self.as_bytes().iter().all(|&b| b == 0) && !self.0.is_multicast()
    }

    /// Colon-separated lowercase text, as stored in `ethaddr`
    pub fn to_env_string(&self) -> String {
        let m = self.as_bytes();
        format!(
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        )
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddress({})", self.to_env_string())
    }
}
