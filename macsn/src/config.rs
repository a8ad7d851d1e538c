//! Identity store configuration

use crate::env::{ETHADDR_KEY, SERIAL_KEY};
use crate::types::MACSN_OFFSET;

/// Default number of feedback messages kept by a store
pub const DEFAULT_FEEDBACK_CAPACITY: usize = 32;

/// Identity store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Byte offset of the image on the storage device
    pub offset: u64,
    /// Copy MAC and serial into the environment on save when missing there
    pub mirror_env: bool,
    /// Environment key for the MAC address
    pub ethaddr_key: &'static str,
    /// Environment key for the serial number
    pub serial_key: &'static str,
    /// Feedback messages retained before the oldest is dropped
    pub feedback_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            offset: MACSN_OFFSET,
            mirror_env: true,
            ethaddr_key: ETHADDR_KEY,
            serial_key: SERIAL_KEY,
            feedback_capacity: DEFAULT_FEEDBACK_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Set the image offset
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Enable or disable environment mirroring
    pub fn mirror_env(mut self, enabled: bool) -> Self {
        self.mirror_env = enabled;
        self
    }

    /// Override the environment key names
    pub fn env_keys(mut self, ethaddr_key: &'static str, serial_key: &'static str) -> Self {
        self.ethaddr_key = ethaddr_key;
        self.serial_key = serial_key;
        self
    }

    /// Set feedback capacity (at least one message is kept)
    pub fn feedback_capacity(mut self, capacity: usize) -> Self {
        self.feedback_capacity = capacity.max(1);
        self
    }
}
