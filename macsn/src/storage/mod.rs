//! Storage backends holding the identity image
//!
//! The store only needs byte-range access. Two backends ship with the crate:
//! a RAM-backed EEPROM and a byte view over any [`gpt_disk_io::BlockIo`].

pub mod block;    // Block device (NAND/SPI) view
pub mod memory;   // RAM-backed EEPROM

pub use block::BlockEeprom;
pub use memory::MemoryEeprom;

use core::fmt::Debug;

/// Byte-addressable non-volatile storage
///
/// Both calls are blocking and either complete the whole transfer or fail.
pub trait EepromStorage {
    /// Backend error, kept for diagnostics
    type Error: Debug;

    /// Fill `dst` from `offset`
    fn read_bytes(&mut self, offset: u64, dst: &mut [u8]) -> Result<(), Self::Error>;

    /// Write `src` at `offset`
    fn write_bytes(&mut self, offset: u64, src: &[u8]) -> Result<(), Self::Error>;

    /// Device name for logging
    fn name(&self) -> &str;
}

impl<T: EepromStorage + ?Sized> EepromStorage for &mut T {
    type Error = T::Error;

    fn read_bytes(&mut self, offset: u64, dst: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_bytes(offset, dst)
    }

    fn write_bytes(&mut self, offset: u64, src: &[u8]) -> Result<(), Self::Error> {
        (**self).write_bytes(offset, src)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
