//! RAM-backed EEPROM

use alloc::vec;
use alloc::vec::Vec;

use super::EepromStorage;
use crate::types::ERASED;

/// Access outside the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    pub offset: u64,
    pub len: usize,
    pub size: usize,
}

/// Fixed-size EEPROM held in memory, erased to 0xFF
#[derive(Debug, Clone)]
pub struct MemoryEeprom {
    data: Vec<u8>,
}

impl MemoryEeprom {
    /// Erased device of `size` bytes
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![ERASED; size],
        }
    }

    /// Device preloaded with `data`
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn range(&self, offset: u64, len: usize) -> Result<core::ops::Range<usize>, OutOfRange> {
        let err = OutOfRange {
            offset,
            len,
            size: self.data.len(),
        };
        let start = usize::try_from(offset).map_err(|_| err)?;
        let end = start.checked_add(len).ok_or(err)?;
        if end > self.data.len() {
            return Err(err);
        }
        Ok(start..end)
    }
}

impl EepromStorage for MemoryEeprom {
    type Error = OutOfRange;

    fn read_bytes(&mut self, offset: u64, dst: &mut [u8]) -> Result<(), Self::Error> {
        let range = self.range(offset, dst.len())?;
        dst.copy_from_slice(&self.data[range]);
        Ok(())
    }

    fn write_bytes(&mut self, offset: u64, src: &[u8]) -> Result<(), Self::Error> {
        let range = self.range(offset, src.len())?;
        self.data[range].copy_from_slice(src);
        Ok(())
    }

    fn name(&self) -> &str {
        "eeprom@ram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_device_is_erased() {
        let mut dev = MemoryEeprom::new(16);
        let mut buf = [0u8; 4];
        dev.read_bytes(12, &mut buf).unwrap();
        assert_eq!(buf, [0xFF; 4]);
    }

    #[test]
    fn test_write_then_read() {
        let mut dev = MemoryEeprom::new(16);
        dev.write_bytes(3, &[1, 2, 3]).unwrap();
        let mut buf = [0u8; 5];
        dev.read_bytes(2, &mut buf).unwrap();
        assert_eq!(buf, [0xFF, 1, 2, 3, 0xFF]);
    }

    #[test]
    fn test_out_of_range() {
        let mut dev = MemoryEeprom::new(16);
        let mut buf = [0u8; 4];
        assert_eq!(
            dev.read_bytes(14, &mut buf),
            Err(OutOfRange { offset: 14, len: 4, size: 16 })
        );
        assert!(dev.write_bytes(u64::MAX, &[0]).is_err());
    }
}
