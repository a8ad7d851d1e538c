//! Byte-addressed view over a block device
//!
//! Used when the identity image lives on a part exposed through a block
//! interface (NAND or SPI flash behind a block driver). Transfers are widened
//! to whole blocks; writes read the surrounding blocks first so bytes outside
//! the requested range are preserved.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;

use super::EepromStorage;

/// Block backend failure
#[derive(Debug)]
pub enum BlockEepromError<E> {
    /// Underlying block I/O failed
    Io(E),
    /// Byte range does not fit the device addressing
    OutOfRange,
}

/// Block device presented as an EEPROM
pub struct BlockEeprom<B: BlockIo> {
    io: B,
    base_lba: u64,
    name: &'static str,
}

impl<B: BlockIo> BlockEeprom<B> {
    /// View starting at `base_lba`; byte offset 0 maps to the start of that block
    pub fn new(io: B, base_lba: u64, name: &'static str) -> Self {
        Self { io, base_lba, name }
    }

    /// Release the block device
    pub fn into_inner(self) -> B {
        self.io
    }

    fn block_size(&self) -> Result<usize, BlockEepromError<B::Error>> {
        usize::try_from(self.io.block_size().to_u64()).map_err(|_| BlockEepromError::OutOfRange)
    }

    /// First LBA, a buffer covering whole blocks, and the byte range inside it
    fn span(
        &self,
        offset: u64,
        len: usize,
    ) -> Result<(Lba, Vec<u8>, Range<usize>), BlockEepromError<B::Error>> {
        let bs = self.block_size()?;
        let bs64 = bs as u64;
        let end = offset
            .checked_add(len as u64)
            .ok_or(BlockEepromError::OutOfRange)?;

        let first = offset / bs64;
        let last = end.div_ceil(bs64);
        let blocks = usize::try_from(last - first).map_err(|_| BlockEepromError::OutOfRange)?;
        let lba = self
            .base_lba
            .checked_add(first)
            .ok_or(BlockEepromError::OutOfRange)?;

        let start = (offset - first * bs64) as usize;
        Ok((Lba(lba), vec![0u8; blocks * bs], start..start + len))
    }
}

impl<B: BlockIo> EepromStorage for BlockEeprom<B> {
    type Error = BlockEepromError<B::Error>;

    fn read_bytes(&mut self, offset: u64, dst: &mut [u8]) -> Result<(), Self::Error> {
        if dst.is_empty() {
            return Ok(());
        }
        let (lba, mut buf, range) = self.span(offset, dst.len())?;
        self.io.read_blocks(lba, &mut buf).map_err(BlockEepromError::Io)?;
        dst.copy_from_slice(&buf[range]);
        Ok(())
    }

    fn write_bytes(&mut self, offset: u64, src: &[u8]) -> Result<(), Self::Error> {
        if src.is_empty() {
            return Ok(());
        }
        let (lba, mut buf, range) = self.span(offset, src.len())?;
        self.io.read_blocks(lba, &mut buf).map_err(BlockEepromError::Io)?;
        buf[range].copy_from_slice(src);
        self.io.write_blocks(lba, &buf).map_err(BlockEepromError::Io)?;
        self.io.flush().map_err(BlockEepromError::Io)
    }

    fn name(&self) -> &str {
        self.name
    }
}
