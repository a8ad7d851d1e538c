//! Common test utilities and mock storage devices

#![allow(dead_code)]

use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};
use std::io;

use macsn::storage::{EepromStorage, MemoryEeprom};
use macsn::types::{
    v3, CRC_OFFSET, HWREV_OFFSET, IMAGE_SIZE, MAC_OFFSET, PAYLOAD_OFFSET, RECORD_SIZE,
    VERSION_OFFSET,
};

pub const TEST_MAC: [u8; 6] = [0x00, 0x1b, 0xc5, 0x0a, 0x0b, 0x0c];

/// Stamp a correct CRC into an image
pub fn seal(image: &mut [u8]) {
    let record: [u8; RECORD_SIZE] = image[..RECORD_SIZE].try_into().unwrap();
    let crc = macsn::compute_checksum(&record);
    image[CRC_OFFSET..RECORD_SIZE].copy_from_slice(&crc.to_le_bytes());
}

/// Erased V3 image with a valid MAC and CRC
pub fn blank_v3_image() -> Vec<u8> {
    let mut image = vec![0xFFu8; IMAGE_SIZE];
    image[VERSION_OFFSET] = 3;
    image[MAC_OFFSET..].copy_from_slice(&TEST_MAC);
    seal(&mut image);
    image
}

/// Erased V4 image with a valid MAC and CRC
pub fn blank_v4_image() -> Vec<u8> {
    let mut image = vec![0xFFu8; IMAGE_SIZE];
    image[VERSION_OFFSET] = 4;
    image[MAC_OFFSET..].copy_from_slice(&TEST_MAC);
    seal(&mut image);
    image
}

/// V3 image already carrying serial `serial`
pub fn provisioned_v3_image(serial: &str) -> Vec<u8> {
    let mut image = blank_v3_image();
    let sn = &mut image[PAYLOAD_OFFSET..PAYLOAD_OFFSET + v3::SERIAL_LEN];
    sn.fill(0);
    sn[..serial.len()].copy_from_slice(serial.as_bytes());
    image[HWREV_OFFSET] = 0x01;
    image[HWREV_OFFSET + 1] = 0x02;
    seal(&mut image);
    image
}

/// EEPROM whose reads or writes can be made to fail
#[derive(Debug)]
pub struct FlakyEeprom {
    pub inner: MemoryEeprom,
    pub fail_reads: usize,
    pub fail_writes: usize,
    pub reads: usize,
    pub writes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Injected;

impl FlakyEeprom {
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            inner: MemoryEeprom::from_bytes(image),
            fail_reads: 0,
            fail_writes: 0,
            reads: 0,
            writes: 0,
        }
    }
}

impl EepromStorage for FlakyEeprom {
    type Error = Injected;

    fn read_bytes(&mut self, offset: u64, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.reads += 1;
        if self.fail_reads > 0 {
            self.fail_reads -= 1;
            return Err(Injected);
        }
        self.inner.read_bytes(offset, dst).map_err(|_| Injected)
    }

    fn write_bytes(&mut self, offset: u64, src: &[u8]) -> Result<(), Self::Error> {
        self.writes += 1;
        if self.fail_writes > 0 {
            self.fail_writes -= 1;
            return Err(Injected);
        }
        self.inner.write_bytes(offset, src).map_err(|_| Injected)
    }

    fn name(&self) -> &str {
        "flaky-eeprom"
    }
}

/// In-memory block device for testing
#[derive(Debug, Clone)]
pub struct MemoryBlockDevice {
    pub data: Vec<u8>,
    pub block_size: usize,
    pub flushes: usize,
}

impl MemoryBlockDevice {
    pub fn new(data: Vec<u8>, block_size: usize) -> Self {
        Self {
            data,
            block_size,
            flushes: 0,
        }
    }
}

impl BlockIo for MemoryBlockDevice {
    type Error = io::Error;

    fn block_size(&self) -> BlockSize {
        BlockSize::new(self.block_size as u32).expect("valid block size")
    }

    fn num_blocks(&mut self) -> Result<u64, Self::Error> {
        Ok((self.data.len() / self.block_size) as u64)
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<(), Self::Error> {
        assert_eq!(dst.len() % self.block_size, 0, "unaligned block read");
        let offset = start_lba.0 as usize * self.block_size;
        if offset + dst.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "read beyond end of device",
            ));
        }
        dst.copy_from_slice(&self.data[offset..offset + dst.len()]);
        Ok(())
    }

    fn write_blocks(&mut self, start_lba: Lba, src: &[u8]) -> Result<(), Self::Error> {
        assert_eq!(src.len() % self.block_size, 0, "unaligned block write");
        let offset = start_lba.0 as usize * self.block_size;
        if offset + src.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "write beyond end of device",
            ));
        }
        self.data[offset..offset + src.len()].copy_from_slice(src);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}
