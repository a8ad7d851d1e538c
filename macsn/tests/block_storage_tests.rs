//! Block device backend tests

mod common;

use common::{blank_v4_image, MemoryBlockDevice};
use macsn::env::MemoryEnv;
use macsn::storage::{BlockEeprom, EepromStorage};
use macsn::types::IMAGE_SIZE;
use macsn::IdentityStore;

#[test]
fn test_unaligned_read() {
    let data: Vec<u8> = (0..2048u32).map(|i| (i % 251) as u8).collect();
    let mut eeprom = BlockEeprom::new(MemoryBlockDevice::new(data.clone(), 512), 0, "nand0");

    let mut buf = [0u8; 100];
    eeprom.read_bytes(500, &mut buf).unwrap();
    assert_eq!(&buf[..], &data[500..600]);
}

#[test]
fn test_unaligned_write_preserves_neighbours() {
    let data = vec![0xAAu8; 2048];
    let mut eeprom = BlockEeprom::new(MemoryBlockDevice::new(data, 512), 0, "nand0");

    eeprom.write_bytes(510, &[1, 2, 3, 4]).unwrap();
    let dev = eeprom.into_inner();
    assert_eq!(&dev.data[508..516], &[0xAA, 0xAA, 1, 2, 3, 4, 0xAA, 0xAA]);
    assert_eq!(dev.flushes, 1);
}

#[test]
fn test_base_lba_offset() {
    let mut data = vec![0u8; 4 * 512];
    data[1024..1028].copy_from_slice(&[9, 8, 7, 6]);
    let mut eeprom = BlockEeprom::new(MemoryBlockDevice::new(data, 512), 2, "spi0");

    let mut buf = [0u8; 4];
    eeprom.read_bytes(0, &mut buf).unwrap();
    assert_eq!(buf, [9, 8, 7, 6]);
    assert_eq!(eeprom.name(), "spi0");
}

#[test]
fn test_read_past_end_fails() {
    let mut eeprom = BlockEeprom::new(MemoryBlockDevice::new(vec![0u8; 512], 512), 0, "nand0");
    let mut buf = [0u8; 16];
    assert!(eeprom.read_bytes(510, &mut buf).is_err());
}

#[test]
fn test_store_over_block_device() {
    let mut data = vec![0u8; 1024];
    data[..IMAGE_SIZE].copy_from_slice(&blank_v4_image());
    let eeprom = BlockEeprom::new(MemoryBlockDevice::new(data, 512), 0, "nand0");
    let mut store = IdentityStore::new(eeprom, MemoryEnv::new());

    store.set_serial("EC2KWRG000000007").unwrap();
    store.save().unwrap();

    let (eeprom, _env) = store.into_parts();
    let dev = eeprom.into_inner();
    let mut reloaded = IdentityStore::new(
        BlockEeprom::new(dev, 0, "nand0"),
        MemoryEnv::new(),
    );
    assert_eq!(reloaded.serial_text().unwrap().as_deref(), Some("EC2KWRG000000007"));
    assert!(reloaded.is_valid().unwrap());
}
