//! Provisioning walk-through on a RAM-backed EEPROM
//!
//! Mirrors the factory flow: read the blank block, program serial, hardware
//! revision and build date, then write it back and show the result.

use macsn::env::{EnvStore, MemoryEnv};
use macsn::storage::MemoryEeprom;
use macsn::types::{IMAGE_SIZE, MAC_OFFSET, VERSION_OFFSET};
use macsn::{IdentityStore, MacsnError};

fn main() -> Result<(), MacsnError> {
    // Blank V4 part with a factory MAC
    let mut image = vec![0xFFu8; IMAGE_SIZE];
    image[VERSION_OFFSET] = 4;
    image[MAC_OFFSET..].copy_from_slice(&[0x00, 0x1b, 0xc5, 0x00, 0x10, 0x01]);

    let mut store = IdentityStore::new(MemoryEeprom::from_bytes(image), MemoryEnv::new());

    store.set_serial("EC2KWRG000000042")?;
    store.set_hardware_revision("0A.1F")?;
    store.set_build_date("230615143000")?;

    if let Err(e) = store.set_serial("EC2KWRG000000043") {
        println!("second serial rejected: {}", e);
    }

    store.save()?;

    for line in store.summary()?.format_lines() {
        println!("{}", line);
    }
    for line in store.feedback().lines() {
        println!("{}", line);
    }
    println!("ethaddr={:?}", store.env().get("ethaddr"));
    println!("serial#={:?}", store.env().get("serial#"));
    Ok(())
}
