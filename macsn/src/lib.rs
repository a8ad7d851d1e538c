//! EC2K MAC/serial identity block
//!
//! Manages the device identity image kept in the board EEPROM: MAC address,
//! serial number, hardware revision, build date and license key, protected by
//! a CRC-32.
//!
//! # Architecture
//!
//! The crate is layered leaf-first:
//! 1. **Storage** - byte-range access to the device ([`storage::EepromStorage`])
//! 2. **Codec** - packed V3/V4 layouts and the CRC ([`codec`])
//! 3. **Policy** - per-field provisioning rules ([`policy`])
//! 4. **Store** - cached record, setters and save ([`IdentityStore`])
//!
//! The boot environment is a collaborator behind [`env::EnvStore`]; the store
//! fills `ethaddr` and `serial#` on save when they are missing.
//!
//! # Usage
//!
//! ```ignore
//! use macsn::{IdentityStore, storage::MemoryEeprom, env::MemoryEnv};
//!
//! let mut store = IdentityStore::new(eeprom, env);
//! store.set_serial("EC2KWRG000000042")?;
//! store.set_build_date("230615143000")?;
//! store.save()?;
//! ```

#![no_std]

extern crate alloc;

pub mod codec;
pub mod config;
pub mod env;
pub mod error;
pub mod feedback;
pub mod mac;
pub mod policy;
pub mod record;
pub mod shared;
pub mod storage;
pub mod store;
pub mod summary;
pub mod types;

pub use codec::{checksum_status, compute_checksum, decode, encode, is_valid, ChecksumStatus};
pub use config::StoreConfig;
pub use error::{DeviceOp, Field, MacsnError, Result};
pub use mac::MacAddress;
pub use record::{IdentityBlock, IdentityRecord, Payload};
pub use shared::SharedIdentityStore;
pub use store::IdentityStore;
pub use summary::IdentitySummary;
pub use types::FormatVersion;
