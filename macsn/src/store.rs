//! Identity store: cached record plus load / provision / save
//!
//! The store starts unloaded. The first access reads the whole image from the
//! device and caches it; a failed read caches nothing, so the next access
//! tries the device again. Setters only change the cache and refresh its CRC.
//! Nothing reaches the device until [`IdentityStore::save`].

use alloc::format;
use alloc::string::String;

use crate::codec::{self, ChecksumStatus};
use crate::config::StoreConfig;
use crate::env::EnvStore;
use crate::error::{DeviceOp, MacsnError, Result};
use crate::feedback::{FeedbackCategory, FeedbackCollector};
use crate::policy;
use crate::record::{IdentityBlock, IdentityRecord};
use crate::storage::EepromStorage;
use crate::summary::{self, IdentitySummary};
use crate::types::IMAGE_SIZE;

/// Owner of the cached identity block
pub struct IdentityStore<S: EepromStorage, E: EnvStore> {
    storage: S,
    env: E,
    config: StoreConfig,
    cache: Option<IdentityBlock>,
    feedback: FeedbackCollector,
}

impl<S: EepromStorage, E: EnvStore> IdentityStore<S, E> {
    pub fn new(storage: S, env: E) -> Self {
        Self::with_config(storage, env, StoreConfig::default())
    }

    pub fn with_config(storage: S, env: E, config: StoreConfig) -> Self {
        let feedback = FeedbackCollector::new(config.feedback_capacity);
        Self {
            storage,
            env,
            config,
            cache: None,
            feedback,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.is_some()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn feedback(&self) -> &FeedbackCollector {
        &self.feedback
    }

    pub fn into_parts(self) -> (S, E) {
        (self.storage, self.env)
    }

    /// Read and cache the image; no-op once loaded
    ///
    /// The CRC is not checked here; see [`Self::checksum_status`].
    pub fn load(&mut self) -> Result<&mut IdentityBlock> {
        let block = match self.cache.take() {
            Some(block) => block,
            None => self.read_block()?,
        };
        Ok(self.cache.insert(block))
    }

    fn read_block(&mut self) -> Result<IdentityBlock> {
        let mut image = [0u8; IMAGE_SIZE];
        let name = String::from(self.storage.name());

        if let Err(e) = self.storage.read_bytes(self.config.offset, &mut image) {
            self.feedback.error(
                FeedbackCategory::Storage,
                format!("Error - unable to read MACSN from {}: {:?}", name, e),
            );
            return Err(MacsnError::DeviceError(DeviceOp::Read));
        }

        self.feedback
            .info(FeedbackCategory::Storage, format!("read_macsn: {}", name));
        let block = codec::decode_block(&image)?;

        let status = codec::checksum_status(&block.record);
        self.feedback.debug(
            FeedbackCategory::Integrity,
            format!("CRC stored {:08x}, computed {:08x}", status.stored, status.computed),
        );
        if !status.is_valid() {
            self.feedback.warning(
                FeedbackCategory::Integrity,
                "MACSN CRC mismatch, record shown as stored",
            );
        }
        Ok(block)
    }

    /// Cached image, loading it first if needed
    pub fn block(&mut self) -> Result<&IdentityBlock> {
        self.load().map(|block| &*block)
    }

    /// Cached record, loading it first if needed
    pub fn get(&mut self) -> Result<&IdentityRecord> {
        self.load().map(|block| &block.record)
    }

    pub fn checksum_status(&mut self) -> Result<ChecksumStatus> {
        self.get().map(codec::checksum_status)
    }

    /// Whether the cached record's CRC matches its contents
    pub fn is_valid(&mut self) -> Result<bool> {
        self.checksum_status().map(|status| status.is_valid())
    }

    /// Serial number text, `None` while unprovisioned
    pub fn serial_text(&mut self) -> Result<Option<String>> {
        self.get().map(|record| policy::serial_text(&record.payload))
    }

    /// Display snapshot of the cached image
    pub fn summary(&mut self) -> Result<IdentitySummary> {
        self.block().map(IdentitySummary::from_block)
    }

    /// Hex dump of the cached image as it would be written
    pub fn dump(&mut self) -> Result<alloc::vec::Vec<String>> {
        let image = codec::encode_block(self.block()?);
        Ok(summary::hex_dump(&image))
    }

    /// Provision the serial number (write-once)
    pub fn set_serial(&mut self, text: &str) -> Result<()> {
        self.mutate(|record| policy::apply_serial(&mut record.payload, text))
    }

    /// Set the hardware revision from `XX.YY` hex text
    pub fn set_hardware_revision(&mut self, text: &str) -> Result<()> {
        self.mutate(|record| policy::apply_hardware_revision(&mut record.hwrev, text))
    }

    /// Set the build date from `YYMMDDhhmmss`
    pub fn set_build_date(&mut self, text: &str) -> Result<()> {
        self.mutate(|record| {
            record.date = policy::parse_build_date(text)?;
            Ok(())
        })
    }

    /// Apply a field change to the cached record and refresh its CRC
    fn mutate<F>(&mut self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut IdentityRecord) -> Result<()>,
    {
        let record = &mut self.load()?.record;
        let result = apply(record);
        if result.is_ok() {
            record.update_crc();
        }

        if let Err(e) = result {
            self.feedback
                .warning(FeedbackCategory::Provisioning, format!("{}", e));
        }
        result
    }

    /// Write the cached image back to the device
    ///
    /// Missing `ethaddr` / `serial#` environment entries are filled from the
    /// record first. On a failed write the cache is kept as is.
    pub fn save(&mut self) -> Result<()> {
        let block = self.load()?;
        let image = codec::encode_block(block);
        let ethaddr = block.mac.is_valid().then(|| block.mac.to_env_string());
        let serial = policy::serial_text(&block.record.payload);

        if self.config.mirror_env {
            self.mirror_env(ethaddr, serial);
        }

        let name = String::from(self.storage.name());

        match self.storage.write_bytes(self.config.offset, &image) {
            Ok(()) => {
                self.feedback
                    .info(FeedbackCategory::Storage, format!("save_macsn: {}", name));
                self.feedback
                    .success(FeedbackCategory::Storage, "Programming MACSN passed.");
                Ok(())
            }
            Err(e) => {
                self.feedback.error(
                    FeedbackCategory::Storage,
                    format!("Error - unable to write MACSN to {}: {:?}", name, e),
                );
                self.feedback
                    .error(FeedbackCategory::Storage, "Programming MACSN failed.");
                Err(MacsnError::DeviceError(DeviceOp::Write))
            }
        }
    }

    fn mirror_env(&mut self, ethaddr: Option<String>, serial: Option<String>) {
        let keys = [
            (self.config.ethaddr_key, ethaddr),
            (self.config.serial_key, serial),
        ];
        for (key, value) in keys {
            let Some(value) = value else {
                continue;
            };
            if self.env.get(key).is_none() {
                self.env.set(key, &value);
                self.feedback.info(
                    FeedbackCategory::Environment,
                    format!("{} set to {}", key, value),
                );
            }
        }
    }
}
