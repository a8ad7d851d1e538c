//! Boot environment the store mirrors identity values into

use alloc::collections::BTreeMap;
use alloc::string::String;

/// Default key for the MAC address text
pub const ETHADDR_KEY: &str = "ethaddr";

/// Default key for the serial number text
pub const SERIAL_KEY: &str = "serial#";

/// Key/value configuration store (boot environment)
pub trait EnvStore {
    fn get(&self, key: &str) -> Option<&str>;
    fn set(&mut self, key: &str, value: &str);
}

impl<T: EnvStore + ?Sized> EnvStore for &mut T {
    fn get(&self, key: &str) -> Option<&str> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// In-memory environment
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(String::from(key), String::from(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut env = MemoryEnv::new();
        assert!(env.get(ETHADDR_KEY).is_none());
        env.set(ETHADDR_KEY, "00:11:22:33:44:55");
        assert_eq!(env.get(ETHADDR_KEY), Some("00:11:22:33:44:55"));
        env.set(ETHADDR_KEY, "00:11:22:33:44:66");
        assert_eq!(env.get(ETHADDR_KEY), Some("00:11:22:33:44:66"));
        assert_eq!(env.len(), 1);
    }
}
