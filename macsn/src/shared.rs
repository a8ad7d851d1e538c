//! Store shared between several callers
//!
//! Load, mutate and save must run as one unit so the CRC always matches what
//! gets written. Callers pass the whole sequence as a closure and it runs
//! under the lock.

use spin::Mutex;

use crate::env::EnvStore;
use crate::storage::EepromStorage;
use crate::store::IdentityStore;

pub struct SharedIdentityStore<S: EepromStorage, E: EnvStore> {
    inner: Mutex<IdentityStore<S, E>>,
}

impl<S: EepromStorage, E: EnvStore> SharedIdentityStore<S, E> {
    pub fn new(store: IdentityStore<S, E>) -> Self {
        Self {
            inner: Mutex::new(store),
        }
    }

    /// Run `f` with exclusive access to the store
    pub fn with<R>(&self, f: impl FnOnce(&mut IdentityStore<S, E>) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut store)
    }

    /// Like [`Self::with`], but gives up instead of spinning
    pub fn try_with<R>(&self, f: impl FnOnce(&mut IdentityStore<S, E>) -> R) -> Option<R> {
        self.inner.try_lock().map(|mut store| f(&mut store))
    }

    pub fn into_inner(self) -> IdentityStore<S, E> {
        self.inner.into_inner()
    }
}
