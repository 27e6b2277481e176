//! An [`L2Net`] that can be reached from several execution contexts.
//!
//! The interface is kept behind a [`critical_section::Mutex`], so a main loop
//! and an interrupt handler can both use it. Every access runs inside a
//! critical section and must be kept short.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::frame::ShortAddress;
use crate::l2net::{L2Net, RecvStatus};
use crate::phy::transceiver::Transceiver;

/// A [`L2Net`] shared between contexts.
pub struct SharedL2Net<T: Transceiver> {
    inner: Mutex<RefCell<L2Net<T>>>,
}

impl<T: Transceiver> SharedL2Net<T> {
    /// Wrap a started interface.
    pub const fn new(l2: L2Net<T>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(l2)),
        }
    }

    /// Run `f` with exclusive access to the interface.
    ///
    /// A frame held by `f` is still held afterwards, and can be read by the
    /// next caller.
    ///
    /// # Panics
    ///
    /// Panics when called again from inside `f`.
    pub fn with<R>(&self, f: impl FnOnce(&mut L2Net<T>) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.inner.borrow_ref_mut(cs)))
    }

    /// See [`L2Net::send`].
    pub fn send(&self, dst: ShortAddress, payload: &[u8]) -> bool {
        self.with(|l2| l2.send(dst, payload))
    }

    /// See [`L2Net::recv`].
    pub fn recv(&self) -> RecvStatus {
        self.with(|l2| l2.recv())
    }

    /// Return the interface.
    pub fn into_inner(self) -> L2Net<T> {
        self.inner.into_inner().into_inner()
    }
}
