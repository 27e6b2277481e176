//! Host-side access to an interface running on a [`QueueTransceiver`].
//!
//! Frames only reach the interface through the receive queue, so the held
//! frame and the transceiver's buffer accounting stay consistent.

use crate::phy::queue::{Psdu, QueueError, QueueTransceiver};

use super::L2Net;

impl L2Net<QueueTransceiver> {
    /// Queue a completely captured PSDU for reception.
    ///
    /// See [`QueueTransceiver::inject`].
    pub fn inject(&mut self, psdu: &[u8]) -> Result<(), QueueError> {
        self.transceiver.inject(psdu)
    }

    /// Queue a PSDU of which only the first octets were captured.
    ///
    /// See [`QueueTransceiver::inject_truncated`].
    pub fn inject_truncated(
        &mut self,
        captured: &[u8],
        frame_len: usize,
    ) -> Result<(), QueueError> {
        self.transceiver.inject_truncated(captured, frame_len)
    }

    /// Take the oldest transmitted PSDU.
    pub fn pop_transmitted(&mut self) -> Option<Psdu> {
        self.transceiver.pop_transmitted()
    }

    /// Move every transmitted PSDU into `peer`'s receive queue.
    ///
    /// Returns the number of frames the peer accepted.
    pub fn deliver_to(&mut self, peer: &mut L2Net<QueueTransceiver>) -> usize {
        self.transceiver.deliver_to(&mut peer.transceiver)
    }
}
