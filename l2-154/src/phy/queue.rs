//! A software transceiver backed by bounded queues.
//!
//! Frames are injected as raw PSDUs, as a radio would capture them, and
//! transmissions are encoded into PSDUs that can be drained and fed to
//! another transceiver. Nothing touches real hardware, which makes it usable
//! for host-side simulation and tests.

use heapless::{Deque, Vec};

use crate::config::MAX_BUFFER_DEPTH;
use crate::frame::{check_fcs, DataFrameRepr, RxFrame, ShortAddress, MAX_PHY_PACKET_SIZE};

use super::config::Channel;
use super::transceiver::Transceiver;

/// A PSDU as it goes over the air, FCS included.
pub type Psdu = Vec<u8, MAX_PHY_PACKET_SIZE>;

/// Reasons an injected or transmitted frame is not queued.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The transceiver was not started.
    NotStarted,
    /// The frame could not be decoded.
    Malformed,
    /// The frame check sequence does not match.
    BadFcs,
    /// All receive buffers are in use.
    Full,
}

/// A [`Transceiver`] that keeps up to `buffer_depth` received frames.
///
/// A frame handed out by [`received`](Transceiver::received) keeps occupying
/// its buffer until it is given back with
/// [`skip_received`](Transceiver::skip_received).
#[derive(Debug)]
pub struct QueueTransceiver {
    address: ShortAddress,
    channel: Channel,
    pan_id: u16,
    buffer_depth: usize,
    started: bool,
    sequence_number: u8,
    lent: usize,
    dropped: usize,
    rx: Deque<RxFrame, MAX_BUFFER_DEPTH>,
    tx: Deque<Psdu, MAX_BUFFER_DEPTH>,
}

impl QueueTransceiver {
    /// Create a stopped transceiver.
    pub fn new() -> Self {
        Self {
            address: ShortAddress::ZERO,
            channel: Channel::default(),
            pan_id: 0,
            buffer_depth: MAX_BUFFER_DEPTH,
            started: false,
            sequence_number: 0,
            lent: 0,
            dropped: 0,
            rx: Deque::new(),
            tx: Deque::new(),
        }
    }

    /// Returns `true` once started.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Return the configured short address.
    pub fn address(&self) -> ShortAddress {
        self.address
    }

    /// Return the configured channel.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Return the configured PAN id.
    pub fn pan_id(&self) -> u16 {
        self.pan_id
    }

    /// Return the number of receive buffers.
    pub fn buffer_depth(&self) -> usize {
        self.buffer_depth
    }

    /// Return the number of received frames waiting to be fetched.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Return the number of injected frames that were dropped.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Queue a completely captured PSDU for reception.
    ///
    /// # Errors
    ///
    /// The frame is dropped when the transceiver is stopped, the FCS does not
    /// match, the frame cannot be decoded, or every buffer is in use.
    pub fn inject(&mut self, psdu: &[u8]) -> Result<(), QueueError> {
        if self.started && !check_fcs(psdu) {
            self.dropped += 1;
            debug!("queue: dropping frame with bad FCS");
            return Err(QueueError::BadFcs);
        }

        self.inject_truncated(psdu, psdu.len())
    }

    /// Queue a PSDU of which only the first octets were captured.
    ///
    /// `frame_len` is the length announced by the PHY. The FCS cannot be
    /// checked on a truncated frame and is not checked here.
    pub fn inject_truncated(
        &mut self,
        captured: &[u8],
        frame_len: usize,
    ) -> Result<(), QueueError> {
        let result = self.enqueue(captured, frame_len);

        if let Err(err) = result {
            self.dropped += 1;
            debug!("queue: dropping received frame: {:?}", err);
        }

        result
    }

    fn enqueue(&mut self, captured: &[u8], frame_len: usize) -> Result<(), QueueError> {
        if !self.started {
            return Err(QueueError::NotStarted);
        }

        if self.rx.len() + self.lent >= self.buffer_depth {
            return Err(QueueError::Full);
        }

        let frame = RxFrame::new(captured, frame_len).map_err(|_| QueueError::Malformed)?;
        self.rx.push_back(frame).map_err(|_| QueueError::Full)
    }

    /// Take the oldest transmitted PSDU.
    pub fn pop_transmitted(&mut self) -> Option<Psdu> {
        self.tx.pop_front()
    }

    /// Move every transmitted PSDU into `peer`'s receive queue.
    ///
    /// Returns the number of frames the peer accepted.
    pub fn deliver_to(&mut self, peer: &mut QueueTransceiver) -> usize {
        let mut accepted = 0;

        while let Some(psdu) = self.tx.pop_front() {
            if peer.inject(&psdu).is_ok() {
                accepted += 1;
            }
        }

        accepted
    }
}

impl Default for QueueTransceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Transceiver for QueueTransceiver {
    type Frame = RxFrame;

    fn set_address(&mut self, address: ShortAddress) {
        self.address = address;
    }

    fn set_channel(&mut self, channel: Channel) {
        self.channel = channel;
    }

    fn set_pan_id(&mut self, pan_id: u16) {
        self.pan_id = pan_id;
    }

    fn set_buffer_depth(&mut self, depth: usize) {
        if depth > MAX_BUFFER_DEPTH {
            warn!(
                "queue: buffer depth {} clamped to {}",
                depth, MAX_BUFFER_DEPTH
            );
        }

        self.buffer_depth = depth.min(MAX_BUFFER_DEPTH);
    }

    fn start(&mut self) {
        self.started = true;
    }

    fn send_to(&mut self, dst: ShortAddress, payload: &[u8]) -> bool {
        if !self.started {
            return false;
        }

        let repr = DataFrameRepr {
            sequence_number: self.sequence_number,
            pan_id: self.pan_id,
            dst,
            src: self.address,
            payload,
        };

        let mut psdu = Psdu::new();
        if psdu.resize_default(repr.buffer_len()).is_err() || repr.emit(&mut psdu).is_err() {
            return false;
        }

        if self.tx.push_back(psdu).is_err() {
            warn!("queue: transmit queue full");
            return false;
        }

        trace!(
            "queue: sent seq {} to {:x}",
            self.sequence_number,
            dst.raw()
        );
        self.sequence_number = self.sequence_number.wrapping_add(1);
        true
    }

    fn received(&mut self) -> Option<RxFrame> {
        let frame = self.rx.pop_front()?;
        self.lent += 1;
        Some(frame)
    }

    fn skip_received(&mut self, _frame: RxFrame) {
        self.lent = self.lent.saturating_sub(1);
    }
}
