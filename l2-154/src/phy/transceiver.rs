use crate::frame::{ReceivedFrame, ShortAddress};

use super::config::Channel;

/// A frame transceiver, owning the radio and its receive buffers.
///
/// Configuration calls are made once, before [`start`]. Received frames are
/// lent to the caller by [`received`] and must be handed back with
/// [`skip_received`] once the caller is done with them.
///
/// [`start`]: Transceiver::start
/// [`received`]: Transceiver::received
/// [`skip_received`]: Transceiver::skip_received
pub trait Transceiver {
    /// The record handed out for every received frame.
    type Frame: ReceivedFrame;

    /// Set the short address frames are received on.
    fn set_address(&mut self, address: ShortAddress);
    /// Set the radio channel.
    fn set_channel(&mut self, channel: Channel);
    /// Set the PAN id.
    fn set_pan_id(&mut self, pan_id: u16);
    /// Set how many received frames may be buffered.
    fn set_buffer_depth(&mut self, depth: usize);
    /// Start receiving and accept transmissions.
    fn start(&mut self);

    /// Make one attempt at transmitting `payload` to `dst`.
    ///
    /// Returns whether the transmission was successful.
    fn send_to(&mut self, dst: ShortAddress, payload: &[u8]) -> bool;

    /// Return the next buffered frame without waiting.
    fn received(&mut self) -> Option<Self::Frame>;

    /// Give a frame back, discarding its content.
    fn skip_received(&mut self, frame: Self::Frame);
}
