//! Link layer configuration.
//!
//! Defaults can be overridden at build time with `L2_154_*` environment
//! variables, e.g. `L2_154_BUFFER_DEPTH=4`.

use crate::frame::{ShortAddress, MAX_PHY_PACKET_SIZE};
use crate::phy::config::Channel;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}

pub use generated::*;

/// Everything needed to bring up an [`L2Net`](crate::L2Net).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct L2Config {
    /// Our short address.
    pub address: ShortAddress,
    /// Radio channel.
    pub channel: Channel,
    /// PAN id shared by every node of the network.
    pub pan_id: u16,
    /// Number of received frames the transceiver may buffer.
    pub buffer_depth: usize,
    /// Initial MTU, MAC header and FCS included.
    pub mtu: usize,
}

impl L2Config {
    /// Create a configuration with the default buffer depth and MTU.
    pub fn new(address: ShortAddress, channel: Channel, pan_id: u16) -> Self {
        Self {
            address,
            channel,
            pan_id,
            buffer_depth: BUFFER_DEPTH,
            mtu: MAX_PHY_PACKET_SIZE,
        }
    }

    /// Set the receive buffer depth.
    pub fn with_buffer_depth(mut self, buffer_depth: usize) -> Self {
        self.buffer_depth = buffer_depth;
        self
    }

    /// Set the initial MTU.
    pub fn with_mtu(mut self, mtu: usize) -> Self {
        self.mtu = mtu;
        self
    }
}

impl Default for L2Config {
    fn default() -> Self {
        Self::new(ShortAddress::ZERO, Channel::default(), DEFAULT_PAN_ID)
    }
}
