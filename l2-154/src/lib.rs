//! IEEE 802.15.4 link-layer adaptation for short-address, intra-PAN networks.
//!
//! [`L2Net`] sits between a network layer (6LoWPAN, a routing protocol, ...)
//! and a [`Transceiver`] that owns the radio. It enforces the MTU on
//! transmission, and on reception keeps at most one frame, which it
//! classifies as addressed to us, to someone else, or as nothing usable.
//!
//! ```
//! use l2_154::frame::ShortAddress;
//! use l2_154::phy::{config::Channel, queue::QueueTransceiver};
//! use l2_154::{L2Config, L2Net, RecvStatus};
//!
//! let config = L2Config::new("01:00".parse().unwrap(), Channel::_26, 0xabcd);
//! let mut l2 = L2Net::start(QueueTransceiver::new(), config).unwrap();
//!
//! assert_eq!(l2.max_payload(), 116);
//! assert!(l2.send(ShortAddress::BROADCAST, b"hello"));
//! assert_eq!(l2.recv(), RecvStatus::Empty);
//! ```
//!
//! [`Transceiver`]: phy::transceiver::Transceiver
#![no_std]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[macro_use]
pub(crate) mod utils;

pub use l2_154_frame as frame;

pub mod config;
pub mod l2net;
pub mod phy;
pub mod shared;

pub use config::L2Config;
pub use l2net::{Error, L2Net, RawDump, Reception, RecvStatus, Rejection};
pub use shared::SharedL2Net;
