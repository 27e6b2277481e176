//! Access to IEEE 802.15.4 frame transceivers.
//!
//! This module provides the trait the link layer drives to transmit and
//! receive frames, [`Transceiver`](transceiver::Transceiver), and a software
//! implementation of it backed by bounded queues.

pub mod config;
pub mod queue;
pub mod transceiver;
