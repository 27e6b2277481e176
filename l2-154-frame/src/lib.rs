//! Frame records for a minimal IEEE 802.15.4 link layer.
//!
//! Only one frame shape is modelled: data frames that carry 16-bit short
//! addresses on both ends and have the intra-PAN bit set. Such a frame has a
//! fixed MAC header of [`HEADER_SIZE`] octets:
//!
//! | octets | field                                   |
//! |--------|-----------------------------------------|
//! | 2      | frame control (intra-PAN bit set)       |
//! | 1      | sequence number                         |
//! | 2      | destination PAN id                      |
//! | 2      | destination address                     |
//! | 2      | source address (PAN id elided)          |
//!
//! followed by the payload and a [`FCS_SIZE`] octet frame check sequence.
//!
//! ## Reading a frame
//!
//! A transceiver hands out received frames as [`RxFrame`] records, which
//! implement [`ReceivedFrame`]:
//! ```
//! # use l2_154_frame::{RxFrame, ReceivedFrame, FrameType, ShortAddress};
//! let psdu = [
//!     0x41, 0x88, 0x07, 0xcd, 0xab, 0x02, 0x00, 0x01, 0x00, 0xde, 0xad, 0x00, 0x00,
//! ];
//! let frame = RxFrame::new(&psdu, psdu.len()).unwrap();
//!
//! assert_eq!(frame.frame_type(), FrameType::Data);
//! assert!(frame.intra_pan());
//! assert_eq!(frame.dst_address(), ShortAddress::from_raw(0x0002));
//! assert_eq!(frame.src_address(), ShortAddress::from_raw(0x0001));
//! assert_eq!(frame.payload(), &[0xde, 0xad]);
//! ```
//!
//! ## Writing a frame
//!
//! [`DataFrameRepr`] emits the fixed header, the payload and the FCS:
//! ```
//! # use l2_154_frame::{DataFrameRepr, ShortAddress, check_fcs};
//! let repr = DataFrameRepr {
//!     sequence_number: 7,
//!     pan_id: 0xabcd,
//!     dst: ShortAddress::BROADCAST,
//!     src: "01:00".parse().unwrap(),
//!     payload: &[0x2b],
//! };
//! let mut buffer = [0u8; 127];
//! let len = repr.emit(&mut buffer).unwrap();
//! assert_eq!(len, 12);
//! assert!(check_fcs(&buffer[..len]));
//! ```
#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(test)]
mod tests;

mod address;
pub use address::*;

mod frame_control;
pub use frame_control::*;

mod rx_frame;
pub use rx_frame::*;

mod writer;
pub use writer::*;

/// The maximum PSDU size (in octets) the PHY shall be able to receive.
pub const MAX_PHY_PACKET_SIZE: usize = 127;

/// Size of the fixed intra-PAN MAC header: frame control (2), sequence
/// number (1), destination PAN id (2), destination address (2) and source
/// address (2).
pub const HEADER_SIZE: usize = 2 + 1 + 2 + 2 + 2;

/// Size of the frame check sequence at the end of each frame.
pub const FCS_SIZE: usize = 2;

/// An error that can occur when reading or writing an IEEE 802.15.4 frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error;

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "malformed IEEE 802.15.4 frame")
    }
}

/// A type alias for `Result<T, frame::Error>`.
pub type Result<T> = core::result::Result<T, Error>;
