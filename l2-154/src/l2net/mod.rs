//! The link adaptation layer.
//!
//! [`L2Net`] owns the local address, channel, PAN id and MTU of one
//! interface. It admits outgoing payloads that fit the MTU and classifies
//! incoming frames, keeping at most one of them around so the caller can
//! read its addresses and payload.
//!
//! Every frame is assumed to use the fixed intra-PAN header with 16-bit
//! addresses on both ends, which gives [`HEADER_SIZE`] octets of header and
//! [`FCS_SIZE`] octets of trailer.

mod dump;
mod host;
mod slot;

pub use dump::RawDump;

use slot::Slot;

use crate::config::L2Config;
use crate::frame::{
    broadcast, AddressingMode, FrameType, ReceivedFrame, ShortAddress, FCS_SIZE, HEADER_SIZE,
};
use crate::phy::config::Channel;
use crate::phy::transceiver::Transceiver;

/// The smallest MTU that leaves room for the header and the FCS.
pub const MIN_MTU: usize = HEADER_SIZE + FCS_SIZE;

/// Errors reported by the link layer.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No frame is held; call [`L2Net::recv`] first.
    NoFrame,
    /// The MTU is smaller than [`MIN_MTU`].
    MtuTooSmall,
    /// The receive buffer depth is zero.
    InvalidBufferDepth,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::NoFrame => write!(f, "no received frame is held"),
            Error::MtuTooSmall => write!(f, "MTU smaller than {MIN_MTU} octets"),
            Error::InvalidBufferDepth => write!(f, "receive buffer depth must not be zero"),
        }
    }
}

/// Outcome of [`L2Net::recv`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvStatus {
    /// A frame addressed to us or to the broadcast address.
    Ok,
    /// A valid frame addressed to another node. It is still held.
    WrongDestination,
    /// No frame, or a frame this layer does not handle.
    Empty,
}

/// Why a received frame was not considered.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Not a data frame.
    NotData,
    /// The destination address is not a short address.
    DstAddressing,
    /// The source address is not a short address.
    SrcAddressing,
    /// The intra-PAN bit is clear.
    NotIntraPan,
}

/// Outcome of [`L2Net::recv_detailed`], telling apart an idle transceiver
/// from a frame that was rejected.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reception {
    /// A frame addressed to us or to the broadcast address.
    Ok,
    /// A valid frame addressed to another node.
    WrongDestination,
    /// A frame whose shape is not supported.
    Rejected(Rejection),
    /// Nothing was received.
    Empty,
}

impl From<Reception> for RecvStatus {
    fn from(reception: Reception) -> Self {
        match reception {
            Reception::Ok => RecvStatus::Ok,
            Reception::WrongDestination => RecvStatus::WrongDestination,
            Reception::Rejected(_) | Reception::Empty => RecvStatus::Empty,
        }
    }
}

fn classify<F: ReceivedFrame>(frame: &F, local: ShortAddress) -> Reception {
    let rejection = if frame.frame_type() != FrameType::Data {
        Some(Rejection::NotData)
    } else if frame.dst_addressing_mode() != AddressingMode::Short {
        Some(Rejection::DstAddressing)
    } else if frame.src_addressing_mode() != AddressingMode::Short {
        Some(Rejection::SrcAddressing)
    } else if !frame.intra_pan() {
        Some(Rejection::NotIntraPan)
    } else {
        None
    };

    if let Some(rejection) = rejection {
        return Reception::Rejected(rejection);
    }

    let dst = frame.dst_address();
    if dst != local && !dst.is_broadcast() {
        return Reception::WrongDestination;
    }

    Reception::Ok
}

/// An IEEE 802.15.4 interface on top of a [`Transceiver`].
pub struct L2Net<T: Transceiver> {
    transceiver: T,
    address: ShortAddress,
    channel: Channel,
    pan_id: u16,
    mtu: usize,
    current: Slot<T::Frame>,
}

impl<T: Transceiver> L2Net<T> {
    /// Configure the transceiver from `config` and start it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBufferDepth`] or [`Error::MtuTooSmall`] when
    /// the configuration cannot work. The transceiver is left untouched in
    /// that case.
    pub fn start(mut transceiver: T, config: L2Config) -> Result<Self, Error> {
        if config.buffer_depth == 0 {
            return Err(Error::InvalidBufferDepth);
        }

        if config.mtu < MIN_MTU {
            return Err(Error::MtuTooSmall);
        }

        transceiver.set_address(config.address);
        transceiver.set_channel(config.channel);
        transceiver.set_pan_id(config.pan_id);
        transceiver.set_buffer_depth(config.buffer_depth);
        transceiver.start();

        info!(
            "l2: started addr {:x} on channel {} pan {:x}",
            config.address.raw(),
            u8::from(config.channel),
            config.pan_id
        );

        Ok(Self {
            transceiver,
            address: config.address,
            channel: config.channel,
            pan_id: config.pan_id,
            mtu: config.mtu,
            current: Slot::Empty,
        })
    }

    /// Return our short address.
    pub fn address(&self) -> ShortAddress {
        self.address
    }

    /// Return the radio channel.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Return the PAN id.
    pub fn pan_id(&self) -> u16 {
        self.pan_id
    }

    /// Return the MTU.
    pub fn mtu(&self) -> usize {
        self.mtu
    }

    /// Set the MTU.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MtuTooSmall`] below [`MIN_MTU`]; the MTU is then
    /// unchanged.
    pub fn set_mtu(&mut self, mtu: usize) -> Result<(), Error> {
        if mtu < MIN_MTU {
            return Err(Error::MtuTooSmall);
        }

        self.mtu = mtu;
        Ok(())
    }

    /// Return the largest payload [`send`](Self::send) accepts.
    pub fn max_payload(&self) -> usize {
        self.mtu - MIN_MTU
    }

    /// Return the broadcast address.
    pub fn bcast_addr(&self) -> &'static ShortAddress {
        broadcast()
    }

    /// Transmit `payload` to `dst`.
    ///
    /// Payloads longer than [`max_payload`](Self::max_payload) are refused
    /// without reaching the transceiver. Otherwise the transceiver gets
    /// exactly one attempt and its result is returned.
    pub fn send(&mut self, dst: ShortAddress, payload: &[u8]) -> bool {
        if payload.len() > self.max_payload() {
            trace!(
                "l2: refusing {} octets, max payload is {}",
                payload.len(),
                self.max_payload()
            );
            return false;
        }

        self.transceiver.send_to(dst, payload)
    }

    /// Drop the held frame and classify the next one.
    pub fn recv(&mut self) -> RecvStatus {
        self.recv_detailed().into()
    }

    /// Like [`recv`](Self::recv), but tells why a frame was not usable.
    ///
    /// A rejected frame stays held until the next call, like any other.
    pub fn recv_detailed(&mut self) -> Reception {
        let local = self.address;

        let Some(frame) = self.current.advance(&mut self.transceiver) else {
            return Reception::Empty;
        };

        let reception = classify(frame, local);

        match reception {
            Reception::Rejected(rejection) => {
                debug!("l2: rejected frame {:?}", rejection);
            }
            Reception::WrongDestination => {
                trace!("l2: frame for {:x}, not for us", frame.dst_address().raw());
            }
            _ => (),
        }

        reception
    }

    /// Drop the held frame without fetching another one.
    ///
    /// Returns whether a frame was held.
    pub fn skip(&mut self) -> bool {
        self.current.release(&mut self.transceiver)
    }

    /// Returns `true` while a frame is held.
    pub fn has_frame(&self) -> bool {
        self.current.is_holding()
    }

    fn frame(&self) -> Result<&T::Frame, Error> {
        self.current.frame().ok_or(Error::NoFrame)
    }

    /// Return the source address of the held frame.
    pub fn src_address(&self) -> Result<ShortAddress, Error> {
        Ok(self.frame()?.src_address())
    }

    /// Return the destination address of the held frame.
    pub fn dst_address(&self) -> Result<ShortAddress, Error> {
        Ok(self.frame()?.dst_address())
    }

    /// Return the captured payload of the held frame.
    ///
    /// The slice may be shorter than [`payload_len`](Self::payload_len) if
    /// the frame was truncated on reception.
    pub fn payload(&self) -> Result<&[u8], Error> {
        Ok(self.frame()?.payload())
    }

    /// Return the captured payload of the held frame, starting at `offset`.
    pub fn payload_from(&self, offset: usize) -> Result<&[u8], Error> {
        Ok(self.payload()?.get(offset..).unwrap_or(&[]))
    }

    /// Return the true payload length of the held frame.
    pub fn payload_len(&self) -> Result<usize, Error> {
        Ok(self.frame()?.payload_len())
    }

    /// Return up to `max_len` captured octets of the held frame, starting at
    /// `start`, ready to be printed.
    pub fn dump(&self, start: usize, max_len: usize) -> Result<RawDump<'_>, Error> {
        Ok(RawDump::new(self.frame()?.raw(), start, max_len))
    }

    /// Write [`dump`](Self::dump) to the debug log.
    pub fn log_dump(&self, start: usize, max_len: usize) -> Result<(), Error> {
        let dump = self.dump(start, max_len)?;
        debug!("l2: {}", dump);
        Ok(())
    }

    /// Return the transceiver.
    pub fn transceiver(&self) -> &T {
        &self.transceiver
    }

    /// Hand back the held frame and return the transceiver.
    pub fn release(mut self) -> T {
        self.current.release(&mut self.transceiver);
        self.transceiver
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;
    use std::vec::Vec;

    use super::*;
    use crate::frame::{DataFrameRepr, RxFrame};
    use crate::phy::transceiver::tests::{TestTransceiver, TestTransceiverEvent};

    const LOCAL: ShortAddress = ShortAddress::from_raw(0x0001);
    const PEER: ShortAddress = ShortAddress::from_raw(0x0002);
    const OTHER: ShortAddress = ShortAddress::from_raw(0x0003);

    fn data_frame(sequence_number: u8, dst: ShortAddress, payload: &[u8]) -> RxFrame {
        let repr = DataFrameRepr {
            sequence_number,
            pan_id: 0xabcd,
            dst,
            src: PEER,
            payload,
        };
        let mut buffer = [0u8; 127];
        let len = repr.emit(&mut buffer).unwrap();
        RxFrame::from_psdu(&buffer[..len]).unwrap()
    }

    fn hex_frame(psdu: &str) -> RxFrame {
        RxFrame::from_psdu(&hex::decode(psdu).unwrap()).unwrap()
    }

    fn push(l2: &mut L2Net<TestTransceiver>, frame: RxFrame) {
        l2.transceiver.push(frame);
    }

    fn start() -> L2Net<TestTransceiver> {
        let config = L2Config::new(LOCAL, Channel::_15, 0xabcd);
        let mut l2 = L2Net::start(TestTransceiver::new(), config).unwrap();
        l2.transceiver.events.clear();
        l2
    }

    #[test]
    fn start_configures_transceiver() {
        let config = L2Config::new(LOCAL, Channel::_15, 0xabcd);
        let l2 = L2Net::start(TestTransceiver::new(), config).unwrap();

        assert_eq!(
            l2.transceiver().events,
            [
                TestTransceiverEvent::SetAddress(LOCAL),
                TestTransceiverEvent::SetChannel(Channel::_15),
                TestTransceiverEvent::SetPanId(0xabcd),
                TestTransceiverEvent::SetBufferDepth(10),
                TestTransceiverEvent::Start,
            ]
        );
        assert_eq!(l2.address(), LOCAL);
        assert_eq!(l2.channel(), Channel::_15);
        assert_eq!(l2.pan_id(), 0xabcd);
        assert_eq!(l2.mtu(), 127);
        assert!(!l2.has_frame());
    }

    #[test]
    fn start_rejects_bad_config() {
        let config = L2Config::new(LOCAL, Channel::_15, 0xabcd);

        assert_eq!(
            L2Net::start(TestTransceiver::new(), config.with_buffer_depth(0)).err(),
            Some(Error::InvalidBufferDepth)
        );
        assert_eq!(
            L2Net::start(TestTransceiver::new(), config.with_mtu(MIN_MTU - 1)).err(),
            Some(Error::MtuTooSmall)
        );
    }

    #[test]
    fn max_payload() {
        let mut l2 = start();
        assert_eq!(l2.max_payload(), 116);

        for mtu in MIN_MTU..=127 {
            l2.set_mtu(mtu).unwrap();
            assert_eq!(l2.mtu(), mtu);
            assert_eq!(l2.max_payload(), mtu - 9 - 2);
        }

        assert_eq!(l2.set_mtu(10), Err(Error::MtuTooSmall));
        assert_eq!(l2.mtu(), 127);
    }

    #[test]
    fn send_respects_mtu() {
        let mut l2 = start();

        assert!(!l2.send(PEER, &[0u8; 117]));
        assert!(l2.transceiver().events.is_empty());

        assert!(l2.send(PEER, &[0xaa; 116]));
        assert_eq!(
            l2.transceiver().events,
            [TestTransceiverEvent::SendTo(PEER, vec![0xaa; 116])]
        );

        l2.set_mtu(20).unwrap();
        assert!(!l2.send(PEER, &[0u8; 10]));
        assert!(l2.send(PEER, &[0u8; 9]));
    }

    #[test]
    fn send_returns_transceiver_result() {
        let mut l2 = start();
        l2.transceiver.send_result = false;

        assert!(!l2.send(*l2.bcast_addr(), b"hello"));
        assert_eq!(
            l2.transceiver().events,
            [TestTransceiverEvent::SendTo(
                ShortAddress::BROADCAST,
                b"hello".to_vec()
            )]
        );
    }

    #[test]
    fn recv_releases_before_fetch() {
        let mut l2 = start();
        push(&mut l2, data_frame(1, LOCAL, &[1]));
        push(&mut l2, data_frame(2, LOCAL, &[2]));

        assert_eq!(l2.recv(), RecvStatus::Ok);
        assert_eq!(l2.recv(), RecvStatus::Ok);
        assert_eq!(l2.payload(), Ok(&[2][..]));
        assert_eq!(l2.recv(), RecvStatus::Empty);
        assert!(!l2.has_frame());

        assert_eq!(
            l2.transceiver().events,
            [
                TestTransceiverEvent::Received(true),
                TestTransceiverEvent::SkipReceived(1),
                TestTransceiverEvent::Received(true),
                TestTransceiverEvent::SkipReceived(2),
                TestTransceiverEvent::Received(false),
            ]
        );
    }

    #[test]
    fn recv_for_us() {
        let mut l2 = start();
        push(&mut l2, data_frame(1, LOCAL, b"data"));

        assert_eq!(l2.recv(), RecvStatus::Ok);
        assert_eq!(l2.dst_address(), Ok(LOCAL));
        assert_eq!(l2.dst_address().unwrap(), l2.address());
        assert_eq!(l2.src_address(), Ok(PEER));
        assert_eq!(l2.payload(), Ok(&b"data"[..]));
        assert_eq!(l2.payload_len(), Ok(4));
        assert_eq!(l2.payload_from(2), Ok(&b"ta"[..]));
        assert_eq!(l2.payload_from(10), Ok(&b""[..]));
    }

    #[test]
    fn recv_broadcast() {
        let mut l2 = start();
        push(&mut l2, data_frame(1, ShortAddress::BROADCAST, b"all"));

        assert_eq!(l2.recv(), RecvStatus::Ok);
        assert_eq!(l2.dst_address(), Ok(*l2.bcast_addr()));
    }

    #[test]
    fn recv_wrong_destination_keeps_frame() {
        let mut l2 = start();
        push(&mut l2, data_frame(1, OTHER, b"not yours"));

        assert_eq!(l2.recv(), RecvStatus::WrongDestination);
        assert!(l2.has_frame());
        assert_eq!(l2.dst_address(), Ok(OTHER));
        assert_eq!(l2.src_address(), Ok(PEER));
        assert_eq!(l2.payload(), Ok(&b"not yours"[..]));
    }

    #[test]
    fn recv_empty() {
        let mut l2 = start();

        assert_eq!(l2.recv(), RecvStatus::Empty);
        assert_eq!(l2.recv_detailed(), Reception::Empty);
        assert!(!l2.has_frame());

        assert_eq!(l2.src_address(), Err(Error::NoFrame));
        assert_eq!(l2.dst_address(), Err(Error::NoFrame));
        assert_eq!(l2.payload(), Err(Error::NoFrame));
        assert_eq!(l2.payload_len(), Err(Error::NoFrame));
        assert_eq!(l2.dump(0, 10).err(), Some(Error::NoFrame));
        assert_eq!(l2.log_dump(0, 10), Err(Error::NoFrame));
    }

    #[test]
    fn recv_extended_addressing_is_empty() {
        let mut l2 = start();
        // Short destination, extended source.
        let frame = hex_frame("41d801cdab0100c7d9b514004b12002b0000000000");
        push(&mut l2, frame.clone());
        push(&mut l2, frame);

        assert_eq!(l2.recv(), RecvStatus::Empty);
        assert_eq!(
            l2.recv_detailed(),
            Reception::Rejected(Rejection::SrcAddressing)
        );
    }

    #[test]
    fn recv_rejections() {
        let mut l2 = start();
        // Acknowledgment.
        push(&mut l2, hex_frame("0200070000"));
        // Extended destination.
        push(&mut l2, hex_frame("418c01cdab01000000000000000200aa0000"));
        // Intra-PAN bit clear.
        push(&mut l2, hex_frame("018807cdab0100cdab0200aa0000"));

        assert_eq!(l2.recv_detailed(), Reception::Rejected(Rejection::NotData));
        assert!(l2.has_frame());
        assert_eq!(
            l2.recv_detailed(),
            Reception::Rejected(Rejection::DstAddressing)
        );
        assert!(l2.has_frame());
        assert_eq!(l2.payload(), Ok(&[0xaa][..]));
        assert_eq!(l2.recv(), RecvStatus::Empty);
        assert!(l2.has_frame());
        assert_eq!(l2.recv_detailed(), Reception::Empty);
        assert!(!l2.has_frame());

        assert_eq!(
            l2.transceiver().events,
            [
                TestTransceiverEvent::Received(true),
                TestTransceiverEvent::SkipReceived(7),
                TestTransceiverEvent::Received(true),
                TestTransceiverEvent::SkipReceived(1),
                TestTransceiverEvent::Received(true),
                TestTransceiverEvent::SkipReceived(7),
                TestTransceiverEvent::Received(false),
            ]
        );
    }

    #[test]
    fn classification_is_not_cached() {
        let mut l2 = start();
        push(&mut l2, data_frame(1, OTHER, &[]));
        push(&mut l2, data_frame(2, LOCAL, &[]));

        assert_eq!(l2.recv(), RecvStatus::WrongDestination);
        assert_eq!(l2.recv(), RecvStatus::Ok);
        assert_eq!(l2.recv(), RecvStatus::Empty);
    }

    #[test]
    fn truncated_payload() {
        let mut l2 = start();
        let repr = DataFrameRepr {
            sequence_number: 1,
            pan_id: 0xabcd,
            dst: LOCAL,
            src: PEER,
            payload: &[0x11; 20],
        };
        let mut buffer = [0u8; 127];
        let len = repr.emit(&mut buffer).unwrap();
        push(&mut l2, RxFrame::new(&buffer[..12], len).unwrap());

        assert_eq!(l2.recv(), RecvStatus::Ok);
        assert_eq!(l2.payload(), Ok(&[0x11; 3][..]));
        assert_eq!(l2.payload_len(), Ok(20));
    }

    #[test]
    fn dump_range() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut l2 = start();
        push(&mut l2, data_frame(7, LOCAL, &[0xde, 0xad]));
        assert_eq!(l2.recv(), RecvStatus::Ok);

        assert_eq!(l2.dump(0, 5).unwrap().to_string(), "41 88 07 cd ab");
        assert_eq!(l2.dump(9, 100).unwrap().bytes().len(), 4);
        assert_eq!(l2.dump(9, 2).unwrap().to_string(), "de ad");
        assert_eq!(l2.dump(200, 2).unwrap().to_string(), "");
        assert_eq!(l2.log_dump(0, 11), Ok(()));
    }

    #[test]
    fn skip_releases_frame() {
        let mut l2 = start();
        push(&mut l2, data_frame(5, LOCAL, &[]));

        assert_eq!(l2.recv(), RecvStatus::Ok);
        assert!(l2.skip());
        assert!(!l2.has_frame());
        assert!(!l2.skip());
        assert_eq!(l2.payload(), Err(Error::NoFrame));

        let events: Vec<_> = l2.transceiver().events.clone();
        assert_eq!(
            events,
            [
                TestTransceiverEvent::Received(true),
                TestTransceiverEvent::SkipReceived(5),
            ]
        );
    }

    #[test]
    fn release_hands_back_held_frame() {
        let mut l2 = start();
        push(&mut l2, data_frame(9, OTHER, &[]));
        assert_eq!(l2.recv(), RecvStatus::WrongDestination);

        let transceiver = l2.release();
        assert_eq!(
            transceiver.events.last(),
            Some(&TestTransceiverEvent::SkipReceived(9))
        );
    }

    #[test]
    fn broadcast_address() {
        let l2 = start();
        assert_eq!(*l2.bcast_addr(), ShortAddress::BROADCAST);
        assert_eq!(l2.bcast_addr(), &"ff:ff".parse::<ShortAddress>().unwrap());
    }
}
