//! Received frame records.

use heapless::Vec;

use super::{AddressingMode, FrameControl, FrameType, ShortAddress};
use super::{Error, Result, FCS_SIZE, MAX_PHY_PACKET_SIZE};

/// Read-only view of a frame handed out by a transceiver.
///
/// The payload returned by [`payload`] only covers the captured octets, while
/// [`payload_len`] reports the length announced by the PHY. The two differ
/// when the frame was truncated on reception.
///
/// [`payload`]: ReceivedFrame::payload
/// [`payload_len`]: ReceivedFrame::payload_len
pub trait ReceivedFrame {
    /// Return the [`FrameType`].
    fn frame_type(&self) -> FrameType;
    /// Return the destination [`AddressingMode`].
    fn dst_addressing_mode(&self) -> AddressingMode;
    /// Return the source [`AddressingMode`].
    fn src_addressing_mode(&self) -> AddressingMode;
    /// Returns `true` when the intra-PAN bit is set.
    fn intra_pan(&self) -> bool;
    /// Return the destination short address.
    fn dst_address(&self) -> ShortAddress;
    /// Return the source short address.
    fn src_address(&self) -> ShortAddress;
    /// Return the captured part of the payload.
    fn payload(&self) -> &[u8];
    /// Return the true payload length, which may exceed `payload().len()`.
    fn payload_len(&self) -> usize;
    /// Return the captured octets of the frame.
    fn raw(&self) -> &[u8];
    /// Return the number of captured octets.
    fn raw_len(&self) -> usize {
        self.raw().len()
    }
}

/// A decoded received frame, owning its captured octets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RxFrame {
    buffer: Vec<u8, MAX_PHY_PACKET_SIZE>,
    frame_len: usize,
    header_len: usize,
    dst: ShortAddress,
    src: ShortAddress,
}

impl RxFrame {
    /// Decode a received frame.
    ///
    /// `captured` holds the octets that were actually read from the radio,
    /// `frame_len` is the PSDU length announced by the PHY, including the
    /// FCS. `captured` may be shorter than `frame_len`.
    ///
    /// # Errors
    ///
    /// Returns an error when the lengths are inconsistent, when the captured
    /// octets do not cover the MAC header, when security is enabled or when
    /// an addressing mode is reserved.
    pub fn new(captured: &[u8], frame_len: usize) -> Result<Self> {
        if frame_len > MAX_PHY_PACKET_SIZE || captured.len() > frame_len {
            return Err(Error);
        }

        let fc = FrameControl::new(captured)?;

        if fc.security_enabled() {
            return Err(Error);
        }

        let header_len = Self::header_len(&fc).ok_or(Error)?;

        if captured.len() < header_len || frame_len < header_len + FCS_SIZE {
            return Err(Error);
        }

        let mut offset = 3;

        let dst = match fc.dst_addressing_mode() {
            AddressingMode::Absent => ShortAddress::ZERO,
            mode => {
                // Skip the destination PAN id.
                offset += 2;
                let addr = Self::short_at(captured, offset, mode);
                offset += mode.size();
                addr
            }
        };

        let src = match fc.src_addressing_mode() {
            AddressingMode::Absent => ShortAddress::ZERO,
            mode => {
                if Self::src_pan_id_present(&fc) {
                    offset += 2;
                }
                Self::short_at(captured, offset, mode)
            }
        };

        let mut buffer = Vec::new();
        buffer.extend_from_slice(captured).map_err(|_| Error)?;

        Ok(Self {
            buffer,
            frame_len,
            header_len,
            dst,
            src,
        })
    }

    /// Decode a completely captured frame.
    pub fn from_psdu(psdu: &[u8]) -> Result<Self> {
        Self::new(psdu, psdu.len())
    }

    fn src_pan_id_present(fc: &FrameControl<&[u8]>) -> bool {
        !(fc.intra_pan() && fc.dst_addressing_mode() != AddressingMode::Absent)
    }

    /// Length of the MAC header described by the frame control field, or
    /// `None` for reserved addressing modes.
    fn header_len(fc: &FrameControl<&[u8]>) -> Option<usize> {
        let dst = fc.dst_addressing_mode();
        let src = fc.src_addressing_mode();

        if dst == AddressingMode::Unknown || src == AddressingMode::Unknown {
            return None;
        }

        let mut len = 2 + 1;

        if dst != AddressingMode::Absent {
            len += 2 + dst.size();
        }

        if src != AddressingMode::Absent {
            if Self::src_pan_id_present(fc) {
                len += 2;
            }
            len += src.size();
        }

        Some(len)
    }

    fn short_at(buffer: &[u8], offset: usize, mode: AddressingMode) -> ShortAddress {
        match mode {
            AddressingMode::Short => {
                ShortAddress::from_bytes([buffer[offset], buffer[offset + 1]])
            }
            _ => ShortAddress::ZERO,
        }
    }

    fn frame_control(&self) -> FrameControl<&'_ [u8]> {
        FrameControl::new_unchecked(&self.buffer[..2])
    }

    /// Return the sequence number.
    pub fn sequence_number(&self) -> u8 {
        self.buffer[2]
    }

    /// Return the destination PAN id, if present.
    pub fn dst_pan_id(&self) -> Option<u16> {
        if self.frame_control().dst_addressing_mode() == AddressingMode::Absent {
            return None;
        }

        Some(u16::from_le_bytes([self.buffer[3], self.buffer[4]]))
    }

    /// Return the PSDU length announced by the PHY, FCS included.
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Returns `true` when the frame was captured up to its last octet.
    pub fn is_complete(&self) -> bool {
        self.buffer.len() == self.frame_len
    }
}

impl ReceivedFrame for RxFrame {
    fn frame_type(&self) -> FrameType {
        self.frame_control().frame_type()
    }

    fn dst_addressing_mode(&self) -> AddressingMode {
        self.frame_control().dst_addressing_mode()
    }

    fn src_addressing_mode(&self) -> AddressingMode {
        self.frame_control().src_addressing_mode()
    }

    fn intra_pan(&self) -> bool {
        self.frame_control().intra_pan()
    }

    fn dst_address(&self) -> ShortAddress {
        self.dst
    }

    fn src_address(&self) -> ShortAddress {
        self.src
    }

    fn payload(&self) -> &[u8] {
        let end = self.buffer.len().min(self.frame_len - FCS_SIZE);
        &self.buffer[self.header_len..end.max(self.header_len)]
    }

    fn payload_len(&self) -> usize {
        self.frame_len - self.header_len - FCS_SIZE
    }

    fn raw(&self) -> &[u8] {
        &self.buffer
    }
}

impl core::fmt::Display for RxFrame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.frame_control())?;
        writeln!(f, "Addressing Fields")?;
        if let Some(id) = self.dst_pan_id() {
            writeln!(f, "  dst pan id: {:0x}", id)?;
        }
        writeln!(f, "  dst address: {}", self.dst)?;
        writeln!(f, "  src address: {}", self.src)?;
        writeln!(
            f,
            "Payload: {} of {} octets captured",
            self.payload().len(),
            self.payload_len()
        )
    }
}
