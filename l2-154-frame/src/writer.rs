//! Writing intra-PAN data frames.

use super::{AddressingMode, FrameControl, FrameType, FrameVersion, ShortAddress};
use super::{Error, Result, FCS_SIZE, HEADER_SIZE, MAX_PHY_PACKET_SIZE};

// The FCS field contains a 16-bit ITU-T CRC, using the x^16 + x^12 + x^5 + 1
// polynomial. Unlike most CRCs, the initial and final values are both 0x0000.
const CRC_16_IEEE802154: crc::Algorithm<u16> = crc::Algorithm {
    width: 16,
    poly: 0x1021,
    init: 0x0000,
    refin: true,
    refout: true,
    xorout: 0x0000,
    check: 0x2189,
    residue: 0x0000,
};

const FCS: crc::Crc<u16> = crc::Crc::<u16>::new(&CRC_16_IEEE802154);

/// Calculate the Frame Check Sequence over `content`.
pub fn calculate_fcs(content: &[u8]) -> u16 {
    FCS.checksum(content)
}

/// Check the Frame Check Sequence at the end of a complete PSDU.
pub fn check_fcs(psdu: &[u8]) -> bool {
    if psdu.len() < FCS_SIZE {
        return false;
    }

    let (content, fcs) = psdu.split_at(psdu.len() - FCS_SIZE);
    calculate_fcs(content) == u16::from_le_bytes([fcs[0], fcs[1]])
}

/// A high-level representation of an intra-PAN data frame with short
/// addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct DataFrameRepr<'p> {
    /// The sequence number.
    pub sequence_number: u8,
    /// The PAN id shared by both ends.
    pub pan_id: u16,
    /// The destination address.
    pub dst: ShortAddress,
    /// The source address.
    pub src: ShortAddress,
    /// The MAC payload.
    pub payload: &'p [u8],
}

impl DataFrameRepr<'_> {
    /// The largest payload that fits in a PHY packet.
    pub const MAX_PAYLOAD: usize = MAX_PHY_PACKET_SIZE - HEADER_SIZE - FCS_SIZE;

    /// Return the length of the PSDU, FCS included.
    pub fn buffer_len(&self) -> usize {
        HEADER_SIZE + self.payload.len() + FCS_SIZE
    }

    /// Emit the frame into `buffer` and return the number of octets written.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload exceeds [`Self::MAX_PAYLOAD`] or the
    /// buffer is too small.
    pub fn emit(&self, buffer: &mut [u8]) -> Result<usize> {
        let len = self.buffer_len();

        if self.payload.len() > Self::MAX_PAYLOAD || buffer.len() < len {
            return Err(Error);
        }

        let buffer = &mut buffer[..len];
        buffer[..2].fill(0);

        let mut fc = FrameControl::new_unchecked(&mut buffer[..2]);
        fc.set_frame_type(FrameType::Data);
        fc.set_intra_pan(true);
        fc.set_dst_addressing_mode(AddressingMode::Short);
        fc.set_src_addressing_mode(AddressingMode::Short);
        fc.set_frame_version(FrameVersion::Ieee802154_2003);

        buffer[2] = self.sequence_number;
        buffer[3..5].copy_from_slice(&self.pan_id.to_le_bytes());
        buffer[5..7].copy_from_slice(&self.dst.to_bytes());
        buffer[7..9].copy_from_slice(&self.src.to_bytes());
        buffer[HEADER_SIZE..][..self.payload.len()].copy_from_slice(self.payload);

        let fcs = calculate_fcs(&buffer[..len - FCS_SIZE]);
        buffer[len - FCS_SIZE..].copy_from_slice(&fcs.to_le_bytes());

        Ok(len)
    }
}
