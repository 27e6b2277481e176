//! Short (16-bit) IEEE 802.15.4 addresses.

use core::str::FromStr;

/// A 16-bit IEEE 802.15.4 short address.
///
/// The textual form is two colon-separated hex octets, e.g. `"01:00"`. The
/// first octet is the low-order octet of the raw value, which is also the
/// first octet transmitted over the air.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct ShortAddress(u16);

static BROADCAST: ShortAddress = ShortAddress::BROADCAST;

/// Return the shared broadcast address.
pub fn broadcast() -> &'static ShortAddress {
    &BROADCAST
}

impl ShortAddress {
    /// Length of a short address in octets.
    pub const LEN: usize = 2;

    /// The broadcast address.
    pub const BROADCAST: ShortAddress = ShortAddress(0xffff);

    /// The all-zero address, produced by [`ShortAddress::parse_lossy`] on
    /// malformed input.
    pub const ZERO: ShortAddress = ShortAddress(0);

    /// Create an address from its raw 16-bit value.
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Return the raw 16-bit value.
    pub const fn raw(&self) -> u16 {
        self.0
    }

    /// Create an address from its over-the-air octets.
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }

    /// Return the over-the-air octets, low-order octet first.
    pub const fn to_bytes(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    /// Query whether this address is the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Query whether the address is an unicast address.
    pub fn is_unicast(&self) -> bool {
        !self.is_broadcast()
    }

    /// Parse an address from its colon-separated hex form.
    ///
    /// Missing octets are zero, so `"ff"` parses as `ff : 00`. Octets past
    /// the second one are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidCharacter`] for anything that is neither
    /// a hex digit nor a colon.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse_octets::<{ Self::LEN }>(text).map(Self::from_bytes)
    }

    /// Parse an address, falling back to [`ShortAddress::ZERO`] when the text
    /// is malformed.
    pub fn parse_lossy(text: &str) -> Self {
        Self::parse(text).unwrap_or(Self::ZERO)
    }
}

impl From<u16> for ShortAddress {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<ShortAddress> for u16 {
    fn from(addr: ShortAddress) -> Self {
        addr.0
    }
}

impl FromStr for ShortAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl core::fmt::Display for ShortAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [lo, hi] = self.to_bytes();
        write!(f, "{lo:02x} : {hi:02x}")
    }
}

impl core::fmt::LowerHex for ShortAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::LowerHex::fmt(&self.0, f)
    }
}

/// An error returned when parsing an address from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A character that is neither a hex digit nor a colon.
    InvalidCharacter {
        /// Byte offset of the offending character.
        index: usize,
        /// The offending character.
        character: char,
    },
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::InvalidCharacter { index, character } => {
                write!(f, "invalid character {character:?} at offset {index}")
            }
        }
    }
}

/// Scan colon-separated hex octets into a buffer of `N` octets.
///
/// Each hex digit is shifted into the current octet; a colon commits it. The
/// scan stops once `N` octets are committed, and a pending octet is committed
/// at the end when there is still room for it.
pub(crate) fn parse_octets<const N: usize>(text: &str) -> Result<[u8; N], ParseError> {
    let mut buf = [0u8; N];
    let mut i = 0;
    let mut octet = 0u8;

    for (index, character) in text.char_indices() {
        if i >= N {
            break;
        }

        if character == ':' {
            buf[i] = octet;
            i += 1;
            octet = 0;
        } else if let Some(nibble) = character.to_digit(16) {
            octet = (octet << 4).wrapping_add(nibble as u8);
        } else {
            return Err(ParseError::InvalidCharacter { index, character });
        }
    }

    if i < N {
        buf[i] = octet;
    }

    Ok(buf)
}
