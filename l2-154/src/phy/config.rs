/// IEEE 802.15.4 channels
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// 2_405 MHz
    _11 = 11,
    /// 2_410 MHz
    _12 = 12,
    /// 2_415 MHz
    _13 = 13,
    /// 2_420 MHz
    _14 = 14,
    /// 2_425 MHz
    _15 = 15,
    /// 2_430 MHz
    _16 = 16,
    /// 2_435 MHz
    _17 = 17,
    /// 2_440 MHz
    _18 = 18,
    /// 2_445 MHz
    _19 = 19,
    /// 2_450 MHz
    _20 = 20,
    /// 2_455 MHz
    _21 = 21,
    /// 2_460 MHz
    _22 = 22,
    /// 2_465 MHz
    _23 = 23,
    /// 2_470 MHz
    _24 = 24,
    /// 2_475 MHz
    _25 = 25,
    /// 2_480 MHz
    _26 = 26,
}

impl Channel {
    /// Center frequency in MHz.
    pub fn frequency_mhz(&self) -> u16 {
        2405 + 5 * (u8::from(*self) as u16 - 11)
    }
}

impl TryFrom<u8> for Channel {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            11 => Ok(Channel::_11),
            12 => Ok(Channel::_12),
            13 => Ok(Channel::_13),
            14 => Ok(Channel::_14),
            15 => Ok(Channel::_15),
            16 => Ok(Channel::_16),
            17 => Ok(Channel::_17),
            18 => Ok(Channel::_18),
            19 => Ok(Channel::_19),
            20 => Ok(Channel::_20),
            21 => Ok(Channel::_21),
            22 => Ok(Channel::_22),
            23 => Ok(Channel::_23),
            24 => Ok(Channel::_24),
            25 => Ok(Channel::_25),
            26 => Ok(Channel::_26),
            _ => Err(()),
        }
    }
}

impl From<Channel> for u8 {
    fn from(ch: Channel) -> u8 {
        ch as u8
    }
}

impl Default for Channel {
    fn default() -> Self {
        crate::config::DEFAULT_CHANNEL
    }
}
