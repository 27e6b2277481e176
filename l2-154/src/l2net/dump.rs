/// Hex rendering of a range of captured frame octets.
///
/// Octets are written as two lower-case hex digits separated by single
/// spaces, e.g. `41 88 07`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDump<'f> {
    bytes: &'f [u8],
}

impl<'f> RawDump<'f> {
    /// Select `[start, start + max_len)` of `raw`, clipped to its length.
    pub(crate) fn new(raw: &'f [u8], start: usize, max_len: usize) -> Self {
        let end = start.saturating_add(max_len).min(raw.len());
        let bytes = raw.get(start..end).unwrap_or(&[]);
        Self { bytes }
    }

    /// Return the selected octets.
    pub fn bytes(&self) -> &'f [u8] {
        self.bytes
    }
}

impl core::fmt::Display for RawDump<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, b) in self.bytes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RawDump<'_> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[u8]:x}", self.bytes)
    }
}
