/// Reflected form of the 1-Wire polynomial X^8 + X^5 + X^4 + 1.
const ONEWIRE_CRC_POLY: u8 = 0x8c;

#[cfg(feature = "crc-table")]
static CRC_TABLE: [u8; 256] = crc_table();

#[cfg(feature = "crc-table")]
const fn crc_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut idx = 0;
    while idx < 256 {
        table[idx] = crc_shift(idx as u8);
        idx += 1;
    }
    table
}

/// Run the 8 LSB-first shift steps on an accumulator that already has the
/// incoming byte folded in.
const fn crc_shift(mut crc: u8) -> u8 {
    let mut bit = 0;
    while bit < 8 {
        if crc & 0x1 == 0x1 {
            crc = (crc >> 1) ^ ONEWIRE_CRC_POLY;
        } else {
            crc >>= 1;
        }
        bit += 1;
    }
    crc
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
/// Calculate CRC-8 used in 1-Wire communications.
pub struct OneWireCrc(u8);

impl OneWireCrc {
    /// Get the current CRC value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Update the CRC with the incoming byte.
    pub fn update(&mut self, byte: u8) {
        #[cfg(feature = "crc-table")]
        {
            self.0 = CRC_TABLE[(self.0 ^ byte) as usize];
        }
        #[cfg(not(feature = "crc-table"))]
        {
            self.0 = crc_shift(self.0 ^ byte);
        }
    }

    /// Validate a sequence of bytes where the last byte is the 1-Wire CRC of
    /// the previous bytes.
    pub fn validate(sequence: &[u8]) -> bool {
        crc8(sequence) == 0x0 // If the last byte is the CRC, the result should be 0
    }
}

/// Compute the Dallas/Maxim CRC-8 of `bytes`, starting from zero.
///
/// Computed over a whole frame including its trailing CRC byte, the result is
/// zero exactly when the frame is intact.
pub fn crc8(bytes: &[u8]) -> u8 {
    let mut crc = OneWireCrc::default();
    for &byte in bytes {
        crc.update(byte);
    }
    crc.value()
}
