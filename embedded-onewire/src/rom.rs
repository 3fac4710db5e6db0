use core::fmt::{Display, Formatter, Result as FmtResult};

use crate::OneWireCrc;

/// Factory-programmed 64-bit identifier of a 1-Wire device.
///
/// | Byte | Description |
/// |------|-------------|
/// | 0 | Family code (e.g., 0x28 for DS18B20) |
/// | 1-6 | Serial number, least significant byte first |
/// | 7 | CRC-8 of bytes 0-6 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct RomCode([u8; RomCode::BYTES]);

impl RomCode {
    /// The length of a ROM code in bytes
    pub const BYTES: usize = 8;

    /// Wrap raw bytes if their CRC checks out.
    pub fn new(raw: [u8; Self::BYTES]) -> Option<Self> {
        OneWireCrc::validate(&raw).then_some(Self(raw))
    }

    /// Family code of the device.
    pub fn family(&self) -> u8 {
        self.0[0]
    }

    /// The 48-bit serial number, as transmitted.
    pub fn serial(&self) -> [u8; 6] {
        let mut serial = [0; 6];
        serial.copy_from_slice(&self.0[1..7]);
        serial
    }

    /// The CRC byte closing the ROM code.
    pub fn crc(&self) -> u8 {
        self.0[7]
    }

    /// Raw bytes in bus order.
    pub fn as_bytes(&self) -> &[u8; Self::BYTES] {
        &self.0
    }
}

impl From<RomCode> for u64 {
    fn from(rom: RomCode) -> u64 {
        u64::from_le_bytes(rom.0)
    }
}

impl AsRef<[u8]> for RomCode {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for RomCode {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for byte in self.0.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
