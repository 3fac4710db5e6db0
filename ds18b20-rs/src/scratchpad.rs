use bitfield_struct::bitfield;
use embedded_onewire::OneWireCrc;
use fixed::types::I12F4;

/// Temperature in degrees Celsius, 4 fractional bits (1/16 °C).
pub type Temperature = I12F4;

/// The 9-byte scratchpad memory of a DS18B20.
///
/// | Byte | Description |
/// |------|-------------|
/// | 0 | Temperature LSB |
/// | 1 | Temperature MSB |
/// | 2 | TH alarm register or user byte 1 |
/// | 3 | TL alarm register or user byte 2 |
/// | 4 | Configuration register |
/// | 5-7 | Reserved |
/// | 8 | CRC-8 of bytes 0-7 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scratchpad([u8; Scratchpad::BYTES]);

impl Scratchpad {
    /// The length of the scratchpad in bytes
    pub const BYTES: usize = 9;

    /// Wrap raw bytes if their CRC checks out.
    pub fn new(raw: [u8; Self::BYTES]) -> Option<Self> {
        OneWireCrc::validate(&raw).then_some(Self(raw))
    }

    /// Signed raw conversion result in 1/16 °C.
    pub fn raw_temperature(&self) -> i16 {
        i16::from_le_bytes([self.0[0], self.0[1]])
    }

    /// Conversion result as a fixed-point value.
    pub fn temperature(&self) -> Temperature {
        Temperature::from_le_bytes([self.0[0], self.0[1]])
    }

    /// Conversion result in degrees Celsius.
    pub fn celsius(&self) -> f32 {
        self.temperature().to_num()
    }

    /// High alarm threshold, in whole degrees.
    pub fn alarm_high(&self) -> i8 {
        self.0[2] as i8
    }

    /// Low alarm threshold, in whole degrees.
    pub fn alarm_low(&self) -> i8 {
        self.0[3] as i8
    }

    /// Configuration register.
    pub fn configuration(&self) -> Configuration {
        Configuration::from_bits(self.0[4])
    }

    /// Raw bytes in bus order.
    pub fn as_bytes(&self) -> &[u8; Self::BYTES] {
        &self.0
    }
}

/// Configuration register (scratchpad byte 4).
///
/// Only bits 5 and 6 carry information; the rest read back as fixed values.
#[bitfield(u8)]
pub struct Configuration {
    #[bits(5)]
    _reserved_low: u8,
    /// Conversion resolution, selected by R0 (bit 5) and R1 (bit 6).
    #[bits(2)]
    pub resolution: Resolution,
    _reserved_high: bool,
}

/// Thermometer resolution. Lower resolutions leave the least significant
/// temperature bits undefined and convert faster.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Resolution {
    /// 0.5 °C steps
    Bits9 = 0,
    /// 0.25 °C steps
    Bits10 = 1,
    /// 0.125 °C steps
    Bits11 = 2,
    /// 0.0625 °C steps, power-on default
    #[default]
    Bits12 = 3,
}

impl Resolution {
    const fn from_bits(value: u8) -> Self {
        match value & 0b11 {
            0 => Self::Bits9,
            1 => Self::Bits10,
            2 => Self::Bits11,
            _ => Self::Bits12,
        }
    }

    const fn into_bits(self) -> u8 {
        self as u8
    }

    /// Maximum conversion time at this resolution, in microseconds.
    pub fn conversion_time_us(&self) -> u32 {
        use Resolution::*;
        match self {
            Bits9 => 93750,
            Bits10 => 187500,
            Bits11 => 375000,
            Bits12 => 750000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Resolution, Scratchpad};
    use embedded_onewire::crc8;

    fn scratchpad(lsb: u8, msb: u8, config: u8) -> [u8; 9] {
        let mut raw = [lsb, msb, 0x4b, 0x46, config, 0xff, 0x0c, 0x10, 0];
        raw[8] = crc8(&raw[..8]);
        raw
    }

    #[test]
    fn power_on_value() {
        let pad = Scratchpad::new(scratchpad(0x50, 0x05, 0x7f)).unwrap();
        assert_eq!(pad.raw_temperature(), 0x0550);
        assert_eq!(pad.celsius(), 85.0);
        assert_eq!(pad.alarm_high(), 75);
        assert_eq!(pad.alarm_low(), 70);
        assert_eq!(pad.configuration().resolution(), Resolution::Bits12);
    }

    #[test]
    fn datasheet_conversions() {
        // (raw, °C) pairs from the DS18B20 data sheet, table 1
        let table: [(u16, f32); 9] = [
            (0x07d0, 125.0),
            (0x0191, 25.0625),
            (0x00a2, 10.125),
            (0x0008, 0.5),
            (0x0000, 0.0),
            (0xfff8, -0.5),
            (0xff5e, -10.125),
            (0xfe6f, -25.0625),
            (0xfc90, -55.0),
        ];
        for (raw, celsius) in table {
            let [lsb, msb] = raw.to_le_bytes();
            let pad = Scratchpad::new(scratchpad(lsb, msb, 0x7f)).unwrap();
            assert_eq!(pad.celsius(), celsius, "raw {raw:#06x}");
        }
    }

    #[test]
    fn resolution_bits() {
        let pad = Scratchpad::new(scratchpad(0, 0, 0x1f)).unwrap();
        assert_eq!(pad.configuration().resolution(), Resolution::Bits9);
        assert_eq!(Resolution::Bits9.conversion_time_us(), 93750);
        let pad = Scratchpad::new(scratchpad(0, 0, 0x5f)).unwrap();
        assert_eq!(pad.configuration().resolution(), Resolution::Bits11);
    }

    #[test]
    fn corrupted_crc_is_rejected() {
        let mut raw = scratchpad(0x50, 0x05, 0x7f);
        raw[8] ^= 0xff;
        assert!(Scratchpad::new(raw).is_none());
    }
}
